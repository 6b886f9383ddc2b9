pub mod shell;

pub use shell::ShellExecutor;

use std::fmt;

use serde_json::Value;

use crate::models::TaskId;

// The seam between the storage layer and concrete task runners. An executor
// owns its task id and decides what a task's exported payload looks like; the
// storage layer treats the export as opaque JSON.
pub trait Executor: Send + Sync {
    fn name(&self) -> &str;

    fn taskid(&self) -> &TaskId;

    fn export(&self) -> Value;

    fn summary(&self) -> String;
}

impl fmt::Debug for dyn Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("name", &self.name())
            .field("taskid", &self.taskid().as_str())
            .finish()
    }
}
