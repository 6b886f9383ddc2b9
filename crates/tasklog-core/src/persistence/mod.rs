use std::sync::Arc;

use serde_json::{Map, Value};

use crate::executors::Executor;
use crate::models::{CoreError, TaskId};

pub type PersistenceResult<T> = Result<T, CoreError>;

// Shallow top-level updates merged into a stored task document.
pub type DocumentUpdates = Map<String, Value>;

pub trait TaskDatabase: Send + Sync {
    type Task;

    fn add_task(&self, executor: Arc<dyn Executor>) -> PersistenceResult<Self::Task>;

    fn update_task(
        &self,
        executor: Arc<dyn Executor>,
        updates: Option<&DocumentUpdates>,
    ) -> PersistenceResult<()>;

    fn get_task(&self, taskid: Option<&str>) -> PersistenceResult<Self::Task>;

    fn delete_task(&self, taskid: &str) -> PersistenceResult<()>;

    fn delete_executor(&self, name: &str) -> PersistenceResult<()>;

    fn clear(&self) -> PersistenceResult<()>;

    fn list_tasks(&self, executor: Option<&str>) -> PersistenceResult<Vec<TaskId>>;

    fn executor_names(&self) -> PersistenceResult<Vec<String>>;
}
