use std::collections::BTreeMap;
use std::sync::Arc;

use crate::executors::{Executor, ShellExecutor};
use crate::models::{CoreError, TaskId};
use crate::persistence::PersistenceResult;

pub type ExecutorFactory = fn(TaskId) -> Arc<dyn Executor>;

// Executor-name strings map to factories, populated at process startup.
// Resolution splits a task id on its first hyphen, so registered names must
// not contain hyphens.
#[derive(Clone, Default, Debug)]
pub struct ExecutorRegistry {
    factories: BTreeMap<String, ExecutorFactory>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(ShellExecutor::NAME, shell_factory)
            .expect("builtin executor names are hyphen-free");
        registry
    }

    pub fn register(&mut self, name: &str, factory: ExecutorFactory) -> PersistenceResult<()> {
        if name.contains('-') {
            return Err(CoreError::invalid_input(format!(
                "executor name '{name}' must not contain '-'"
            ))
            .with_executor(name));
        }
        self.factories.insert(name.to_string(), factory);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn resolve(&self, taskid: &TaskId) -> PersistenceResult<Arc<dyn Executor>> {
        let name = taskid.executor_name();
        let factory = self.factories.get(name).ok_or_else(|| {
            CoreError::not_found(format!("executor '{name}' is not registered"))
                .with_executor(name)
                .with_taskid(taskid.as_str())
        })?;
        Ok(factory(taskid.clone()))
    }
}

fn shell_factory(taskid: TaskId) -> Arc<dyn Executor> {
    Arc::new(ShellExecutor::from_taskid(taskid))
}
