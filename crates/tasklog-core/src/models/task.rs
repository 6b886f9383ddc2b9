use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// Task ids have the shape `<executor-name>-<uuid>`. Executor names must not
// contain hyphens; everything after the first hyphen is opaque.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn mint(executor_name: &str) -> Self {
        Self(format!("{executor_name}-{}", Uuid::new_v4()))
    }

    pub fn executor_name(&self) -> &str {
        self.0.split_once('-').map_or(self.0.as_str(), |(name, _)| name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub executor: String,
    pub uid: TaskId,
    pub data: Value,
}
