use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CoreErrorKind {
    Config,
    NotFound,
    InvalidInput,
    ParseFailure,
    StorageFailure,
    ProcessFailure,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind:?}: {message}")]
pub struct CoreError {
    pub executor: Option<String>,
    pub taskid: Option<String>,
    pub kind: CoreErrorKind,
    pub message: String,
}

impl CoreError {
    pub fn new(kind: CoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            executor: None,
            taskid: None,
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::Config, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(CoreErrorKind::InvalidInput, message)
    }

    pub fn storage(operation_name: &str, error: std::io::Error) -> Self {
        Self::new(
            CoreErrorKind::StorageFailure,
            format!("{operation_name}: {error}"),
        )
    }

    pub fn parse(operation_name: &str, error: serde_json::Error) -> Self {
        Self::new(
            CoreErrorKind::ParseFailure,
            format!("{operation_name}: {error}"),
        )
    }

    pub fn process(operation_name: &str, error: std::io::Error) -> Self {
        Self::new(
            CoreErrorKind::ProcessFailure,
            format!("{operation_name}: {error}"),
        )
    }

    pub fn with_executor(mut self, name: impl Into<String>) -> Self {
        self.executor = Some(name.into());
        self
    }

    pub fn with_taskid(mut self, taskid: impl Into<String>) -> Self {
        self.taskid = Some(taskid.into());
        self
    }
}
