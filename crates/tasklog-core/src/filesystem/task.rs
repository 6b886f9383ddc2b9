use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::executors::Executor;
use crate::fsutil;
use crate::models::{CoreError, TaskDocument, TaskId};
use crate::persistence::{DocumentUpdates, PersistenceResult};

// One task's on-disk record: `<data_base>/<executor-name>/<taskid>.json`.
// The handle owns the file's existence and content once created.
#[derive(Debug)]
pub struct FilesystemTask {
    executor: Arc<dyn Executor>,
    data_base: PathBuf,
}

impl FilesystemTask {
    // With `should_exist` the file must already be present; this never
    // creates it. Without the flag the initial document is always written,
    // replacing anything already at that path.
    pub fn new(
        executor: Arc<dyn Executor>,
        data_base: &Path,
        should_exist: bool,
    ) -> PersistenceResult<Self> {
        let task = Self {
            executor,
            data_base: data_base.to_path_buf(),
        };
        if should_exist && !task.filename().exists() {
            return Err(CoreError::not_found(format!(
                "{} does not exist in the filesystem database",
                task.taskid()
            ))
            .with_executor(task.executor.name())
            .with_taskid(task.taskid().as_str()));
        }
        fsutil::ensure_dir(&task.executor_dir())?;
        if !should_exist {
            task.save(&task.initial_document())?;
        }
        Ok(task)
    }

    pub fn taskid(&self) -> &TaskId {
        self.executor.taskid()
    }

    pub fn executor_dir(&self) -> PathBuf {
        self.data_base.join(self.executor.name())
    }

    pub fn filename(&self) -> PathBuf {
        self.executor_dir().join(format!("{}.json", self.taskid()))
    }

    pub fn load(&self) -> PersistenceResult<Option<TaskDocument>> {
        let filename = self.filename();
        if !filename.exists() {
            return Ok(None);
        }
        fsutil::read_json(&filename).map(Some)
    }

    // Read, merge, rewrite. A missing file is a silent no-op: callers that
    // care about existence validate it when constructing the handle.
    pub fn update(&self, updates: Option<&DocumentUpdates>) -> PersistenceResult<()> {
        let Some(updates) = updates.filter(|updates| !updates.is_empty()) else {
            return Ok(());
        };
        let Some(document) = self.load()? else {
            return Ok(());
        };
        let merged = merge_document(&document, updates)?;
        self.save(&merged)
    }

    pub fn save(&self, document: &TaskDocument) -> PersistenceResult<()> {
        fsutil::write_json(&self.filename(), document)
    }

    pub fn summary(&self) -> String {
        self.executor.summary()
    }

    fn initial_document(&self) -> TaskDocument {
        TaskDocument {
            executor: self.executor.name().to_string(),
            uid: self.taskid().clone(),
            data: self.executor.export(),
        }
    }
}

// Shallow merge into the document's top-level keys. The typed record keeps
// exactly the `executor`/`uid`/`data` fields; merged keys outside those are
// dropped on rewrite.
fn merge_document(
    document: &TaskDocument,
    updates: &DocumentUpdates,
) -> PersistenceResult<TaskDocument> {
    let mut fields = match serde_json::to_value(document)
        .map_err(|error| CoreError::parse("merge document", error))?
    {
        Value::Object(fields) => fields,
        _ => unreachable!("task documents serialize to objects"),
    };
    for (key, value) in updates {
        fields.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(fields))
        .map_err(|error| CoreError::parse("merge document", error))
}
