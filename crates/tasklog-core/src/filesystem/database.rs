use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::executors::Executor;
use crate::fsutil;
use crate::models::{CoreError, TaskId};
use crate::persistence::{DocumentUpdates, PersistenceResult, TaskDatabase};
use crate::registry::ExecutorRegistry;

use super::task::FilesystemTask;

// Owns the root storage directory `<config_dir>/database` and every
// directory-scoped operation across executors and tasks. Single concrete
// backend of the `TaskDatabase` trait.
#[derive(Debug)]
pub struct FilesystemDatabase {
    data_base: PathBuf,
    registry: ExecutorRegistry,
}

impl FilesystemDatabase {
    // The configuration directory must already exist; the database root
    // under it is created when absent.
    pub fn open(config_dir: &Path, registry: ExecutorRegistry) -> PersistenceResult<Self> {
        if !config_dir.exists() {
            return Err(CoreError::config(format!(
                "{} must exist to create a database there",
                config_dir.display()
            )));
        }
        let data_base = config_dir.join("database");
        fsutil::ensure_dir(&data_base)?;
        Ok(Self {
            data_base,
            registry,
        })
    }

    pub fn data_base(&self) -> &Path {
        &self.data_base
    }

    pub fn registry(&self) -> &ExecutorRegistry {
        &self.registry
    }

    // Immediate subdirectories of the root, one per executor namespace.
    // Non-directories under the root are skipped. Re-iterable by calling
    // again.
    pub fn iter_executors(&self) -> PersistenceResult<impl Iterator<Item = PathBuf> + use<>> {
        let entries = fs::read_dir(&self.data_base)
            .map_err(|error| CoreError::storage("list executors", error))?;
        Ok(entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir()))
    }

    fn latest_taskid(&self) -> PersistenceResult<TaskId> {
        let latest = fsutil::latest_modified(&self.data_base, "json")?
            .ok_or_else(|| CoreError::not_found("no tasks exist in the database"))?;
        let stem = latest
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| CoreError::not_found("no tasks exist in the database"))?;
        Ok(TaskId::from(stem))
    }
}

impl TaskDatabase for FilesystemDatabase {
    type Task = FilesystemTask;

    fn add_task(&self, executor: Arc<dyn Executor>) -> PersistenceResult<FilesystemTask> {
        FilesystemTask::new(executor, &self.data_base, false)
    }

    // The stored document always reflects the executor's current export;
    // caller-supplied updates are accepted but not applied.
    fn update_task(
        &self,
        executor: Arc<dyn Executor>,
        _updates: Option<&DocumentUpdates>,
    ) -> PersistenceResult<()> {
        let task = FilesystemTask::new(executor.clone(), &self.data_base, true)?;
        let mut updates = DocumentUpdates::new();
        updates.insert("data".to_string(), executor.export());
        task.update(Some(&updates))
    }

    // Without a task id, resolves the most recently modified record anywhere
    // under the root.
    fn get_task(&self, taskid: Option<&str>) -> PersistenceResult<FilesystemTask> {
        let taskid = match taskid {
            Some(taskid) => TaskId::from(taskid),
            None => self.latest_taskid()?,
        };
        let executor = self.registry.resolve(&taskid)?;
        FilesystemTask::new(executor, &self.data_base, true)
    }

    fn delete_task(&self, taskid: &str) -> PersistenceResult<()> {
        let task = self.get_task(Some(taskid))?;
        fs::remove_file(task.filename())
            .map_err(|error| CoreError::storage("remove task document", error))?;
        tracing::info!(taskid, "task removed");
        Ok(())
    }

    fn delete_executor(&self, name: &str) -> PersistenceResult<()> {
        let executor_dir = self.data_base.join(name);
        if !executor_dir.exists() {
            return Err(
                CoreError::not_found(format!("executor '{name}' does not exist"))
                    .with_executor(name),
            );
        }
        fs::remove_dir_all(&executor_dir)
            .map_err(|error| CoreError::storage("remove executor directory", error))?;
        tracing::info!(executor = name, "executor namespace removed");
        Ok(())
    }

    // Existence is re-checked before each removal so namespaces that vanish
    // mid-iteration are skipped. A no-op on an empty root.
    fn clear(&self) -> PersistenceResult<()> {
        for executor_dir in self.iter_executors()? {
            if executor_dir.exists() {
                tracing::info!(directory = %executor_dir.display(), "removing executor directory");
                fs::remove_dir_all(&executor_dir)
                    .map_err(|error| CoreError::storage("clear executor directory", error))?;
            }
        }
        Ok(())
    }

    // Unordered beyond traversal order; callers must not assume any sort.
    fn list_tasks(&self, executor: Option<&str>) -> PersistenceResult<Vec<TaskId>> {
        let listpath = match executor {
            Some(name) => self.data_base.join(name),
            None => self.data_base.clone(),
        };
        Ok(fsutil::recursive_find(&listpath, "json")?
            .into_iter()
            .filter_map(|path| {
                path.file_stem()
                    .map(|stem| TaskId::from(stem.to_string_lossy().into_owned()))
            })
            .collect())
    }

    fn executor_names(&self) -> PersistenceResult<Vec<String>> {
        Ok(self
            .iter_executors()?
            .filter_map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .collect())
    }
}
