use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::CoreError;
use crate::persistence::PersistenceResult;

pub fn ensure_dir(path: &Path) -> PersistenceResult<()> {
    fs::create_dir_all(path).map_err(|error| CoreError::storage("create directory", error))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> PersistenceResult<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|error| CoreError::parse("serialize document", error))?;
    fs::write(path, content).map_err(|error| CoreError::storage("write document", error))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> PersistenceResult<T> {
    let content =
        fs::read_to_string(path).map_err(|error| CoreError::storage("read document", error))?;
    serde_json::from_str(&content).map_err(|error| CoreError::parse("parse document", error))
}

// A missing directory yields an empty result rather than an error; callers
// treat "nothing on disk yet" as an empty database.
pub fn recursive_find(dir: &Path, extension: &str) -> PersistenceResult<Vec<PathBuf>> {
    let mut found = Vec::new();
    if dir.exists() {
        collect_files(dir, extension, &mut found)?;
    }
    Ok(found)
}

fn collect_files(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) -> PersistenceResult<()> {
    let entries = fs::read_dir(dir).map_err(|error| CoreError::storage("scan directory", error))?;
    for entry in entries {
        let entry = entry.map_err(|error| CoreError::storage("scan directory", error))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, extension, found)?;
        } else if path.extension().is_some_and(|ext| ext == extension) {
            found.push(path);
        }
    }
    Ok(())
}

// Greatest mtime wins; on a tie the file seen first in traversal order is
// kept.
pub fn latest_modified(dir: &Path, extension: &str) -> PersistenceResult<Option<PathBuf>> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for path in recursive_find(dir, extension)? {
        let modified = fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .map_err(|error| CoreError::storage("stat document", error))?;
        let newer = match &latest {
            Some((current, _)) => modified > *current,
            None => true,
        };
        if newer {
            latest = Some((modified, path));
        }
    }
    Ok(latest.map(|(_, path)| path))
}

#[cfg(test)]
mod tests {
    use super::{latest_modified, recursive_find};
    use std::path::Path;

    #[test]
    fn recursive_find_on_missing_directory_is_empty() {
        let found = recursive_find(Path::new("/definitely/not/here"), "json").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn latest_modified_on_missing_directory_is_none() {
        let latest = latest_modified(Path::new("/definitely/not/here"), "json").unwrap();
        assert!(latest.is_none());
    }

    #[test]
    fn recursive_find_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.txt"), "ignored").unwrap();

        let found = recursive_find(dir.path(), "json").unwrap();
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("nested/a.json"));
    }
}
