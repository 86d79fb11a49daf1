use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::OutputConfig;
use crate::model::{ContainerRecord, EntityKind, FailureRecord};

use super::error::StorageError;
use super::RecordStore;

/// JSON-array file storage.
///
/// ```text
/// data/
///   UClasses.json        # Finished containers
///   fail/
///     UClasses.json      # Failed containers
///     UProperty.json     # Failed properties
///     UFunction.json     # Failed functions
/// ```
///
/// Each file holds one JSON array; appends read it, extend it and write it
/// back.
pub struct JsonStore {
    config: OutputConfig,
}

impl JsonStore {
    /// Creates a new JsonStore with the default layout under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_config(OutputConfig {
            data_dir: data_dir.into(),
            ..OutputConfig::default()
        })
    }

    /// Creates a new JsonStore with custom configuration.
    pub fn with_config(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Reads every entry currently stored in a record file.
    pub fn read_entries(&self, path: &Path) -> Result<Vec<Value>, StorageError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&json)?;
        match value {
            Value::Array(entries) => Ok(entries),
            _ => Err(StorageError::NotAnArray(path.to_path_buf())),
        }
    }

    /// Appends serialized records to the array at `path`.
    ///
    /// A missing file is created as `[]` even when there is nothing to add.
    fn append<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<(), StorageError> {
        if records.is_empty() && path.exists() {
            return Ok(());
        }

        let mut entries = self.read_entries(path)?;
        for record in records {
            entries.push(serde_json::to_value(record)?);
        }

        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(path, json).map_err(|e| StorageError::io(path, e))?;

        debug!(path = %path.display(), appended = records.len(), total = entries.len(), "records written");
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn append_containers(&self, containers: &[ContainerRecord]) -> Result<(), StorageError> {
        self.append(&self.config.containers_path(), containers)
    }

    fn append_failures(&self, failures: &[FailureRecord]) -> Result<(), StorageError> {
        for kind in [EntityKind::Container, EntityKind::Property, EntityKind::Function] {
            let batch: Vec<&FailureRecord> = failures.iter().filter(|f| f.kind == kind).collect();
            self.append(&self.config.failures_path(kind), &batch)?;
        }
        Ok(())
    }
}

/// Ensures the directory holding `path` exists.
fn ensure_parent(path: &Path) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
    }
    Ok(())
}
