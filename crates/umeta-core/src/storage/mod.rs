mod error;
mod file;

pub use error::StorageError;
pub use file::JsonStore;

use crate::model::{ContainerRecord, FailureRecord};

/// Trait for record persistence backends.
///
/// Appends are independent of each other; a scan calls them once per file.
pub trait RecordStore {
    /// Appends finished containers.
    fn append_containers(&self, containers: &[ContainerRecord]) -> Result<(), StorageError>;

    /// Appends failure records, routed by entity kind.
    fn append_failures(&self, failures: &[FailureRecord]) -> Result<(), StorageError>;
}
