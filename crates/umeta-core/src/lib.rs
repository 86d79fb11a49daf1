//! Extraction of reflection metadata from annotated C++ headers.
//!
//! Headers are read line by line. `UCLASS`/`USTRUCT`/`UENUM` blocks become
//! [`ContainerRecord`]s holding their `UPROPERTY` and `UFUNCTION` members;
//! anything malformed becomes a [`FailureRecord`] instead.

pub mod builder;
pub mod config;
pub mod model;
pub mod parser;
pub mod scanner;
pub mod storage;

pub use builder::{BuildError, ObjectBuilder, ParseOutcome};
pub use config::{Config, ConfigError, OutputConfig, ScanConfig};
pub use model::{
    ContainerKind, ContainerRecord, EntityKind, FailedEntity, FailureReason, FailureRecord, Flag,
    FunctionRecord, Param, PropertyRecord,
};
pub use parser::{parse, HeaderParser, ParseError, ParseSession, ParseState, ParserOptions};
pub use scanner::{ScanError, ScanStats, Scanner};
pub use storage::{JsonStore, RecordStore, StorageError};
