//! Records for entities that could not be completed.

use serde::Serialize;
use std::fmt;

use super::container::ContainerRecord;
use super::member::{FunctionRecord, PropertyRecord};

/// The three kinds of entity the builder constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Container,
    Property,
    Function,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(f, "container"),
            Self::Property => write!(f, "property"),
            Self::Function => write!(f, "function"),
        }
    }
}

/// Why an entity was failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The line after the annotation is not a declaration of the expected shape.
    MalformedDeclaration,
    /// The annotation's flag list nests too deeply or is otherwise unreadable.
    MalformedFlags,
    /// Input ended while the container was still open.
    UnterminatedContainer,
    /// Input ended inside a member's annotation or before its declaration.
    UnterminatedMember,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDeclaration => write!(f, "malformed declaration"),
            Self::MalformedFlags => write!(f, "malformed flags"),
            Self::UnterminatedContainer => write!(f, "unterminated container"),
            Self::UnterminatedMember => write!(f, "unterminated member"),
        }
    }
}

/// The partial entity handed to the failure store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FailedEntity {
    Container(ContainerRecord),
    Property(PropertyRecord),
    Function(FunctionRecord),
}

impl FailedEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            FailedEntity::Container(_) => EntityKind::Container,
            FailedEntity::Property(_) => EntityKind::Property,
            FailedEntity::Function(_) => EntityKind::Function,
        }
    }
}

/// A failed entity with the line and reason it failed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub kind: EntityKind,
    /// 1-based line number where the failure was decided.
    pub line: usize,
    pub reason: FailureReason,
    pub entity: FailedEntity,
}

impl FailureRecord {
    pub fn new(line: usize, reason: FailureReason, entity: FailedEntity) -> Self {
        Self {
            kind: entity.kind(),
            line,
            reason,
            entity,
        }
    }
}
