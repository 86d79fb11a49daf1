use thiserror::Error;

use crate::model::EntityKind;

/// Object builder misuse. Every variant is a protocol violation: the
/// caller asked for an operation the builder's current state forbids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("protocol violation: {operation} while a {entity} is already open")]
    AlreadyOpen {
        operation: &'static str,
        entity: EntityKind,
    },

    #[error("protocol violation: {operation} with no open {entity}")]
    NotOpen {
        operation: &'static str,
        entity: EntityKind,
    },

    #[error("protocol violation: {operation} while a {entity} member is unfinished")]
    MemberStillOpen {
        operation: &'static str,
        entity: EntityKind,
    },
}
