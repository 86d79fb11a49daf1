//! Records produced by a header parse.
//!
//! A [`ContainerRecord`] owns the [`PropertyRecord`]s and [`FunctionRecord`]s
//! declared inside it. Entities that could not be completed are wrapped in a
//! [`FailureRecord`] instead.

mod container;
mod failure;
mod flag;
mod member;

pub use container::{ContainerKind, ContainerRecord};
pub use failure::{EntityKind, FailedEntity, FailureReason, FailureRecord};
pub use flag::Flag;
pub use member::{FunctionRecord, Param, PropertyRecord};
