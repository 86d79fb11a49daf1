//! Single-entity-at-a-time construction of parse records.
//!
//! The builder holds at most one open container and, independently, at
//! most one open property and one open function. Finished members are
//! attached to the open container; failed ones are moved into the failure
//! list without touching the container.

mod error;

pub use error::BuildError;

use tracing::debug;

use crate::model::{
    ContainerKind, ContainerRecord, EntityKind, FailedEntity, FailureReason, FailureRecord, Flag,
    FunctionRecord, Param, PropertyRecord,
};

/// Field updates for the open container. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ContainerUpdate {
    pub display_name: Option<String>,
    pub declared_name: Option<String>,
    pub namespace: Option<String>,
    pub description: Option<String>,
}

/// Field updates for the open property. Flags are always appended.
#[derive(Debug, Clone, Default)]
pub struct PropertyUpdate {
    pub name: Option<String>,
    pub flags: Vec<Flag>,
    pub type_name: Option<String>,
    pub description: Option<String>,
    pub is_array: Option<bool>,
}

/// Field updates for the open function. Flags are always appended.
#[derive(Debug, Clone, Default)]
pub struct FunctionUpdate {
    pub name: Option<String>,
    pub flags: Vec<Flag>,
    pub args: Option<Vec<Param>>,
    pub return_type: Option<String>,
    pub description: Option<String>,
    pub is_static: Option<bool>,
}

/// Everything a builder produced over one parse session.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParseOutcome {
    /// Containers finalized on their closing brace, in document order.
    pub containers: Vec<ContainerRecord>,
    /// Failed entities, in the order they failed.
    pub failures: Vec<FailureRecord>,
}

#[derive(Debug, Default)]
pub struct ObjectBuilder {
    container: Option<ContainerRecord>,
    property: Option<PropertyRecord>,
    function: Option<FunctionRecord>,
    outcome: ParseOutcome,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_open_container(&self) -> bool {
        self.container.is_some()
    }

    pub fn has_open_property(&self) -> bool {
        self.property.is_some()
    }

    pub fn has_open_function(&self) -> bool {
        self.function.is_some()
    }

    /// The container currently under construction.
    pub fn open_container(&self) -> Option<&ContainerRecord> {
        self.container.as_ref()
    }

    // ------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------

    pub fn start_container(
        &mut self,
        kind: ContainerKind,
        display_name: impl Into<String>,
    ) -> Result<(), BuildError> {
        if self.container.is_some() {
            return Err(BuildError::AlreadyOpen {
                operation: "start_container",
                entity: EntityKind::Container,
            });
        }
        let record = ContainerRecord::new(kind, display_name);
        debug!(kind = %record.kind, name = %record.display_name, "container opened");
        self.container = Some(record);
        Ok(())
    }

    pub fn update_container(&mut self, update: ContainerUpdate) -> Result<(), BuildError> {
        let container = self.container.as_mut().ok_or(BuildError::NotOpen {
            operation: "update_container",
            entity: EntityKind::Container,
        })?;

        if let Some(name) = update.display_name {
            container.display_name = name;
        }
        if update.declared_name.is_some() {
            container.declared_name = update.declared_name;
        }
        if update.namespace.is_some() {
            container.namespace = update.namespace;
        }
        if update.description.is_some() {
            container.description = update.description;
        }
        Ok(())
    }

    /// Close the open container and hand it to the finished list.
    pub fn finalize_container(&mut self) -> Result<(), BuildError> {
        self.ensure_members_closed("finalize_container")?;
        let container = self.container.take().ok_or(BuildError::NotOpen {
            operation: "finalize_container",
            entity: EntityKind::Container,
        })?;
        debug!(
            name = %container.display_name,
            members = container.member_count(),
            "container finalized"
        );
        self.outcome.containers.push(container);
        Ok(())
    }

    /// Abandon the open container, recording it as a failure.
    pub fn fail_container(&mut self, reason: FailureReason, line: usize) -> Result<(), BuildError> {
        self.ensure_members_closed("fail_container")?;
        let container = self.container.take().ok_or(BuildError::NotOpen {
            operation: "fail_container",
            entity: EntityKind::Container,
        })?;
        debug!(name = %container.display_name, %reason, line, "container failed");
        self.outcome.failures.push(FailureRecord::new(
            line,
            reason,
            FailedEntity::Container(container),
        ));
        Ok(())
    }

    fn ensure_members_closed(&self, operation: &'static str) -> Result<(), BuildError> {
        if self.property.is_some() {
            return Err(BuildError::MemberStillOpen {
                operation,
                entity: EntityKind::Property,
            });
        }
        if self.function.is_some() {
            return Err(BuildError::MemberStillOpen {
                operation,
                entity: EntityKind::Function,
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn start_property(&mut self) -> Result<(), BuildError> {
        if self.container.is_none() {
            return Err(BuildError::NotOpen {
                operation: "start_property",
                entity: EntityKind::Container,
            });
        }
        if self.property.is_some() {
            return Err(BuildError::AlreadyOpen {
                operation: "start_property",
                entity: EntityKind::Property,
            });
        }
        self.property = Some(PropertyRecord::default());
        Ok(())
    }

    pub fn update_property(&mut self, update: PropertyUpdate) -> Result<(), BuildError> {
        let property = self.property.as_mut().ok_or(BuildError::NotOpen {
            operation: "update_property",
            entity: EntityKind::Property,
        })?;

        if update.name.is_some() {
            property.name = update.name;
        }
        property.flags.extend(update.flags);
        if update.type_name.is_some() {
            property.type_name = update.type_name;
        }
        if update.description.is_some() {
            property.description = update.description;
        }
        if let Some(is_array) = update.is_array {
            property.is_array = is_array;
        }
        Ok(())
    }

    /// Attach the open property to the open container.
    pub fn end_property(&mut self) -> Result<(), BuildError> {
        let container = self.container.as_mut().ok_or(BuildError::NotOpen {
            operation: "end_property",
            entity: EntityKind::Container,
        })?;
        let property = self.property.take().ok_or(BuildError::NotOpen {
            operation: "end_property",
            entity: EntityKind::Property,
        })?;
        container.properties.push(property);
        Ok(())
    }

    /// Discard the open property, recording it as a failure.
    pub fn fail_property(&mut self, reason: FailureReason, line: usize) -> Result<(), BuildError> {
        let property = self.property.take().ok_or(BuildError::NotOpen {
            operation: "fail_property",
            entity: EntityKind::Property,
        })?;
        debug!(name = ?property.name, %reason, line, "property failed");
        self.outcome.failures.push(FailureRecord::new(
            line,
            reason,
            FailedEntity::Property(property),
        ));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Functions
    // ------------------------------------------------------------------

    pub fn start_function(&mut self) -> Result<(), BuildError> {
        if self.container.is_none() {
            return Err(BuildError::NotOpen {
                operation: "start_function",
                entity: EntityKind::Container,
            });
        }
        if self.function.is_some() {
            return Err(BuildError::AlreadyOpen {
                operation: "start_function",
                entity: EntityKind::Function,
            });
        }
        self.function = Some(FunctionRecord::default());
        Ok(())
    }

    pub fn update_function(&mut self, update: FunctionUpdate) -> Result<(), BuildError> {
        let function = self.function.as_mut().ok_or(BuildError::NotOpen {
            operation: "update_function",
            entity: EntityKind::Function,
        })?;

        if update.name.is_some() {
            function.name = update.name;
        }
        function.flags.extend(update.flags);
        if let Some(args) = update.args {
            function.args = args;
        }
        if update.return_type.is_some() {
            function.return_type = update.return_type;
        }
        if update.description.is_some() {
            function.description = update.description;
        }
        if let Some(is_static) = update.is_static {
            function.is_static = is_static;
        }
        Ok(())
    }

    /// Attach the open function to the open container.
    pub fn end_function(&mut self) -> Result<(), BuildError> {
        let container = self.container.as_mut().ok_or(BuildError::NotOpen {
            operation: "end_function",
            entity: EntityKind::Container,
        })?;
        let function = self.function.take().ok_or(BuildError::NotOpen {
            operation: "end_function",
            entity: EntityKind::Function,
        })?;
        container.functions.push(function);
        Ok(())
    }

    /// Discard the open function, recording it as a failure.
    pub fn fail_function(&mut self, reason: FailureReason, line: usize) -> Result<(), BuildError> {
        let function = self.function.take().ok_or(BuildError::NotOpen {
            operation: "fail_function",
            entity: EntityKind::Function,
        })?;
        debug!(name = ?function.name, %reason, line, "function failed");
        self.outcome.failures.push(FailureRecord::new(
            line,
            reason,
            FailedEntity::Function(function),
        ));
        Ok(())
    }

    /// Consume the builder, returning finished and failed records.
    ///
    /// Anything still open is dropped; callers resolve open entities first.
    pub fn into_outcome(self) -> ParseOutcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_container() -> ObjectBuilder {
        let mut builder = ObjectBuilder::new();
        builder.start_container(ContainerKind::Class, "Actor").unwrap();
        builder
    }

    #[test]
    fn test_double_start_container_is_violation() {
        let mut builder = builder_with_container();
        let err = builder
            .start_container(ContainerKind::Struct, "Other")
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::AlreadyOpen {
                operation: "start_container",
                entity: EntityKind::Container,
            }
        );
    }

    #[test]
    fn test_member_requires_open_container() {
        let mut builder = ObjectBuilder::new();
        assert!(matches!(
            builder.start_property(),
            Err(BuildError::NotOpen {
                entity: EntityKind::Container,
                ..
            })
        ));
        assert!(builder.start_function().is_err());
    }

    #[test]
    fn test_end_without_start_is_violation() {
        let mut builder = builder_with_container();
        assert!(builder.end_property().is_err());
        assert!(builder.end_function().is_err());
        assert!(builder.fail_property(FailureReason::MalformedDeclaration, 1).is_err());
        assert!(builder.update_function(FunctionUpdate::default()).is_err());
    }

    #[test]
    fn test_property_and_function_open_independently() {
        let mut builder = builder_with_container();
        builder.start_property().unwrap();
        builder.start_function().unwrap();
        assert!(builder.start_property().is_err());
        assert!(builder.start_function().is_err());
    }

    #[test]
    fn test_flags_append_and_absent_fields_keep_values() {
        let mut builder = builder_with_container();
        builder.start_property().unwrap();
        builder
            .update_property(PropertyUpdate {
                flags: vec![Flag::simple("EditAnywhere")],
                description: Some("// Health".to_string()),
                ..Default::default()
            })
            .unwrap();
        builder
            .update_property(PropertyUpdate {
                name: Some("Health".to_string()),
                flags: vec![Flag::simple("BlueprintReadOnly")],
                ..Default::default()
            })
            .unwrap();
        builder.end_property().unwrap();
        builder.finalize_container().unwrap();

        let outcome = builder.into_outcome();
        let property = &outcome.containers[0].properties[0];
        assert_eq!(property.name.as_deref(), Some("Health"));
        assert_eq!(property.description.as_deref(), Some("// Health"));
        assert_eq!(
            property.flags,
            vec![Flag::simple("EditAnywhere"), Flag::simple("BlueprintReadOnly")]
        );
    }

    #[test]
    fn test_failed_member_does_not_touch_container() {
        let mut builder = builder_with_container();
        builder.start_function().unwrap();
        builder
            .update_function(FunctionUpdate {
                flags: vec![Flag::simple("BlueprintCallable")],
                ..Default::default()
            })
            .unwrap();
        builder.fail_function(FailureReason::MalformedDeclaration, 7).unwrap();
        assert_eq!(builder.open_container().unwrap().member_count(), 0);

        builder.finalize_container().unwrap();
        let outcome = builder.into_outcome();
        assert_eq!(outcome.containers.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].kind, EntityKind::Function);
        assert_eq!(outcome.failures[0].line, 7);
    }

    #[test]
    fn test_finalize_with_open_member_is_violation() {
        let mut builder = builder_with_container();
        builder.start_property().unwrap();
        assert_eq!(
            builder.finalize_container().unwrap_err(),
            BuildError::MemberStillOpen {
                operation: "finalize_container",
                entity: EntityKind::Property,
            }
        );
        assert!(builder.has_open_container());
    }

    #[test]
    fn test_fail_container_records_partial_members() {
        let mut builder = builder_with_container();
        builder.start_property().unwrap();
        builder
            .update_property(PropertyUpdate {
                name: Some("Speed".to_string()),
                ..Default::default()
            })
            .unwrap();
        builder.end_property().unwrap();
        builder
            .fail_container(FailureReason::UnterminatedContainer, 20)
            .unwrap();

        let outcome = builder.into_outcome();
        assert!(outcome.containers.is_empty());
        match &outcome.failures[0].entity {
            FailedEntity::Container(container) => assert_eq!(container.properties.len(), 1),
            other => panic!("unexpected failure entity: {:?}", other),
        }
    }
}
