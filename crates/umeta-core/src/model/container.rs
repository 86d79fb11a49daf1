//! Container records (`UCLASS`, `USTRUCT`, `UENUM`).

use serde::Serialize;
use std::fmt;

use super::member::{FunctionRecord, PropertyRecord};

/// Which annotation opened a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Class,
    Struct,
    Enum,
}

impl ContainerKind {
    /// The annotation token that opens this kind of container.
    pub fn marker(&self) -> &'static str {
        match self {
            ContainerKind::Class => "UCLASS",
            ContainerKind::Struct => "USTRUCT",
            ContainerKind::Enum => "UENUM",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Struct => write!(f, "struct"),
            Self::Enum => write!(f, "enum"),
        }
    }
}

/// A documented class, struct or enum together with its annotated members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRecord {
    /// Display name. Taken from the documentation comment that preceded
    /// the opening annotation, not from the declared identifier.
    #[serde(rename = "name")]
    pub display_name: String,
    pub kind: ContainerKind,
    /// Identifier from the `class Foo` line following the annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_name: Option<String>,
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Vec<PropertyRecord>,
    pub functions: Vec<FunctionRecord>,
}

impl ContainerRecord {
    /// Create an empty container.
    pub fn new(kind: ContainerKind, display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            kind,
            declared_name: None,
            namespace: None,
            description: None,
            properties: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Number of members attached so far.
    pub fn member_count(&self) -> usize {
        self.properties.len() + self.functions.len()
    }
}
