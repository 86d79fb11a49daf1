//! Annotation flag tokens.

use serde::{Serialize, Serializer};
use std::fmt;

/// A single token from an annotation's argument list.
///
/// `UPROPERTY(EditAnywhere, meta=(ClampMin="0"))` yields one `Simple` and
/// one `Composite` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    /// A plain token such as `EditAnywhere` or `Category="Stats"`.
    Simple(String),
    /// An embedded sub-list such as `meta=(ClampMin="0", ClampMax="100")`.
    Composite {
        /// Raw text preceding the opening parenthesis, e.g. `meta=`.
        key: String,
        /// Trimmed entries between the parentheses, in source order.
        entries: Vec<String>,
    },
}

impl Flag {
    /// Create a simple flag.
    pub fn simple(token: impl Into<String>) -> Self {
        Flag::Simple(token.into())
    }

    /// Create a composite flag from a key and its entries.
    pub fn composite<I, S>(key: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Flag::Composite {
            key: key.into(),
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of the flag without any `=value` or sub-list part.
    pub fn name(&self) -> &str {
        let raw = match self {
            Flag::Simple(token) => token.as_str(),
            Flag::Composite { key, .. } => key.as_str(),
        };
        raw.split('=').next().unwrap_or(raw).trim()
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Flag::Composite { .. })
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Simple(token) => write!(f, "{}", token),
            Flag::Composite { key, entries } => write!(f, "{}({})", key, entries.join(", ")),
        }
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_renders_as_single_token() {
        let flag = Flag::composite("meta=", ["ClampMin=\"0\"", "ClampMax=\"100\""]);
        assert_eq!(flag.to_string(), "meta=(ClampMin=\"0\", ClampMax=\"100\")");
        assert_eq!(flag.name(), "meta");
        assert!(flag.is_composite());
    }

    #[test]
    fn test_simple_name_strips_value() {
        assert_eq!(Flag::simple("Category=\"Stats\"").name(), "Category");
        assert_eq!(Flag::simple("EditAnywhere").name(), "EditAnywhere");
    }

    #[test]
    fn test_serializes_as_string() {
        let flags = vec![Flag::simple("BlueprintCallable"), Flag::composite("meta=", ["A"])];
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"["BlueprintCallable","meta=(A)"]"#);
    }
}
