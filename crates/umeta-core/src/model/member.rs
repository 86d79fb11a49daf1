//! Member records: annotated properties and functions.

use serde::Serialize;

use super::flag::Flag;

/// An annotated member property (`UPROPERTY`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Declared identifier.
    pub name: Option<String>,
    /// Flags from every annotation line, in insertion order.
    pub flags: Vec<Flag>,
    /// Declared type, including qualifiers such as `TArray<int32>`.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Documentation comment preceding the annotation.
    pub description: Option<String>,
    /// Whether the declaration ends with an empty `[]`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_array: bool,
}

/// A single `type name` function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    #[serde(rename = "type")]
    pub type_name: String,
    pub param_name: String,
}

impl Param {
    pub fn new(type_name: impl Into<String>, param_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            param_name: param_name.into(),
        }
    }
}

/// An annotated member function (`UFUNCTION`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub name: Option<String>,
    pub flags: Vec<Flag>,
    /// Parameters in declaration order.
    pub args: Vec<Param>,
    pub return_type: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_json_shape() {
        let property = PropertyRecord {
            name: Some("Health".to_string()),
            flags: vec![Flag::simple("EditAnywhere")],
            type_name: Some("int32".to_string()),
            description: None,
            is_array: false,
        };

        assert_eq!(
            serde_json::to_value(&property).unwrap(),
            json!({
                "name": "Health",
                "flags": ["EditAnywhere"],
                "type": "int32",
                "description": null
            })
        );
    }

    #[test]
    fn test_function_json_shape() {
        let function = FunctionRecord {
            name: Some("DoThing".to_string()),
            flags: vec![Flag::simple("BlueprintCallable")],
            args: vec![Param::new("int32", "Amount")],
            return_type: Some("void".to_string()),
            description: None,
            is_static: true,
        };

        let value = serde_json::to_value(&function).unwrap();
        assert_eq!(value["args"], json!([{ "type": "int32", "paramName": "Amount" }]));
        assert_eq!(value["returnType"], "void");
        assert_eq!(value["isStatic"], true);
    }
}
