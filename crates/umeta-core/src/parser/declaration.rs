//! Single-line declaration matching.
//!
//! Each matcher returns `None` when the line is not a declaration of the
//! expected shape; callers decide what a non-match means.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Param;

/// Type qualifiers (each optionally `Name<Name>`), an identifier, an
/// optional empty `[]`, an optional `;`.
static PROPERTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:\w+(?:<\w+>)?\s+)*)(\w+)\s*(\[\s*\])?;?$").expect("valid property pattern")
});

/// Optional `static`, return type, name, parenthesized parameters, optional `;`.
static FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(static\s+)?(\w+)\s+(\w+)\s*\((.*?)\);?$").expect("valid function pattern")
});

/// `class|struct|enum [class] [MODULE_API] Identifier`.
static CONTAINER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:class|struct|enum)(?:\s+class)?\s+(?:\w+_API\s+)?(\w+)")
        .expect("valid container pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDeclaration {
    /// Qualifiers before the name; `None` when the line is a bare identifier.
    pub type_name: Option<String>,
    pub name: String,
    pub is_array: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    pub is_static: bool,
    pub return_type: String,
    pub name: String,
    pub params: Vec<Param>,
}

pub fn parse_property_declaration(line: &str) -> Option<PropertyDeclaration> {
    let caps = PROPERTY_RE.captures(line)?;
    let type_name = caps
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    Some(PropertyDeclaration {
        type_name,
        name: caps[2].to_string(),
        is_array: caps.get(3).is_some(),
    })
}

pub fn parse_function_declaration(line: &str) -> Option<FunctionDeclaration> {
    let caps = FUNCTION_RE.captures(line)?;
    let params = parse_params(&caps[4])?;

    Some(FunctionDeclaration {
        is_static: caps.get(1).is_some(),
        return_type: caps[2].to_string(),
        name: caps[3].to_string(),
        params,
    })
}

/// Each comma-separated entry must be exactly `type name`.
fn parse_params(list: &str) -> Option<Vec<Param>> {
    let list = list.trim();
    if list.is_empty() || list == "void" {
        return Some(Vec::new());
    }

    list.split(',')
        .map(|entry| {
            let mut parts = entry.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(type_name), Some(param_name), None) => Some(Param::new(type_name, param_name)),
                _ => None,
            }
        })
        .collect()
}

/// The identifier declared by a `class Foo : public Bar` style line.
pub fn parse_container_identifier(line: &str) -> Option<String> {
    CONTAINER_RE.captures(line).map(|caps| caps[1].to_string())
}
