//! Line classification predicates.
//!
//! Every function expects a line already trimmed of surrounding whitespace.

use crate::model::ContainerKind;

pub const PROPERTY_MARKER: &str = "UPROPERTY";
pub const FUNCTION_MARKER: &str = "UFUNCTION";

const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";

/// Whether the line opens a comment or closes a block comment.
pub fn is_comment(line: &str) -> bool {
    opens_comment(line) || closes_comment(line)
}

/// Whether the line starts a block or line comment.
pub fn opens_comment(line: &str) -> bool {
    line.starts_with(BLOCK_COMMENT_OPEN) || line.starts_with(LINE_COMMENT)
}

/// Byte offset of the first block comment closer, if any.
pub fn comment_close(line: &str) -> Option<usize> {
    line.find(BLOCK_COMMENT_CLOSE)
}

pub fn closes_comment(line: &str) -> bool {
    comment_close(line).is_some()
}

pub fn is_line_comment(line: &str) -> bool {
    line.starts_with(LINE_COMMENT)
}

/// The container kind whose marker (followed by `(`) starts the line.
pub fn container_start(line: &str) -> Option<ContainerKind> {
    [ContainerKind::Class, ContainerKind::Struct, ContainerKind::Enum]
        .into_iter()
        .find(|kind| {
            line.strip_prefix(kind.marker())
                .is_some_and(|rest| rest.starts_with('('))
        })
}

pub fn is_class_start(line: &str) -> bool {
    container_start(line) == Some(ContainerKind::Class)
}

pub fn is_struct_start(line: &str) -> bool {
    container_start(line) == Some(ContainerKind::Struct)
}

pub fn is_enum_start(line: &str) -> bool {
    container_start(line) == Some(ContainerKind::Enum)
}

/// Whether the line starts a property annotation.
pub fn is_property_start(line: &str) -> bool {
    line.starts_with(PROPERTY_MARKER)
}

/// Whether the line starts a function annotation. The parenthesis is
/// optional here, as it is for properties.
pub fn is_function_start(line: &str) -> bool {
    line.starts_with(FUNCTION_MARKER)
}

/// Strip a leading annotation marker and its opening parenthesis.
///
/// Continuation lines carry neither and are returned unchanged.
pub fn strip_annotation<'a>(line: &'a str, marker: &str) -> &'a str {
    match line.strip_prefix(marker) {
        Some(rest) => {
            let rest = rest.trim_start();
            rest.strip_prefix('(').unwrap_or(rest)
        }
        None => line,
    }
}

pub fn has_closing_brace(line: &str) -> bool {
    line.contains('}')
}
