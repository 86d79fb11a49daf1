//! Line-oriented parsing of reflection-annotated headers.
//!
//! [`ParseSession`] drives the state machine for one file; [`HeaderParser`]
//! wraps a session per call with the configured [`ParserOptions`].

pub mod classify;
mod comment;
pub mod declaration;
mod error;
pub mod flags;
mod namespace;
mod session;

pub use comment::CommentAccumulator;
pub use error::ParseError;
pub use flags::{FlagError, FlagLine, FlagParser};
pub use namespace::NamespaceTracker;
pub use session::{ParseSession, ParseState};

use serde::{Deserialize, Serialize};

use crate::builder::ParseOutcome;

/// Toggles for behavior beyond the base grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Record the identifier from the `class Foo ...` line as `declaredName`.
    pub capture_declared_name: bool,
    /// Track enclosing `namespace` blocks outside containers.
    pub track_namespaces: bool,
    /// Inside an open block comment, keep lines that do not look like
    /// comments (e.g. ` * text`). Off keeps only comment-shaped lines.
    pub block_comment_continuation: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            capture_declared_name: true,
            track_namespaces: true,
            block_comment_continuation: false,
        }
    }
}

/// Parses whole inputs, one fresh session each.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser {
    options: ParserOptions,
}

impl HeaderParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    pub fn parse_lines<I, S>(&self, lines: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut session = ParseSession::new(self.options);
        for line in lines {
            session.feed_line(line.as_ref())?;
        }
        session.finish()
    }

    pub fn parse_str(&self, source: &str) -> Result<ParseOutcome, ParseError> {
        self.parse_lines(source.lines())
    }
}

/// Parse a sequence of lines with default options.
pub fn parse<I, S>(lines: I) -> Result<ParseOutcome, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    HeaderParser::default().parse_lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outside_lines_leave_state_alone() {
        let mut session = ParseSession::new(ParserOptions::default());
        session.feed_line("// Tracks health").unwrap();
        let comment = session.pending_comment().to_string();

        for line in ["#pragma once", "#include \"CoreMinimal.h\"", "", "int GlobalCounter = 0;"] {
            session.feed_line(line).unwrap();
            assert_eq!(session.state(), ParseState::OutsideContainer);
            assert_eq!(session.pending_comment(), comment);
        }
    }

    #[test]
    fn test_member_start_reexamines_same_line() {
        let mut session = ParseSession::new(ParserOptions::default());
        session.feed_line("UCLASS()").unwrap();
        session.feed_line("{").unwrap();
        assert_eq!(session.state(), ParseState::InsideContainer);

        // Opening and terminal flags on one line go straight to the declaration.
        session.feed_line("UPROPERTY(EditAnywhere)").unwrap();
        assert_eq!(session.state(), ParseState::InPropertyDeclaration);

        session.feed_line("int32 Health;").unwrap();
        assert_eq!(session.state(), ParseState::InsideContainer);
    }

    #[test]
    fn test_multi_line_specifier_stays_in_specifier() {
        let mut session = ParseSession::new(ParserOptions::default());
        session.feed_line("USTRUCT()").unwrap();
        session.feed_line("UFUNCTION(BlueprintCallable,").unwrap();
        assert_eq!(session.state(), ParseState::InFunctionSpecifier);

        session.feed_line("Category = \"Combat\")").unwrap();
        assert_eq!(session.state(), ParseState::InFunctionDeclaration);
    }

    #[test]
    fn test_closing_brace_finalizes_container() {
        let outcome = parse(["UENUM()", "enum class EMode : uint8", "{", "Idle,", "};"]).unwrap();
        assert_eq!(outcome.containers.len(), 1);
        assert_eq!(outcome.containers[0].declared_name.as_deref(), Some("EMode"));
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_declared_name_capture_can_be_disabled() {
        let parser = HeaderParser::new(ParserOptions {
            capture_declared_name: false,
            ..Default::default()
        });
        let outcome = parser
            .parse_str("UCLASS()\nclass AThing : public AActor\n{\n};")
            .unwrap();
        assert_eq!(outcome.containers[0].declared_name, None);
    }
}
