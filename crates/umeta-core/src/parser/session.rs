//! The per-file parse state machine.
//!
//! A session consumes one trimmed line at a time. Each line first feeds
//! the comment accumulator, then runs through the handler for the current
//! state. A handler either consumes the line or changes state and asks for
//! the same line to be examined again, so a `UPROPERTY(...)` line both
//! opens the property and contributes its flags.

use tracing::{trace, warn};

use super::classify::{self, FUNCTION_MARKER, PROPERTY_MARKER};
use super::comment::CommentAccumulator;
use super::declaration;
use super::error::ParseError;
use super::flags::{self, FlagParser};
use super::namespace::NamespaceTracker;
use super::ParserOptions;
use crate::builder::{
    BuildError, ContainerUpdate, FunctionUpdate, ObjectBuilder, ParseOutcome, PropertyUpdate,
};
use crate::model::FailureReason;

/// Where the session is in the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseState {
    #[default]
    OutsideContainer,
    InsideContainer,
    /// Inside a `UPROPERTY(...)` flag list.
    InPropertySpecifier,
    /// After the property annotation, expecting its declaration.
    InPropertyDeclaration,
    /// Inside a `UFUNCTION(...)` flag list.
    InFunctionSpecifier,
    /// After the function annotation, expecting its declaration.
    InFunctionDeclaration,
}

/// What to do with the current line after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// The line is fully handled.
    Consumed,
    /// The state changed; run the new state's handler on the same line.
    Reexamine,
}

/// Parse state for exactly one input file.
#[derive(Debug, Default)]
pub struct ParseSession {
    options: ParserOptions,
    state: ParseState,
    comment: CommentAccumulator,
    namespaces: NamespaceTracker,
    flags: FlagParser,
    builder: ObjectBuilder,
    line_number: usize,
}

impl ParseSession {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            comment: CommentAccumulator::with_block_continuation(
                options.block_comment_continuation,
            ),
            ..Default::default()
        }
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// The comment text waiting to be attached to the next entity.
    pub fn pending_comment(&self) -> &str {
        self.comment.consume()
    }

    /// Number of lines fed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Feed the next line of the file.
    pub fn feed_line(&mut self, raw: &str) -> Result<(), ParseError> {
        self.line_number += 1;
        let line = raw.trim();
        self.comment.observe(line);

        loop {
            let flow = match self.state {
                ParseState::OutsideContainer => self.outside_container(line)?,
                ParseState::InsideContainer => self.inside_container(line)?,
                ParseState::InPropertySpecifier => self.property_specifier(line)?,
                ParseState::InPropertyDeclaration => self.property_declaration(line)?,
                ParseState::InFunctionSpecifier => self.function_specifier(line)?,
                ParseState::InFunctionDeclaration => self.function_declaration(line)?,
            };
            if flow == Flow::Consumed {
                return Ok(());
            }
            trace!(line = self.line_number, state = ?self.state, "re-examining line");
        }
    }

    /// End of input. Open members and the open container are failed.
    pub fn finish(mut self) -> Result<ParseOutcome, ParseError> {
        let line = self.line_number;

        match self.state {
            ParseState::InPropertySpecifier | ParseState::InPropertyDeclaration => {
                warn!(line, "input ended inside a property annotation");
                let flags = self.flags.finish().into_iter().collect();
                self.build(|b| {
                    b.update_property(PropertyUpdate {
                        flags,
                        ..Default::default()
                    })?;
                    b.fail_property(FailureReason::UnterminatedMember, line)
                })?;
            }
            ParseState::InFunctionSpecifier | ParseState::InFunctionDeclaration => {
                warn!(line, "input ended inside a function annotation");
                let flags = self.flags.finish().into_iter().collect();
                self.build(|b| {
                    b.update_function(FunctionUpdate {
                        flags,
                        ..Default::default()
                    })?;
                    b.fail_function(FailureReason::UnterminatedMember, line)
                })?;
            }
            ParseState::OutsideContainer | ParseState::InsideContainer => {}
        }

        if self.builder.has_open_container() {
            warn!(line, "input ended inside a container");
            self.build(|b| b.fail_container(FailureReason::UnterminatedContainer, line))?;
        }

        Ok(self.builder.into_outcome())
    }

    fn build<T>(
        &mut self,
        op: impl FnOnce(&mut ObjectBuilder) -> Result<T, BuildError>,
    ) -> Result<T, ParseError> {
        op(&mut self.builder).map_err(|source| ParseError::ProtocolViolation {
            line: self.line_number,
            source,
        })
    }

    fn outside_container(&mut self, line: &str) -> Result<Flow, ParseError> {
        let Some(kind) = classify::container_start(line) else {
            if self.options.track_namespaces {
                self.namespaces.observe(line);
            }
            return Ok(Flow::Consumed);
        };

        let display_name = self.comment.consume().to_string();
        self.comment.clear();
        self.build(|b| b.start_container(kind, display_name))?;

        if self.options.track_namespaces {
            if let Some(namespace) = self.namespaces.current() {
                self.build(|b| {
                    b.update_container(ContainerUpdate {
                        namespace: Some(namespace),
                        ..Default::default()
                    })
                })?;
            }
        }

        self.state = ParseState::InsideContainer;
        Ok(Flow::Consumed)
    }

    fn inside_container(&mut self, line: &str) -> Result<Flow, ParseError> {
        if classify::is_property_start(line) {
            self.flags = FlagParser::new();
            let description = self.comment.text();
            self.build(|b| {
                b.start_property()?;
                b.update_property(PropertyUpdate {
                    description,
                    ..Default::default()
                })
            })?;
            self.state = ParseState::InPropertySpecifier;
            return Ok(Flow::Reexamine);
        }

        if classify::is_function_start(line) {
            self.flags = FlagParser::new();
            let description = self.comment.text();
            self.build(|b| {
                b.start_function()?;
                b.update_function(FunctionUpdate {
                    description,
                    ..Default::default()
                })
            })?;
            self.state = ParseState::InFunctionSpecifier;
            return Ok(Flow::Reexamine);
        }

        if self.options.capture_declared_name {
            self.capture_declared_name(line)?;
        }

        if classify::has_closing_brace(line) {
            self.build(|b| b.finalize_container())?;
            self.state = ParseState::OutsideContainer;
        }
        Ok(Flow::Consumed)
    }

    fn capture_declared_name(&mut self, line: &str) -> Result<(), ParseError> {
        let already_named = self
            .builder
            .open_container()
            .is_some_and(|c| c.declared_name.is_some());
        if already_named {
            return Ok(());
        }

        if let Some(name) = declaration::parse_container_identifier(line) {
            self.build(|b| {
                b.update_container(ContainerUpdate {
                    declared_name: Some(name),
                    ..Default::default()
                })
            })?;
        }
        Ok(())
    }

    fn property_specifier(&mut self, line: &str) -> Result<Flow, ParseError> {
        let rest = classify::strip_annotation(line, PROPERTY_MARKER);
        let line_number = self.line_number;

        match self.flags.feed(rest) {
            Ok(parsed) => {
                if let Some(text) = &parsed.trailing {
                    warn!(line = line_number, trailing = %text, "text after closed property flag list");
                }
                self.build(|b| {
                    b.update_property(PropertyUpdate {
                        flags: parsed.flags,
                        ..Default::default()
                    })
                })?;
            }
            Err(error) => {
                warn!(line = line_number, %error, "rejecting property flags");
                self.build(|b| b.fail_property(FailureReason::MalformedFlags, line_number))?;
                self.comment.clear();
                self.state = ParseState::InsideContainer;
                return Ok(Flow::Consumed);
            }
        }

        if flags::is_terminal(rest) && !self.flags.in_sub_list() {
            self.state = ParseState::InPropertyDeclaration;
            self.comment.clear();
        }
        Ok(Flow::Consumed)
    }

    fn property_declaration(&mut self, line: &str) -> Result<Flow, ParseError> {
        let line_number = self.line_number;

        match declaration::parse_property_declaration(line) {
            Some(decl) => {
                self.build(|b| {
                    b.update_property(PropertyUpdate {
                        name: Some(decl.name),
                        type_name: decl.type_name,
                        is_array: Some(decl.is_array),
                        ..Default::default()
                    })?;
                    b.end_property()
                })?;
                self.comment.clear();
            }
            None => {
                self.build(|b| b.fail_property(FailureReason::MalformedDeclaration, line_number))?;
            }
        }

        self.state = ParseState::InsideContainer;
        Ok(Flow::Consumed)
    }

    fn function_specifier(&mut self, line: &str) -> Result<Flow, ParseError> {
        let rest = classify::strip_annotation(line, FUNCTION_MARKER);
        let line_number = self.line_number;

        match self.flags.feed(rest) {
            Ok(parsed) => {
                if let Some(text) = &parsed.trailing {
                    warn!(line = line_number, trailing = %text, "text after closed function flag list");
                }
                self.build(|b| {
                    b.update_function(FunctionUpdate {
                        flags: parsed.flags,
                        ..Default::default()
                    })
                })?;
            }
            Err(error) => {
                warn!(line = line_number, %error, "rejecting function flags");
                self.build(|b| b.fail_function(FailureReason::MalformedFlags, line_number))?;
                self.comment.clear();
                self.state = ParseState::InsideContainer;
                return Ok(Flow::Consumed);
            }
        }

        if flags::is_terminal(rest) && !self.flags.in_sub_list() {
            self.state = ParseState::InFunctionDeclaration;
            self.comment.clear();
        }
        Ok(Flow::Consumed)
    }

    fn function_declaration(&mut self, line: &str) -> Result<Flow, ParseError> {
        let line_number = self.line_number;

        match declaration::parse_function_declaration(line) {
            Some(decl) => {
                self.build(|b| {
                    b.update_function(FunctionUpdate {
                        name: Some(decl.name),
                        args: Some(decl.params),
                        return_type: Some(decl.return_type),
                        is_static: Some(decl.is_static),
                        ..Default::default()
                    })?;
                    b.end_function()
                })?;
                self.comment.clear();
            }
            None => {
                self.build(|b| b.fail_function(FailureReason::MalformedDeclaration, line_number))?;
            }
        }

        self.state = ParseState::InsideContainer;
        Ok(Flow::Consumed)
    }
}
