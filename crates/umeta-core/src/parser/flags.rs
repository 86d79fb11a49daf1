//! Annotation flag list parsing.
//!
//! Works on the remainder of one annotation line, after the marker and its
//! opening parenthesis are stripped. Top-level tokens split on commas; the
//! first top-level `)` ends the list. One level of embedded sub-list
//! (`meta=(A, B)`) is captured as a single composite flag. Deeper nesting
//! is rejected.

use thiserror::Error;

use crate::model::Flag;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    #[error("flag sub-lists nest more than one level deep (column {column})")]
    NestingTooDeep { column: usize },

    #[error("unexpected text after flag sub-list: {text}")]
    TrailingText { text: String },
}

/// Whether this line ends the annotation: its last non-whitespace
/// character is a closing parenthesis.
pub fn is_terminal(rest: &str) -> bool {
    rest.trim_end().ends_with(')')
}

/// Flags read from one annotation line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagLine {
    pub flags: Vec<Flag>,
    /// Text after the `)` that closed the list, if any.
    pub trailing: Option<String>,
}

/// Flag-list reader for one annotation, fed line by line.
///
/// A sub-list left open at the end of a line stays open, so
/// `meta=(A,` followed by `B))` yields the single flag `meta=(A, B)`.
#[derive(Debug, Clone, Default)]
pub struct FlagParser {
    pending: Option<(String, Vec<String>)>,
}

impl FlagParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sub-list is still waiting for its `)`.
    pub fn in_sub_list(&self) -> bool {
        self.pending.is_some()
    }

    /// Read one line's remainder, returning the flags it completed.
    ///
    /// On error the pending sub-list is dropped.
    pub fn feed(&mut self, rest: &str) -> Result<FlagLine, FlagError> {
        let mut splitter = FlagSplitter::default();
        if let Some(pending) = self.pending.take() {
            splitter.sub_list = Some(pending);
            splitter.depth = 1;
        }

        for (column, ch) in rest.char_indices() {
            if splitter.in_quotes {
                splitter.push_quoted(ch);
                continue;
            }

            match (splitter.depth, ch) {
                (0, c)
                    if splitter.sub_list.is_some()
                        && !c.is_whitespace()
                        && c != ','
                        && c != ')' =>
                {
                    return Err(FlagError::TrailingText {
                        text: rest[column..].trim().to_string(),
                    });
                }
                (_, '"') => {
                    splitter.in_quotes = true;
                    splitter.push(ch);
                }
                (0, ',') => splitter.flush(),
                (0, ')') => {
                    splitter.flush();
                    let trailing = rest[column + ch.len_utf8()..].trim();
                    return Ok(FlagLine {
                        flags: splitter.flags,
                        trailing: (!trailing.is_empty()).then(|| trailing.to_string()),
                    });
                }
                (0, '(') => {
                    let key = std::mem::take(&mut splitter.token).trim().to_string();
                    splitter.sub_list = Some((key, Vec::new()));
                    splitter.depth = 1;
                }
                (1, ',') => splitter.push_entry(),
                (1, ')') => {
                    splitter.push_entry();
                    splitter.depth = 0;
                }
                (1, '(') => return Err(FlagError::NestingTooDeep { column }),
                _ => splitter.push(ch),
            }
        }

        // The list continues on the next line.
        if splitter.depth == 1 {
            splitter.push_entry();
            self.pending = splitter.sub_list.take();
        }
        splitter.flush();
        Ok(FlagLine {
            flags: splitter.flags,
            trailing: None,
        })
    }

    /// Close out a sub-list the input never finished.
    pub fn finish(&mut self) -> Option<Flag> {
        self.pending
            .take()
            .map(|(key, entries)| Flag::Composite { key, entries })
    }
}

/// Split a single annotation line's remainder into flags, in source order.
///
/// An unclosed sub-list is kept as a composite of the entries seen.
pub fn parse_flags(rest: &str) -> Result<Vec<Flag>, FlagError> {
    let mut parser = FlagParser::new();
    let mut line = parser.feed(rest)?;
    line.flags.extend(parser.finish());
    Ok(line.flags)
}

#[derive(Default)]
struct FlagSplitter {
    flags: Vec<Flag>,
    token: String,
    entry: String,
    /// Key and entries of the sub-list seen since the last separator.
    sub_list: Option<(String, Vec<String>)>,
    depth: u8,
    in_quotes: bool,
    escaped: bool,
}

impl FlagSplitter {
    fn push(&mut self, ch: char) {
        if self.depth == 0 {
            self.token.push(ch);
        } else {
            self.entry.push(ch);
        }
    }

    fn push_quoted(&mut self, ch: char) {
        self.push(ch);
        if self.escaped {
            self.escaped = false;
        } else if ch == '\\' {
            self.escaped = true;
        } else if ch == '"' {
            self.in_quotes = false;
        }
    }

    fn push_entry(&mut self) {
        let entry = std::mem::take(&mut self.entry);
        let entry = entry.trim();
        if entry.is_empty() {
            return;
        }
        if let Some((_, entries)) = self.sub_list.as_mut() {
            entries.push(entry.to_string());
        }
    }

    fn flush(&mut self) {
        let token = std::mem::take(&mut self.token);
        if let Some((key, entries)) = self.sub_list.take() {
            self.flags.push(Flag::Composite { key, entries });
            return;
        }
        let token = token.trim();
        if !token.is_empty() {
            self.flags.push(Flag::simple(token));
        }
    }
}
