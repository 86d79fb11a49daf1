//! Documentation comment accumulation.

use super::classify;

/// Holds the most recent, possibly multi-line, documentation comment.
///
/// Reading and clearing are separate calls; reading never clears.
#[derive(Debug, Default, Clone)]
pub struct CommentAccumulator {
    buffer: String,
    in_multiline: bool,
    /// Append every line inside an open block comment, not only comment-shaped ones.
    block_continuation: bool,
}

impl CommentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block_continuation(enabled: bool) -> Self {
        Self {
            block_continuation: enabled,
            ..Self::default()
        }
    }

    /// Feed one trimmed line.
    ///
    /// A line is appended when it opens a comment, or when a block comment
    /// is open and the line is comment-shaped. With block continuation on,
    /// any line inside an open block comment is appended. Text after a `*/`
    /// closer is not kept.
    pub fn observe(&mut self, line: &str) {
        let continues =
            self.in_multiline && (self.block_continuation || classify::is_comment(line));
        if !(classify::opens_comment(line) || continues) {
            return;
        }

        let span = match classify::comment_close(line) {
            Some(end) => &line[..end],
            None => line,
        };
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(span);
        self.in_multiline = true;

        if classify::closes_comment(line) || classify::is_line_comment(line) {
            self.in_multiline = false;
        }
    }

    /// The accumulated comment text.
    pub fn consume(&self) -> &str {
        &self.buffer
    }

    /// The accumulated text, or `None` if nothing was collected.
    pub fn text(&self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer.clone())
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.in_multiline = false;
    }

    pub fn in_multiline(&self) -> bool {
        self.in_multiline
    }
}
