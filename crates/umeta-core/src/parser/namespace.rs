//! Namespace tracking for lines outside any container.

use once_cell::sync::Lazy;
use regex::Regex;

static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^namespace\s+(\w+(?:::\w+)*)").expect("valid namespace pattern")
});

/// Tracks `namespace X {` scopes by brace depth.
#[derive(Debug, Default, Clone)]
pub struct NamespaceTracker {
    /// Open namespaces with the depth their body starts at.
    scopes: Vec<(String, usize)>,
    depth: usize,
}

impl NamespaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one trimmed line seen outside a container.
    pub fn observe(&mut self, line: &str) {
        if let Some(caps) = NAMESPACE_RE.captures(line) {
            self.scopes.push((caps[1].to_string(), self.depth + 1));
        }

        for ch in line.chars() {
            match ch {
                '{' => self.depth += 1,
                '}' => {
                    self.depth = self.depth.saturating_sub(1);
                    while self
                        .scopes
                        .last()
                        .is_some_and(|(_, opened_at)| *opened_at > self.depth)
                    {
                        self.scopes.pop();
                    }
                }
                _ => {}
            }
        }
    }

    /// The enclosing namespace path, joined with `::`.
    pub fn current(&self) -> Option<String> {
        if self.scopes.is_empty() {
            return None;
        }
        Some(
            self.scopes
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>()
                .join("::"),
        )
    }
}
