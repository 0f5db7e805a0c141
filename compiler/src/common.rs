//! Source positions and spans shared by every stage

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the source text
///
/// `index` is a byte offset, `line` and `column` are 1-based and count
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Position of the first character of a source
    pub fn start() -> Self {
        Self {
            index: 0,
            line: 1,
            column: 1,
        }
    }

    /// The position after consuming `ch`
    pub fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                index: self.index + ch.len_utf8(),
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                index: self.index + ch.len_utf8(),
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open range `[start, end)` of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`
    pub fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        let start = if other.start.index < self.start.index {
            other.start
        } else {
            self.start
        };
        let end = if other.end.index > self.end.index {
            other.end
        } else {
            self.end
        };
        Span { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.index.saturating_sub(self.start.index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
