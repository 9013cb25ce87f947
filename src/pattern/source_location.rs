//! Source Location Utilities
//!
//! Line/column tracking for positions inside a pattern source. Patterns are
//! usually a single line, but `new RegExp("a\nb")`-style sources may contain
//! raw line terminators, so positions are reported as line and column.

use std::fmt;

/// A position in a pattern source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Byte offset from start of the pattern
    pub offset: usize,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, counted in characters)
    pub column: usize,
}

impl SourcePosition {
    /// Create a new source position
    #[inline]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Position at the start of a pattern
    #[inline]
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Calculate the position of a byte offset in `source`
    ///
    /// Offsets past the end are clamped to the end of the source.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut line = 1;
        let mut column = 1;

        for (index, ch) in source.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_offset_single_line() {
        let pos = SourcePosition::from_offset("ab(c", 2);
        assert_eq!(pos, SourcePosition::new(2, 1, 3));
    }

    #[test]
    fn test_from_offset_counts_chars_not_bytes() {
        // 'é' is two bytes in UTF-8
        let pos = SourcePosition::from_offset("é(", 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_from_offset_multiline() {
        let pos = SourcePosition::from_offset("a\nbc", 3);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_from_offset_clamps() {
        let pos = SourcePosition::from_offset("abc", 99);
        assert_eq!(pos.offset, 3);
        assert_eq!(pos.column, 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(SourcePosition::new(0, 2, 7).to_string(), "line 2, column 7");
    }
}
