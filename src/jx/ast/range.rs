//! Source positions and spans
//!
//! Every node of the jx tree carries a [`Range`]: the byte span it covers in the source plus
//! the line:column positions of both ends. Scanner tokens only carry byte spans
//! (`std::ops::Range<usize>`); the grammar layer converts them through a [`SourceLocation`]
//! built once per document.
//!
//! - Lines and columns are zero based, columns count bytes.
//! - A default range is `0..0` at `0:0`, never absent.
//! - Zero-width ranges are legal: implicit end tags are synthesized at the position of the
//!   end tag that triggered them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range as ByteRange;

/// A line:column position in the source
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A located span of source: byte offsets plus start/end positions
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// Whether a position falls inside this range (both ends inclusive)
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.span.start == self.span.end
    }

    /// Smallest range covering both `self` and `other`
    pub fn cover(&self, other: &Range) -> Range {
        let (span_start, start) = if other.span.start < self.span.start {
            (other.span.start, other.start)
        } else {
            (self.span.start, self.start)
        };
        let (span_end, end) = if other.span.end > self.span.end {
            (other.span.end, other.end)
        } else {
            (self.span.end, self.end)
        };
        Range::new(span_start..span_end, start, end)
    }

    /// The slice of `source` this range covers, or "" when out of bounds
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.clone()).unwrap_or("")
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Converts byte offsets to line/column positions for one source text
#[derive(Debug, Clone)]
pub struct SourceLocation {
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .char_indices()
                .filter(|(_, ch)| *ch == '\n')
                .map(|(idx, _)| idx + 1),
        );
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Position of a byte offset; offsets past the end clamp to the end of input
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Position::new(line, offset - self.line_starts[line])
    }

    /// Build a [`Range`] from a byte span
    pub fn range(&self, span: ByteRange<usize>) -> Range {
        let start = self.position(span.start);
        let end = self.position(span.end);
        Range::new(span, start, end)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "3:7");
    }

    #[test]
    fn test_position_single_line() {
        let loc = SourceLocation::new("<div/>");
        assert_eq!(loc.position(0), Position::new(0, 0));
        assert_eq!(loc.position(4), Position::new(0, 4));
    }

    #[test]
    fn test_position_multiline() {
        let loc = SourceLocation::new("<a>\n  <b/>\n</a>");
        assert_eq!(loc.position(4), Position::new(1, 0));
        assert_eq!(loc.position(6), Position::new(1, 2));
        assert_eq!(loc.position(11), Position::new(2, 0));
        assert_eq!(loc.line_count(), 3);
    }

    #[test]
    fn test_position_clamps_past_end() {
        let loc = SourceLocation::new("ab");
        assert_eq!(loc.position(10), Position::new(0, 2));
    }

    #[test]
    fn test_range_conversion_and_display() {
        let loc = SourceLocation::new("x\nyz");
        let range = loc.range(0..4);
        assert_eq!(range.start, Position::new(0, 0));
        assert_eq!(range.end, Position::new(1, 2));
        assert_eq!(range.to_string(), "0:0..1:2");
    }

    #[test]
    fn test_range_cover_and_contains() {
        let loc = SourceLocation::new("<a>text</a>");
        let open = loc.range(0..3);
        let close = loc.range(7..11);
        let whole = open.cover(&close);
        assert_eq!(whole.span, 0..11);
        assert!(whole.contains(Position::new(0, 5)));
        assert!(!open.contains(Position::new(0, 5)));
    }

    #[test]
    fn test_range_text() {
        let source = "<br/>";
        let loc = SourceLocation::new(source);
        assert_eq!(loc.range(1..3).text(source), "br");
        assert_eq!(loc.range(2..99).text(source), "");
    }
}
