//! Character-offset spans.

use serde::{Deserialize, Serialize};

/// A half-open range in the document's linear text-offset space.
///
/// Offsets count UTF-16 code units, matching the extraction service, and
/// increase monotonically with reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Start offset, inclusive.
    pub offset: u32,

    /// Number of code units covered.
    pub length: u32,
}

impl Span {
    /// Create a span from its start offset and length.
    pub fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    /// End offset, exclusive.
    pub fn end(&self) -> u32 {
        self.offset + self.length
    }

    /// True if `offset` lies within the half-open range.
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.offset && offset < self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_end_and_contains() {
        let span = Span::new(10, 5);
        assert_eq!(span.end(), 15);
        assert!(span.contains(10));
        assert!(span.contains(14));
        assert!(!span.contains(15));
        assert!(!span.contains(9));
    }
}
