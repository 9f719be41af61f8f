//! Recognized text structures: words, lines, and paragraphs.

use serde::{Deserialize, Serialize};

use super::{Polygon, Span};

/// One recognized token on a page.
///
/// `span.length` should equal the content length, though boundary
/// punctuation may be included by the service. Words within a page are
/// stored sorted by `span.offset` ascending, equal to reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Token text.
    pub content: String,

    /// Bounding quadrilateral in page-space units.
    pub polygon: Polygon,

    /// Position in the document's text-offset space.
    pub span: Span,
}

/// A visual line of text.
///
/// A line may aggregate several words and may itself be discontiguous
/// (multiple spans) when the service merges visually adjacent but
/// non-contiguous text. Lines are stored in reading order: top-to-bottom
/// within a column, columns left-to-right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Line text.
    pub content: String,

    /// Bounding quadrilateral in page-space units.
    pub polygon: Polygon,

    /// Offset ranges covered by the line, ascending.
    pub spans: Vec<Span>,
}

impl Line {
    /// Offset of the line's first span, its position in reading order.
    pub fn first_offset(&self) -> Option<u32> {
        self.spans.first().map(|s| s.offset)
    }

    /// True if any of the line's spans contains `offset`.
    pub fn contains_offset(&self, offset: u32) -> bool {
        self.spans.iter().any(|s| s.contains(offset))
    }
}

/// One paragraph's footprint on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    /// 1-indexed page number.
    pub page_number: u32,

    /// Bounding quadrilateral on that page.
    pub polygon: Polygon,
}

/// A semantic block of text.
///
/// A paragraph may span pages or columns; each page's contribution is
/// described by one entry in `bounding_regions` and is treated
/// independently by the alignment engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Paragraph text.
    pub content: String,

    /// Offset ranges covered by the paragraph, ascending.
    pub spans: Vec<Span>,

    /// Per-page footprints.
    #[serde(default)]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl Paragraph {
    /// Overall offset extent `(start, end)` across all spans, end exclusive.
    pub fn span_extent(&self) -> Option<(u32, u32)> {
        let start = self.spans.iter().map(|s| s.offset).min()?;
        let end = self.spans.iter().map(|s| s.end()).max()?;
        Some((start, end))
    }

    /// The paragraph's bounding region on `page_number`, if it has one.
    pub fn region_on(&self, page_number: u32) -> Option<&BoundingRegion> {
        self.bounding_regions
            .iter()
            .find(|r| r.page_number == page_number)
    }
}
