//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{Line, Polygon, Word};

/// Length unit the page geometry is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Page-space inches (text documents).
    #[default]
    Inch,
    /// Raw pixels (image-sourced documents).
    Pixel,
}

/// One paragraph's precomputed footprint on one page.
///
/// Index ranges are inclusive `(first, last)` pairs into the page's `lines`
/// and `words` sequences. `None` is the valid degenerate range of a
/// paragraph that owns no lines or words on the page (for example one whose
/// on-page text is entirely whitespace between word spans). Ranges are
/// contiguous and never overlap across the regions of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// The paragraph's bounding polygon on this page, reused as-is from the
    /// paragraph's own bounding region.
    pub polygon: Polygon,

    /// Inclusive index range into the page's lines.
    pub line_range: Option<(usize, usize)>,

    /// Inclusive index range into the page's words.
    pub word_range: Option<(usize, usize)>,

    /// Position of the owning paragraph in the document's paragraph
    /// sequence.
    pub paragraph_index: usize,
}

/// A single page of the extracted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-indexed page number.
    pub page_number: u32,

    /// Page width in `unit`s.
    pub width: f64,

    /// Page height in `unit`s.
    pub height: f64,

    /// Geometry unit for this page.
    #[serde(default)]
    pub unit: LengthUnit,

    /// Recognized words, sorted by span offset ascending (reading order).
    #[serde(default)]
    pub words: Vec<Word>,

    /// Visual lines, sorted in reading order.
    #[serde(default)]
    pub lines: Vec<Line>,

    /// Paragraph regions, computed once per loaded document by the region
    /// preprocessor. Empty until then.
    #[serde(default)]
    pub regions: Vec<Region>,
}

impl Page {
    /// Create an empty page.
    pub fn new(page_number: u32, width: f64, height: f64) -> Self {
        Self {
            page_number,
            width,
            height,
            unit: LengthUnit::default(),
            words: Vec::new(),
            lines: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// The words owned by `region`, in offset order.
    pub fn region_words(&self, region: &Region) -> &[Word] {
        match region.word_range {
            Some((first, last)) => &self.words[first..=last],
            None => &[],
        }
    }

    /// The region owned by paragraph `paragraph_index`, if the paragraph
    /// contributes to this page.
    pub fn region_for_paragraph(&self, paragraph_index: usize) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| r.paragraph_index == paragraph_index)
    }

    /// True when the page carries recognized text.
    pub fn has_text(&self) -> bool {
        !self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;

    #[test]
    fn test_region_words_degenerate() {
        let page = Page::new(1, 8.5, 11.0);
        let region = Region {
            polygon: Polygon::from_edges(0.0, 0.0, 1.0, 1.0),
            line_range: None,
            word_range: None,
            paragraph_index: 0,
        };
        assert!(page.region_words(&region).is_empty());
    }

    #[test]
    fn test_region_words_inclusive() {
        let mut page = Page::new(1, 8.5, 11.0);
        for i in 0..4u32 {
            page.words.push(Word {
                content: format!("w{i}"),
                polygon: Polygon::from_edges(i as f64, 0.0, i as f64 + 0.5, 0.2),
                span: Span::new(i * 3, 2),
            });
        }
        let region = Region {
            polygon: Polygon::from_edges(0.0, 0.0, 4.0, 1.0),
            line_range: Some((0, 0)),
            word_range: Some((1, 2)),
            paragraph_index: 0,
        };
        let words = page.region_words(&region);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].content, "w1");
        assert_eq!(words[1].content, "w2");
    }
}
