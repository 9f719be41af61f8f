//! Paragraph region preprocessing.
//!
//! For every paragraph that contributes to a page, compute the inclusive
//! line and word index ranges its span covers there. Done once per loaded
//! document; every reverse query afterwards starts from these regions.

use rayon::prelude::*;

use crate::model::{Document, Page, Paragraph, Region};
use crate::search::{compare_offsets, contiguous_range};

/// Options for the annotation pass.
#[derive(Debug, Clone)]
pub struct AnnotateOptions {
    /// Process pages in parallel. Output is identical either way.
    pub parallel: bool,
}

impl AnnotateOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Compute the regions of a single page.
///
/// Paragraphs are visited in document order; one whose bounding regions do
/// not include this page contributes nothing and is skipped, which is not
/// an error. The paragraph's own bounding polygon is reused as the region
/// polygon rather than recomputed from its lines. A paragraph whose span
/// covers no word on the page (whitespace or punctuation between word
/// spans) still yields a region, with degenerate index ranges.
pub fn regions_for_page(page: &Page, paragraphs: &[Paragraph]) -> Vec<Region> {
    let mut regions = Vec::new();

    for (paragraph_index, paragraph) in paragraphs.iter().enumerate() {
        let Some(bounding) = paragraph.region_on(page.page_number) else {
            continue;
        };

        let extent = paragraph.span_extent();
        let (line_range, word_range) = match extent {
            Some((start, end)) => {
                let word_range = contiguous_range(&page.words, |word| {
                    compare_offsets((start, end), word.span.offset)
                });
                let line_range = contiguous_range(&page.lines, |line| match line.first_offset() {
                    Some(offset) => compare_offsets((start, end), offset),
                    // A line without spans can never be owned.
                    None => std::cmp::Ordering::Less,
                });
                (line_range, word_range)
            }
            None => (None, None),
        };

        regions.push(Region {
            polygon: bounding.polygon,
            line_range,
            word_range,
            paragraph_index,
        });
    }

    log::debug!(
        "page {}: {} paragraph regions",
        page.page_number,
        regions.len()
    );
    regions
}

/// Annotate every page of a document with its paragraph regions.
///
/// A pure, idempotent transform: the input is consumed and returned with
/// `page.regions` filled; recomputing over the same input yields identical
/// output. Everything else in the document is left untouched.
pub fn annotate(document: Document) -> Document {
    annotate_with_options(document, AnnotateOptions::default())
}

/// Annotate with explicit options.
pub fn annotate_with_options(mut document: Document, options: AnnotateOptions) -> Document {
    let paragraphs = &document.paragraphs;
    if options.parallel {
        document
            .pages
            .par_iter_mut()
            .for_each(|page| page.regions = regions_for_page(page, paragraphs));
    } else {
        for page in &mut document.pages {
            page.regions = regions_for_page(page, paragraphs);
        }
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingRegion, Line, Polygon, Span, Word};

    fn word(offset: u32, length: u32, left: f64, top: f64) -> Word {
        Word {
            content: "x".repeat(length as usize),
            polygon: Polygon::from_edges(left, top, left + 0.6, top + 0.2),
            span: Span::new(offset, length),
        }
    }

    /// One page, two lines of four words each, offsets matching the
    /// document text stream.
    fn sample_page() -> Page {
        let mut page = Page::new(1, 8.5, 11.0);
        let offsets: [(u32, u32); 8] = [
            (0, 5),
            (6, 4),
            (11, 2),
            (14, 5),
            (20, 6),
            (27, 4),
            (32, 2),
            (35, 4),
        ];
        for (i, (offset, length)) in offsets.iter().enumerate() {
            let (row, col) = (i / 4, i % 4);
            page.words.push(word(
                *offset,
                *length,
                1.0 + col as f64 * 0.8,
                1.0 + row as f64 * 0.3,
            ));
        }
        page.lines.push(Line {
            content: String::new(),
            polygon: Polygon::from_edges(1.0, 1.0, 4.2, 1.2),
            spans: vec![Span::new(0, 19)],
        });
        page.lines.push(Line {
            content: String::new(),
            polygon: Polygon::from_edges(1.0, 1.3, 4.2, 1.5),
            spans: vec![Span::new(20, 19)],
        });
        page
    }

    fn paragraph(offset: u32, length: u32, page_number: u32) -> Paragraph {
        Paragraph {
            content: String::new(),
            spans: vec![Span::new(offset, length)],
            bounding_regions: vec![BoundingRegion {
                page_number,
                polygon: Polygon::from_edges(1.0, 1.0, 4.2, 1.5),
            }],
        }
    }

    #[test]
    fn test_single_paragraph_owns_whole_page() {
        let page = sample_page();
        let paragraphs = vec![paragraph(0, 39, 1)];
        let regions = regions_for_page(&page, &paragraphs);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].line_range, Some((0, 1)));
        assert_eq!(regions[0].word_range, Some((0, 7)));
        assert_eq!(regions[0].paragraph_index, 0);
        assert_eq!(regions[0].polygon, Polygon::from_edges(1.0, 1.0, 4.2, 1.5));
    }

    #[test]
    fn test_two_paragraphs_partition_the_page() {
        let page = sample_page();
        let paragraphs = vec![paragraph(0, 19, 1), paragraph(20, 19, 1)];
        let regions = regions_for_page(&page, &paragraphs);

        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].word_range, Some((0, 3)));
        assert_eq!(regions[0].line_range, Some((0, 0)));
        assert_eq!(regions[1].word_range, Some((4, 7)));
        assert_eq!(regions[1].line_range, Some((1, 1)));
    }

    #[test]
    fn test_paragraph_without_page_contribution_is_skipped() {
        let page = sample_page();
        let paragraphs = vec![paragraph(0, 39, 2)];
        let regions = regions_for_page(&page, &paragraphs);
        assert!(regions.is_empty());
    }

    #[test]
    fn test_paragraph_between_word_spans_gets_degenerate_range() {
        let page = sample_page();
        // Offsets 40..45 lie past every word on the page.
        let paragraphs = vec![paragraph(40, 5, 1)];
        let regions = regions_for_page(&page, &paragraphs);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].word_range, None);
        assert_eq!(regions[0].line_range, None);
    }

    #[test]
    fn test_annotate_is_idempotent_and_mode_independent() {
        let mut doc = Document::new();
        doc.pages.push(sample_page());
        doc.paragraphs.push(paragraph(0, 39, 1));

        let parallel = annotate(doc.clone());
        let sequential =
            annotate_with_options(doc, AnnotateOptions::new().sequential());
        assert_eq!(parallel, sequential);

        let again = annotate(parallel.clone());
        assert_eq!(parallel, again);
        assert!(again.is_annotated());
    }
}
