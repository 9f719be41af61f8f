//! Forward mapping: excerpt text to bounding polygons.
//!
//! Text-to-offset alignment itself is delegated to a [`TextLocator`]
//! collaborator; this module turns the fragments it returns into
//! page-ordered, optionally gap-stitched [`Bounds`] ready for the
//! highlight renderer. [`WordSequenceLocator`] is the built-in locator.

mod word_locator;

pub use word_locator::WordSequenceLocator;

use std::collections::BTreeMap;

use crate::model::{Bounds, ComplexPolygon, Document};

/// One contiguous piece of a located excerpt on one page.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedFragment {
    /// Head/body/tail decomposition of the piece.
    pub polygon: ComplexPolygon,

    /// 1-indexed page the piece sits on.
    pub page_number: u32,
}

/// Result of a text-locate call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Located {
    /// The text as matched, reconstructed from the document's own tokens.
    pub excerpt: String,

    /// Geometry, already split per contiguous region (one fragment per
    /// paragraph crossing, page break, or column jump).
    pub fragments: Vec<LocatedFragment>,

    /// Whether the text was found at all.
    pub found: bool,
}

impl Located {
    /// The canonical "not found" value.
    pub fn not_found() -> Self {
        Self::default()
    }
}

/// Text-to-geometry alignment collaborator.
///
/// Implementations are expected to be tolerant of whitespace and
/// punctuation normalization and to return geometry already split by
/// contiguous region.
pub trait TextLocator {
    /// Locate `text` inside the document's text stream.
    fn locate(&self, text: &str, document: &Document) -> Located;
}

/// Resolve excerpt text to per-page bounding polygons.
///
/// Returns one [`Bounds`] per non-empty head/body/tail part of every
/// located fragment, grouped by page ascending with arrival order
/// preserved within a page. An unlocatable text yields an empty vector,
/// which is a normal outcome, not an error. With `force_overlap`, the
/// parts of each fragment are stitched so no visual gap remains between
/// consecutive lines of one highlight.
pub fn locate_text(
    locator: &dyn TextLocator,
    text: &str,
    document: &Document,
    force_overlap: bool,
) -> Vec<Bounds> {
    let located = locator.locate(text, document);
    if !located.found || located.fragments.is_empty() {
        return Vec::new();
    }

    let mut by_page: BTreeMap<u32, Vec<ComplexPolygon>> = BTreeMap::new();
    for fragment in located.fragments {
        by_page
            .entry(fragment.page_number)
            .or_default()
            .push(fragment.polygon);
    }

    let mut bounds = Vec::new();
    for (page_number, polygons) in by_page {
        for complex in polygons {
            let complex = if force_overlap {
                stitch(complex)
            } else {
                complex
            };
            for part in complex.parts() {
                bounds.push(Bounds {
                    page_number,
                    polygon: *part,
                });
            }
        }
    }
    bounds
}

/// Close the vertical gaps between the parts of one fragment.
///
/// With no body, the head's bottom edge is extended down to the tail's
/// top. Otherwise the body's top is clamped up to the head's bottom and
/// its bottom down to the tail's top, in every case only when a gap
/// exists; an already-overlapping edge is never shrunk. The tail is not
/// modified beyond flattening to a plain rectangle.
fn stitch(mut complex: ComplexPolygon) -> ComplexPolygon {
    if let Some(tail) = complex.tail.as_mut() {
        *tail = tail.to_rect();
    }

    match (complex.head.as_mut(), complex.body.as_mut(), complex.tail) {
        (Some(head), None, Some(tail)) => {
            if head.bottom() < tail.top() {
                head.set_bottom(tail.top());
            }
        }
        (head, Some(body), tail) => {
            if let Some(head) = head {
                if body.top() > head.bottom() {
                    body.set_top(head.bottom());
                }
            }
            if let Some(tail) = tail {
                if body.bottom() < tail.top() {
                    body.set_bottom(tail.top());
                }
            }
        }
        _ => {}
    }
    complex
}

/// Complex polygons of several citations, grouped per page.
///
/// One citation may have been split into multiple contiguous pieces by the
/// locator; each inner vector holds one citation's pieces on that page.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationRegionsPerPage {
    /// 1-indexed page number.
    pub page_number: u32,

    /// Per citation, the pieces it contributes to this page.
    pub citation_regions: Vec<Vec<ComplexPolygon>>,
}

/// Group the fragments of several located citations by page, pages
/// ascending, citations in input order within each page.
pub fn citation_regions_per_page(citations: &[Located]) -> Vec<CitationRegionsPerPage> {
    let mut by_page: BTreeMap<u32, Vec<Vec<ComplexPolygon>>> = BTreeMap::new();
    for located in citations {
        if !located.found {
            continue;
        }
        let mut pages: BTreeMap<u32, Vec<ComplexPolygon>> = BTreeMap::new();
        for fragment in &located.fragments {
            pages
                .entry(fragment.page_number)
                .or_default()
                .push(fragment.polygon);
        }
        for (page_number, group) in pages {
            by_page.entry(page_number).or_default().push(group);
        }
    }
    by_page
        .into_iter()
        .map(|(page_number, citation_regions)| CitationRegionsPerPage {
            page_number,
            citation_regions,
        })
        .collect()
}
