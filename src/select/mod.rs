//! Reverse mapping: selection geometry to excerpt text.
//!
//! A free-form selection polygon is resolved in two steps: first to the
//! paragraph region that owns it, then to the exact words it overlaps,
//! whose contents reconstruct the excerpt.

mod pipeline;

pub use pipeline::{
    resolve_selection, RectCombiner, ScreenRect, Selection, VerticalStackCombiner,
    ViewportContext, PIXELS_PER_UNIT,
};

use crate::error::{Error, Result};
use crate::geometry::{adjacent, on_same_line};
use crate::layout::find_intersecting_lines;
use crate::model::{ComplexPolygon, Document, Page, Polygon};

/// Vertical-overlap fraction a selection part must share with a region.
const REGION_LINE_OVERLAP: f64 = 0.9;

/// Adjacency tolerance for the selection-to-region test.
const REGION_ADJACENCY: f64 = 0.1;

/// Tolerances for matching words against a selection's parts.
///
/// The adjacency margins are negative: a word must genuinely overlap the
/// part beyond the margin. Partial lines (head, tail) use a tighter margin
/// than full-width body lines. Empirically tuned; override per call or
/// through [`AlignmentEngine`](crate::AlignmentEngine) when the source
/// geometry warrants it.
#[derive(Debug, Clone, Copy)]
pub struct WordMatchTolerances {
    /// Adjacency margin against the head and tail parts.
    pub partial_line: f64,

    /// Adjacency margin against the body part.
    pub full_line: f64,

    /// Minimum vertical-overlap fraction for the same-line test.
    pub line_overlap: f64,
}

impl Default for WordMatchTolerances {
    fn default() -> Self {
        Self {
            partial_line: -0.05,
            full_line: -0.1,
            line_overlap: 0.9,
        }
    }
}

/// Fetch a page, enforcing the query preconditions.
///
/// The page must exist and, if it carries text, must have been annotated
/// with paragraph regions. Violations fail fast instead of producing a
/// silent wrong answer.
fn annotated_page(document: &Document, page_number: u32) -> Result<&Page> {
    let page = document
        .page(page_number)
        .ok_or_else(|| Error::PageOutOfRange(page_number, document.page_count()))?;
    if page.regions.is_empty() && page.has_text() {
        return Err(Error::MissingRegions(page_number));
    }
    Ok(page)
}

/// Resolve the paragraph a selection belongs to.
///
/// Every non-empty part of the selection is tested against each
/// precomputed region polygon with the same-line and adjacency predicates.
/// Exactly one region is expected to match; zero matches resolve to
/// `None`, and multiple matches are logged as an anomaly and resolved
/// deterministically to the smallest paragraph index.
pub fn resolve_paragraph(
    document: &Document,
    page_number: u32,
    complex: &ComplexPolygon,
) -> Result<Option<usize>> {
    let page = annotated_page(document, page_number)?;

    let mut matches: Vec<usize> = Vec::new();
    for region in &page.regions {
        let hit = complex.parts().any(|part| {
            on_same_line(part, &region.polygon, REGION_LINE_OVERLAP)
                && adjacent(part, &region.polygon, REGION_ADJACENCY)
        });
        if hit {
            matches.push(region.paragraph_index);
        }
    }

    match matches.len() {
        0 => {
            log::debug!("selection matched no paragraph region on page {page_number}");
            Ok(None)
        }
        1 => Ok(Some(matches[0])),
        n => {
            log::warn!(
                "selection matched {n} paragraph regions on page {page_number}; \
                 resolving to the smallest paragraph index"
            );
            Ok(matches.iter().copied().min())
        }
    }
}

/// Reconstruct the excerpt text a selection covers within one paragraph.
///
/// Candidate words are the paragraph region's inclusive word range; each
/// is accepted when it is adjacent to and on the same line as any
/// non-empty part of the selection, with the part-specific margins from
/// `tolerances`. Parts that intersect no line on the page are skipped up
/// front. Accepted words are joined with single spaces in their original
/// offset order; a word is added at most once even when several parts
/// match it.
pub fn extract_words(
    document: &Document,
    page_number: u32,
    paragraph_index: usize,
    complex: &ComplexPolygon,
    tolerances: &WordMatchTolerances,
) -> Result<String> {
    let page = annotated_page(document, page_number)?;

    let Some(region) = page.region_for_paragraph(paragraph_index) else {
        return Ok(String::new());
    };
    let candidates = page.region_words(region);
    if candidates.is_empty() {
        return Ok(String::new());
    }

    // A part that touches no line cannot match any word.
    let parts: Vec<(&Polygon, f64)> = part_margins(complex, tolerances)
        .filter(|&(part, _)| !find_intersecting_lines(&page.lines, part).is_empty())
        .collect();
    if parts.is_empty() {
        return Ok(String::new());
    }

    let accepted: Vec<&str> = candidates
        .iter()
        .filter(|word| {
            parts.iter().any(|&(part, margin)| {
                adjacent(&word.polygon, part, margin)
                    && on_same_line(&word.polygon, part, tolerances.line_overlap)
            })
        })
        .map(|word| word.content.as_str())
        .collect();

    Ok(accepted.join(" "))
}

/// The selection's non-empty parts paired with their adjacency margins.
fn part_margins<'a>(
    complex: &'a ComplexPolygon,
    tolerances: &WordMatchTolerances,
) -> impl Iterator<Item = (&'a Polygon, f64)> {
    let partial = tolerances.partial_line;
    let full = tolerances.full_line;
    complex
        .head
        .iter()
        .map(move |p| (p, partial))
        .chain(complex.body.iter().map(move |p| (p, full)))
        .chain(complex.tail.iter().map(move |p| (p, partial)))
}
