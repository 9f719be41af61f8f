//! Selection pipeline: raw screen rectangles to a canonical excerpt.
//!
//! Converts a browser selection's pixel rectangles into page space, runs
//! the reverse mapper to recover the excerpt text, then re-resolves that
//! text through the forward mapper. The originally drawn geometry is
//! deliberately discarded: the final highlight aligns to the document's
//! own recognized glyph boxes, not to the user's imprecise drag.

use serde::{Deserialize, Serialize};

use super::{extract_words, resolve_paragraph, WordMatchTolerances};
use crate::error::Result;
use crate::geometry::{adjacent, DEFAULT_ADJACENCY};
use crate::locate::{locate_text, TextLocator};
use crate::model::{union_all, Bounds, ComplexPolygon, Document, Polygon};

/// Pixels per page-space unit at 100% zoom.
pub const PIXELS_PER_UNIT: f64 = 72.0;

/// A selection rectangle in screen pixels, as reported by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// Viewport state needed for pixel to page-space conversion.
///
/// Supplied explicitly by the caller (accumulated scroll plus fixed
/// chrome extents), never read from ambient global state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportContext {
    /// Horizontal offset of the page origin in pixels.
    pub dx: f64,
    /// Vertical offset of the page origin in pixels.
    pub dy: f64,
    /// Pixels per page-space unit.
    pub scale: f64,
}

impl ViewportContext {
    /// Create a context with the default 72 px/unit scale.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            scale: PIXELS_PER_UNIT,
        }
    }

    /// Override the pixel-per-unit scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for ViewportContext {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Geometry-combination collaborator: groups raw page-space rectangles
/// into head/body/tail triples.
pub trait RectCombiner {
    /// Combine `rects` into one or more complex polygons.
    fn combine(&self, rects: &[Polygon]) -> Vec<ComplexPolygon>;
}

/// Groups runs of vertically stacked rectangles into head/body/tail
/// triples.
///
/// A run breaks where consecutive rectangles stop being adjacent at the
/// default tolerance. Within a run, the first rectangle becomes the head,
/// the last the tail, and everything between is merged into one body box;
/// a one-rectangle run is head only.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalStackCombiner;

impl RectCombiner for VerticalStackCombiner {
    fn combine(&self, rects: &[Polygon]) -> Vec<ComplexPolygon> {
        let mut complexes = Vec::new();
        let mut run: Vec<Polygon> = Vec::new();

        for &rect in rects {
            if let Some(prev) = run.last() {
                if !adjacent(&rect, prev, DEFAULT_ADJACENCY) {
                    complexes.push(Self::complex_from_run(&run));
                    run.clear();
                }
            }
            run.push(rect);
        }
        if !run.is_empty() {
            complexes.push(Self::complex_from_run(&run));
        }
        complexes
    }
}

impl VerticalStackCombiner {
    fn complex_from_run(run: &[Polygon]) -> ComplexPolygon {
        match run.len() {
            0 => ComplexPolygon::default(),
            1 => ComplexPolygon::single(run[0]),
            2 => ComplexPolygon {
                head: Some(run[0]),
                body: None,
                tail: Some(run[1]),
            },
            n => ComplexPolygon {
                head: Some(run[0]),
                body: union_all(run[1..n - 1].iter()),
                tail: Some(run[n - 1]),
            },
        }
    }
}

/// A resolved selection: the canonical excerpt and its snapped bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Excerpt text reconstructed from the document's own words.
    pub excerpt: String,

    /// Highlight rectangles snapped to recognized glyph geometry.
    pub bounds: Vec<Bounds>,
}

/// Round to the 4-decimal resolution page-space coordinates are kept at.
fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Convert one screen rectangle to a page-space polygon.
fn to_page_space(rect: &ScreenRect, viewport: &ViewportContext) -> Polygon {
    let left = round4((rect.x - viewport.dx) / viewport.scale);
    let top = round4((rect.y - viewport.dy) / viewport.scale);
    let right = round4((rect.x + rect.width - viewport.dx) / viewport.scale);
    let bottom = round4((rect.y + rect.height - viewport.dy) / viewport.scale);
    Polygon::from_edges(left, top, right, bottom)
}

/// Resolve a raw browser selection to a canonical excerpt and bounds.
///
/// Zero-width rectangles are dropped before conversion. The returned
/// bounds come from re-locating the extracted excerpt with
/// `force_overlap`, so they are stable under the user's exact drag
/// geometry. An empty excerpt yields empty bounds; both are valid
/// "nothing to highlight" outcomes.
#[allow(clippy::too_many_arguments)]
pub fn resolve_selection(
    page_number: u32,
    rects: &[ScreenRect],
    document: &Document,
    viewport: &ViewportContext,
    locator: &dyn TextLocator,
    combiner: &dyn RectCombiner,
    tolerances: &WordMatchTolerances,
) -> Result<Selection> {
    let polygons: Vec<Polygon> = rects
        .iter()
        .filter(|r| r.width > 0.0)
        .map(|r| to_page_space(r, viewport))
        .collect();

    let mut pieces: Vec<String> = Vec::new();
    for complex in combiner.combine(&polygons) {
        if complex.is_empty() {
            continue;
        }
        let Some(paragraph_index) = resolve_paragraph(document, page_number, &complex)? else {
            continue;
        };
        let words = extract_words(document, page_number, paragraph_index, &complex, tolerances)?;
        if !words.is_empty() {
            pieces.push(words);
        }
    }

    let excerpt = pieces.join(" ");
    let bounds = if excerpt.is_empty() {
        Vec::new()
    } else {
        locate_text(locator, &excerpt, document, true)
    };

    Ok(Selection { excerpt, bounds })
}
