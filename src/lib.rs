//! # docalign
//!
//! Bidirectional mapping between a document's linear text-offset space and
//! its page geometry, for layouts produced by an AI extraction service.
//!
//! A document arrives as pages of recognized words and lines plus semantic
//! paragraphs, each carrying character-offset spans and bounding polygons.
//! This library aligns the two representations in both directions:
//!
//! - **forward**: excerpt text to per-page bounding polygons, for
//!   rendering highlights;
//! - **reverse**: a free-form selection polygon (for example from a mouse
//!   drag over a rendered page) to the paragraph and exact words it
//!   covers, reconstructing the excerpt text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docalign::{annotate, parse_file, AlignmentEngine, ScreenRect};
//!
//! fn main() -> docalign::Result<()> {
//!     // Ingest the extraction-service output and precompute regions.
//!     let doc = annotate(parse_file("layout.json")?);
//!
//!     let engine = AlignmentEngine::new();
//!
//!     // Text to highlight geometry.
//!     let bounds = engine.locate_text(&doc, "the quoted sentence", true);
//!
//!     // Screen selection to canonical excerpt + geometry.
//!     let rects = [ScreenRect { x: 120.0, y: 340.0, width: 260.0, height: 14.0 }];
//!     let selection = engine.resolve_selection(&doc, 1, &rects)?;
//!     println!("{} ({} bounds)", selection.excerpt, selection.bounds.len());
//!     println!("{}", bounds.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! All queries are synchronous pure functions over the immutable document;
//! the only mutation is the one-time, idempotent [`annotate`] transform
//! that attaches paragraph regions to each page. "Not found" is always an
//! empty result, never an error. External concerns (page rendering, the
//! browser selection API, highlight drawing) stay behind the
//! [`TextLocator`] and [`RectCombiner`] collaborator traits, with built-in
//! reference implementations.

pub mod error;
pub mod geometry;
pub mod layout;
pub mod locate;
pub mod model;
pub mod search;
pub mod select;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{adjacent, compare_polygons, on_same_line, PolygonOrder, DEFAULT_ADJACENCY};
pub use layout::{annotate, annotate_with_options, AnnotateOptions};
pub use locate::{
    citation_regions_per_page, locate_text, CitationRegionsPerPage, Located, LocatedFragment,
    TextLocator, WordSequenceLocator,
};
pub use model::{
    Bounds, ComplexPolygon, Document, Line, Metadata, Page, Paragraph, Polygon, Region, Span, Word,
};
pub use select::{
    extract_words, resolve_paragraph, resolve_selection, RectCombiner, ScreenRect, Selection,
    VerticalStackCombiner, ViewportContext, WordMatchTolerances, PIXELS_PER_UNIT,
};

use std::io::Read;
use std::path::Path;

/// Parse a document structure from extraction-service JSON.
///
/// # Example
///
/// ```no_run
/// let doc = docalign::parse_json(r#"{"content": "", "pages": []}"#).unwrap();
/// assert_eq!(doc.page_count(), 0);
/// ```
pub fn parse_json(json: &str) -> Result<Document> {
    validate(serde_json::from_str(json)?)
}

/// Parse a document structure from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    validate(serde_json::from_reader(reader)?)
}

/// Check the structural invariants every query relies on: pages numbered
/// sequentially from 1, words sorted by span offset within each page.
fn validate(document: Document) -> Result<Document> {
    for (i, page) in document.pages.iter().enumerate() {
        if page.page_number != i as u32 + 1 {
            return Err(Error::InvalidDocument(format!(
                "page {} found at position {}",
                page.page_number,
                i + 1
            )));
        }
        if page
            .words
            .windows(2)
            .any(|pair| pair[0].span.offset > pair[1].span.offset)
        {
            return Err(Error::InvalidDocument(format!(
                "page {}: words are not sorted by offset",
                page.page_number
            )));
        }
    }
    Ok(document)
}

/// Parse a document structure from a JSON file.
///
/// # Example
///
/// ```no_run
/// let doc = docalign::parse_file("layout.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let file = std::fs::File::open(path)?;
    parse_reader(std::io::BufReader::new(file))
}

/// Configured alignment engine.
///
/// Bundles the collaborators and tolerances every query needs: a text
/// locator, a rectangle combiner, word-match tolerances, and the viewport
/// conversion context. Defaults are the built-in
/// [`WordSequenceLocator`] and [`VerticalStackCombiner`].
///
/// # Example
///
/// ```no_run
/// use docalign::{AlignmentEngine, ViewportContext, WordMatchTolerances};
///
/// let engine = AlignmentEngine::new()
///     .with_viewport(ViewportContext::new(48.0, 96.0))
///     .with_tolerances(WordMatchTolerances::default());
/// ```
pub struct AlignmentEngine {
    locator: Box<dyn TextLocator>,
    combiner: Box<dyn RectCombiner>,
    tolerances: WordMatchTolerances,
    viewport: ViewportContext,
}

impl AlignmentEngine {
    /// Create an engine with the built-in collaborators.
    pub fn new() -> Self {
        Self {
            locator: Box::new(WordSequenceLocator::new()),
            combiner: Box::new(VerticalStackCombiner),
            tolerances: WordMatchTolerances::default(),
            viewport: ViewportContext::default(),
        }
    }

    /// Replace the text-locate collaborator.
    pub fn with_locator(mut self, locator: impl TextLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    /// Replace the geometry-combination collaborator.
    pub fn with_combiner(mut self, combiner: impl RectCombiner + 'static) -> Self {
        self.combiner = Box::new(combiner);
        self
    }

    /// Override the word-match tolerances.
    pub fn with_tolerances(mut self, tolerances: WordMatchTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Set the viewport conversion context.
    pub fn with_viewport(mut self, viewport: ViewportContext) -> Self {
        self.viewport = viewport;
        self
    }

    /// Resolve excerpt text to per-page highlight bounds.
    pub fn locate_text(&self, document: &Document, text: &str, force_overlap: bool) -> Vec<Bounds> {
        locate_text(self.locator.as_ref(), text, document, force_overlap)
    }

    /// Resolve the paragraph a selection belongs to.
    pub fn resolve_paragraph(
        &self,
        document: &Document,
        page_number: u32,
        complex: &ComplexPolygon,
    ) -> Result<Option<usize>> {
        resolve_paragraph(document, page_number, complex)
    }

    /// Reconstruct the excerpt a selection covers within one paragraph.
    pub fn extract_words(
        &self,
        document: &Document,
        page_number: u32,
        paragraph_index: usize,
        complex: &ComplexPolygon,
    ) -> Result<String> {
        extract_words(
            document,
            page_number,
            paragraph_index,
            complex,
            &self.tolerances,
        )
    }

    /// Run the full selection pipeline over raw screen rectangles.
    pub fn resolve_selection(
        &self,
        document: &Document,
        page_number: u32,
        rects: &[ScreenRect],
    ) -> Result<Selection> {
        resolve_selection(
            page_number,
            rects,
            document,
            &self.viewport,
            self.locator.as_ref(),
            self.combiner.as_ref(),
            &self.tolerances,
        )
    }
}

impl Default for AlignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}
