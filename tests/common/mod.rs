//! Shared fixture builders for the integration tests.
//!
//! Documents are built the way the extraction service lays them out: words
//! and lines in reading order with page-global offsets, paragraphs with
//! spans and per-page bounding regions.

use docalign::model::{BoundingRegion, LengthUnit};
use docalign::{annotate, Document, Line, Page, Paragraph, Polygon, Span, Word};

/// Geometry of one laid-out paragraph column.
pub struct ParagraphLayout {
    /// Words per line.
    pub lines: Vec<Vec<&'static str>>,
    /// Left edge of the column.
    pub left: f64,
    /// Top edge of the first line.
    pub top: f64,
}

const LINE_HEIGHT: f64 = 0.2;
const LINE_GAP: f64 = 0.1;
const CHAR_WIDTH: f64 = 0.1;
const WORD_GAP: f64 = 0.1;

/// Append a paragraph's words, lines, and bounding region to `page`,
/// advancing the running text `offset`.
pub fn push_paragraph(
    doc: &mut Document,
    page_index: usize,
    layout: &ParagraphLayout,
    offset: &mut u32,
) {
    let paragraph_start = *offset;
    let mut paragraph_text: Vec<String> = Vec::new();
    let mut right_edge: f64 = layout.left;
    let mut y = layout.top;

    let page_number = doc.pages[page_index].page_number;
    for line_words in &layout.lines {
        let line_start = *offset;
        let mut x = layout.left;
        let mut line_text: Vec<&str> = Vec::new();

        for word in line_words {
            let width = word.len() as f64 * CHAR_WIDTH;
            doc.pages[page_index].words.push(Word {
                content: word.to_string(),
                polygon: Polygon::from_edges(x, y, x + width, y + LINE_HEIGHT),
                span: Span::new(*offset, word.len() as u32),
            });
            *offset += word.len() as u32 + 1;
            x += width + WORD_GAP;
            line_text.push(word);
        }

        let line_content = line_text.join(" ");
        let line_right = x - WORD_GAP;
        doc.pages[page_index].lines.push(Line {
            content: line_content.clone(),
            polygon: Polygon::from_edges(layout.left, y, line_right, y + LINE_HEIGHT),
            spans: vec![Span::new(line_start, line_content.len() as u32)],
        });
        right_edge = right_edge.max(line_right);
        y += LINE_HEIGHT + LINE_GAP;
        paragraph_text.push(line_content);
    }

    let content = paragraph_text.join(" ");
    doc.paragraphs.push(Paragraph {
        content: content.clone(),
        spans: vec![Span::new(paragraph_start, content.len() as u32)],
        bounding_regions: vec![BoundingRegion {
            page_number,
            polygon: Polygon::from_edges(layout.left, layout.top, right_edge, y - LINE_GAP),
        }],
    });
}

/// Add an empty page to the document.
pub fn push_page(doc: &mut Document) -> usize {
    let number = doc.pages.len() as u32 + 1;
    let mut page = Page::new(number, 8.5, 11.0);
    page.unit = LengthUnit::Inch;
    doc.pages.push(page);
    doc.pages.len() - 1
}

/// One page, one single-column paragraph of three lines.
pub fn single_column_document() -> Document {
    let mut doc = Document::new();
    let page = push_page(&mut doc);
    let mut offset = 0;
    push_paragraph(
        &mut doc,
        page,
        &ParagraphLayout {
            lines: vec![
                vec!["the", "quick", "brown", "fox"],
                vec!["jumps", "over", "the"],
                vec!["lazy", "dog", "today"],
            ],
            left: 1.0,
            top: 1.0,
        },
        &mut offset,
    );
    doc.content = doc.paragraphs[0].content.clone();
    annotate(doc)
}

/// One page with two side-by-side columns of one paragraph each, followed
/// by a second page with a single paragraph.
pub fn two_column_document() -> Document {
    let mut doc = Document::new();
    let first = push_page(&mut doc);
    let mut offset = 0;

    // Left column.
    push_paragraph(
        &mut doc,
        first,
        &ParagraphLayout {
            lines: vec![
                vec!["alpha", "beta", "gamma"],
                vec!["delta", "epsilon"],
            ],
            left: 0.5,
            top: 1.0,
        },
        &mut offset,
    );
    // Right column, same vertical band, separated by a wide gutter.
    push_paragraph(
        &mut doc,
        first,
        &ParagraphLayout {
            lines: vec![
                vec!["zeta", "eta", "theta"],
                vec!["iota", "kappa"],
            ],
            left: 4.5,
            top: 1.0,
        },
        &mut offset,
    );

    let second = push_page(&mut doc);
    push_paragraph(
        &mut doc,
        second,
        &ParagraphLayout {
            lines: vec![vec!["lambda", "mu", "nu"]],
            left: 1.0,
            top: 1.0,
        },
        &mut offset,
    );

    doc.content = doc
        .paragraphs
        .iter()
        .map(|p| p.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    annotate(doc)
}
