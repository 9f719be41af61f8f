//! Built-in text locator over the recognized word sequences.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::{Located, LocatedFragment, TextLocator};
use crate::model::{union_all, ComplexPolygon, Document, Line, Page, Polygon};

/// Locates text by matching normalized tokens against the reading-order
/// word sequence of each page.
///
/// Matching is tolerant of whitespace and boundary punctuation: tokens are
/// NFKC-normalized, lowercased, and stripped of leading/trailing
/// punctuation before comparison, and words that are pure punctuation
/// never interrupt a match. The first occurrence in reading order wins.
/// Fragments are split at paragraph-region boundaries and at page breaks,
/// and each fragment's geometry is composed per visual line: first line as
/// `head`, full middle lines as `body`, last line as `tail`.
pub struct WordSequenceLocator {
    boundary_punctuation: Regex,
}

impl WordSequenceLocator {
    /// Create a locator.
    pub fn new() -> Self {
        Self {
            boundary_punctuation: Regex::new(r"^[\p{P}\p{S}]+|[\p{P}\p{S}]+$").unwrap(),
        }
    }

    fn normalize(&self, token: &str) -> String {
        let trimmed = self.boundary_punctuation.replace_all(token, "");
        trimmed.nfkc().flat_map(char::to_lowercase).collect()
    }

    /// Index of the region owning word `word_index`, or 0 when the page
    /// has no computed regions.
    fn region_of(page: &Page, word_index: usize) -> usize {
        page.regions
            .iter()
            .position(|r| {
                r.word_range
                    .is_some_and(|(first, last)| word_index >= first && word_index <= last)
            })
            .unwrap_or(0)
    }

    /// Build the fragment list for a matched run of word positions.
    fn build_located(&self, document: &Document, matched: &[(usize, usize)]) -> Located {
        let excerpt = matched
            .iter()
            .map(|&(pi, wi)| document.pages[pi].words[wi].content.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        // Split the run at page breaks and paragraph-region boundaries.
        let mut pieces: Vec<Vec<(usize, usize)>> = Vec::new();
        for &(pi, wi) in matched {
            let boundary = match pieces.last().and_then(|p| p.last()) {
                Some(&(prev_pi, prev_wi)) => {
                    prev_pi != pi
                        || Self::region_of(&document.pages[pi], prev_wi)
                            != Self::region_of(&document.pages[pi], wi)
                }
                None => true,
            };
            match pieces.last_mut() {
                Some(piece) if !boundary => piece.push((pi, wi)),
                _ => pieces.push(vec![(pi, wi)]),
            }
        }

        let fragments = pieces
            .iter()
            .map(|piece| self.fragment_for_piece(document, piece))
            .collect();

        Located {
            excerpt,
            fragments,
            found: true,
        }
    }

    /// Compose one fragment's head/body/tail from its word positions.
    fn fragment_for_piece(&self, document: &Document, piece: &[(usize, usize)]) -> LocatedFragment {
        let page = &document.pages[piece[0].0];

        // Group consecutive words by the visual line they sit on.
        let mut cursor = 0usize;
        let mut groups: Vec<(Option<usize>, Vec<usize>)> = Vec::new();
        for &(_, wi) in piece {
            let line = line_of(&page.lines, page.words[wi].span.offset, &mut cursor);
            match groups.last_mut() {
                Some((group_line, members)) if *group_line == line || line.is_none() => {
                    members.push(wi)
                }
                _ => groups.push((line, vec![wi])),
            }
        }

        let group_box = |(_, members): &(Option<usize>, Vec<usize>)| -> Option<Polygon> {
            union_all(members.iter().map(|&wi| &page.words[wi].polygon))
        };

        let polygon = match groups.len() {
            0 => ComplexPolygon::default(),
            1 => ComplexPolygon {
                head: group_box(&groups[0]),
                body: None,
                tail: None,
            },
            2 => ComplexPolygon {
                head: group_box(&groups[0]),
                body: None,
                tail: group_box(&groups[1]),
            },
            _ => {
                // Middle lines are fully covered; use the lines' own
                // full-width polygons for the body.
                let middles: Vec<Polygon> = groups[1..groups.len() - 1]
                    .iter()
                    .filter_map(|group| match group.0 {
                        Some(line_index) => Some(page.lines[line_index].polygon),
                        None => group_box(group),
                    })
                    .collect();
                ComplexPolygon {
                    head: group_box(&groups[0]),
                    body: union_all(middles.iter()),
                    tail: group_box(&groups[groups.len() - 1]),
                }
            }
        };

        LocatedFragment {
            polygon,
            page_number: page.page_number,
        }
    }
}

impl Default for WordSequenceLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLocator for WordSequenceLocator {
    fn locate(&self, text: &str, document: &Document) -> Located {
        let needle: Vec<String> = text
            .split_whitespace()
            .map(|t| self.normalize(t))
            .filter(|t| !t.is_empty())
            .collect();
        if needle.is_empty() {
            return Located::not_found();
        }

        // Reading-order word positions across the whole document, with
        // their normalized contents.
        let positions: Vec<(usize, usize)> = document
            .pages
            .iter()
            .enumerate()
            .flat_map(|(pi, page)| (0..page.words.len()).map(move |wi| (pi, wi)))
            .collect();
        let normalized: Vec<String> = positions
            .iter()
            .map(|&(pi, wi)| self.normalize(&document.pages[pi].words[wi].content))
            .collect();

        'starts: for start in 0..positions.len() {
            if normalized[start].is_empty() {
                continue;
            }
            let mut matched = Vec::with_capacity(needle.len());
            let mut token = 0usize;
            let mut i = start;
            while token < needle.len() {
                if i >= positions.len() {
                    continue 'starts;
                }
                if normalized[i].is_empty() {
                    // Pure punctuation never interrupts a match.
                    i += 1;
                    continue;
                }
                if normalized[i] != needle[token] {
                    continue 'starts;
                }
                matched.push(positions[i]);
                token += 1;
                i += 1;
            }
            return self.build_located(document, &matched);
        }

        log::debug!("text not found in document: {:?}", text);
        Located::not_found()
    }
}

/// Find the line containing `offset`, advancing `cursor` monotonically.
///
/// Works because lines and the queried offsets both ascend in reading
/// order; an offset falling between lines returns `None` without moving
/// the cursor past its position.
fn line_of(lines: &[Line], offset: u32, cursor: &mut usize) -> Option<usize> {
    while *cursor < lines.len() {
        if lines[*cursor].contains_offset(offset) {
            return Some(*cursor);
        }
        match lines[*cursor].first_offset() {
            Some(first) if first > offset => return None,
            _ => *cursor += 1,
        }
    }
    None
}
