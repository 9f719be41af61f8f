//! Page layout analysis: column partitioning and paragraph regions.
//!
//! Reading order degrades from a single sorted sequence to multiple
//! interleaved sequences once a page has several visual columns, so every
//! spatial query first selects the relevant column(s) and only then
//! binary-searches inside each. Paragraph regions are the other half of
//! the precomputation: which contiguous slice of a page's lines and words
//! each paragraph owns.

mod columns;
mod regions;

pub use columns::{find_intersecting_lines, split_into_columns, Column};
pub use regions::{annotate, annotate_with_options, regions_for_page, AnnotateOptions};
