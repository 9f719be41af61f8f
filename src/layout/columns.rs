//! Column partitioning of reading-order line sequences.

use crate::geometry::{adjacent, compare_polygons, DEFAULT_ADJACENCY};
use crate::model::{Line, Polygon};
use crate::search::contiguous_range;

/// A contiguous reading-order run of lines sharing one visual column.
///
/// Ephemeral: recomputed per query, never persisted. The polygon is the
/// union bounding box of every member line, not just the first and last,
/// so short header or footer lines cannot produce an accidentally tight
/// box.
#[derive(Debug, Clone)]
pub struct Column<'a> {
    /// Union bounding box of the member lines.
    pub polygon: Polygon,

    /// The member lines, a slice of the page's reading-order sequence.
    pub lines: &'a [Line],

    /// Index of `lines[0]` within the page's line sequence.
    pub first_line: usize,
}

/// Split a page's reading-order lines into column groups.
///
/// Single forward scan: a column boundary is declared between consecutive
/// lines whenever their polygons are not adjacent at the default
/// tolerance. Zero lines yield one empty column; one line yields one
/// column containing it.
pub fn split_into_columns(lines: &[Line]) -> Vec<Column<'_>> {
    if lines.is_empty() {
        return vec![Column {
            polygon: Polygon::from_edges(0.0, 0.0, 0.0, 0.0),
            lines,
            first_line: 0,
        }];
    }

    let mut columns = Vec::new();
    let mut start = 0usize;
    let mut polygon = lines[0].polygon;

    for i in 0..lines.len() {
        let last_of_column =
            i + 1 == lines.len() || !adjacent(&lines[i + 1].polygon, &lines[i].polygon, DEFAULT_ADJACENCY);
        if last_of_column {
            columns.push(Column {
                polygon,
                lines: &lines[start..=i],
                first_line: start,
            });
            if i + 1 < lines.len() {
                start = i + 1;
                polygon = lines[i + 1].polygon;
            }
        } else {
            polygon = polygon.union(&lines[i + 1].polygon);
        }
    }

    log::debug!("split {} lines into {} columns", lines.len(), columns.len());
    columns
}

/// Find the lines a query polygon intersects, as inclusive global index
/// ranges, one per intersecting column.
///
/// Columns not adjacent to the query are skipped entirely; within each
/// remaining column the reading-order comparator drives a contiguous
/// binary search.
pub fn find_intersecting_lines(lines: &[Line], polygon: &Polygon) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    for column in split_into_columns(lines) {
        if column.lines.is_empty() {
            continue;
        }
        if !adjacent(polygon, &column.polygon, DEFAULT_ADJACENCY) {
            continue;
        }
        if let Some((first, last)) = contiguous_range(column.lines, |line| {
            compare_polygons(polygon, &line.polygon).ordering()
        }) {
            ranges.push((column.first_line + first, column.first_line + last));
        }
    }
    ranges
}
