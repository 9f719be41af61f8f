//! Axis-aligned quadrilateral comparisons.
//!
//! These are the geometric primitives every spatial query is built on:
//! fuzzy adjacency, same-line testing, and the reading-order comparator
//! that drives the contiguous binary search.

use std::cmp::Ordering;

use crate::model::Polygon;

/// Default adjacency tolerance in page-space units.
pub const DEFAULT_ADJACENCY: f64 = 0.2;

/// Round a coordinate to one decimal, the resolution adjacency works at.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Signed separation between two intervals after rounding.
///
/// Positive when disjoint (the gap size), negative when overlapping (the
/// overlap size, negated).
fn axis_gap(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> f64 {
    let a_lo = round1(a_lo);
    let a_hi = round1(a_hi);
    let b_lo = round1(b_lo);
    let b_hi = round1(b_hi);
    (b_lo - a_hi).max(a_lo - b_hi)
}

/// True if the two rectangles' projections overlap, or are separated by at
/// most `delta` page-space units, on both axes.
///
/// A negative `delta` requires genuine overlap beyond that margin, which
/// rejects a neighboring but distinct line. Symmetric in its polygon
/// arguments.
pub fn adjacent(a: &Polygon, b: &Polygon, delta: f64) -> bool {
    axis_gap(a.left(), a.right(), b.left(), b.right()) <= delta
        && axis_gap(a.top(), a.bottom(), b.top(), b.bottom()) <= delta
}

/// True if the vertical extents overlap by at least `min_overlap_fraction`
/// of the smaller rectangle's height.
///
/// Rejects words that are horizontally adjacent but sit on a different
/// text line, such as the two-column false-adjacency case.
pub fn on_same_line(a: &Polygon, b: &Polygon, min_overlap_fraction: f64) -> bool {
    let overlap = a.bottom().min(b.bottom()) - a.top().max(b.top());
    let min_height = a.height().min(b.height());
    overlap >= min_overlap_fraction * min_height && overlap > 0.0
}

/// Position of a polygon relative to a reference, in reading order.
///
/// Touching edges count as strictly before/after, not overlapping, which
/// keeps the tri-partition stable for the binary search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonOrder {
    /// Strictly above the reference (-1).
    Above,
    /// Strictly below the reference (+1).
    Below,
    /// Vertically overlapping but strictly to the left (-2).
    LeftOf,
    /// Vertically overlapping but strictly to the right (+2).
    RightOf,
    /// Overlapping on both axes (0).
    Overlapping,
}

impl PolygonOrder {
    /// Collapse to a three-way ordering for the contiguous binary search:
    /// above/left precede, below/right follow.
    pub fn ordering(self) -> Ordering {
        match self {
            PolygonOrder::Above | PolygonOrder::LeftOf => Ordering::Less,
            PolygonOrder::Below | PolygonOrder::RightOf => Ordering::Greater,
            PolygonOrder::Overlapping => Ordering::Equal,
        }
    }

    /// The comparator's numeric convention.
    pub fn value(self) -> i8 {
        match self {
            PolygonOrder::Above => -1,
            PolygonOrder::Below => 1,
            PolygonOrder::LeftOf => -2,
            PolygonOrder::RightOf => 2,
            PolygonOrder::Overlapping => 0,
        }
    }
}

/// Reading-order comparator: where does `poly` sit relative to `reference`?
///
/// Vertical extents are compared first; only vertically overlapping
/// polygons are compared horizontally. Correctness of the binary search
/// requires the reference sequence itself to be sorted in reading order.
pub fn compare_polygons(poly: &Polygon, reference: &Polygon) -> PolygonOrder {
    if poly.bottom() <= reference.top() {
        return PolygonOrder::Above;
    }
    if poly.top() >= reference.bottom() {
        return PolygonOrder::Below;
    }
    if poly.right() <= reference.left() {
        return PolygonOrder::LeftOf;
    }
    if poly.left() >= reference.right() {
        return PolygonOrder::RightOf;
    }
    PolygonOrder::Overlapping
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_small_gap_within_delta() {
        let a = Polygon([0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]);
        let b = Polygon([1.1, 0.0, 2.1, 0.0, 2.1, 1.0, 0.0, 1.0]);
        // Gap of 0.1 on the X axis, overlap on Y.
        assert!(adjacent(&a, &b, 0.2));
        assert!(adjacent(&b, &a, 0.2));
        assert!(!adjacent(&a, &b, -0.05));
    }

    #[test]
    fn test_adjacent_rounds_to_one_decimal() {
        let a = Polygon::from_edges(0.0, 0.0, 1.0, 1.0);
        // 1.24 rounds to 1.2, so the gap becomes 0.2 exactly.
        let b = Polygon::from_edges(1.24, 0.0, 2.0, 1.0);
        assert!(adjacent(&a, &b, 0.2));
        // 1.26 rounds to 1.3, pushing the gap past delta.
        let c = Polygon::from_edges(1.26, 0.0, 2.0, 1.0);
        assert!(!adjacent(&a, &c, 0.2));
    }

    #[test]
    fn test_adjacent_requires_both_axes() {
        let a = Polygon::from_edges(0.0, 0.0, 1.0, 1.0);
        // Close on X, far on Y.
        let b = Polygon::from_edges(1.05, 3.0, 2.0, 4.0);
        assert!(!adjacent(&a, &b, 0.2));
    }

    #[test]
    fn test_negative_delta_requires_genuine_overlap() {
        let a = Polygon::from_edges(0.0, 0.0, 1.0, 1.0);
        let b = Polygon::from_edges(0.8, 0.0, 1.8, 1.0);
        // 0.2 of genuine X overlap passes a -0.1 margin.
        assert!(adjacent(&a, &b, -0.1));
        let c = Polygon::from_edges(0.95, 0.0, 1.8, 1.0);
        // 0.95 rounds to 1.0, leaving no overlap at all.
        assert!(!adjacent(&a, &c, -0.2));
    }

    #[test]
    fn test_on_same_line() {
        let a = Polygon::from_edges(0.0, 1.0, 1.0, 1.2);
        let b = Polygon::from_edges(2.0, 1.0, 3.0, 1.2);
        assert!(on_same_line(&a, &b, 0.9));

        // Next line down: no vertical overlap at all.
        let c = Polygon::from_edges(2.0, 1.25, 3.0, 1.45);
        assert!(!on_same_line(&a, &c, 0.9));

        // Half overlap fails a 0.9 requirement but passes 0.4.
        let d = Polygon::from_edges(2.0, 1.1, 3.0, 1.3);
        assert!(!on_same_line(&a, &d, 0.9));
        assert!(on_same_line(&a, &d, 0.4));
    }

    #[test]
    fn test_compare_polygons_vertical() {
        let reference = Polygon::from_edges(0.0, 1.0, 1.0, 2.0);
        let above = Polygon::from_edges(0.0, 0.0, 1.0, 0.5);
        let below = Polygon::from_edges(0.0, 3.0, 1.0, 4.0);
        assert_eq!(compare_polygons(&above, &reference), PolygonOrder::Above);
        assert_eq!(compare_polygons(&above, &reference).value(), -1);
        assert_eq!(compare_polygons(&below, &reference), PolygonOrder::Below);
        assert_eq!(compare_polygons(&below, &reference).value(), 1);
    }

    #[test]
    fn test_compare_polygons_horizontal() {
        let reference = Polygon::from_edges(1.0, 1.0, 2.0, 2.0);
        let right = Polygon::from_edges(3.0, 1.2, 4.0, 1.8);
        let left = Polygon::from_edges(0.0, 1.2, 0.5, 1.8);
        assert_eq!(compare_polygons(&right, &reference), PolygonOrder::RightOf);
        assert_eq!(compare_polygons(&right, &reference).value(), 2);
        assert_eq!(compare_polygons(&left, &reference), PolygonOrder::LeftOf);

        let overlapping = Polygon::from_edges(1.5, 1.2, 2.5, 1.8);
        assert_eq!(
            compare_polygons(&overlapping, &reference),
            PolygonOrder::Overlapping
        );
    }

    #[test]
    fn test_compare_polygons_touching_edges_are_strict() {
        let reference = Polygon::from_edges(0.0, 1.0, 1.0, 2.0);
        let touching_above = Polygon::from_edges(0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            compare_polygons(&touching_above, &reference),
            PolygonOrder::Above
        );
    }

    #[test]
    fn test_ordering_collapse() {
        assert_eq!(PolygonOrder::Above.ordering(), Ordering::Less);
        assert_eq!(PolygonOrder::LeftOf.ordering(), Ordering::Less);
        assert_eq!(PolygonOrder::Below.ordering(), Ordering::Greater);
        assert_eq!(PolygonOrder::RightOf.ordering(), Ordering::Greater);
        assert_eq!(PolygonOrder::Overlapping.ordering(), Ordering::Equal);
    }
}
