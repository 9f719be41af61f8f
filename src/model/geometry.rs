//! Geometric value types.

use serde::{Deserialize, Serialize};

/// An axis-aligned quadrilateral in page-space units.
///
/// Stored as the flat corner array the extraction service emits:
/// `[x0, y0, x1, y1, x2, y2, x3, y3]` in reading order: top-left,
/// top-right, bottom-right, bottom-left. All comparisons treat the shape
/// as axis-aligned and read only the corner indices that carry the
/// left/top/right/bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(pub [f64; 8]);

impl Polygon {
    /// Build an axis-aligned rectangle from its four edges.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Polygon([left, top, right, top, right, bottom, left, bottom])
    }

    /// X coordinate of the left edge (top-left corner).
    pub fn left(&self) -> f64 {
        self.0[0]
    }

    /// Y coordinate of the top edge (top-left corner).
    pub fn top(&self) -> f64 {
        self.0[1]
    }

    /// X coordinate of the right edge (top-right corner).
    pub fn right(&self) -> f64 {
        self.0[2]
    }

    /// Y coordinate of the bottom edge (bottom-right corner).
    pub fn bottom(&self) -> f64 {
        self.0[5]
    }

    /// Width of the axis-aligned extent.
    pub fn width(&self) -> f64 {
        self.right() - self.left()
    }

    /// Height of the axis-aligned extent.
    pub fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Collapse the quadrilateral to the plain rectangle spanned by its
    /// axis-aligned edge reads. Skewed corners are discarded.
    pub fn to_rect(&self) -> Polygon {
        Polygon::from_edges(self.left(), self.top(), self.right(), self.bottom())
    }

    /// Union bounding box of two polygons.
    pub fn union(&self, other: &Polygon) -> Polygon {
        Polygon::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Move the top edge to `y` (rewrites both top corners).
    pub fn set_top(&mut self, y: f64) {
        self.0[1] = y;
        self.0[3] = y;
    }

    /// Move the bottom edge to `y` (rewrites both bottom corners).
    pub fn set_bottom(&mut self, y: f64) {
        self.0[5] = y;
        self.0[7] = y;
    }
}

/// Union bounding box over a non-empty iterator of polygons.
///
/// Returns `None` for an empty iterator.
pub(crate) fn union_all<'a, I>(polygons: I) -> Option<Polygon>
where
    I: IntoIterator<Item = &'a Polygon>,
{
    let mut iter = polygons.into_iter();
    let first = *iter.next()?;
    Some(iter.fold(first, |acc, p| acc.union(p)))
}

/// A selection or citation decomposed across multiple text lines.
///
/// `head` covers the first (possibly partial) line, `body` the full-width
/// middle lines, `tail` the last (possibly partial) line. Any subset may be
/// absent: a single-line selection carries only `head`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexPolygon {
    /// First partial line, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Polygon>,

    /// Full-width middle lines, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Polygon>,

    /// Last partial line, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tail: Option<Polygon>,
}

impl ComplexPolygon {
    /// A single-line selection: head only.
    pub fn single(head: Polygon) -> Self {
        Self {
            head: Some(head),
            body: None,
            tail: None,
        }
    }

    /// Iterate over the non-empty parts in head, body, tail order.
    pub fn parts(&self) -> impl Iterator<Item = &Polygon> {
        self.head
            .iter()
            .chain(self.body.iter())
            .chain(self.tail.iter())
    }

    /// True when no part is present.
    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.body.is_none() && self.tail.is_none()
    }
}

/// A page-scoped rectangle, the unit exchanged with the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    /// 1-indexed page number.
    pub page_number: u32,

    /// Highlight rectangle in page-space units.
    pub polygon: Polygon,
}
