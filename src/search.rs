//! Offset primitives and the contiguous-range binary search.
//!
//! One generic routine serves both spatial queries: finding the lines a
//! polygon intersects (comparator: collapsed [`compare_polygons`]) and
//! finding the words an offset range covers (comparator:
//! [`compare_offsets`]). Both rely on the same precondition: relative to
//! the query, the sequence is tri-partitioned: every element comparing
//! `Less` precedes every `Equal`, which precedes every `Greater`. That
//! holds for reading-order geometry within one column and for offset
//! ranges within one page.
//!
//! [`compare_polygons`]: crate::geometry::compare_polygons

use std::cmp::Ordering;

/// Compare a character-offset range `(start, end)` against a reference
/// offset.
///
/// `Less` if the range ends before the offset, `Greater` if it starts
/// after, otherwise `Equal` (the range contains or touches the offset).
pub fn compare_offsets(range: (u32, u32), offset: u32) -> Ordering {
    if range.1 < offset {
        Ordering::Less
    } else if range.0 > offset {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Find the contiguous sub-range of `items` matching a query.
///
/// `cmp` reports where the query sits relative to an element: `Less` when
/// the query lies entirely before it, `Greater` when entirely after,
/// `Equal` on overlap. The midpoint is probed, halving the window until an
/// overlap is found, then the match is expanded linearly in both
/// directions. Returns the inclusive `(first, last)` slice, or `None` when
/// `items` is empty or nothing matches.
///
/// Worst case O(log n + k) for k matches; a query spanning most of the
/// sequence degrades to O(n).
pub fn contiguous_range<T, F>(items: &[T], mut cmp: F) -> Option<(usize, usize)>
where
    F: FnMut(&T) -> Ordering,
{
    let mut lo = 0usize;
    let mut hi = items.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match cmp(&items[mid]) {
            // Query entirely before the probe: discard the upper half.
            Ordering::Less => hi = mid,
            // Query entirely after the probe: discard the lower half.
            Ordering::Greater => lo = mid + 1,
            Ordering::Equal => {
                let mut first = mid;
                while first > 0 && cmp(&items[first - 1]) == Ordering::Equal {
                    first -= 1;
                }
                let mut last = mid;
                while last + 1 < items.len() && cmp(&items[last + 1]) == Ordering::Equal {
                    last += 1;
                }
                return Some((first, last));
            }
        }
    }

    None
}
