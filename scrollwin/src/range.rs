use core::cmp;
use core::ops::RangeInclusive;

use crate::offsets::OffsetAccumulator;

/// An inclusive, non-empty range of item indexes.
///
/// Empty collections never produce a `VisibleRange`; range queries return `None` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    /// Inclusive.
    pub end_index: usize,
}

impl VisibleRange {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        debug_assert!(start_index <= end_index, "inverted range");
        Self {
            start_index,
            end_index: cmp::max(start_index, end_index),
        }
    }

    /// Saturates at `usize::MAX` for a range spanning every index.
    pub fn len(&self) -> usize {
        (self.end_index - self.start_index).saturating_add(1)
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Widens the range by `overscan` items on each side, staying within `0..count`.
    pub fn overscanned(&self, overscan: usize, count: usize) -> Self {
        let last = count.saturating_sub(1);
        Self {
            start_index: self.start_index.saturating_sub(overscan),
            end_index: cmp::min(last, self.end_index.saturating_add(overscan)).max(self.end_index),
        }
    }
}

/// Clamps a raw host scroll offset into `[0, total_height]`.
///
/// Negative values come from rubber-band scrolling; values past the end from over-scroll.
pub fn clamp_scroll_offset(scroll_offset: i64, total_height: u64) -> u64 {
    if scroll_offset <= 0 {
        return 0;
    }
    cmp::min(scroll_offset as u64, total_height)
}

/// Computes the strictly visible range for a viewport at `scroll_offset`.
///
/// The viewport covers the half-open pixel span `[offset, offset + viewport_height)`: the
/// start is the item under its first pixel and the end is the item under its last pixel, so
/// any item touching the viewport from inside is included. A zero `viewport_height` is
/// treated as a single pixel.
pub fn compute_visible_range(
    offsets: &OffsetAccumulator,
    scroll_offset: i64,
    viewport_height: u32,
) -> Option<VisibleRange> {
    if offsets.is_empty() {
        return None;
    }

    let total = offsets.total_height();
    let top = clamp_scroll_offset(scroll_offset, total);
    let view = cmp::max(viewport_height, 1) as u64;
    let last_pixel = top.saturating_add(view - 1);

    let start = offsets.index_at_offset(top)?;
    let end = offsets.index_at_offset(last_pixel)?;
    vtrace!(top, last_pixel, start, end, "compute_visible_range");
    Some(VisibleRange::new(start, cmp::max(start, end)))
}

/// Computes the range to materialize: the visible range widened by `overscan` on each side.
pub fn compute_range(
    offsets: &OffsetAccumulator,
    scroll_offset: i64,
    viewport_height: u32,
    overscan: usize,
) -> Option<VisibleRange> {
    compute_visible_range(offsets, scroll_offset, viewport_height)
        .map(|visible| visible.overscanned(overscan, offsets.len()))
}
