use alloc::vec::Vec;

use crate::offsets::OffsetAccumulator;
use crate::range::VisibleRange;
use crate::types::Slot;

/// The positioned slots for one range plus the size of the scrollable content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderWindow {
    /// Ascending by index, each slot starting where the previous one ends.
    pub slots: Vec<Slot>,
    /// Height the host should give the scrollable container.
    pub total_height: u64,
}

impl RenderWindow {
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index span covered by the slots, if any.
    pub fn range(&self) -> Option<VisibleRange> {
        let first = self.slots.first()?;
        let last = self.slots.last()?;
        Some(VisibleRange::new(first.index, last.index))
    }
}

/// Visits a slot for every index in `range`, in ascending order, without allocating.
///
/// Only the first slot's offset is looked up; the rest are accumulated from heights.
pub fn for_each_slot(
    range: Option<VisibleRange>,
    offsets: &OffsetAccumulator,
    mut f: impl FnMut(Slot),
) {
    let Some(range) = clamp_to(range, offsets) else {
        return;
    };
    let mut top = offsets.cumulative_offset(range.start_index);
    for index in range.indexes() {
        let Some(height) = offsets.height(index) else {
            break;
        };
        f(Slot {
            index,
            top_offset: top,
            height,
        });
        top = top.saturating_add(height as u64);
    }
}

/// The part of `range` that still exists in `offsets`.
fn clamp_to(range: Option<VisibleRange>, offsets: &OffsetAccumulator) -> Option<VisibleRange> {
    let range = range?;
    let last = offsets.len().checked_sub(1)?;
    (range.start_index <= last)
        .then(|| VisibleRange::new(range.start_index, range.end_index.min(last)))
}

/// Materializes `range` into positioned slots.
///
/// Indexes past the end of `offsets` (a range computed before the collection shrank) are
/// dropped.
pub fn build_slots(range: Option<VisibleRange>, offsets: &OffsetAccumulator) -> RenderWindow {
    let mut slots = Vec::with_capacity(clamp_to(range, offsets).map_or(0, |r| r.len()));
    for_each_slot(range, offsets, |slot| slots.push(slot));
    RenderWindow {
        slots,
        total_height: offsets.total_height(),
    }
}
