/// Where an item should land when scrolling to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Leaves the offset alone when the item is fully visible, otherwise scrolls the least.
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// One materialized, positioned item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub index: usize,
    /// Cumulative height of every item before `index`.
    pub top_offset: u64,
    pub height: u32,
}

impl Slot {
    pub fn bottom_offset(&self) -> u64 {
        self.top_offset.saturating_add(self.height as u64)
    }
}
