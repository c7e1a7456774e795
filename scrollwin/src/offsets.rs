use alloc::vec::Vec;
use core::cell::Cell;

use crate::fenwick::Fenwick;
use crate::height::{ItemHeight, clamp_height};

/// Collections at or below this size use [`OffsetStrategy::Linear`] under
/// [`OffsetStrategy::Auto`].
pub const LINEAR_SCAN_LIMIT: usize = 1024;

/// How cumulative offsets are located.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OffsetStrategy {
    /// Picks `Linear` for small collections and `PrefixSum` for large ones.
    #[default]
    Auto,
    /// Walks the height cache from the last resolved position.
    Linear,
    /// Binary indexed tree with `O(log n)` lookups in both directions.
    PrefixSum,
}

impl OffsetStrategy {
    /// Resolves `Auto` for a collection of `count` items.
    pub fn for_count(self, count: usize) -> Self {
        match self {
            Self::Auto if count <= LINEAR_SCAN_LIMIT => Self::Linear,
            Self::Auto => Self::PrefixSum,
            other => other,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
    index: usize,
    // cumulative offset of `index`
    offset: u64,
}

#[derive(Clone, Debug)]
enum Sums {
    Linear { total: u64, cursor: Cell<Cursor> },
    PrefixSum(Fenwick),
}

/// Cumulative offsets over a snapshot of item heights.
///
/// The accumulator owns a resolved copy of every height (clamped to
/// [`crate::MIN_ITEM_HEIGHT`]) so the resolver is called once per index per rebuild. Any change
/// to the item count or resolver requires a [`Self::rebuild`], which bumps [`Self::version`];
/// nothing is carried over from the previous snapshot.
#[derive(Clone, Debug)]
pub struct OffsetAccumulator {
    heights: Vec<u32>,
    measured: Vec<bool>,
    sums: Sums,
    strategy: OffsetStrategy,
    version: u64,
}

impl OffsetAccumulator {
    /// Builds the table for `count` items.
    ///
    /// Without an `item_height`, every item starts at `estimated_height` until measured.
    pub fn new(
        count: usize,
        item_height: Option<&ItemHeight>,
        estimated_height: u32,
        strategy: OffsetStrategy,
    ) -> Self {
        let mut acc = Self {
            heights: Vec::new(),
            measured: Vec::new(),
            sums: Sums::Linear {
                total: 0,
                cursor: Cell::new(Cursor::default()),
            },
            strategy: strategy.for_count(count),
            version: 0,
        };
        acc.fill(count, item_height, estimated_height, strategy);
        acc
    }

    /// Discards every cached height and recomputes the table from scratch.
    pub fn rebuild(
        &mut self,
        count: usize,
        item_height: Option<&ItemHeight>,
        estimated_height: u32,
        strategy: OffsetStrategy,
    ) {
        self.fill(count, item_height, estimated_height, strategy);
        self.version = self.version.wrapping_add(1);
        vdebug!(
            count,
            version = self.version,
            strategy = ?self.strategy,
            "offset table rebuilt"
        );
    }

    fn fill(
        &mut self,
        count: usize,
        item_height: Option<&ItemHeight>,
        estimated_height: u32,
        strategy: OffsetStrategy,
    ) {
        self.heights.clear();
        self.measured.clear();
        self.heights.reserve_exact(count);
        self.measured.reserve_exact(count);

        let estimate = clamp_height(0, estimated_height);
        for i in 0..count {
            let h = match item_height {
                Some(resolver) => resolver.resolve(i),
                None => estimate,
            };
            self.heights.push(h);
            self.measured.push(false);
        }

        self.strategy = strategy.for_count(count);
        self.sums = match self.strategy {
            OffsetStrategy::PrefixSum => Sums::PrefixSum(Fenwick::from_heights(&self.heights)),
            _ => Sums::Linear {
                total: self.heights.iter().map(|&h| h as u64).sum(),
                cursor: Cell::new(Cursor::default()),
            },
        };
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Bumped on every rebuild; equal versions mean the same snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The strategy in effect (never `Auto`).
    pub fn strategy(&self) -> OffsetStrategy {
        self.strategy
    }

    pub fn height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    pub fn total_height(&self) -> u64 {
        match &self.sums {
            Sums::Linear { total, .. } => *total,
            Sums::PrefixSum(f) => f.total(),
        }
    }

    /// Sum of the heights of every item before `index`.
    ///
    /// `index` may equal `len()`, which yields the total height; larger values are clamped to it.
    pub fn cumulative_offset(&self, index: usize) -> u64 {
        let n = self.len();
        if index >= n {
            return self.total_height();
        }
        match &self.sums {
            Sums::PrefixSum(f) => f.prefix_sum(index),
            Sums::Linear { cursor, .. } => {
                let at = self.walk_to_index(cursor.get(), index);
                cursor.set(at);
                at.offset
            }
        }
    }

    /// Returns the item covering `offset`: the smallest `s` with
    /// `cumulative_offset(s + 1) > offset`.
    ///
    /// Offsets at or past the total height map to the last item. Returns `None` only when the
    /// collection is empty.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let n = self.len();
        if n == 0 {
            return None;
        }
        let found = match &self.sums {
            Sums::PrefixSum(f) => f.lower_bound(offset),
            Sums::Linear { cursor, .. } => {
                let at = self.walk_to_offset(cursor.get(), offset);
                cursor.set(at);
                at.index
            }
        };
        Some(found.min(n - 1))
    }

    /// Replaces the height of one item, returning the signed change.
    ///
    /// Out-of-range indices are ignored. The override lasts until the next rebuild.
    pub fn set_height(&mut self, index: usize, height: u32) -> i64 {
        if index >= self.len() {
            vwarn!(index, count = self.len(), "set_height: index out of range");
            return 0;
        }
        let height = clamp_height(index, height);
        let prev = self.heights[index];
        self.measured[index] = true;
        if prev == height {
            return 0;
        }
        self.heights[index] = height;
        let delta = height as i64 - prev as i64;
        match &mut self.sums {
            Sums::PrefixSum(f) => f.add(index, delta),
            Sums::Linear { total, cursor } => {
                *total = if delta > 0 {
                    total.saturating_add(delta as u64)
                } else {
                    total.saturating_sub(delta.unsigned_abs())
                };
                if cursor.get().index > index {
                    cursor.set(Cursor::default());
                }
            }
        }
        delta
    }

    fn walk_to_index(&self, from: Cursor, target: usize) -> Cursor {
        let mut at = from;
        // Restarting from zero is cheaper than walking back past the midpoint.
        if target < at.index && at.index - target > target {
            at = Cursor::default();
        }
        while at.index < target {
            at.offset = at.offset.saturating_add(self.heights[at.index] as u64);
            at.index += 1;
        }
        while at.index > target {
            at.index -= 1;
            at.offset = at.offset.saturating_sub(self.heights[at.index] as u64);
        }
        at
    }

    fn walk_to_offset(&self, from: Cursor, target: u64) -> Cursor {
        let n = self.len();
        let mut at = from;
        if at.offset <= target {
            while at.index < n {
                let end = at.offset.saturating_add(self.heights[at.index] as u64);
                if end > target {
                    break;
                }
                at.offset = end;
                at.index += 1;
            }
        } else {
            while at.index > 0 && at.offset > target {
                at.index -= 1;
                at.offset = at.offset.saturating_sub(self.heights[at.index] as u64);
            }
        }
        at
    }
}
