use alloc::sync::Arc;

use crate::error::{OptionsError, Result};
use crate::height::ItemHeight;
use crate::offsets::OffsetStrategy;
use crate::scroll_state::DEFAULT_SCROLLING_RESET_DELAY_MS;

/// Observes every raw scroll offset the host reports.
pub type OnScrollCallback = Arc<dyn Fn(i64) + Send + Sync>;

/// Observes transitions of the scrolling flag. The argument is the new `is_scrolling` value.
pub type OnScrollingChangeCallback = Arc<dyn Fn(bool) + Send + Sync>;

pub const DEFAULT_OVERSCAN: usize = 3;
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: u32 = 50;

/// Configuration for [`crate::WindowEngine`].
///
/// Cheap to clone: closures live behind `Arc`s, so hosts can tweak a field and hand the whole
/// struct back to `WindowEngine::set_options`. The engine decides what needs rebuilding by
/// comparing the item count, the height resolver identity, the estimate and the strategy.
pub struct VirtualListOptions {
    pub count: usize,
    pub viewport_height: u32,
    /// Per-item heights. `None` lays every item out at `estimated_item_height` until the host
    /// measures it.
    pub item_height: Option<ItemHeight>,
    pub estimated_item_height: u32,
    /// Extra items materialized beyond each edge of the visible range.
    pub overscan: usize,
    pub offset_strategy: OffsetStrategy,
    /// Quiescence delay after the last scroll event before `is_scrolling` drops.
    pub is_scrolling_reset_delay_ms: u64,
    pub initial_offset: i64,
    pub on_scroll: Option<OnScrollCallback>,
    pub on_scrolling_change: Option<OnScrollingChangeCallback>,
}

impl Clone for VirtualListOptions {
    fn clone(&self) -> Self {
        Self {
            count: self.count,
            viewport_height: self.viewport_height,
            item_height: self.item_height.clone(),
            estimated_item_height: self.estimated_item_height,
            overscan: self.overscan,
            offset_strategy: self.offset_strategy,
            is_scrolling_reset_delay_ms: self.is_scrolling_reset_delay_ms,
            initial_offset: self.initial_offset,
            on_scroll: self.on_scroll.clone(),
            on_scrolling_change: self.on_scrolling_change.clone(),
        }
    }
}

impl VirtualListOptions {
    /// Options for `count` items shown through a viewport `viewport_height` pixels tall.
    pub fn new(count: usize, viewport_height: u32) -> Self {
        Self {
            count,
            viewport_height,
            item_height: None,
            estimated_item_height: DEFAULT_ESTIMATED_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            offset_strategy: OffsetStrategy::Auto,
            is_scrolling_reset_delay_ms: DEFAULT_SCROLLING_RESET_DELAY_MS,
            initial_offset: 0,
            on_scroll: None,
            on_scrolling_change: None,
        }
    }

    /// Checks the values `WindowEngine::new` would otherwise silently clamp.
    pub fn validate(&self) -> Result<()> {
        if self.viewport_height == 0 {
            return Err(OptionsError::ZeroViewportHeight);
        }
        if self.estimated_item_height == 0 {
            return Err(OptionsError::ZeroEstimatedItemHeight);
        }
        Ok(())
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_item_height(mut self, item_height: impl Into<ItemHeight>) -> Self {
        self.item_height = Some(item_height.into());
        self
    }

    pub fn with_fixed_item_height(mut self, height: u32) -> Self {
        self.item_height = Some(ItemHeight::Fixed(height));
        self
    }

    pub fn with_dynamic_item_height(
        mut self,
        f: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.item_height = Some(ItemHeight::dynamic(f));
        self
    }

    pub fn with_estimated_item_height(mut self, height: u32) -> Self {
        self.estimated_item_height = height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_offset_strategy(mut self, strategy: OffsetStrategy) -> Self {
        self.offset_strategy = strategy;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_initial_offset(mut self, offset: i64) -> Self {
        self.initial_offset = offset;
        self
    }

    pub fn with_on_scroll(
        mut self,
        on_scroll: Option<impl Fn(i64) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scroll = on_scroll.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_scrolling_change(
        mut self,
        on_change: Option<impl Fn(bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_scrolling_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn layout_matches(&self, other: &Self) -> bool {
        let same_height = match (&self.item_height, &other.item_height) {
            (Some(a), Some(b)) => a.same_as(b),
            (None, None) => true,
            _ => false,
        };
        same_height
            && self.count == other.count
            && self.estimated_item_height == other.estimated_item_height
            && self.offset_strategy == other.offset_strategy
    }
}

impl core::fmt::Debug for VirtualListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("count", &self.count)
            .field("viewport_height", &self.viewport_height)
            .field("item_height", &self.item_height)
            .field("estimated_item_height", &self.estimated_item_height)
            .field("overscan", &self.overscan)
            .field("offset_strategy", &self.offset_strategy)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .field("initial_offset", &self.initial_offset)
            .finish_non_exhaustive()
    }
}
