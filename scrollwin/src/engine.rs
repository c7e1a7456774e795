use alloc::vec::Vec;
use core::cmp;

use crate::error::Result;
use crate::height::{ItemHeight, MIN_ITEM_HEIGHT};
use crate::offsets::{OffsetAccumulator, OffsetStrategy};
use crate::range::{VisibleRange, clamp_scroll_offset, compute_range, compute_visible_range};
use crate::scroll_state::{ScrollPhase, ScrollStateMachine, TimerToken};
use crate::window::{RenderWindow, build_slots, for_each_slot};
use crate::{Align, FrameState, ScrollDirection, Slot, ViewportState, VirtualListOptions};

/// A headless windowed list engine.
///
/// The engine holds no UI objects and never reads a clock. The host drives it:
/// - with the item count and a height resolver (through [`VirtualListOptions`]),
/// - with viewport height and scroll events (`on_scroll`),
/// - with time, either by polling [`Self::tick`] or by delivering scheduled timers to
///   [`Self::on_timer_fired`].
///
/// In return it answers which indexes to materialize and where each one sits. All queries are
/// synchronous and cheap enough to run on every scroll event.
#[derive(Clone, Debug)]
pub struct WindowEngine {
    options: VirtualListOptions,
    viewport_height: u32,
    scroll_offset: i64,
    scroll_direction: Option<ScrollDirection>,
    offsets: OffsetAccumulator,
    scroll: ScrollStateMachine,
}

impl WindowEngine {
    /// Creates an engine, clamping a zero viewport or estimate up to one pixel.
    ///
    /// Use [`Self::try_new`] to reject such options instead.
    pub fn new(options: VirtualListOptions) -> Self {
        let mut options = options;
        if options.viewport_height == 0 {
            vwarn!("viewport height is zero, clamping to 1");
            options.viewport_height = 1;
        }
        if options.estimated_item_height == 0 {
            vwarn!("estimated item height is zero, clamping");
            options.estimated_item_height = MIN_ITEM_HEIGHT;
        }
        vdebug!(
            count = options.count,
            viewport_height = options.viewport_height,
            overscan = options.overscan,
            "WindowEngine::new"
        );
        let offsets = OffsetAccumulator::new(
            options.count,
            options.item_height.as_ref(),
            options.estimated_item_height,
            options.offset_strategy,
        );
        Self {
            viewport_height: options.viewport_height,
            scroll_offset: options.initial_offset,
            scroll_direction: None,
            offsets,
            scroll: ScrollStateMachine::new(options.is_scrolling_reset_delay_ms),
            options,
        }
    }

    pub fn try_new(options: VirtualListOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::new(options))
    }

    pub fn options(&self) -> &VirtualListOptions {
        &self.options
    }

    /// Replaces the options, rebuilding the offset table only if the layout inputs changed.
    ///
    /// Scroll position, phase and measurements survive an options swap that keeps the layout;
    /// a layout change starts over from the new snapshot.
    pub fn set_options(&mut self, options: VirtualListOptions) {
        let rebuild = !self.options.layout_matches(&options);
        self.options = options;
        if self.options.viewport_height == 0 {
            self.options.viewport_height = 1;
        }
        if self.options.estimated_item_height == 0 {
            self.options.estimated_item_height = MIN_ITEM_HEIGHT;
        }
        self.viewport_height = self.options.viewport_height;
        self.scroll
            .set_delay_ms(self.options.is_scrolling_reset_delay_ms);
        vtrace!(count = self.options.count, rebuild, "WindowEngine::set_options");
        if rebuild {
            self.rebuild();
        }
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut VirtualListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    fn rebuild(&mut self) {
        self.offsets.rebuild(
            self.options.count,
            self.options.item_height.as_ref(),
            self.options.estimated_item_height,
            self.options.offset_strategy,
        );
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    /// Changes with every rebuild of the offset table.
    pub fn version(&self) -> u64 {
        self.offsets.version()
    }

    /// The accumulator strategy in effect for the current snapshot.
    pub fn offset_strategy(&self) -> OffsetStrategy {
        self.offsets.strategy()
    }

    pub fn offsets(&self) -> &OffsetAccumulator {
        &self.offsets
    }

    /// Swaps in a new item count. Always rebuilds, even if only the contents changed.
    pub fn set_count(&mut self, count: usize) {
        self.options.count = count;
        self.rebuild();
    }

    /// Swaps the height resolver. Always rebuilds.
    pub fn set_item_height(&mut self, item_height: Option<ItemHeight>) {
        self.options.item_height = item_height;
        self.rebuild();
    }

    pub fn set_estimated_item_height(&mut self, height: u32) {
        let height = cmp::max(height, MIN_ITEM_HEIGHT);
        if self.options.estimated_item_height == height {
            return;
        }
        self.options.estimated_item_height = height;
        if self.options.item_height.is_none() {
            self.rebuild();
        }
    }

    pub fn set_offset_strategy(&mut self, strategy: OffsetStrategy) {
        if self.options.offset_strategy == strategy {
            return;
        }
        self.options.offset_strategy = strategy;
        self.rebuild();
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        let height = cmp::max(height, 1);
        self.viewport_height = height;
        self.options.viewport_height = height;
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    pub fn set_is_scrolling_reset_delay_ms(&mut self, delay_ms: u64) {
        self.options.is_scrolling_reset_delay_ms = delay_ms;
        self.scroll.set_delay_ms(delay_ms);
    }

    /// Records a measured height for one item. Returns the signed change in height.
    pub fn measure(&mut self, index: usize, height: u32) -> i64 {
        vtrace!(index, height, "measure");
        self.offsets.set_height(index, height)
    }

    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, u32)>) {
        for (index, height) in measurements {
            self.offsets.set_height(index, height);
        }
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.offsets.is_measured(index)
    }

    // Scroll events and the scrolling flag.

    /// Applies a scroll event from the host and marks the viewport as scrolling.
    ///
    /// Returns the token of the freshly armed quiescence timer (the previous one is
    /// cancelled), or `None` after [`Self::dispose`].
    pub fn on_scroll(&mut self, scroll_offset: i64, now_ms: u64) -> Option<TimerToken> {
        vtrace!(scroll_offset, now_ms, "on_scroll");
        if self.scroll.is_disposed() {
            return None;
        }
        self.set_scroll_offset(scroll_offset);
        if let Some(cb) = &self.options.on_scroll {
            cb(scroll_offset);
        }
        let was_scrolling = self.scroll.is_scrolling();
        let token = self.scroll.on_scroll_event(now_ms);
        if !was_scrolling && self.scroll.is_scrolling() {
            self.notify_scrolling_change();
        }
        token
    }

    /// Moves the viewport without scroll-event semantics (no timer, no `on_scroll`).
    pub fn set_scroll_offset(&mut self, scroll_offset: i64) {
        self.scroll_direction = match scroll_offset.cmp(&self.scroll_offset) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.scroll_offset = scroll_offset;
    }

    /// Delivers a host-scheduled quiescence timer. Returns `true` if the viewport went idle.
    pub fn on_timer_fired(&mut self, token: TimerToken, now_ms: u64) -> bool {
        let settled = self.scroll.on_timer_fired(token, now_ms);
        if settled {
            self.on_settled();
        }
        settled
    }

    /// Polls the quiescence timer. Returns `true` if the viewport went idle.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let settled = self.scroll.tick(now_ms);
        if settled {
            self.on_settled();
        }
        settled
    }

    /// Marks the viewport idle right away (native scroll-end signal).
    pub fn on_scroll_end(&mut self) -> bool {
        let settled = self.scroll.on_scroll_end();
        if settled {
            self.on_settled();
        }
        settled
    }

    /// Tears the scrolling machinery down. Returns the token that was still armed, so hosts
    /// that scheduled it can cancel their side too.
    ///
    /// Afterwards scroll events are ignored, no timer is armed and no callback fires.
    pub fn dispose(&mut self) -> Option<TimerToken> {
        vdebug!("WindowEngine::dispose");
        self.scroll_direction = None;
        self.scroll.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.scroll.is_disposed()
    }

    fn on_settled(&mut self) {
        self.scroll_direction = None;
        self.notify_scrolling_change();
    }

    fn notify_scrolling_change(&self) {
        if let Some(cb) = &self.options.on_scrolling_change {
            cb(self.scroll.is_scrolling());
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_scrolling()
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// Token of the armed quiescence timer, if any.
    pub fn armed_timer(&self) -> Option<TimerToken> {
        self.scroll.armed_token()
    }

    /// When the armed quiescence timer elapses, for hosts that schedule wake-ups.
    pub fn scroll_deadline_ms(&self) -> Option<u64> {
        self.scroll.deadline_ms()
    }

    /// The raw offset last reported by the host.
    pub fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    /// The offset range queries actually use: the raw offset clamped into `[0, total_height]`.
    pub fn effective_scroll_offset(&self) -> u64 {
        clamp_scroll_offset(self.scroll_offset, self.total_height())
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            scroll_offset: self.scroll_offset,
            viewport_height: self.viewport_height,
        }
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            phase: self.scroll.phase(),
        }
    }

    // Geometry.

    pub fn total_height(&self) -> u64 {
        self.offsets.total_height()
    }

    /// Largest offset at which the viewport is still fully covered by content.
    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.viewport_height as u64)
    }

    pub fn item_height(&self, index: usize) -> Option<u32> {
        self.offsets.height(index)
    }

    /// Sum of the heights before `index`; `index == count()` gives the total height.
    pub fn cumulative_offset(&self, index: usize) -> u64 {
        self.offsets.cumulative_offset(index)
    }

    pub fn item_top(&self, index: usize) -> Option<u64> {
        (index < self.count()).then(|| self.offsets.cumulative_offset(index))
    }

    pub fn item_slot(&self, index: usize) -> Option<Slot> {
        let height = self.offsets.height(index)?;
        Some(Slot {
            index,
            top_offset: self.offsets.cumulative_offset(index),
            height,
        })
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        self.offsets.index_at_offset(offset)
    }

    // Ranges and slots.

    /// The strictly visible range, without overscan.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible_range_for(self.scroll_offset, self.viewport_height)
    }

    pub fn visible_range_for(
        &self,
        scroll_offset: i64,
        viewport_height: u32,
    ) -> Option<VisibleRange> {
        compute_visible_range(&self.offsets, scroll_offset, viewport_height)
    }

    /// The range to materialize: the visible range widened by the overscan.
    pub fn virtual_range(&self) -> Option<VisibleRange> {
        self.virtual_range_for(self.scroll_offset, self.viewport_height)
    }

    pub fn virtual_range_for(
        &self,
        scroll_offset: i64,
        viewport_height: u32,
    ) -> Option<VisibleRange> {
        compute_range(
            &self.offsets,
            scroll_offset,
            viewport_height,
            self.options.overscan,
        )
    }

    /// Visits every slot of the current virtual range without allocating.
    pub fn for_each_slot(&self, f: impl FnMut(Slot)) {
        for_each_slot(self.virtual_range(), &self.offsets, f);
    }

    /// Collects the current slots into `out` (clears `out` first).
    ///
    /// Prefer this over [`Self::render_window`] on hot paths: `out` can be reused across
    /// frames.
    pub fn collect_slots(&self, out: &mut Vec<Slot>) {
        out.clear();
        self.for_each_slot(|slot| out.push(slot));
    }

    pub fn render_window(&self) -> RenderWindow {
        build_slots(self.virtual_range(), &self.offsets)
    }

    pub fn render_window_for(&self, scroll_offset: i64, viewport_height: u32) -> RenderWindow {
        build_slots(
            self.virtual_range_for(scroll_offset, viewport_height),
            &self.offsets,
        )
    }

    // Scroll-to.

    /// Computes the offset that brings `index` into view, clamped to
    /// [`Self::max_scroll_offset`].
    ///
    /// `index` past the end targets the last item; an empty list always yields `0`.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        let count = self.count();
        if count == 0 {
            return 0;
        }
        let index = index.min(count - 1);
        let Some(item) = self.item_slot(index) else {
            return 0;
        };

        let view = self.viewport_height as u64;
        let target = match align {
            Align::Start => item.top_offset,
            Align::End => item.bottom_offset().saturating_sub(view),
            Align::Center => {
                let center = item.top_offset.saturating_add(item.height as u64 / 2);
                center.saturating_sub(view / 2)
            }
            Align::Auto => {
                let cur = self.effective_scroll_offset();
                let cur_end = cur.saturating_add(view);
                if item.top_offset >= cur && item.bottom_offset() <= cur_end {
                    cur
                } else if item.top_offset < cur {
                    item.top_offset
                } else {
                    item.bottom_offset().saturating_sub(view)
                }
            }
        };

        cmp::min(target, self.max_scroll_offset())
    }

    /// Moves the viewport to `index` without scroll-event semantics.
    ///
    /// Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(i64::try_from(offset).unwrap_or(i64::MAX));
        offset
    }
}
