use alloc::boxed::Box;
use alloc::vec::Vec;

use scrollwin::{
    Align, ItemHeight, ScrollPhase, Slot, TimerToken, VirtualListOptions, WindowEngine,
};

use crate::timer::TimerDriver;

/// Turns an item and its index into whatever the host paints.
pub type RenderItemFn<T, V> = Box<dyn Fn(&T, usize) -> V>;

/// Produces a stable identity for an item, so hosts can reuse child views across frames.
pub type ItemKeyFn<T, K> = Box<dyn Fn(&T, usize) -> K>;

/// One materialized child: where it goes, what identifies it, and what to paint.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedItem<V, K> {
    pub key: K,
    pub slot: Slot,
    pub view: V,
}

/// Everything a host needs to paint one frame of the list.
///
/// The host sizes a container to `total_height`, clips it to `viewport_height`, and places
/// each child absolutely at `slot.top_offset`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame<V, K> {
    pub children: Vec<RenderedItem<V, K>>,
    pub total_height: u64,
    pub viewport_height: u32,
    pub is_scrolling: bool,
}

impl<V, K> Frame<V, K> {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A host-facing virtualized list component.
///
/// Owns the current item snapshot and a [`WindowEngine`], invokes `render_item` only for
/// indexes inside the current range, and keeps an optional [`TimerDriver`] in step with the
/// engine's quiescence timer. The scheduled timer is released when it is replaced, when the
/// list settles, on [`Self::dispose`], and on drop.
///
/// The engine is only reachable read-only; all mutation goes through the list so the timer
/// bookkeeping cannot drift.
pub struct VirtualList<T, V, K = u64> {
    engine: WindowEngine,
    items: Vec<T>,
    render_item: RenderItemFn<T, V>,
    item_key: ItemKeyFn<T, K>,
    timers: Option<Box<dyn TimerDriver>>,
    scheduled: Option<TimerToken>,
}

impl<T, V> VirtualList<T, V, u64> {
    /// Creates a list keyed by index.
    ///
    /// `options.count` is overwritten with `items.len()`.
    pub fn new(
        options: VirtualListOptions,
        items: Vec<T>,
        render_item: impl Fn(&T, usize) -> V + 'static,
    ) -> Self {
        Self::new_with_key(options, items, render_item, |_, i| i as u64)
    }
}

impl<T, V, K> VirtualList<T, V, K> {
    /// Creates a list with a custom key mapping.
    pub fn new_with_key(
        options: VirtualListOptions,
        items: Vec<T>,
        render_item: impl Fn(&T, usize) -> V + 'static,
        item_key: impl Fn(&T, usize) -> K + 'static,
    ) -> Self {
        let options = options.with_count(items.len());
        Self {
            engine: WindowEngine::new(options),
            items,
            render_item: Box::new(render_item),
            item_key: Box::new(item_key),
            timers: None,
            scheduled: None,
        }
    }

    /// Lets the list schedule real quiescence timers through `driver`.
    ///
    /// Without a driver, hosts call [`Self::tick`] to let the list settle.
    pub fn with_timer_driver(mut self, driver: impl TimerDriver + 'static) -> Self {
        self.set_timer_driver(Some(Box::new(driver)));
        self
    }

    pub fn set_timer_driver(&mut self, driver: Option<Box<dyn TimerDriver>>) {
        self.release_timer();
        self.timers = driver;
    }

    pub fn engine(&self) -> &WindowEngine {
        &self.engine
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the item snapshot. Offsets are recomputed from scratch.
    pub fn set_items(&mut self, items: Vec<T>) {
        vdebug!(from = self.items.len(), to = items.len(), "set_items");
        self.items = items;
        self.engine.set_count(self.items.len());
    }

    pub fn set_item_height(&mut self, item_height: Option<ItemHeight>) {
        self.engine.set_item_height(item_height);
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.engine.set_viewport_height(height);
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.engine.set_overscan(overscan);
    }

    /// Feeds back a measured height for one item. Returns the signed change.
    pub fn measure(&mut self, index: usize, height: u32) -> i64 {
        self.engine.measure(index, height)
    }

    pub fn is_scrolling(&self) -> bool {
        self.engine.is_scrolling()
    }

    pub fn scroll_phase(&self) -> ScrollPhase {
        self.engine.scroll_phase()
    }

    /// Forwards a native scroll event and re-arms the quiescence timer.
    pub fn on_scroll(&mut self, scroll_offset: i64, now_ms: u64) {
        let token = self.engine.on_scroll(scroll_offset, now_ms);
        self.release_timer();
        let (Some(token), Some(timers)) = (token, self.timers.as_mut()) else {
            return;
        };
        let deadline_ms = self
            .engine
            .scroll_deadline_ms()
            .unwrap_or(now_ms.saturating_add(self.engine.options().is_scrolling_reset_delay_ms));
        vtrace!(token = token.get(), deadline_ms, "schedule quiescence timer");
        timers.schedule(token, deadline_ms);
        self.scheduled = Some(token);
    }

    /// Delivers a timer scheduled through the driver. Returns `true` if the list went idle.
    ///
    /// A timer delivered before the engine's deadline is handed back to the driver for that
    /// deadline, so an early host clock cannot leave the list scrolling.
    pub fn on_timer_fired(&mut self, token: TimerToken, now_ms: u64) -> bool {
        let settled = self.engine.on_timer_fired(token, now_ms);
        if self.scheduled != Some(token) {
            return settled;
        }
        if settled {
            self.scheduled = None;
            return settled;
        }
        let deadline_ms = match self.engine.scroll_deadline_ms() {
            Some(deadline_ms) if self.engine.armed_timer() == Some(token) => deadline_ms,
            _ => return settled,
        };
        if let Some(timers) = self.timers.as_mut() {
            vtrace!(
                token = token.get(),
                now_ms,
                deadline_ms,
                "early quiescence timer, rescheduling"
            );
            timers.cancel(token);
            timers.schedule(token, deadline_ms);
        }
        settled
    }

    /// Polls the quiescence timer. Returns `true` if the list went idle.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let settled = self.engine.tick(now_ms);
        if settled {
            self.release_timer();
        }
        settled
    }

    /// Settles immediately on a native scroll-end signal.
    pub fn on_scroll_end(&mut self) -> bool {
        let settled = self.engine.on_scroll_end();
        if settled {
            self.release_timer();
        }
        settled
    }

    /// Tears the list down: the engine stops reacting to scroll events and any outstanding
    /// timer is cancelled with the driver. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if self.engine.is_disposed() {
            return;
        }
        self.engine.dispose();
        self.release_timer();
    }

    pub fn is_disposed(&self) -> bool {
        self.engine.is_disposed()
    }

    /// Moves the viewport to `index` without scroll-event semantics. Returns the new offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        self.engine.scroll_to_index(index, align)
    }

    fn release_timer(&mut self) {
        let Some(token) = self.scheduled.take() else {
            return;
        };
        if let Some(timers) = self.timers.as_mut() {
            vtrace!(token = token.get(), "cancel quiescence timer");
            timers.cancel(token);
        }
    }

    /// Renders the current range.
    pub fn render(&self) -> Frame<V, K> {
        let mut children = Vec::new();
        self.engine.for_each_slot(|slot| {
            if let Some(item) = self.items.get(slot.index) {
                children.push(RenderedItem {
                    key: (self.item_key)(item, slot.index),
                    slot,
                    view: (self.render_item)(item, slot.index),
                });
            }
        });
        Frame {
            children,
            total_height: self.engine.total_height(),
            viewport_height: self.engine.viewport_height(),
            is_scrolling: self.engine.is_scrolling(),
        }
    }
}

impl<T, V, K> Drop for VirtualList<T, V, K> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T, V, K> core::fmt::Debug for VirtualList<T, V, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("len", &self.items.len())
            .field("engine", &self.engine)
            .field("scheduled", &self.scheduled)
            .finish_non_exhaustive()
    }
}
