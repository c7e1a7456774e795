//! A headless windowed list virtualization engine.
//!
//! Given a potentially huge, variably sized item collection shown through a fixed-height
//! viewport, this crate answers the questions a list needs on every scroll event:
//! which contiguous index range must be materialized, where each of those items sits, and how
//! tall the scrollable content is. It also tracks whether the viewport is actively scrolling
//! so hosts can defer expensive per-item work.
//!
//! The pieces, leaf first:
//! - [`ItemHeight`]: a constant height or a per-index resolver.
//! - [`OffsetAccumulator`]: cumulative offsets and offset → index lookup, either by a cursor
//!   walk ([`OffsetStrategy::Linear`]) or a Fenwick tree ([`OffsetStrategy::PrefixSum`]).
//! - [`compute_range`]: the overscanned inclusive [`VisibleRange`] for a scroll offset.
//! - [`ScrollStateMachine`]: `Idle`/`Scrolling` with a cancellable quiescence timer.
//! - [`build_slots`]: positioned [`Slot`]s plus the total height, as a [`RenderWindow`].
//! - [`WindowEngine`]: owns all of the above for one mounted list.
//!
//! It is UI-agnostic and never reads a clock. A host is expected to provide:
//! - the item count and a height resolver (or measurements)
//! - the viewport height
//! - scroll offsets and the current time in milliseconds
//!
//! ```
//! use scrollwin::{VirtualListOptions, WindowEngine};
//!
//! let mut engine = WindowEngine::new(
//!     VirtualListOptions::new(1000, 500)
//!         .with_fixed_item_height(50)
//!         .with_overscan(3),
//! );
//! engine.on_scroll(1000, 0);
//!
//! let range = engine.virtual_range().unwrap();
//! assert_eq!((range.start_index, range.end_index), (17, 32));
//! assert_eq!(engine.total_height(), 50_000);
//! assert!(engine.is_scrolling());
//!
//! engine.tick(150);
//! assert!(!engine.is_scrolling());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod error;
mod fenwick;
mod height;
mod offsets;
mod options;
mod range;
mod scroll_state;
mod state;
mod types;
mod window;


pub use engine::WindowEngine;
pub use error::{OptionsError, Result};
pub use height::{HeightFn, ItemHeight, MIN_ITEM_HEIGHT};
pub use offsets::{LINEAR_SCAN_LIMIT, OffsetAccumulator, OffsetStrategy};
pub use options::{
    DEFAULT_ESTIMATED_ITEM_HEIGHT, DEFAULT_OVERSCAN, OnScrollCallback, OnScrollingChangeCallback,
    VirtualListOptions,
};
pub use range::{VisibleRange, clamp_scroll_offset, compute_range, compute_visible_range};
pub use scroll_state::{
    DEFAULT_SCROLLING_RESET_DELAY_MS, ScrollPhase, ScrollStateMachine, TimerToken,
};
pub use state::{FrameState, ViewportState};
pub use types::{Align, ScrollDirection, Slot};
pub use window::{RenderWindow, build_slots, for_each_slot};
