//! Host-facing utilities for the `scrollwin` crate.
//!
//! `scrollwin` answers which items to materialize and where; this crate wraps it into a list
//! component a UI layer can drive directly:
//!
//! - [`VirtualList`]: owns the item snapshot, calls `render_item` only for in-range indexes,
//!   attaches item keys, and reports a paint-ready [`Frame`].
//! - [`TimerDriver`]: plugs the host's delayed-callback primitive into the scroll quiescence
//!   timer, with cancellation on re-arm, dispose and drop.
//! - [`ManualTimers`]: a deterministic timer queue for frame-driven hosts and tests.
//!
//! This crate is framework-agnostic (no DOM, egui or ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod list;
mod timer;

#[cfg(test)]
mod tests;

pub use list::{Frame, ItemKeyFn, RenderItemFn, RenderedItem, VirtualList};
pub use timer::{ManualTimers, PendingTimer, TimerDriver};
