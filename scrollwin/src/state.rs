use crate::ScrollPhase;

/// A snapshot of the viewport geometry and scroll position.
///
/// `scroll_offset` is the raw value last reported by the host and may lie outside
/// `[0, total_height - viewport_height]`; range queries clamp it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub scroll_offset: i64,
    pub viewport_height: u32,
}

/// Viewport geometry plus the current scroll phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub viewport: ViewportState,
    pub phase: ScrollPhase,
}
