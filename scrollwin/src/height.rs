use alloc::sync::Arc;
use core::fmt;

/// The smallest height an item is ever laid out with.
///
/// Resolvers that report `0` are clamped up to this value so a single bad height degrades the
/// layout instead of collapsing items on top of each other.
pub const MIN_ITEM_HEIGHT: u32 = 1;

/// A per-index height function.
pub type HeightFn = Arc<dyn Fn(usize) -> u32 + Send + Sync>;

/// How item heights are resolved.
///
/// Resolvers must be deterministic for a given collection snapshot: the engine may call them
/// repeatedly for the same index and caches the results until the collection or the resolver
/// itself is replaced.
#[derive(Clone)]
pub enum ItemHeight {
    /// Every item has the same height.
    Fixed(u32),
    /// Heights are computed per index.
    Dynamic(HeightFn),
}

impl ItemHeight {
    pub fn fixed(height: u32) -> Self {
        Self::Fixed(height)
    }

    pub fn dynamic(f: impl Fn(usize) -> u32 + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    /// Resolves the height of `index`, clamped to [`MIN_ITEM_HEIGHT`].
    pub fn resolve(&self, index: usize) -> u32 {
        let raw = match self {
            Self::Fixed(h) => *h,
            Self::Dynamic(f) => f(index),
        };
        clamp_height(index, raw)
    }

    /// Returns `true` when both resolvers are known to produce the same heights.
    ///
    /// Dynamic resolvers compare by identity, so a freshly built closure always counts as a
    /// change even if it computes the same values.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Dynamic(a), Self::Dynamic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<u32> for ItemHeight {
    fn from(height: u32) -> Self {
        Self::Fixed(height)
    }
}

impl fmt::Debug for ItemHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(h) => f.debug_tuple("Fixed").field(h).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub(crate) fn clamp_height(index: usize, height: u32) -> u32 {
    if height < MIN_ITEM_HEIGHT {
        vwarn!(index, height, "item height below minimum, clamping");
        return MIN_ITEM_HEIGHT;
    }
    height
}
