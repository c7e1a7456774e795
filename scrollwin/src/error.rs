use thiserror::Error;

/// Reasons [`crate::VirtualListOptions::validate`] rejects a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("viewport height must be positive")]
    ZeroViewportHeight,

    #[error("estimated item height must be positive")]
    ZeroEstimatedItemHeight,
}

pub type Result<T> = core::result::Result<T, OptionsError>;
