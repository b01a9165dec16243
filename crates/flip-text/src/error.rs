//! Error types for flip-text.

use thiserror::Error;

/// Result type for flip-text operations.
pub type Result<T> = std::result::Result<T, FlipError>;

/// Errors raised while turning configuration into component options.
///
/// Rendering and effect sampling never fail; only named options coming from
/// configuration can be rejected.
#[derive(Error, Debug)]
pub enum FlipError {
    /// Transition variant name not recognised.
    #[error("unknown transition: {0} (expected rotate, rotate_scale or none)")]
    UnknownTransition(String),

    /// Easing curve name not recognised.
    #[error("unknown easing: {0}")]
    UnknownEasing(String),

    /// Split mode name not recognised.
    #[error("unknown split mode: {0} (expected graphemes or chars)")]
    UnknownSplitMode(String),

    /// Key policy name not recognised.
    #[error("unknown key policy: {0} (expected by_occurrence or by_value)")]
    UnknownKeyPolicy(String),

    /// Configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] flip_config::ConfigError),
}
