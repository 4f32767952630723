//! # Generation Error Types
//!
//! All errors that can stop an asteroid generation request before work is
//! dispatched. Individual section failures are fail-soft and never surface
//! here - a dropped section is a hole in the result, not an error.

use thiserror::Error;

/// Errors that can occur while loading configuration or validating a request.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A palette id was referenced but not configured.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A configured palette has no entries with positive weight.
    #[error("palette {0} has no entries with positive weight")]
    EmptyPalette(String),

    /// No palettes are configured at all.
    #[error("configuration defines no palettes")]
    NoPalettes,

    /// Asteroid size must be strictly positive (it divides noise amplitudes).
    #[error("asteroid size must be positive, got {0}")]
    InvalidSize(f64),

    /// Ore substitution probability must lie in [0, 1].
    #[error("ore ratio must be in [0, 1], got {0}")]
    InvalidOreRatio(f64),

    /// Descriptor rolling bounds are inverted or non-positive.
    #[error("invalid size bounds: min {min} must be positive and <= max {max}")]
    InvalidSizeBounds {
        /// Configured minimum rolled size.
        min: f64,
        /// Configured maximum rolled size.
        max: f64,
    },

    /// Search-radius multiplier must be a positive finite number.
    #[error("search radius must be positive and finite, got {0}")]
    InvalidSearchRadius(f64),

    /// Base asteroid density must be a non-negative finite number.
    #[error("base density must be non-negative and finite, got {0}")]
    InvalidBaseDensity(f64),

    /// World vertical build limits are inverted.
    #[error("invalid world limits: min y {min_y} must be below max y {max_y}")]
    InvalidWorldLimits {
        /// Configured minimum build height.
        min_y: i32,
        /// Configured maximum build height.
        max_y: i32,
    },

    /// Config file could not be read.
    #[error("failed to read config file")]
    ConfigIo(#[from] std::io::Error),

    /// Config file could not be parsed.
    #[error("failed to parse config file")]
    ConfigParse(#[from] toml::de::Error),
}
