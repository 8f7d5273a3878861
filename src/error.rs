//! Error types for the gradient engine.
//!
//! Public entry points clamp and degrade instead of failing; these errors
//! surface through the `try_*` variants for callers that need them flagged.

use std::path::PathBuf;

use crate::merge::MergeStrategy;

pub use crate::color::ColorParseError;

/// Errors raised while loading, saving or restoring gradients and presets.
#[derive(Debug, thiserror::Error)]
pub enum GradientError {
    #[error("failed to parse gradient state: {0}")]
    StateParse(#[source] serde_json::Error),

    #[error("failed to serialize gradient state: {0}")]
    StateSerialize(#[source] serde_json::Error),

    #[error("gradient state has an empty color stop list")]
    EmptyStopList,

    #[error("failed to read preset file '{}': {source}", path.display())]
    PresetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preset '{origin}': {source}")]
    PresetParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize preset '{origin}': {source}")]
    PresetSerialize {
        origin: String,
        #[source]
        source: toml::ser::Error,
    },

    #[error("invalid color in preset '{preset}': {source}")]
    InvalidColor {
        preset: String,
        #[source]
        source: ColorParseError,
    },

    #[error("preset not found: {0}")]
    PresetNotFound(String),
}

/// Errors raised by a merge strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("no input with a positive weight for the {strategy} strategy")]
    NoUsableInputs { strategy: MergeStrategy },

    #[error("unknown merge strategy: {0}")]
    UnknownStrategy(String),
}

/// Errors raised by the distribution engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    #[error("unknown distribution: {0}")]
    UnknownDistribution(String),

    #[error("unknown position pattern: {0}")]
    UnknownPattern(String),
}
