//! Gradient Forge - gradient color engine
//!
//! This library models color gradients as positioned color stops and provides
//! interpolation, seamless edge blending, merging, perceptual color
//! distribution, random generation and presets, plus the `gradient-forge` CLI.

// Allow certain clippy warnings that are either stylistic or from external dependencies
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine
#![allow(clippy::too_many_arguments)] // Some functions legitimately need many params

pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod distribution;
pub mod error;
pub mod gradient;
pub mod interop;
pub mod logger;
pub mod merge;
pub mod presets;
pub mod random;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use color::{Hsv, Rgb};
pub use config::EngineConfig;
pub use distribution::{Distribution, PositionPattern, SortKey};
pub use error::{DistributionError, GradientError, MergeError};
pub use gradient::{ColorStop, Gradient, GradientState};
pub use merge::{MergeStrategy, merge_gradients};
pub use presets::{Preset, PresetLibrary};
pub use random::ColorScheme;
