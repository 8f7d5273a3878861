use crate::distribution::Distribution;
use crate::gradient::{
    DEFAULT_BLEND_REGION, DEFAULT_INTENSITY_FALLOFF, DEFAULT_STOPS, Gradient, MAX_BLEND_REGION,
    MAX_COLOR_STOPS, sample_positions,
};
use crate::interop::MAP_SAMPLES;
use crate::merge::MergeStrategy;
use crate::presets::PresetLibrary;
use crate::{color::Rgb, color::truncate_channel, log_debug};

use anyhow::{Context, Result, anyhow};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Upper bound on `sample_count`.
pub const MAX_SAMPLE_COUNT: usize = 4096;

/// Engine configuration, stored as TOML
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Stop count of newly created gradients
    pub default_stop_count: usize,
    /// Samples taken by the CLI and the MAP exporter
    pub sample_count: usize,
    /// Registry key used when no distribution is named
    pub default_distribution: String,
    pub preserve_endpoints: bool,
    /// Strategy used when no merge strategy is named
    pub default_merge_strategy: String,
    pub use_weights: bool,
    /// Seamless settings applied to new gradients
    pub seamless: SeamlessDefaults,
    /// Directory of user preset TOML files
    pub presets_dir: Option<PathBuf>,
    pub verbose_logging: bool,
}

/// Seamless settings for new gradients
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SeamlessDefaults {
    pub blend_region: f64,
    pub intensity_falloff: f64,
    pub preview_overlay: bool,
}

impl Default for SeamlessDefaults {
    fn default() -> Self {
        Self {
            blend_region: DEFAULT_BLEND_REGION,
            intensity_falloff: DEFAULT_INTENSITY_FALLOFF,
            preview_overlay: true,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_stop_count: DEFAULT_STOPS,
            sample_count: MAP_SAMPLES,
            default_distribution: "brightness".to_string(),
            preserve_endpoints: true,
            default_merge_strategy: MergeStrategy::default().to_string(),
            use_weights: true,
            seamless: SeamlessDefaults::default(),
            presets_dir: None,
            verbose_logging: false,
        }
    }
}

impl EngineConfig {
    /// Load the configuration from the default path. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from `path`. A missing file yields defaults;
    /// an unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log_debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content).with_context(|| {
            format!(
                "Invalid configuration file format in {}. Please check it for syntax errors.",
                path.display()
            )
        })?;

        log_debug!("Configuration loaded: {:?}", config);
        Ok(config.normalized())
    }

    /// Save the configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save the configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        log_debug!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let mut path =
            config_dir().ok_or_else(|| anyhow!("Unable to determine config directory"))?;
        path.push("gradient-forge");
        path.push("config.toml");
        Ok(path)
    }

    /// Copy with every numeric setting clamped to its supported range
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.default_stop_count = self.default_stop_count.clamp(1, MAX_COLOR_STOPS);
        self.sample_count = self.sample_count.clamp(1, MAX_SAMPLE_COUNT);
        self.seamless.blend_region = self.seamless.blend_region.clamp(0.0, MAX_BLEND_REGION);
        self.seamless.intensity_falloff = self.seamless.intensity_falloff.clamp(0.0, 1.0);
        self
    }

    /// A grayscale gradient with `default_stop_count` stops and the
    /// configured seamless settings. Seamless itself starts disabled.
    #[must_use]
    pub fn new_gradient(&self) -> Gradient {
        let mut gradient = Gradient::new();
        let count = self.default_stop_count.clamp(1, MAX_COLOR_STOPS);
        if count != DEFAULT_STOPS {
            gradient.set_color_stops(sample_positions(count).map(|position| {
                let value = truncate_channel(255.0 * position);
                (position, Rgb::new(value, value, value))
            }));
        }

        let seamless = gradient.seamless_mut();
        seamless.set_blend_region(self.seamless.blend_region);
        seamless.set_intensity_falloff(self.seamless.intensity_falloff);
        seamless.set_preview_overlay(self.seamless.preview_overlay);
        gradient
    }

    /// The configured merge strategy, falling back to interleave
    #[must_use]
    pub fn merge_strategy(&self) -> MergeStrategy {
        MergeStrategy::from_name(&self.default_merge_strategy)
    }

    /// The configured distribution, falling back to simple brightness
    #[must_use]
    pub fn distribution(&self) -> Distribution {
        Distribution::from_name_or_fallback(&self.default_distribution)
    }

    /// Built-in presets plus everything in `presets_dir`, when set
    pub fn preset_library(&self) -> Result<PresetLibrary> {
        let mut library = PresetLibrary::new();
        if let Some(dir) = &self.presets_dir {
            library
                .load_dir(dir)
                .with_context(|| format!("Failed to load presets from {}", dir.display()))?;
        }
        Ok(library)
    }
}
