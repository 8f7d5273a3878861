//! Preset gradients.
//!
//! Built-ins are embedded TOML files; custom presets are added at runtime or
//! loaded from a directory of `*.toml` files using the same schema:
//!
//! ```toml
//! [meta]
//! name = "Sunset"
//! description = "Night blue to pale sky"
//! category = "Nature"
//!
//! [[stops]]
//! position = 0.0
//! color = "#0f0a27"
//! ```
//!
//! Lookups are case-insensitive and an unknown name yields the `default`
//! preset.

mod builtins;
mod schema;

use std::collections::BTreeMap;
use std::path::Path;

pub use builtins::BUILTIN_PRESETS;
pub use schema::{PresetFile, PresetMeta, StopDef};

use crate::color::Rgb;
use crate::error::GradientError;
use crate::gradient::{DEFAULT_CATEGORY, DEFAULT_NAME, Gradient, MAX_COLOR_STOPS};
use crate::{log_debug, log_error, log_warn};

/// Key of the preset returned for unknown names.
pub const DEFAULT_PRESET: &str = "default";

/// A named list of stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Lookup key (lowercase).
    pub key: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub stops: Vec<(f64, Rgb)>,
    pub builtin: bool,
}

impl Preset {
    /// Parse a preset from TOML. `key` names it in the library and in errors.
    pub fn from_toml(key: &str, content: &str) -> Result<Self, GradientError> {
        let file: PresetFile = toml::from_str(content).map_err(|e| GradientError::PresetParse {
            origin: key.to_string(),
            source: e,
        })?;
        Self::from_file(key, file)
    }

    /// Read and parse a preset file; the key is the file stem.
    pub fn from_path(path: &Path) -> Result<Self, GradientError> {
        let content = std::fs::read_to_string(path).map_err(|e| GradientError::PresetIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        Self::from_toml(key, &content)
    }

    fn from_file(key: &str, file: PresetFile) -> Result<Self, GradientError> {
        let mut stops = Vec::with_capacity(file.stops.len());
        for stop in file.stops.iter().take(MAX_COLOR_STOPS) {
            let color = Rgb::from_hex(&stop.color).map_err(|e| GradientError::InvalidColor {
                preset: key.to_string(),
                source: e,
            })?;
            stops.push((stop.position, color));
        }
        if file.stops.len() > MAX_COLOR_STOPS {
            log_warn!(
                "Preset '{}' has {} stops, keeping the first {}",
                key,
                file.stops.len(),
                MAX_COLOR_STOPS
            );
        }

        Ok(Self {
            key: key.to_lowercase(),
            name: file.meta.name,
            description: file.meta.description,
            category: file.meta.category,
            stops,
            builtin: false,
        })
    }

    /// Serialize back to the preset TOML schema.
    pub fn to_toml(&self) -> Result<String, GradientError> {
        let file = PresetFile {
            meta: PresetMeta {
                name: self.name.clone(),
                description: self.description.clone(),
                category: self.category.clone(),
            },
            stops: self
                .stops
                .iter()
                .map(|(position, color)| StopDef {
                    position: *position,
                    color: color.to_hex(),
                })
                .collect(),
        };
        toml::to_string_pretty(&file).map_err(|e| GradientError::PresetSerialize {
            origin: self.key.clone(),
            source: e,
        })
    }

    /// A gradient holding this preset's stops and name.
    #[must_use]
    pub fn to_gradient(&self) -> Gradient {
        let mut gradient = Gradient::from_stops(self.stops.iter().copied());
        gradient.set_name(self.name.clone());
        gradient.metadata_mut().description.clone_from(&self.description);
        gradient
    }
}

/// Built-in and custom presets.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    builtins: Vec<Preset>,
    custom: BTreeMap<String, Preset>,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetLibrary {
    /// A library holding the built-in presets.
    #[must_use]
    pub fn new() -> Self {
        let builtins = BUILTIN_PRESETS
            .iter()
            .filter_map(|(key, content)| match Preset::from_toml(key, content) {
                Ok(preset) => Some(Preset {
                    builtin: true,
                    ..preset
                }),
                Err(e) => {
                    log_error!("Skipping invalid builtin preset: {}", e);
                    None
                }
            })
            .collect();

        Self {
            builtins,
            custom: BTreeMap::new(),
        }
    }

    /// Look up a preset by name. Built-ins take precedence over custom
    /// presets with the same key.
    pub fn try_get(&self, name: &str) -> Result<&Preset, GradientError> {
        let key = name.to_lowercase();
        self.builtins
            .iter()
            .find(|preset| preset.key == key)
            .or_else(|| self.custom.get(&key))
            .ok_or_else(|| GradientError::PresetNotFound(name.to_string()))
    }

    /// Look up a preset, falling back to the default preset.
    #[must_use]
    pub fn get(&self, name: &str) -> Preset {
        match self.try_get(name) {
            Ok(preset) => preset.clone(),
            Err(e) => {
                log_debug!("{}, using default", e);
                self.try_get(DEFAULT_PRESET)
                    .cloned()
                    .unwrap_or_else(|_| default_preset())
            }
        }
    }

    /// Store custom stops under `name`, keeping at most 64 stops.
    pub fn save(&mut self, name: &str, stops: &[(f64, Rgb)]) {
        let key = name.to_lowercase();
        let preset = Preset {
            key: key.clone(),
            name: name.to_string(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            stops: stops.iter().take(MAX_COLOR_STOPS).copied().collect(),
            builtin: false,
        };
        self.custom.insert(key, preset);
    }

    /// Add an already parsed preset as a custom preset.
    pub fn insert(&mut self, preset: Preset) {
        self.custom.insert(
            preset.key.clone(),
            Preset {
                builtin: false,
                ..preset
            },
        );
    }

    /// Load every `*.toml` file in `dir` as a custom preset and return the
    /// keys loaded. Files that fail to parse are logged and skipped.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<String>, GradientError> {
        let entries = std::fs::read_dir(dir).map_err(|e| GradientError::PresetIo {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut paths: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            match Preset::from_path(&path) {
                Ok(preset) => {
                    loaded.push(preset.key.clone());
                    self.insert(preset);
                }
                Err(e) => log_warn!("Skipping preset {}: {}", path.display(), e),
            }
        }
        log_debug!("Loaded {} presets from {}", loaded.len(), dir.display());
        Ok(loaded)
    }

    /// Write every custom preset to `dir` as `<key>.toml`.
    pub fn save_dir(&self, dir: &Path) -> Result<(), GradientError> {
        let io_error = |path: &Path, source| GradientError::PresetIo {
            path: path.to_path_buf(),
            source,
        };
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        for preset in self.custom.values() {
            let path = dir.join(format!("{}.toml", preset.key));
            std::fs::write(&path, preset.to_toml()?).map_err(|e| io_error(&path, e))?;
        }
        Ok(())
    }

    /// Every preset key: built-ins first, then custom presets by key.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.builtins
            .iter()
            .chain(self.custom.values())
            .map(|preset| preset.key.as_str())
            .collect()
    }

    /// Every preset, in [`names`](Self::names) order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.builtins.iter().chain(self.custom.values())
    }
}

fn default_preset() -> Preset {
    let gradient = Gradient::new();
    Preset {
        key: DEFAULT_PRESET.to_string(),
        name: DEFAULT_NAME.to_string(),
        description: String::new(),
        category: DEFAULT_CATEGORY.to_string(),
        stops: gradient.color_stops(),
        builtin: true,
    }
}

impl Gradient {
    /// Replace stops and name with the preset's. Unknown names apply the
    /// default preset.
    pub fn apply_preset(&mut self, library: &PresetLibrary, name: &str) {
        let preset = library.get(name);
        self.set_color_stops(preset.stops);
        self.set_name(preset.name);
    }

    /// Save the current stops as a custom preset and rename the gradient.
    pub fn save_as_preset(&mut self, library: &mut PresetLibrary, name: &str) {
        library.save(name, &self.color_stops());
        self.set_name(name);
    }
}
