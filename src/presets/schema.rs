//! TOML schema for preset files.

use serde::{Deserialize, Serialize};

/// Root of a preset TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetFile {
    pub meta: PresetMeta,

    #[serde(default)]
    pub stops: Vec<StopDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetMeta {
    /// Display name, applied as the gradient name.
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_category")]
    pub category: String,
}

/// One stop; `color` is a hex string such as `"#ff8800"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopDef {
    pub position: f64,
    pub color: String,
}

fn default_category() -> String {
    crate::gradient::DEFAULT_CATEGORY.to_string()
}
