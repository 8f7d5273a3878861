//! Built-in presets embedded in the binary.

/// `(key, TOML)` for every built-in preset, in display order.
pub const BUILTIN_PRESETS: [(&str, &str); 6] = [
    ("default", include_str!("default.toml")),
    ("rainbow", include_str!("rainbow.toml")),
    ("sunset", include_str!("sunset.toml")),
    ("fire", include_str!("fire.toml")),
    ("ocean", include_str!("ocean.toml")),
    ("grayscale", include_str!("grayscale.toml")),
];
