use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "New Gradient";
pub const DEFAULT_CATEGORY: &str = "Custom";

/// Descriptive gradient metadata, including the JWildfire UGR category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientMetadata {
    pub name: String,
    pub author: String,
    pub description: String,
    pub ugr_category: String,
    pub combine_gradients: bool,
}

impl Default for GradientMetadata {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            author: String::new(),
            description: String::new(),
            ugr_category: DEFAULT_CATEGORY.to_string(),
            combine_gradients: false,
        }
    }
}

impl GradientMetadata {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
