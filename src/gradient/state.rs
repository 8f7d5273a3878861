//! Serializable gradient state, JSON helpers and checksummed backups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{ColorStop, Gradient};
use crate::error::GradientError;
use crate::{log_debug, log_warn};

pub const BACKUP_VERSION: &str = "2.0";

/// Persisted gradient state.
///
/// Every field is optional: applying a state only touches the fields that
/// are present, and unknown keys in serialized input are ignored. Channels
/// are read as wide integers and clamped on apply.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GradientState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_stops: Option<Vec<(f64, [i64; 3])>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ugr_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine_gradients: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seamless_blend: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_region: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progressive_blending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity_falloff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_overlay: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub timestamp: DateTime<Utc>,
    pub checksum: String,
    pub version: String,
}

/// A full state snapshot plus the checksum of the gradient it was taken from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientBackup {
    pub gradient_state: GradientState,
    pub backup_metadata: BackupMetadata,
}

impl Gradient {
    /// Snapshot every persisted field.
    #[must_use]
    pub fn full_state(&self) -> GradientState {
        let meta = &self.metadata;
        let seamless = &self.seamless;
        GradientState {
            color_stops: Some(
                self.stops
                    .iter()
                    .map(|stop| {
                        let [r, g, b] = stop.color().channels();
                        (stop.position(), [i64::from(r), i64::from(g), i64::from(b)])
                    })
                    .collect(),
            ),
            name: Some(meta.name.clone()),
            author: Some(meta.author.clone()),
            description: Some(meta.description.clone()),
            ugr_category: Some(meta.ugr_category.clone()),
            combine_gradients: Some(meta.combine_gradients),
            seamless_blend: Some(seamless.enabled()),
            blend_region: Some(seamless.blend_region()),
            progressive_blending: Some(seamless.progressive()),
            intensity_falloff: Some(seamless.intensity_falloff()),
            preview_overlay: Some(seamless.preview_overlay()),
        }
    }

    /// Apply the fields present in `state`, clamping values.
    ///
    /// An empty `color_stops` list is ignored so the gradient never ends up
    /// with zero stops from a restore.
    pub fn set_full_state(&mut self, state: &GradientState) {
        match &state.color_stops {
            Some(stops) if stops.is_empty() => {
                log_warn!("Ignoring empty color stop list in gradient state");
            }
            Some(stops) => {
                self.set_color_stops(stops.iter().map(|&(position, channels)| {
                    ColorStop::from_raw(position, channels).as_tuple()
                }));
            }
            None => {}
        }

        let meta = &mut self.metadata;
        if let Some(name) = &state.name {
            meta.name.clone_from(name);
        }
        if let Some(author) = &state.author {
            meta.author.clone_from(author);
        }
        if let Some(description) = &state.description {
            meta.description.clone_from(description);
        }
        if let Some(category) = &state.ugr_category {
            meta.ugr_category.clone_from(category);
        }
        if let Some(combine) = state.combine_gradients {
            meta.combine_gradients = combine;
        }

        let seamless = &mut self.seamless;
        if let Some(enabled) = state.seamless_blend {
            seamless.set_enabled(enabled);
        }
        if let Some(region) = state.blend_region {
            seamless.set_blend_region(region);
        }
        if let Some(progressive) = state.progressive_blending {
            seamless.set_progressive(progressive);
        }
        if let Some(falloff) = state.intensity_falloff {
            seamless.set_intensity_falloff(falloff);
        }
        if let Some(overlay) = state.preview_overlay {
            seamless.set_preview_overlay(overlay);
        }
    }

    /// Copy stops, metadata and seamless settings from `other`.
    pub fn copy_state_from(&mut self, other: &Self) {
        self.set_full_state(&other.full_state());
    }

    /// Serialize the full state as pretty JSON.
    pub fn to_json(&self) -> Result<String, GradientError> {
        serde_json::to_string_pretty(&self.full_state()).map_err(GradientError::StateSerialize)
    }

    /// Parse a state document and apply it over the default gradient.
    pub fn try_from_json(json: &str) -> Result<Self, GradientError> {
        let state: GradientState = serde_json::from_str(json).map_err(GradientError::StateParse)?;
        if state.color_stops.as_ref().is_some_and(Vec::is_empty) {
            return Err(GradientError::EmptyStopList);
        }
        let mut gradient = Self::new();
        gradient.set_full_state(&state);
        Ok(gradient)
    }

    /// Like [`try_from_json`](Self::try_from_json), falling back to the
    /// default gradient on malformed input.
    #[must_use]
    pub fn from_json_or_default(json: &str) -> Self {
        Self::try_from_json(json).unwrap_or_else(|e| {
            log_warn!("Falling back to default gradient: {}", e);
            Self::new()
        })
    }

    #[must_use]
    pub fn create_backup_state(&self) -> GradientBackup {
        GradientBackup {
            gradient_state: self.full_state(),
            backup_metadata: BackupMetadata {
                timestamp: Utc::now(),
                checksum: self.checksum(),
                version: BACKUP_VERSION.to_string(),
            },
        }
    }

    /// Apply a backup. Returns whether the restored gradient's checksum
    /// matches the one recorded in the backup.
    pub fn restore_from_backup(&mut self, backup: &GradientBackup) -> bool {
        self.set_full_state(&backup.gradient_state);
        let matches = self.checksum() == backup.backup_metadata.checksum;
        if matches {
            log_debug!("Restored gradient backup from {}", backup.backup_metadata.timestamp);
        } else {
            log_warn!(
                "Restored gradient backup from {} with mismatched checksum",
                backup.backup_metadata.timestamp
            );
        }
        matches
    }

    /// First 16 hex digits of a SHA-256 over the stops and seamless settings.
    #[must_use]
    pub fn checksum(&self) -> String {
        let mut canonical = String::new();
        for stop in &self.stops {
            let c = stop.color();
            canonical.push_str(&format!(
                "{:.6}:{}:{}:{}|",
                stop.position(),
                c.r,
                c.g,
                c.b
            ));
        }
        canonical.push_str(&format!(
            "seamless:{}|region:{:.6}",
            self.seamless.enabled(),
            self.seamless.blend_region()
        ));

        let digest = Sha256::digest(canonical.as_bytes());
        let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
        hex.chars().take(16).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_partial_state_leaves_other_fields() {
        let mut gradient = Gradient::new();
        gradient.set_name("Keep me");
        let state = GradientState {
            author: Some("ada".to_string()),
            ..GradientState::default()
        };
        gradient.set_full_state(&state);
        assert_eq!(gradient.name(), "Keep me");
        assert_eq!(gradient.metadata().author, "ada");
        assert_eq!(gradient.len(), 10);
    }

    #[test]
    fn test_state_values_are_clamped() {
        let mut gradient = Gradient::new();
        let state = GradientState {
            color_stops: Some(vec![(-1.0, [300, 0, -5]), (2.0, [1, 2, 3])]),
            blend_region: Some(0.9),
            ..GradientState::default()
        };
        gradient.set_full_state(&state);
        assert_eq!(
            gradient.color_stops(),
            vec![(0.0, Rgb::new(255, 0, 0)), (1.0, Rgb::new(1, 2, 3))]
        );
        assert!((gradient.seamless().blend_region() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_checksum_is_sixteen_hex_digits() {
        let checksum = Gradient::new().checksum();
        assert_eq!(checksum.len(), 16);
        assert!(checksum.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_checksum_tracks_stops() {
        let mut gradient = Gradient::new();
        let before = gradient.checksum();
        gradient.set_color_at_index(3, Rgb::new(1, 2, 3));
        assert_ne!(gradient.checksum(), before);
    }
}
