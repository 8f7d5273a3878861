//! Tests for state round-trips and backups

use pretty_assertions::assert_eq;

use crate::color::Rgb;
use crate::gradient::{BACKUP_VERSION, Gradient, GradientState};

fn styled() -> Gradient {
    let mut gradient = Gradient::from_stops([
        (0.25, Rgb::new(10, 20, 30)),
        (0.0, Rgb::new(200, 100, 50)),
        (1.0, Rgb::new(1, 2, 3)),
    ]);
    gradient.set_name("Dusk");
    gradient.metadata_mut().author = "tester".to_string();
    gradient.metadata_mut().ugr_category = "Sky".to_string();
    gradient.seamless_mut().set_enabled(true);
    gradient.seamless_mut().set_blend_region(0.25);
    gradient
}

#[test]
fn test_full_state_round_trip() {
    let original = styled();
    let mut restored = Gradient::new();
    restored.set_full_state(&original.full_state());
    assert_eq!(restored, original);
}

#[test]
fn test_json_round_trip() {
    let original = styled();
    let json = original.to_json().expect("serialize");
    let restored = Gradient::try_from_json(&json).expect("parse");
    assert_eq!(restored, original);
}

#[test]
fn test_json_key_names() {
    let json = styled().to_json().expect("serialize");
    for key in [
        "color_stops",
        "name",
        "author",
        "description",
        "ugr_category",
        "combine_gradients",
        "seamless_blend",
        "blend_region",
        "progressive_blending",
        "intensity_falloff",
        "preview_overlay",
    ] {
        assert!(json.contains(&format!("\"{key}\"")), "missing key {key}");
    }
}

#[test]
fn test_unknown_keys_ignored() {
    let json = r#"{"name": "Odd", "color_stops": [[0.0, [1, 2, 3]], [1.0, [4, 5, 6]]], "favourite": 7}"#;
    let gradient = Gradient::try_from_json(json).expect("parse");
    assert_eq!(gradient.name(), "Odd");
    assert_eq!(gradient.len(), 2);
}

#[test]
fn test_malformed_json_falls_back_to_default() {
    let gradient = Gradient::from_json_or_default("{not json");
    assert!(gradient.is_default());

    let wrong_types = Gradient::from_json_or_default(r#"{"color_stops": "red"}"#);
    assert!(wrong_types.is_default());

    let empty_stops = Gradient::from_json_or_default(r#"{"color_stops": []}"#);
    assert!(empty_stops.is_default());
}

#[test]
fn test_copy_state_from() {
    let source = styled();
    let mut target = Gradient::new();
    target.copy_state_from(&source);
    assert_eq!(target, source);
}

#[test]
fn test_backup_restore_reports_checksum() {
    let source = styled();
    let backup = source.create_backup_state();
    assert_eq!(backup.backup_metadata.version, BACKUP_VERSION);
    assert_eq!(backup.backup_metadata.checksum, source.checksum());

    let mut target = Gradient::new();
    assert!(target.restore_from_backup(&backup));
    assert_eq!(target, source);

    let mut tampered = backup.clone();
    tampered.gradient_state.color_stops = Some(vec![(0.0, [0, 0, 0]), (1.0, [9, 9, 9])]);
    let mut other = Gradient::new();
    assert!(!other.restore_from_backup(&tampered));
}

#[test]
fn test_empty_state_changes_nothing() {
    let mut gradient = styled();
    let before = gradient.clone();
    gradient.set_full_state(&GradientState::default());
    assert_eq!(gradient, before);
}
