use gradient_forge::cli::{Cli, Commands, ExportFormat, handle_command};
use gradient_forge::commands::{
    SeamlessOptions, handle_export_command, handle_merge_command, handle_new_command,
    handle_pattern_command, handle_random_command, handle_seamless_command, load_gradient,
};
use gradient_forge::{EngineConfig, Gradient, Rgb, ui};
use clap::Parser;
use pretty_assertions::assert_eq;
use std::fs;

#[path = "test_utils.rs"]
mod test_utils;
use test_utils::{BLUE, GREEN, RED, StateDir, colors_of, positions_of, red_to_blue, scrambled_hues};

fn quiet() {
    ui::set_quiet_mode(true);
}

#[test]
fn test_new_from_preset_writes_state() {
    quiet();
    let dir = StateDir::new();
    let path = dir.path("sunset.json");

    handle_new_command(
        &EngineConfig::default(),
        Some("sunset"),
        None,
        Some("Evening".to_string()),
        Some(&path),
    )
    .expect("new");

    let gradient = load_gradient(&path).expect("load");
    assert_eq!(gradient.name(), "Evening");
    assert!(gradient.validate_state_integrity().0);
}

#[test]
fn test_new_grayscale_with_stop_count() {
    quiet();
    let dir = StateDir::new();
    let path = dir.path("gray.json");

    handle_new_command(&EngineConfig::default(), None, Some(4), None, Some(&path)).expect("new");
    assert_eq!(load_gradient(&path).expect("load").len(), 4);
}

#[test]
fn test_seeded_random_command_is_reproducible() {
    quiet();
    let dir = StateDir::new();
    let (a, b) = (dir.path("a.json"), dir.path("b.json"));

    handle_random_command("triadic", Some(6), Some(99), Some(&a)).expect("random");
    handle_random_command("TRIADIC", Some(6), Some(99), Some(&b)).expect("random");

    assert_eq!(load_gradient(&a).expect("load"), load_gradient(&b).expect("load"));
    assert!(handle_random_command("plaid", None, None, Some(&a)).is_err());
}

#[test]
fn test_merge_command_stacks_files() {
    quiet();
    let dir = StateDir::new();
    let files = vec![
        dir.write("a.json", &red_to_blue()),
        dir.write("b.json", &Gradient::from_stops([(0.0, GREEN), (1.0, Rgb::WHITE)])),
    ];
    let output = dir.path("merged.json");

    handle_merge_command(
        &EngineConfig::default(),
        &files,
        &[1.0],
        Some("stack"),
        true,
        Some(&output),
    )
    .expect("merge");

    let merged = load_gradient(&output).expect("load");
    assert_eq!(merged.name(), "Merged Gradient (Stack)");
    assert_eq!(positions_of(&merged), vec![0.0, 0.5, 0.5, 1.0]);
    assert_eq!(colors_of(&merged), vec![RED, BLUE, GREEN, Rgb::WHITE]);

    let rejected = dir.path("rejected.json");
    let result = handle_merge_command(
        &EngineConfig::default(),
        &files,
        &[],
        Some("zigzag"),
        true,
        Some(&rejected),
    );
    assert!(result.is_err());
    assert!(!rejected.exists());
}

#[test]
fn test_seamless_bake_command() {
    quiet();
    let dir = StateDir::new();
    let path = dir.write("g.json", &scrambled_hues());

    handle_seamless_command(
        &path,
        SeamlessOptions {
            enabled: true,
            region: Some(0.25),
            bake: true,
            ..SeamlessOptions::default()
        },
        None,
    )
    .expect("seamless");

    let gradient = load_gradient(&path).expect("load");
    assert!(gradient.seamless().enabled());
    assert!((gradient.seamless().blend_region() - 0.25).abs() < f64::EPSILON);
    assert_eq!(gradient.base_color_at(1.0), RED);
}

#[test]
fn test_pattern_command_keeps_colors_in_order() {
    quiet();
    let dir = StateDir::new();
    let path = dir.write("g.json", &scrambled_hues());
    let output = dir.path("patterned.json");

    handle_pattern_command(&path, "golden_ratio", Some(&output)).expect("pattern");
    assert_eq!(
        colors_of(&load_gradient(&output).expect("load")),
        colors_of(&scrambled_hues())
    );
    assert!(handle_pattern_command(&path, "zigzag", None).is_err());
}

#[test]
fn test_export_ugr_to_file() {
    quiet();
    let dir = StateDir::new();
    let path = dir.write("g.json", &Gradient::from_stops([(1.0, BLUE), (0.5, GREEN), (0.0, RED)]));
    let output = dir.path("g.ugr");

    handle_export_command(&path, ExportFormat::Ugr, Some(&output)).expect("export");
    assert_eq!(
        fs::read_to_string(&output).expect("read export"),
        "0=255|0|0\n199=0|255|0\n399=0|0|255\n"
    );
}

#[test]
fn test_parsed_commands_dispatch() {
    quiet();
    let dir = StateDir::new();
    let path = dir.write("g.json", &scrambled_hues());
    let path_arg = path.to_string_lossy().to_string();

    let cli = Cli::try_parse_from(["gradient-forge", "-q", "distribute", &path_arg, "-d", "hue"])
        .expect("valid arguments");
    assert!(cli.quiet);
    let command = cli.command.expect("subcommand");
    assert!(matches!(command, Commands::Distribute { .. }));

    handle_command(command, &EngineConfig::default(), None).expect("dispatch");
    assert_eq!(
        colors_of(&load_gradient(&path).expect("load")),
        vec![RED, Rgb::new(255, 255, 0), GREEN, Rgb::new(0, 255, 255), BLUE]
    );

    let validate = Cli::try_parse_from(["gradient-forge", "validate", &path_arg])
        .expect("valid arguments")
        .command
        .expect("subcommand");
    assert!(handle_command(validate, &EngineConfig::default(), None).is_ok());

    assert!(Cli::try_parse_from(["gradient-forge", "merge"]).is_err());
}
