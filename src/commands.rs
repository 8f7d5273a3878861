use crate::cli::ExportFormat;
use crate::config::{EngineConfig, MAX_SAMPLE_COUNT};
use crate::distribution::{Distribution, PositionPattern};
use crate::gradient::{Gradient, sample_positions};
use crate::interop::{map_samples, ugr_entries};
use crate::merge::{MergeStrategy, merge};
use crate::random::{ColorScheme, random_gradient};
use crate::ui::{self, rgb};
use crate::{log_debug, log_info};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for `distribute`
#[derive(Debug, Clone, Default)]
pub struct DistributeOptions {
    pub distribution: Option<String>,
    pub reverse: bool,
    pub preserve_endpoints: bool,
    pub seed: Option<u64>,
}

/// Options for `seamless`
#[derive(Debug, Clone, Copy, Default)]
pub struct SeamlessOptions {
    pub enabled: bool,
    pub region: Option<f64>,
    pub falloff: Option<f64>,
    pub progressive: Option<bool>,
    pub bake: bool,
}

/// Load a gradient from a JSON state file
pub fn load_gradient(path: &Path) -> Result<Gradient> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read gradient file {}", path.display()))?;
    let gradient = Gradient::try_from_json(&json)
        .with_context(|| format!("Invalid gradient state in {}", path.display()))?;
    log_debug!(
        "Loaded '{}' with {} stops from {}",
        gradient.name(),
        gradient.len(),
        path.display()
    );
    Ok(gradient)
}

/// Write a gradient's JSON state to `path`
pub fn save_gradient(gradient: &Gradient, path: &Path) -> Result<()> {
    let json = gradient.to_json()?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write gradient file {}", path.display()))?;
    log_info!("Saved '{}' to {}", gradient.name(), path.display());
    Ok(())
}

/// Save to `output` and show the result, or print the JSON state to stdout
fn emit(gradient: &Gradient, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            save_gradient(gradient, path)?;
            ui::print_gradient(gradient, true);
            ui::print_success(&format!("Saved to {}", path.display()));
        }
        None => println!("{}", gradient.to_json()?),
    }
    Ok(())
}

/// Handle the `new` command
pub fn handle_new_command(
    config: &EngineConfig,
    preset: Option<&str>,
    stops: Option<usize>,
    name: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    let mut gradient = match stops {
        Some(count) => EngineConfig {
            default_stop_count: count,
            ..config.clone()
        }
        .new_gradient(),
        None => config.new_gradient(),
    };

    if let Some(preset) = preset {
        let library = config.preset_library()?;
        if library.try_get(preset).is_err() {
            ui::print_warning(&format!("Unknown preset '{preset}', using the default"));
        }
        gradient.apply_preset(&library, preset);
    }
    if let Some(name) = name {
        gradient.set_name(name);
    }

    emit(&gradient, output)
}

/// Handle the `show` command
pub fn handle_show_command(file: &Path, preview: bool, dominant: usize) -> Result<()> {
    let gradient = load_gradient(file)?;

    ui::print_gradient(&gradient, preview);
    if !gradient.metadata().description.is_empty() {
        ui::print_message(&gradient.metadata().description);
    }

    print_section_header("STOPS");
    ui::print_stops(&gradient);

    if let Some(stats) = gradient.color_stats() {
        let (cyan, coral, green, dim) = (rgb::HIGHLIGHT, rgb::NUMBER, rgb::SUCCESS, rgb::DIM_WHITE);
        print_section_header("STATS");
        print_config_row("Stops", &stats.stop_count.to_string(), coral, true);
        print_config_row("Unique", &stats.unique_colors.to_string(), coral, false);
        print_config_row("Red", &range(stats.red_range), cyan, false);
        print_config_row("Green", &range(stats.green_range), cyan, false);
        print_config_row("Blue", &range(stats.blue_range), cyan, false);
        print_config_row(
            "Brightness",
            &format!("{:.1}", stats.avg_brightness),
            cyan,
            false,
        );
        print_config_row(
            "Seamless",
            enabled_label(stats.seamless_enabled),
            if stats.seamless_enabled { green } else { dim },
            false,
        );
        print_config_row(
            "Progressive",
            enabled_label(stats.progressive_enabled),
            if stats.progressive_enabled { green } else { dim },
            false,
        );
    }

    if dominant > 0 && !gradient.is_empty() {
        print_section_header("DOMINANT");
        for (color, weight) in gradient.dominant_colors(dominant) {
            ui::print_message(&format!(
                "  {}  {}  {:>5.1}%",
                ui::swatch(&[color, color]),
                color.to_hex(),
                weight * 100.0
            ));
        }
    }
    Ok(())
}

/// Handle the `sample` command
pub fn handle_sample_command(file: &Path, count: usize, at: &[f64], preview: bool) -> Result<()> {
    let gradient = load_gradient(file)?;
    let sample = |position: f64| {
        if preview {
            gradient.color_at_for_preview(position)
        } else {
            gradient.color_at(position)
        }
    };

    let positions: Vec<f64> = if at.is_empty() {
        sample_positions(count.clamp(1, MAX_SAMPLE_COUNT)).collect()
    } else {
        at.to_vec()
    };

    for position in positions {
        println!("{position:.4} {}", sample(position).to_hex());
    }
    Ok(())
}

/// Handle the `distribute` command
pub fn handle_distribute_command(
    config: &EngineConfig,
    file: &Path,
    options: &DistributeOptions,
    output: Option<&Path>,
) -> Result<()> {
    let mut gradient = load_gradient(file)?;

    let mut distribution = match options.distribution.as_deref() {
        Some(name) => Distribution::from_name(name)?,
        None => config.distribution(),
    };
    if let Distribution::Random { seed } = &mut distribution {
        *seed = options.seed;
    }

    distribution.apply(&mut gradient, options.reverse, options.preserve_endpoints);
    ui::print_info(&format!(
        "Distributed by {}{}",
        distribution.display_name(),
        if options.reverse { " (reversed)" } else { "" }
    ));

    let target = output.unwrap_or(file);
    save_gradient(&gradient, target)?;
    ui::print_gradient(&gradient, true);
    Ok(())
}

/// Handle the `pattern` command
pub fn handle_pattern_command(file: &Path, pattern: &str, output: Option<&Path>) -> Result<()> {
    let mut gradient = load_gradient(file)?;
    let pattern = PositionPattern::from_name(pattern)?;

    pattern.apply(&mut gradient);
    ui::print_info(&format!("Applied {}", pattern.display_name()));

    save_gradient(&gradient, output.unwrap_or(file))?;
    ui::print_gradient(&gradient, true);
    Ok(())
}

/// Handle the `merge` command
pub fn handle_merge_command(
    config: &EngineConfig,
    files: &[PathBuf],
    weights: &[f64],
    strategy: Option<&str>,
    use_weights: bool,
    output: Option<&Path>,
) -> Result<()> {
    if weights.len() > files.len() {
        ui::print_warning("More weights than gradients; extra weights are ignored");
    }

    let inputs = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let weight = weights.get(i).copied().unwrap_or(1.0);
            load_gradient(file).map(|gradient| (gradient, weight))
        })
        .collect::<Result<Vec<_>>>()?;

    let strategy = match strategy {
        Some(name) => MergeStrategy::try_from_name(name)?,
        None => config.merge_strategy(),
    };
    let merged = merge(&inputs, strategy, use_weights);
    ui::print_info(&format!(
        "Merged {} gradients with {}",
        inputs.len(),
        strategy.title()
    ));

    emit(&merged, output)
}

/// Handle the `random` command
pub fn handle_random_command(
    scheme: &str,
    stops: Option<usize>,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let scheme: ColorScheme = scheme
        .parse()
        .map_err(|_| anyhow!("Unknown color scheme '{}'", scheme))?;

    let gradient = random_gradient(scheme, stops, seed);
    emit(&gradient, output)
}

/// Handle the `seamless` command
pub fn handle_seamless_command(
    file: &Path,
    options: SeamlessOptions,
    output: Option<&Path>,
) -> Result<()> {
    let mut gradient = load_gradient(file)?;

    let seamless = gradient.seamless_mut();
    seamless.set_enabled(options.enabled);
    if let Some(region) = options.region {
        seamless.set_blend_region(region);
    }
    if let Some(falloff) = options.falloff {
        seamless.set_intensity_falloff(falloff);
    }
    if let Some(progressive) = options.progressive {
        seamless.set_progressive(progressive);
    }

    if options.bake {
        if gradient.apply_seamless_permanently() {
            ui::print_success("Baked seamless blending into the stops");
        } else {
            ui::print_warning("Seamless blending is disabled; nothing to bake");
        }
    }

    let preview = gradient.seamless().blend_preview_data();
    ui::print_info(&format!(
        "Seamless {} (region {:.2}, falloff {:.2}{})",
        enabled_label(preview.enabled),
        preview.blend_region,
        preview.intensity_falloff,
        if preview.progressive_enabled {
            ", progressive"
        } else {
            ""
        }
    ));

    save_gradient(&gradient, output.unwrap_or(file))?;
    ui::print_gradient(&gradient, true);
    Ok(())
}

/// Handle the `validate` command
pub fn handle_validate_command(file: &Path) -> Result<()> {
    let gradient = load_gradient(file)?;
    let (valid, issues) = gradient.validate_state_integrity();
    if valid {
        ui::print_success(&format!(
            "'{}' is valid ({} stops)",
            gradient.name(),
            gradient.len()
        ));
        return Ok(());
    }

    for issue in &issues {
        ui::print_warning(&format!("  {issue}"));
    }
    Err(anyhow!(
        "{} has {} integrity issue(s)",
        file.display(),
        issues.len()
    ))
}

/// Render an export in the requested format
pub fn render_export(gradient: &Gradient, format: ExportFormat) -> Result<String> {
    let rendered = match format {
        ExportFormat::Map => map_samples(gradient)
            .iter()
            .fold(String::new(), |mut acc, color| {
                let _ = writeln!(acc, "{} {} {}", color.r, color.g, color.b);
                acc
            }),
        ExportFormat::Ugr => ugr_entries(gradient)
            .iter()
            .fold(String::new(), |mut acc, (index, color)| {
                let _ = writeln!(acc, "{index}={color}");
                acc
            }),
        ExportFormat::Json => gradient.to_json()?,
    };
    Ok(rendered)
}

/// Handle the `export` command
pub fn handle_export_command(file: &Path, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let gradient = load_gradient(file)?;
    let rendered = render_export(&gradient, format)?;

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            ui::print_success(&format!("Exported to {}", path.display()));
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

/// Handle the `presets` command
pub fn handle_presets_command(
    config: &EngineConfig,
    save: Option<&Path>,
    name: Option<&str>,
) -> Result<()> {
    let mut library = config.preset_library()?;

    if let Some(file) = save {
        let dir = config
            .presets_dir
            .as_deref()
            .ok_or_else(|| anyhow!("Set presets_dir in the configuration to save presets"))?;
        let mut gradient = load_gradient(file)?;
        let name = name.map_or_else(|| gradient.name().to_string(), str::to_string);

        gradient.save_as_preset(&mut library, &name);
        library.save_dir(dir)?;
        save_gradient(&gradient, file)?;
        ui::print_success(&format!("Saved preset '{name}' to {}", dir.display()));
        return Ok(());
    }

    let (accent, dim) = (rgb::ACCENT, rgb::DIM_WHITE);
    print_section_header("PRESETS");
    for preset in library.iter() {
        let gradient = preset.to_gradient();
        ui::print_message(&format!(
            "{:>12}  {}  {}",
            preset.key.truecolor(accent.0, accent.1, accent.2).bold(),
            ui::gradient_bar(&gradient, 24, false),
            if preset.builtin {
                preset.description.truecolor(dim.0, dim.1, dim.2)
            } else {
                "custom".truecolor(dim.0, dim.1, dim.2).italic()
            }
        ));
    }
    Ok(())
}

/// Handle the `config` command
pub fn handle_config_command(
    config: &EngineConfig,
    config_path: Option<&Path>,
    init: bool,
) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => EngineConfig::config_path()?,
    };

    if init {
        EngineConfig::default().save_to(&path)?;
        ui::print_success(&format!("Wrote default configuration to {}", path.display()));
        return Ok(());
    }

    let (cyan, coral, yellow, green, dim) = (
        rgb::HIGHLIGHT,
        rgb::NUMBER,
        rgb::WARNING,
        rgb::SUCCESS,
        rgb::DIM_WHITE,
    );

    print_section_header("ENGINE");
    print_config_row("File", &path.display().to_string(), dim, false);
    print_config_row("Stops", &config.default_stop_count.to_string(), coral, true);
    print_config_row("Samples", &config.sample_count.to_string(), coral, false);
    print_config_row("Distribution", &config.default_distribution, cyan, false);
    print_config_row(
        "Endpoints",
        if config.preserve_endpoints {
            "preserved"
        } else {
            "free"
        },
        if config.preserve_endpoints { green } else { dim },
        false,
    );
    print_config_row("Merge", &config.default_merge_strategy, yellow, false);
    print_config_row(
        "Weights",
        enabled_label(config.use_weights),
        if config.use_weights { green } else { dim },
        false,
    );
    if let Some(dir) = &config.presets_dir {
        print_config_row("Presets", &dir.display().to_string(), cyan, false);
    }

    print_section_header("SEAMLESS");
    print_config_row(
        "Region",
        &format!("{:.2}", config.seamless.blend_region),
        coral,
        false,
    );
    print_config_row(
        "Falloff",
        &format!("{:.2}", config.seamless.intensity_falloff),
        coral,
        false,
    );
    print_config_row(
        "Overlay",
        enabled_label(config.seamless.preview_overlay),
        if config.seamless.preview_overlay {
            green
        } else {
            dim
        },
        false,
    );
    Ok(())
}

const fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

fn range((low, high): (u8, u8)) -> String {
    format!("{low}..{high}")
}

/// Print a section header
fn print_section_header(name: &str) {
    if ui::is_quiet_mode() {
        return;
    }
    let purple = rgb::ACCENT;
    let dim_sep = rgb::DIM_SEPARATOR;
    println!(
        "{} {} {}",
        "─".truecolor(purple.0, purple.1, purple.2),
        name.truecolor(purple.0, purple.1, purple.2).bold(),
        "─"
            .repeat(30 - name.len().min(28))
            .truecolor(dim_sep.0, dim_sep.1, dim_sep.2)
    );
}

/// Print a config row with label and value
fn print_config_row(label: &str, value: &str, value_color: (u8, u8, u8), highlight: bool) {
    if ui::is_quiet_mode() {
        return;
    }
    let dim = rgb::DIM_WHITE;
    let label_styled = format!("{label:>12}").truecolor(dim.0, dim.1, dim.2);

    let value_styled = if highlight {
        value
            .truecolor(value_color.0, value_color.1, value_color.2)
            .bold()
    } else {
        value.truecolor(value_color.0, value_color.1, value_color.2)
    };

    println!("{label_styled}  {value_styled}");
}
