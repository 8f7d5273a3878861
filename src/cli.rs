use crate::commands;
use crate::config::EngineConfig;
use crate::distribution::{DISTRIBUTION_NAMES, PositionPattern};
use crate::log_debug;
use crate::logger::{self, LogTarget};
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum, crate_version};
use colored::Colorize;
use std::path::PathBuf;

const LOG_FILE: &str = "gradient-forge-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Gradient Forge: gradient color engine",
    long_about = "Gradient Forge builds, inspects and transforms color gradients: sampling, seamless edges, merging, perceptual color distribution and random generation.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path ('-' logs to stderr)"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,

    /// Use an alternative configuration file
    #[arg(
        long = "config",
        global = true,
        help = "Use an alternative configuration file"
    )]
    pub config: Option<PathBuf>,
}

/// Export formats understood by `export`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// 256 `r g b` lines
    Map,
    /// `index=r|g|b` lines, one per stop
    Ugr,
    /// Full gradient state as JSON
    Json,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Create a new gradient
    #[command(
        about = "Create a new gradient",
        long_about = "Create a new gradient from a preset, or a grayscale ramp using the configured stop count."
    )]
    New {
        /// Preset to start from
        #[arg(short, long, help = "Preset to start from")]
        preset: Option<String>,

        /// Number of stops for the grayscale ramp
        #[arg(short, long, help = "Number of stops for the grayscale ramp")]
        stops: Option<usize>,

        /// Gradient name
        #[arg(short, long, help = "Gradient name")]
        name: Option<String>,

        /// Write the gradient state to this file
        #[arg(short, long, help = "Write the gradient state to this file")]
        output: Option<PathBuf>,
    },

    /// Show a gradient
    #[command(
        about = "Show a gradient",
        long_about = "Render a gradient as a truecolor bar and list its stops, statistics and dominant colors."
    )]
    Show {
        /// Gradient state file
        #[arg(help = "Gradient state file")]
        file: PathBuf,

        /// Render the seamless preview instead of the stored colors
        #[arg(long, help = "Render the seamless preview instead of the stored colors")]
        preview: bool,

        /// Number of dominant colors to list
        #[arg(long, default_value_t = 5, help = "Number of dominant colors to list")]
        dominant: usize,
    },

    /// Sample colors along a gradient
    #[command(
        about = "Sample colors along a gradient",
        long_about = "Print evenly spaced samples as hex colors, or the color at specific positions."
    )]
    Sample {
        /// Gradient state file
        #[arg(help = "Gradient state file")]
        file: PathBuf,

        /// Number of evenly spaced samples
        #[arg(short, long, help = "Number of evenly spaced samples")]
        count: Option<usize>,

        /// Sample at these positions instead
        #[arg(short, long, value_delimiter = ',', help = "Sample at these positions instead")]
        at: Vec<f64>,

        /// Sample through the seamless preview
        #[arg(long, help = "Sample through the seamless preview")]
        preview: bool,
    },

    /// Redistribute colors across a gradient's positions
    #[command(
        about = "Redistribute colors across a gradient's positions",
        long_about = "Reorder stop colors by a perceptual property while keeping every position fixed.",
        after_help = get_distribution_help()
    )]
    Distribute {
        /// Gradient state file
        #[arg(help = "Gradient state file")]
        file: PathBuf,

        /// Distribution name
        #[arg(short, long, help = "Distribution name (see list below)")]
        distribution: Option<String>,

        /// Reverse the sort order
        #[arg(short, long, help = "Reverse the sort order")]
        reverse: bool,

        /// Let the first and last stops move too
        #[arg(long, help = "Let the first and last stops move too")]
        no_preserve: bool,

        /// Seed for the random distribution
        #[arg(long, help = "Seed for the random distribution")]
        seed: Option<u64>,

        /// Write the result here instead of overwriting the input
        #[arg(short, long, help = "Write the result here instead of overwriting the input")]
        output: Option<PathBuf>,
    },

    /// Move stop positions by a pattern
    #[command(
        about = "Move stop positions by a pattern",
        long_about = "Reposition stops with a position pattern, keeping their color order.",
        after_help = get_pattern_help()
    )]
    Pattern {
        /// Gradient state file
        #[arg(help = "Gradient state file")]
        file: PathBuf,

        /// Pattern name
        #[arg(short, long, default_value = "even", help = "Pattern name")]
        pattern: String,

        /// Write the result here instead of overwriting the input
        #[arg(short, long, help = "Write the result here instead of overwriting the input")]
        output: Option<PathBuf>,
    },

    /// Merge gradients
    #[command(
        about = "Merge gradients",
        long_about = "Combine two or more gradients with the interleave, blend, crossfade or stack strategy."
    )]
    Merge {
        /// Gradient state files
        #[arg(required = true, num_args = 1.., help = "Gradient state files")]
        files: Vec<PathBuf>,

        /// Weight of each input, in order
        #[arg(short, long, value_delimiter = ',', help = "Weight of each input, in order")]
        weights: Vec<f64>,

        /// Merge strategy
        #[arg(short, long, help = "Merge strategy: interleave, blend, crossfade or stack")]
        strategy: Option<String>,

        /// Ignore weights
        #[arg(long, help = "Ignore weights")]
        no_weights: bool,

        /// Write the merged gradient to this file
        #[arg(short, long, help = "Write the merged gradient to this file")]
        output: Option<PathBuf>,
    },

    /// Generate a random gradient
    #[command(
        about = "Generate a random gradient",
        long_about = "Generate a random gradient from a color scheme. A seed makes the result reproducible."
    )]
    Random {
        /// Color scheme
        #[arg(
            short = 'S',
            long,
            default_value = "random",
            help = "Color scheme: random, monochromatic, analogous, complementary, triadic or harmonious"
        )]
        scheme: String,

        /// Number of stops
        #[arg(short, long, help = "Number of stops")]
        stops: Option<usize>,

        /// Random seed
        #[arg(long, help = "Random seed")]
        seed: Option<u64>,

        /// Write the gradient to this file
        #[arg(short, long, help = "Write the gradient to this file")]
        output: Option<PathBuf>,
    },

    /// Configure seamless edge blending
    #[command(
        about = "Configure seamless edge blending",
        long_about = "Enable or tune seamless edge blending, or bake the blended colors into the stops."
    )]
    Seamless {
        /// Gradient state file
        #[arg(help = "Gradient state file")]
        file: PathBuf,

        /// Disable seamless blending
        #[arg(long, help = "Disable seamless blending")]
        disable: bool,

        /// Blend region width (0.0 to 0.5)
        #[arg(long, help = "Blend region width (0.0 to 0.5)")]
        region: Option<f64>,

        /// Intensity falloff (0.0 to 1.0)
        #[arg(long, help = "Intensity falloff (0.0 to 1.0)")]
        falloff: Option<f64>,

        /// Use progressive blending
        #[arg(long, help = "Use progressive blending")]
        progressive: Option<bool>,

        /// Bake the blended colors into the stops
        #[arg(long, help = "Bake the blended colors into the stops")]
        bake: bool,

        /// Write the result here instead of overwriting the input
        #[arg(short, long, help = "Write the result here instead of overwriting the input")]
        output: Option<PathBuf>,
    },

    /// Check a gradient state file
    #[command(
        about = "Check a gradient state file",
        long_about = "Load a gradient state file and report integrity issues."
    )]
    Validate {
        /// Gradient state file
        #[arg(help = "Gradient state file")]
        file: PathBuf,
    },

    /// Export a gradient
    #[command(
        about = "Export a gradient",
        long_about = "Write a gradient's MAP samples, UGR entries or JSON state to stdout or a file."
    )]
    Export {
        /// Gradient state file
        #[arg(help = "Gradient state file")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "map", help = "Output format")]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Manage presets
    #[command(
        about = "Manage presets",
        long_about = "List presets, or save a gradient as a preset in the configured presets directory."
    )]
    Presets {
        /// Save this gradient state file as a preset
        #[arg(long, help = "Save this gradient state file as a preset")]
        save: Option<PathBuf>,

        /// Preset name for --save
        #[arg(short, long, requires = "save", help = "Preset name for --save")]
        name: Option<String>,
    },

    /// Show or initialize the configuration
    #[command(
        about = "Show or initialize the configuration",
        long_about = "Print the active configuration, or write the defaults to the configuration file."
    )]
    Config {
        /// Write the default configuration file
        #[arg(long, help = "Write the default configuration file")]
        init: bool,
    },
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

fn get_dynamic_help() -> String {
    format!(
        "\nDistributions: {}\nPatterns: {}",
        bold_list(&DISTRIBUTION_NAMES),
        bold_list(&PositionPattern::NAMES)
    )
}

fn get_distribution_help() -> String {
    format!("\nDistributions: {}", bold_list(&DISTRIBUTION_NAMES))
}

fn get_pattern_help() -> String {
    format!("\nPatterns: {}", bold_list(&PositionPattern::NAMES))
}

fn bold_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("{}", name.bold()))
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Main function to parse arguments and handle the command
pub fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };

    if cli.log {
        logger::set_logging_enabled(true);
        let target = LogTarget::from_arg(cli.log_file.as_deref().unwrap_or(LOG_FILE));
        logger::set_log_target(&target)?;
        logger::set_verbose_logging(config.verbose_logging);
        log_debug!("Logging enabled for gradient-forge {}", crate_version!());
    } else {
        logger::set_logging_enabled(false);
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command, &config, cli.config.as_deref())
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["gradient-forge", "--help"]);
        Ok(())
    }
}

/// Dispatch a parsed subcommand
pub fn handle_command(
    command: Commands,
    config: &EngineConfig,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    match command {
        Commands::New {
            preset,
            stops,
            name,
            output,
        } => commands::handle_new_command(
            config,
            preset.as_deref(),
            stops,
            name,
            output.as_deref(),
        ),
        Commands::Show {
            file,
            preview,
            dominant,
        } => commands::handle_show_command(&file, preview, dominant),
        Commands::Sample {
            file,
            count,
            at,
            preview,
        } => commands::handle_sample_command(
            &file,
            count.unwrap_or(config.sample_count),
            &at,
            preview,
        ),
        Commands::Distribute {
            file,
            distribution,
            reverse,
            no_preserve,
            seed,
            output,
        } => commands::handle_distribute_command(
            config,
            &file,
            &commands::DistributeOptions {
                distribution,
                reverse,
                preserve_endpoints: config.preserve_endpoints && !no_preserve,
                seed,
            },
            output.as_deref(),
        ),
        Commands::Pattern {
            file,
            pattern,
            output,
        } => commands::handle_pattern_command(&file, &pattern, output.as_deref()),
        Commands::Merge {
            files,
            weights,
            strategy,
            no_weights,
            output,
        } => commands::handle_merge_command(
            config,
            &files,
            &weights,
            strategy.as_deref(),
            !no_weights && config.use_weights,
            output.as_deref(),
        ),
        Commands::Random {
            scheme,
            stops,
            seed,
            output,
        } => commands::handle_random_command(&scheme, stops, seed, output.as_deref()),
        Commands::Seamless {
            file,
            disable,
            region,
            falloff,
            progressive,
            bake,
            output,
        } => commands::handle_seamless_command(
            &file,
            commands::SeamlessOptions {
                enabled: !disable,
                region,
                falloff,
                progressive,
                bake,
            },
            output.as_deref(),
        ),
        Commands::Validate { file } => commands::handle_validate_command(&file),
        Commands::Export {
            file,
            format,
            output,
        } => commands::handle_export_command(&file, format, output.as_deref()),
        Commands::Presets { save, name } => {
            commands::handle_presets_command(config, save.as_deref(), name.as_deref())
        }
        Commands::Config { init } => commands::handle_config_command(config, config_path, init),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_distribute() {
        let cli = Cli::parse_from([
            "gradient-forge",
            "distribute",
            "g.json",
            "-d",
            "hue",
            "--reverse",
            "--seed",
            "7",
        ]);
        match cli.command {
            Some(Commands::Distribute {
                distribution,
                reverse,
                no_preserve,
                seed,
                ..
            }) => {
                assert_eq!(distribution.as_deref(), Some("hue"));
                assert!(reverse);
                assert!(!no_preserve);
                assert_eq!(seed, Some(7));
            }
            _ => panic!("expected distribute"),
        }
    }

    #[test]
    fn test_parse_merge_weights() {
        let cli = Cli::parse_from([
            "gradient-forge",
            "merge",
            "a.json",
            "b.json",
            "-w",
            "1,0.5",
            "-s",
            "blend",
        ]);
        match cli.command {
            Some(Commands::Merge {
                files, weights, ..
            }) => {
                assert_eq!(files.len(), 2);
                assert_eq!(weights, vec![1.0, 0.5]);
            }
            _ => panic!("expected merge"),
        }
    }
}
