use colored::Colorize;
use parking_lot::Mutex;
use std::fmt::Write;

use crate::color::Rgb;
use crate::gradient::Gradient;

// RGB tuple constants for use with the `colored` crate's `.truecolor()` method
pub mod rgb {
    pub const ACCENT: (u8, u8, u8) = (225, 53, 255);
    pub const SUCCESS: (u8, u8, u8) = (80, 250, 123);
    pub const WARNING: (u8, u8, u8) = (241, 250, 140);
    pub const HIGHLIGHT: (u8, u8, u8) = (128, 255, 234);
    pub const NUMBER: (u8, u8, u8) = (255, 106, 193);
    pub const DIM_WHITE: (u8, u8, u8) = (180, 180, 190);
    pub const DIM_SEPARATOR: (u8, u8, u8) = (60, 60, 70);
}

/// Width of rendered gradient bars, in cells
pub const BAR_WIDTH: usize = 64;

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
pub fn set_quiet_mode(enabled: bool) {
    let mut quiet_mode = QUIET_MODE.lock();
    *quiet_mode = enabled;
}

/// Check if quiet mode is enabled
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!("{}", message.red().bold());
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.green().bold());
    }
}

/// Print a simple message (respects quiet mode)
pub fn print_message(message: &str) {
    if !is_quiet_mode() {
        println!("{message}");
    }
}

pub fn print_version(version: &str) {
    if !is_quiet_mode() {
        println!(
            "{} {} {}",
            "gradient-forge".magenta().bold(),
            "version".cyan(),
            version.green()
        );
    }
}

/// One full-block cell per color
pub fn swatch(colors: &[Rgb]) -> String {
    colors.iter().fold(String::new(), |mut acc, color| {
        let (r, g, b) = color.to_rgb_tuple();
        write!(acc, "{}", "█".truecolor(r, g, b)).expect("writing to string cannot fail");
        acc
    })
}

/// Render a gradient bar from evenly spaced samples. `preview` samples
/// through the seamless preview instead of the stored colors.
pub fn gradient_bar(gradient: &Gradient, width: usize, preview: bool) -> String {
    let width = width.max(1);
    if preview {
        swatch(&gradient.sample_colors_for_preview(width))
    } else {
        swatch(&gradient.sample_colors(width))
    }
}

/// Print a gradient bar with its name (respects quiet mode)
pub fn print_gradient(gradient: &Gradient, preview: bool) {
    if !is_quiet_mode() {
        let (r, g, b) = rgb::HIGHLIGHT;
        println!("{}", gradient.name().truecolor(r, g, b).bold());
        println!("{}", gradient_bar(gradient, BAR_WIDTH, preview));
    }
}

/// Print one row per stop: index, position, swatch, hex and channels
pub fn print_stops(gradient: &Gradient) {
    if is_quiet_mode() {
        return;
    }
    let (nr, ng, nb) = rgb::NUMBER;
    let (dr, dg, db) = rgb::DIM_WHITE;
    for (index, (position, color)) in gradient.color_stops().into_iter().enumerate() {
        println!(
            "{:>3}  {}  {}  {}  {}",
            index.to_string().truecolor(dr, dg, db),
            format!("{position:.4}").truecolor(nr, ng, nb),
            swatch(&[color, color]),
            color.to_hex(),
            format!("({}, {}, {})", color.r, color.g, color.b).truecolor(dr, dg, db)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_has_one_cell_per_color() {
        colored::control::set_override(false);
        assert_eq!(swatch(&[Rgb::BLACK, Rgb::WHITE, Rgb::FALLBACK]), "███");
        assert_eq!(gradient_bar(&Gradient::new(), 5, true).chars().count(), 5);
        colored::control::unset_override();
    }
}
