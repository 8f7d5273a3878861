#![allow(dead_code)]

use gradient_forge::commands::save_gradient;
use gradient_forge::{Gradient, Rgb};
use std::path::PathBuf;
use tempfile::TempDir;

pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const GREEN: Rgb = Rgb::new(0, 255, 0);
pub const CYAN: Rgb = Rgb::new(0, 255, 255);
pub const BLUE: Rgb = Rgb::new(0, 0, 255);

/// Red at 0.0 to blue at 1.0
pub fn red_to_blue() -> Gradient {
    Gradient::from_stops([(0.0, RED), (1.0, BLUE)])
}

/// Red/yellow/green/cyan/blue at quarter positions, with the interior
/// colors scrambled so hue order differs from insertion order
pub fn scrambled_hues() -> Gradient {
    Gradient::from_stops([
        (0.0, RED),
        (0.25, CYAN),
        (0.5, YELLOW),
        (0.75, GREEN),
        (1.0, BLUE),
    ])
}

pub fn colors_of(gradient: &Gradient) -> Vec<Rgb> {
    gradient.color_stops().into_iter().map(|(_, c)| c).collect()
}

pub fn positions_of(gradient: &Gradient) -> Vec<f64> {
    gradient.color_stops().into_iter().map(|(p, _)| p).collect()
}

/// Writes gradient state files into a temporary directory
pub struct StateDir {
    pub dir: TempDir,
}

impl StateDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, gradient: &Gradient) -> PathBuf {
        let path = self.path(name);
        save_gradient(gradient, &path).expect("Failed to write gradient state");
        path
    }
}
