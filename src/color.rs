use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::analysis::quadrant::Quadrant;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed colours of the quadrant scatter.
pub fn quadrant_color(quadrant: Quadrant) -> Color32 {
    match quadrant {
        Quadrant::Q1 => Color32::from_rgb(31, 119, 180),
        Quadrant::Q2 => Color32::from_rgb(255, 127, 14),
        Quadrant::Q3 => Color32::from_rgb(44, 160, 44),
        Quadrant::Q4 => Color32::from_rgb(214, 39, 40),
    }
}

// ---------------------------------------------------------------------------
// Athlete → Color32
// ---------------------------------------------------------------------------

/// Maps athlete names to distinct colours, stable for a given name set.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(names: &BTreeSet<String>) -> Self {
        let palette = generate_palette(names.len());
        let mapping = names.iter().cloned().zip(palette).collect();
        ColorMap { mapping }
    }

    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping.get(name).copied().unwrap_or(Color32::GRAY)
    }
}
