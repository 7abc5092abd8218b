use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.6);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// City → colour
// ---------------------------------------------------------------------------

/// Gives every city of a table its own colour, stable for the table's lifetime.
#[derive(Debug, Clone)]
pub struct CityPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CityPalette {
    pub fn new(cities: &BTreeSet<String>) -> Self {
        let palette = generate_palette(cities.len());
        let mapping = cities.iter().cloned().zip(palette).collect();

        CityPalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Colour of `city`, grey for cities the palette was not built with.
    pub fn color_for(&self, city: &str) -> Color32 {
        self.mapping
            .get(city)
            .copied()
            .unwrap_or(self.default_color)
    }
}

impl Default for CityPalette {
    fn default() -> Self {
        Self::new(&BTreeSet::new())
    }
}
