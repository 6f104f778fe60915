use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Serializer;

use crate::data::model::Outcome;

/// Plotly's qualitative "G10" sequence, used for categorical series.
pub const G10: [Color32; 10] = [
    Color32::from_rgb(0x33, 0x66, 0xCC),
    Color32::from_rgb(0xDC, 0x39, 0x12),
    Color32::from_rgb(0xFF, 0x99, 0x00),
    Color32::from_rgb(0x10, 0x96, 0x18),
    Color32::from_rgb(0x99, 0x00, 0x99),
    Color32::from_rgb(0x00, 0x99, 0xC6),
    Color32::from_rgb(0xDD, 0x44, 0x77),
    Color32::from_rgb(0x66, 0xAA, 0x00),
    Color32::from_rgb(0xB8, 0x2E, 0x2E),
    Color32::from_rgb(0x31, 0x63, 0x95),
];

pub const TITLE: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Success => Color32::from_rgb(0x00, 0x80, 0x00),
        Outcome::Failure => Color32::from_rgb(0xFF, 0x00, 0x00),
    }
}

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

/// `n` categorical colours: G10 while it lasts, generated hues beyond that.
pub fn categorical_palette(n: usize) -> Vec<Color32> {
    if n <= G10.len() {
        G10[..n].to_vec()
    } else {
        generate_palette(n)
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of one categorical column to distinct colours.
///
/// Built once per dataset so that a category keeps its colour no matter
/// which subset of rows is on screen.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, Color32)>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from labels in display order.
    pub fn new(labels: &[String]) -> Self {
        let palette = categorical_palette(labels.len());
        let mapping = labels.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.mapping
    }
}

/// Serialize a colour as `#rrggbb`.
pub fn serialize_hex<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&to_hex(*color))
}

pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_category_sets_use_g10() {
        let palette = categorical_palette(3);
        assert_eq!(palette, G10[..3].to_vec());
    }

    #[test]
    fn large_category_sets_stay_distinct() {
        let palette = generate_palette(14);
        assert_eq!(palette.len(), 14);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_label_falls_back_to_grey() {
        let map = ColorMap::new(&["FT".to_string(), "B4".to_string()]);
        assert_eq!(map.color_for("FT"), G10[0]);
        assert_eq!(map.color_for("B4"), G10[1]);
        assert_eq!(map.color_for("v1.0"), Color32::GRAY);
        assert_eq!(map.legend_entries().len(), 2);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(to_hex(G10[0]), "#3366cc");
        assert_eq!(to_hex(outcome_color(Outcome::Failure)), "#ff0000");
    }
}
