use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Accent used for single-series charts and card icons.
pub const ACCENT: Color32 = Color32::from_rgb(52, 152, 219);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from the accent blue.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 204.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.53);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Translucent version of `c` for filled areas.
pub fn fill(c: Color32) -> Color32 {
    c.gamma_multiply(0.7)
}

// ---------------------------------------------------------------------------
// Color mapping: chart category → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one chart to distinct colours, in the order given.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(l, c)| (l.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_unknown_label_is_gray() {
        let cm = ColorMap::new(["URBANA", "RURAL"]);
        assert_ne!(cm.color_for("URBANA"), cm.color_for("RURAL"));
        assert_eq!(cm.color_for("MIXTA"), Color32::GRAY);
    }
}
