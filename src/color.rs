use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::FacetValue;

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
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
// Color mapping: facet value → Color32
// ---------------------------------------------------------------------------

/// Assigns each value of a facet a fixed colour for the whole session, so a
/// language keeps its colour however the filters change.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<FacetValue, Color32>,
}

impl ColorMap {
    /// Known values share the palette evenly; `Unknown` is always gray.
    pub fn new(values: &BTreeSet<FacetValue>) -> Self {
        let known: Vec<&FacetValue> = values.iter().filter(|v| v.is_known()).collect();
        let mut mapping: BTreeMap<FacetValue, Color32> = known
            .iter()
            .zip(generate_palette(known.len()))
            .map(|(v, c)| ((*v).clone(), c))
            .collect();
        if values.contains(&FacetValue::Unknown) {
            mapping.insert(FacetValue::Unknown, Color32::GRAY);
        }
        ColorMap { mapping }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &FacetValue) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        let unique: BTreeSet<[u8; 4]> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_and_unmapped_values_are_gray() {
        let values: BTreeSet<FacetValue> =
            [FacetValue::Unknown, FacetValue::known("en"), FacetValue::known("te")]
                .into_iter()
                .collect();
        let map = ColorMap::new(&values);
        assert_eq!(map.color_for(&FacetValue::Unknown), Color32::GRAY);
        assert_eq!(map.color_for(&FacetValue::known("fr")), Color32::GRAY);
        assert_ne!(
            map.color_for(&FacetValue::known("en")),
            map.color_for(&FacetValue::known("te"))
        );
    }

    #[test]
    fn unknown_does_not_take_a_palette_slot() {
        let with_unknown: BTreeSet<FacetValue> =
            [FacetValue::Unknown, FacetValue::known("en"), FacetValue::known("te")]
                .into_iter()
                .collect();
        let map = ColorMap::new(&with_unknown);
        let expected = generate_palette(2);
        assert_eq!(map.color_for(&FacetValue::known("en")), expected[0]);
        assert_eq!(map.color_for(&FacetValue::known("te")), expected[1]);
    }
}
