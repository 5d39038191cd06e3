use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    AutofillLanguage,
    Orientation,
};

pub const MIN_COLUMN_WIDTH: f32 = 40.0;

/// Persisted column keys and their default widths, in display order.
pub const TABLE_COLUMNS: &[(&str, f32)] = &[
    ("select", 50.0),
    ("lesson", 110.0),
    ("front", 230.0),
    ("back", 230.0),
    ("copies", 70.0),
    ("printed", 70.0),
    ("last_printed", 150.0),
    ("delete", 70.0),
];

/// Everything the user can tune, persisted as `settings.json`.
///
/// `#[serde(default)]` keeps old settings files readable: keys a newer
/// build added simply take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub cards_per_page: u32,
    pub orientation: Orientation,
    pub font_size: u32,
    pub autofill_language: AutofillLanguage,
    pub pen_color: String,
    pub pen_width: f32,
    pub column_widths: HashMap<String, f32>,
}

impl Default for SettingsData {
    fn default() -> Self {
        SettingsData {
            cards_per_page: 6,
            orientation: Orientation::Portrait,
            font_size: 60,
            autofill_language: AutofillLanguage::Disabled,
            pen_color: "#000000".to_string(),
            pen_width: 2.0,
            column_widths: default_column_widths(),
        }
    }
}

impl SettingsData {
    pub fn column_width(&self, name: &str) -> f32 {
        let width =
            self.column_widths.get(name).copied().unwrap_or_else(|| default_width(name));
        width.max(MIN_COLUMN_WIDTH)
    }

    pub fn set_column_width(&mut self, name: &str, width: f32) {
        self.column_widths.insert(name.to_string(), width.max(MIN_COLUMN_WIDTH));
    }

    /// Pen color as sRGB bytes. Unparseable values fall back to black
    /// rather than failing a print run.
    pub fn pen_rgb8(&self) -> [u8; 3] {
        parse_hex_color(&self.pen_color).unwrap_or([0, 0, 0])
    }

    pub fn set_pen_rgb8(&mut self, rgb: [u8; 3]) {
        self.pen_color = format_hex_color(rgb);
    }
}

fn default_column_widths() -> HashMap<String, f32> {
    TABLE_COLUMNS.iter().map(|(name, width)| (name.to_string(), *width)).collect()
}

fn default_width(name: &str) -> f32 {
    TABLE_COLUMNS.iter().find(|(n, _)| *n == name).map(|(_, w)| *w).unwrap_or(100.0)
}

pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

pub fn format_hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SettingsData::default();
        assert_eq!(settings.cards_per_page, 6);
        assert_eq!(settings.orientation, Orientation::Portrait);
        assert_eq!(settings.font_size, 60);
        assert_eq!(settings.autofill_language, AutofillLanguage::Disabled);
        assert_eq!(settings.pen_color, "#000000");
        assert_eq!(settings.pen_width, 2.0);
        assert_eq!(settings.column_width("front"), 230.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{ "cards_per_page": 8, "orientation": "Landscape" }"#)
                .unwrap();
        assert_eq!(settings.cards_per_page, 8);
        assert_eq!(settings.orientation, Orientation::Landscape);
        assert_eq!(settings.font_size, 60);
        assert_eq!(settings.pen_color, "#000000");
    }

    #[test]
    fn test_hex_color_round_trip() {
        assert_eq!(parse_hex_color("#1a2B3c"), Some([0x1a, 0x2b, 0x3c]));
        assert_eq!(format_hex_color([0x1a, 0x2b, 0x3c]), "#1a2b3c");
        assert_eq!(parse_hex_color(&format_hex_color([255, 0, 128])), Some([255, 0, 128]));
    }

    #[test]
    fn test_bad_hex_falls_back_to_black() {
        assert_eq!(parse_hex_color("not a color"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#12345g"), None);

        let mut settings = SettingsData::default();
        settings.pen_color = "garbage".to_string();
        assert_eq!(settings.pen_rgb8(), [0, 0, 0]);
    }

    #[test]
    fn test_column_width_floor() {
        let mut settings = SettingsData::default();
        settings.set_column_width("lesson", 3.0);
        assert_eq!(settings.column_width("lesson"), MIN_COLUMN_WIDTH);
        assert_eq!(settings.column_width("unknown"), 100.0);
    }
}
