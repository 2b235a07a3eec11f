use serde::{Deserialize, Serialize};

use crate::ir::ColorClass;

/// Concrete colors for the rendering surface. The core tags values with
/// semantic `ColorClass`es only; this is where they resolve at the dump
/// boundary. Layout never reads the theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub foreground: String,
    pub muted_foreground: String,
    pub string_color: String,
    pub number_color: String,
    pub container_color: String,
    pub edge_color: String,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#0B0E14".to_string(),
            foreground: "#E6E6E6".to_string(),
            muted_foreground: "#8A919E".to_string(),
            string_color: "#7EE787".to_string(),
            number_color: "#79C0FF".to_string(),
            container_color: "#D2A8FF".to_string(),
            edge_color: "#8A919E".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            foreground: "#1C2430".to_string(),
            muted_foreground: "#6B7280".to_string(),
            string_color: "#116329".to_string(),
            number_color: "#0550AE".to_string(),
            container_color: "#6639BA".to_string(),
            edge_color: "#7A8AA6".to_string(),
        }
    }

    pub fn color_for(&self, class: ColorClass) -> &str {
        match class {
            ColorClass::Null => &self.muted_foreground,
            ColorClass::String => &self.string_color,
            ColorClass::Number => &self.number_color,
            ColorClass::Container => &self.container_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
