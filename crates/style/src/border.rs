use serde::{Deserialize, Serialize};
use texprinter_types::Color;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    pub width: f32,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub style: BorderStyle,
}

impl Border {
    pub fn solid(width: f32, color: Color) -> Self {
        Self {
            width,
            color,
            style: BorderStyle::Solid,
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Self {
            width: 0.75,
            color: Color::black(),
            style: BorderStyle::Solid,
        }
    }
}
