use crate::border::Border;
use crate::dimension::Margins;
use crate::font::{FontStyle, FontWeight};
use crate::text::TextAlign;
use serde::{Deserialize, Serialize};
use texprinter_types::Color;

/// A set of property overrides carried by one style rule.
///
/// Every field is optional; unset fields leave the property untouched when
/// the rule is applied. The record serializes with camelCase keys so rule
/// sets can live in JSON configuration files.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleProps {
    // Font & text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    // Box model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<Border>,
}

impl StyleProps {
    /// Merges the set properties of `other` over `self` (last writer wins).
    pub fn apply(&mut self, other: &StyleProps) {
        if other.font_family.is_some() {
            self.font_family = other.font_family.clone();
        }
        if other.font_size.is_some() {
            self.font_size = other.font_size;
        }
        if other.font_weight.is_some() {
            self.font_weight = other.font_weight;
        }
        if other.font_style.is_some() {
            self.font_style = other.font_style;
        }
        if other.line_height.is_some() {
            self.line_height = other.line_height;
        }
        if other.text_align.is_some() {
            self.text_align = other.text_align;
        }
        if other.color.is_some() {
            self.color = other.color;
        }
        if other.background_color.is_some() {
            self.background_color = other.background_color;
        }
        if other.margin.is_some() {
            self.margin = other.margin;
        }
        if other.border.is_some() {
            self.border = other.border;
        }
        if other.border_bottom.is_some() {
            self.border_bottom = other.border_bottom;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StyleProps::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_only_set_fields() {
        let mut base = StyleProps {
            font_size: Some(10.0),
            color: Some(Color::new(255, 0, 0)),
            ..Default::default()
        };
        let over = StyleProps {
            color: Some(Color::new(0, 0, 255)),
            ..Default::default()
        };
        base.apply(&over);
        assert_eq!(base.font_size, Some(10.0));
        assert_eq!(base.color, Some(Color::new(0, 0, 255)));
    }

    #[test]
    fn deserializes_camel_case() {
        let props: StyleProps = serde_json::from_str(
            r##"{"fontFamily": "monospace", "fontSize": 9.5, "backgroundColor": "#eeeeee"}"##,
        )
        .unwrap();
        assert_eq!(props.font_family.as_deref(), Some("monospace"));
        assert_eq!(props.font_size, Some(9.5));
        assert_eq!(props.background_color, Some(Color::new(0xee, 0xee, 0xee)));
    }
}
