use crate::border::Border;
use crate::dimension::Margins;
use crate::font::{FontStyle, FontWeight};
use crate::text::TextAlign;
use std::sync::Arc;
use texprinter_types::Color;

/// The font selection of a resolved style. The layout engine maps the
/// family string onto a concrete base face; the render stage does the same
/// strictly and fails the export if the family cannot be mapped.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDesc {
    pub family: Arc<str>,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl Default for FontDesc {
    fn default() -> Self {
        Self {
            family: Arc::from("serif"),
            size: 12.0,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
        }
    }
}

/// The fully computed, non-cascading style of exactly one node.
///
/// Computed once per node per export and immutable afterwards; shared as
/// `Arc<ResolvedStyle>` between the layout boxes that reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub font: FontDesc,
    pub line_height: f32,
    pub text_align: TextAlign,
    pub color: Color,
    pub background_color: Option<Color>,
    pub margin: Margins,
    pub border: Option<Border>,
    pub border_bottom: Option<Border>,
}

impl Default for ResolvedStyle {
    /// The built-in root default: serif body font, black text, left
    /// aligned, no decoration.
    fn default() -> Self {
        let font = FontDesc::default();
        let line_height = font.size * 1.2;
        Self {
            font,
            line_height,
            text_align: TextAlign::Left,
            color: Color::black(),
            background_color: None,
            margin: Margins::default(),
            border: None,
            border_bottom: None,
        }
    }
}

impl ResolvedStyle {
    /// True when the node paints any decoration besides its text.
    pub fn has_decoration(&self) -> bool {
        self.background_color.is_some() || self.border.is_some() || self.border_bottom.is_some()
    }
}
