//! Page geometry configuration.

use crate::LayoutError;
use serde::{Deserialize, Serialize};
use texprinter_style::Margins;

/// A4 in points.
const DEFAULT_PAGE_WIDTH: f32 = 595.28;
const DEFAULT_PAGE_HEIGHT: f32 = 841.89;
/// One inch, the conventional default print margin.
const DEFAULT_MARGIN: f32 = 72.0;

/// The page configuration record handed in by the caller. Recognized
/// options mirror the external contract: `pageWidth`, `pageHeight`,
/// `marginTop`, `marginBottom`, `marginLeft`, `marginRight` — all in
/// points; unset options fall back to A4 with one-inch margins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f32>,
}

impl PageConfig {
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = Some(width);
        self.page_height = Some(height);
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margin_top = Some(margins.top);
        self.margin_bottom = Some(margins.bottom);
        self.margin_left = Some(margins.left);
        self.margin_right = Some(margins.right);
        self
    }

    /// Applies defaults and validates the result.
    pub fn resolve(&self) -> Result<PageGeometry, LayoutError> {
        let geometry = PageGeometry {
            width: self.page_width.unwrap_or(DEFAULT_PAGE_WIDTH),
            height: self.page_height.unwrap_or(DEFAULT_PAGE_HEIGHT),
            margins: Margins {
                top: self.margin_top.unwrap_or(DEFAULT_MARGIN),
                bottom: self.margin_bottom.unwrap_or(DEFAULT_MARGIN),
                left: self.margin_left.unwrap_or(DEFAULT_MARGIN),
                right: self.margin_right.unwrap_or(DEFAULT_MARGIN),
            },
        };
        geometry.validate()?;
        Ok(geometry)
    }
}

/// Concrete page geometry after defaulting. Identical for every page of one
/// export; there is no per-page customization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl PageGeometry {
    fn validate(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("pageWidth", self.width),
            ("pageHeight", self.height),
            ("marginTop", self.margins.top),
            ("marginBottom", self.margins.bottom),
            ("marginLeft", self.margins.left),
            ("marginRight", self.margins.right),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.content_width() <= 0.0 {
            return Err(LayoutError::Config(format!(
                "horizontal margins ({}) leave no room on a {} wide page",
                self.margins.horizontal(),
                self.width
            )));
        }
        if self.usable_height() <= 0.0 {
            return Err(LayoutError::Config(format!(
                "vertical margins ({}) leave no room on a {} tall page",
                self.margins.vertical(),
                self.height
            )));
        }
        Ok(())
    }

    /// Horizontal space available to content.
    pub fn content_width(&self) -> f32 {
        self.width - self.margins.horizontal()
    }

    /// Vertical space available to content on every page.
    pub fn usable_height(&self) -> f32 {
        self.height - self.margins.vertical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a4_with_inch_margins() {
        let geo = PageConfig::default().resolve().unwrap();
        assert!((geo.width - 595.28).abs() < 0.01);
        assert!((geo.height - 841.89).abs() < 0.01);
        assert_eq!(geo.margins, Margins::all(72.0));
        assert!((geo.content_width() - (595.28 - 144.0)).abs() < 0.01);
    }

    #[test]
    fn rejects_non_positive_values() {
        let config = PageConfig {
            page_width: Some(0.0),
            ..Default::default()
        };
        assert!(config.resolve().is_err());

        let config = PageConfig {
            margin_top: Some(-1.0),
            ..Default::default()
        };
        assert!(config.resolve().is_err());
    }

    #[test]
    fn rejects_margins_swallowing_the_page() {
        let config = PageConfig::default()
            .with_page_size(100.0, 100.0)
            .with_margins(Margins::all(60.0));
        assert!(config.resolve().is_err());
    }

    #[test]
    fn recognized_options_only() {
        let parsed: Result<PageConfig, _> =
            serde_json::from_str(r#"{"pageWidth": 500.0, "paperSize": "A4"}"#);
        assert!(parsed.is_err());

        let parsed: PageConfig =
            serde_json::from_str(r#"{"pageWidth": 500.0, "marginLeft": 10.0}"#).unwrap();
        let geo = parsed.resolve().unwrap();
        assert_eq!(geo.width, 500.0);
        assert_eq!(geo.margins.left, 10.0);
        assert_eq!(geo.margins.right, 72.0);
    }
}
