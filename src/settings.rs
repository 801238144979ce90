//! Loading of caller-owned configuration — style rule sets and page
//! geometry — from the JSON the GUI shell persists them in.

use texprinter_layout::PageConfig;
use texprinter_style::StyleRule;

/// Parses an ordered rule list from JSON. Rule order is cascade order.
pub fn rules_from_json(json: &str) -> Result<Vec<StyleRule>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a page configuration record. Only the recognized options
/// (`pageWidth`, `pageHeight`, `marginTop/Bottom/Left/Right`) are accepted.
pub fn page_config_from_json(json: &str) -> Result<PageConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_rule_list() {
        let rules = rules_from_json(
            r##"[
                {
                    "selector": { "kind": "paragraph" },
                    "props": { "fontSize": 11.0, "color": "#333333" }
                },
                {
                    "selector": { "class": "comment", "ancestor": "table" },
                    "props": { "fontStyle": "italic" }
                }
            ]"##,
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].props.font_size, Some(11.0));
        assert_eq!(rules[1].selector.class.as_deref(), Some("comment"));
    }

    #[test]
    fn parses_page_config_and_rejects_unknown_options() {
        let config = page_config_from_json(r#"{"pageWidth": 612.0, "marginTop": 36.0}"#).unwrap();
        assert_eq!(config.page_width, Some(612.0));
        assert_eq!(config.margin_top, Some(36.0));

        assert!(page_config_from_json(r#"{"orientation": "landscape"}"#).is_err());
    }
}
