/// Converts a layout-space y coordinate (top-left origin, y down) to the
/// PDF coordinate system (bottom-left origin, y up).
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_is_symmetric() {
        let page_height = 842.0;
        assert_eq!(flip_y(0.0, page_height), 842.0);
        assert_eq!(flip_y(842.0, page_height), 0.0);
        assert_eq!(flip_y(flip_y(123.4, page_height), page_height), 123.4);
    }

    #[test]
    fn top_margin_maps_below_page_top() {
        // A box 72pt from the top of an A4 page sits at 769.89 in PDF space.
        assert!((flip_y(72.0, 841.89) - 769.89).abs() < 0.001);
    }
}
