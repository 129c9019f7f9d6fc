//! Image key to icon glyph lookup.

/// Glyph used for unknown image keys.
pub const DEFAULT_ICON: &str = "\u{1f4f1}";

/// Map a product image key to the glyph shown in its place.
pub fn image_icon(key: &str) -> &'static str {
    match key {
        "gaming" => "\u{1f3ae}",
        "family" => "\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f467}\u{200d}\u{1f466}",
        "business" => "\u{1f4bc}",
        "student" => "\u{1f393}",
        "travel" => "\u{2708}\u{fe0f}",
        "business-travel" => "\u{1f30d}",
        "sim-kit" => "\u{1f4f1}",
        "sim-replacement" => "\u{1f504}",
        _ => DEFAULT_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(image_icon("business"), "\u{1f4bc}");
        assert_eq!(image_icon("sim-replacement"), "\u{1f504}");
    }

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(image_icon("hologram"), DEFAULT_ICON);
        assert_eq!(image_icon(""), DEFAULT_ICON);
    }
}
