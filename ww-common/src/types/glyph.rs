use embedded_graphics::pixelcolor::Rgb888;

use super::color::*;

/// Two-character picture of a forecast icon and the color it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub text: &'static str,
    pub color: Rgb888,
}

impl Glyph {
    pub const fn new(text: &'static str, color: Rgb888) -> Self {
        Self { text, color }
    }
}

/// Map an icon code (first two characters of the symbol variant) to a glyph.
pub fn glyph_for(icon: &str) -> Option<Glyph> {
    let glyph = match icon {
        "01" => Glyph::new("++", ORANGE),
        "02" => Glyph::new("--", YELLOW),
        "03" => Glyph::new("==", LIGHT_GRAY),
        "04" => Glyph::new("%%", GRAY),
        "09" => Glyph::new("''", LIGHT_BLUE),
        "10" => Glyph::new("::", BLUE),
        "11" => Glyph::new("//", DARK_BLUE),
        "13" => Glyph::new("**", ALICE_BLUE),
        "50" => Glyph::new("..", WHITE_SMOKE),
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(glyph_for("01"), Some(Glyph::new("++", ORANGE)));
        assert_eq!(glyph_for("11"), Some(Glyph::new("//", DARK_BLUE)));
        assert_eq!(glyph_for("50"), Some(Glyph::new("..", WHITE_SMOKE)));
    }

    #[test]
    fn test_lookup_is_stable() {
        assert_eq!(glyph_for("01"), glyph_for("01"));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(glyph_for("07"), None);
        assert_eq!(glyph_for(""), None);
    }
}
