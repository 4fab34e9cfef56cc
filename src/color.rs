use std::fmt;

use crate::error::ColorParseError;

/// Number of hex digits in a color literal. Matching and patching both work
/// on spans of exactly this width, which is what keeps stored offsets valid
/// across patches.
pub const HEX_DIGITS: usize = 6;

/// A solid fill color as three 8-bit channels. No alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-digit hex literal, case-insensitive, with or without a
    /// leading `#`.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != HEX_DIGITS {
            return Err(ColorParseError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(digits.to_string()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::InvalidDigit(digits.to_string()))?;
        Ok(Self::from_u32(value))
    }

    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Canonical encoding written into SVG text: uppercase, zero-padded,
    /// no `#`. Always exactly [`HEX_DIGITS`] ASCII bytes.
    pub fn to_hex(self) -> String {
        format!("{:06X}", self.to_u32())
    }

    /// Display form for labels and status messages, e.g. `#FF8800`.
    pub fn to_css(self) -> String {
        format!("#{}", self.to_hex())
    }

    /// Relative luminance in 0.0..=1.0, used to pick readable label colors
    /// on top of a swatch.
    pub fn luminance(self) -> f32 {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.to_u32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_any_case() {
        assert_eq!(Rgb::from_hex("ff0000"), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_hex("FF0000"), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_hex("Ff00aB"), Ok(Rgb::new(255, 0, 171)));
        assert_eq!(Rgb::from_hex("#00ff7f"), Ok(Rgb::new(0, 255, 127)));
        assert_eq!(Rgb::from_hex("  #336699  "), Ok(Rgb::new(51, 102, 153)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Rgb::from_hex("fff"), Err(ColorParseError::InvalidLength(3)));
        assert_eq!(
            Rgb::from_hex("ff00000"),
            Err(ColorParseError::InvalidLength(7))
        );
        assert_eq!(Rgb::from_hex(""), Err(ColorParseError::InvalidLength(0)));
        assert_eq!(
            Rgb::from_hex("gg0000"),
            Err(ColorParseError::InvalidDigit("gg0000".to_string()))
        );
        assert_eq!(
            Rgb::from_hex("#12345z"),
            Err(ColorParseError::InvalidDigit("12345z".to_string()))
        );
    }

    #[test]
    fn test_canonical_encoding_is_uppercase_padded() {
        assert_eq!(Rgb::new(255, 0, 0).to_hex(), "FF0000");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "000000");
        assert_eq!(Rgb::new(0, 2, 10).to_hex(), "00020A");
        assert_eq!(Rgb::new(171, 205, 239).to_hex(), "ABCDEF");
        assert_eq!(Rgb::new(0, 2, 10).to_hex().len(), HEX_DIGITS);
    }

    #[test]
    fn test_roundtrip_through_hex() {
        for value in [0x000000, 0x00020A, 0x123ABC, 0xFFFFFF, 0x00FF7F] {
            let color = Rgb::from_u32(value);
            assert_eq!(Rgb::from_hex(&color.to_hex()), Ok(color));
            assert_eq!(color.to_u32(), value);
        }
    }

    #[test]
    fn test_display_matches_css_form() {
        let color = Rgb::new(18, 52, 86);
        assert_eq!(color.to_string(), "#123456");
        assert_eq!(color.to_css(), "#123456");
    }

    #[test]
    fn test_luminance_ordering() {
        assert!(Rgb::new(255, 255, 255).luminance() > 0.99);
        assert!(Rgb::new(0, 0, 0).luminance() < 0.01);
        assert!(Rgb::new(0, 255, 0).luminance() > Rgb::new(0, 0, 255).luminance());
    }
}
