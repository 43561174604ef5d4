//! RGBA colors with CSS-style parsing and alpha blending.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Composite this color over an opaque background, returning RGB bytes.
    pub fn over(self, background: Rgba) -> [u8; 3] {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        [
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        ]
    }
}

/// Error returned when a color string is not a supported CSS notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    input: String,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color {:?}: expected rgba(r, g, b, a), rgb(r, g, b), #rrggbb or #rrggbbaa",
            self.input
        )
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            input: s.to_string(),
        };
        let trimmed = s.trim().to_ascii_lowercase();

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        let (body, has_alpha) = if let Some(rest) = trimmed.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = trimmed.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(err());
        };
        let body = body.strip_suffix(')').ok_or_else(err)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();

        match (parts.as_slice(), has_alpha) {
            ([r, g, b], false) => Ok(Rgba::rgb(
                parse_channel(r).ok_or_else(err)?,
                parse_channel(g).ok_or_else(err)?,
                parse_channel(b).ok_or_else(err)?,
            )),
            ([r, g, b, a], true) => Ok(Rgba::rgba(
                parse_channel(r).ok_or_else(err)?,
                parse_channel(g).ok_or_else(err)?,
                parse_channel(b).ok_or_else(err)?,
                parse_alpha(a).ok_or_else(err)?,
            )),
            _ => Err(err()),
        }
    }
}

fn parse_channel(s: &str) -> Option<u8> {
    let value: f64 = s.parse().ok()?;
    (0.0..=255.0)
        .contains(&value)
        .then(|| value.round() as u8)
}

fn parse_alpha(s: &str) -> Option<f32> {
    let value: f32 = s.parse().ok()?;
    (0.0..=1.0).contains(&value).then_some(value)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let a = if hex.len() == 8 {
        byte(6)? as f32 / 255.0
    } else {
        1.0
    };
    Some(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, a))
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_notations() {
        assert_eq!(
            "rgba(102, 126, 234, 0.8)".parse::<Rgba>(),
            Ok(Rgba::rgba(102, 126, 234, 0.8))
        );
        assert_eq!("rgb(0,0,0)".parse::<Rgba>(), Ok(Rgba::rgb(0, 0, 0)));
        assert_eq!("#0B0D17".parse::<Rgba>(), Ok(Rgba::rgb(11, 13, 23)));
        assert_eq!("#ffffff00".parse::<Rgba>(), Ok(Rgba::rgba(255, 255, 255, 0.0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Rgba>().is_err());
        assert!("blue".parse::<Rgba>().is_err());
        assert!("rgb(1, 2)".parse::<Rgba>().is_err());
        assert!("rgba(1, 2, 3)".parse::<Rgba>().is_err());
        assert!("rgb(256, 0, 0)".parse::<Rgba>().is_err());
        assert!("rgba(0, 0, 0, 1.5)".parse::<Rgba>().is_err());
        assert!("#12345".parse::<Rgba>().is_err());

        let err = "nope".parse::<Rgba>().unwrap_err();
        assert!(err.to_string().contains("\"nope\""));
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        let color = Rgba::rgba(0, 0, 0, 0.05);
        assert_eq!(color.to_string().parse::<Rgba>(), Ok(color));
        assert_eq!(Rgba::rgb(245, 245, 247).to_string(), "#f5f5f7");
    }

    #[test]
    fn test_over_blends_alpha() {
        let black = Rgba::rgb(0, 0, 0);
        let white = Rgba::rgb(255, 255, 255);
        assert_eq!(white.over(black), [255, 255, 255]);
        assert_eq!(Rgba::rgba(255, 255, 255, 0.0).over(black), [0, 0, 0]);
        assert_eq!(Rgba::rgba(255, 255, 255, 0.5).over(black), [128, 128, 128]);
        assert_eq!(Rgba::rgba(0, 0, 0, 0.2).over(white), [204, 204, 204]);
    }
}
