//! Annotation colors.
//!
//! Colors arrive from the edit form as CSS strings (`#ffffff` from a color
//! input, occasionally `rgb(...)` from a host). They are parsed once into
//! RGBA floats and serialized back as the shortest hex form.

use crate::error::EditorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use winnow::ascii::space0;
use winnow::combinator::alt;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                let a = match bytes.get(3) {
                    Some(&c) => hex_val(c)?,
                    None => 15,
                };
                Some(Self::from_rgba8(r * 17, g * 17, b * 17, a * 17))
            }
            6 | 8 => {
                let pair = |i: usize| -> Option<u8> {
                    Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?)
                };
                let a = if bytes.len() == 8 { pair(6)? } else { 255 };
                Some(Self::from_rgba8(pair(0)?, pair(2)?, pair(4)?, a))
            }
            _ => None,
        }
    }

    /// 8-bit channels, rounded.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Emit as shortest valid hex string (`#RRGGBB` when opaque).
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_color(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────

/// Parse a CSS color: hex notation or `rgb()` / `rgba()`.
pub fn parse_color(input: &str) -> Result<Color, EditorError> {
    let mut rest = input.trim();
    let color = alt((parse_hex_color, parse_rgb_function))
        .parse_next(&mut rest)
        .map_err(|_| EditorError::InvalidColor(input.to_string()))?;
    if !rest.is_empty() {
        return Err(EditorError::InvalidColor(input.to_string()));
    }
    Ok(color)
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

fn skip_space(input: &mut &str) {
    let _: ModalResult<&str> = space0.parse_next(input);
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Color> {
    let _ = '#'.parse_next(input)?;
    let hex_digits: &str = take_while(1..=8, |c: char| c.is_ascii_hexdigit()).parse_next(input)?;
    Color::from_hex(hex_digits).ok_or_else(backtrack)
}

fn parse_number(input: &mut &str) -> ModalResult<f32> {
    let digits: &str =
        take_while(1.., |c: char| c.is_ascii_digit() || c == '.').parse_next(input)?;
    digits.parse::<f32>().map_err(|_| backtrack())
}

fn parse_separator(input: &mut &str) -> ModalResult<()> {
    skip_space(input);
    let _ = ','.parse_next(input)?;
    skip_space(input);
    Ok(())
}

fn parse_rgb_function(input: &mut &str) -> ModalResult<Color> {
    let name = alt(("rgba", "rgb")).parse_next(input)?;
    skip_space(input);
    let _ = '('.parse_next(input)?;
    skip_space(input);

    let r = parse_number(input)?;
    parse_separator(input)?;
    let g = parse_number(input)?;
    parse_separator(input)?;
    let b = parse_number(input)?;
    let a = if name == "rgba" {
        parse_separator(input)?;
        parse_number(input)?.clamp(0.0, 1.0)
    } else {
        1.0
    };

    skip_space(input);
    let _ = ')'.parse_next(input)?;

    let channel = |v: f32| v.clamp(0.0, 255.0) / 255.0;
    Ok(Color::rgba(channel(r), channel(g), channel(b), a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_form_color_input() {
        let c = parse_color("#ffffff").unwrap();
        assert_eq!(c, Color::WHITE);
        assert_eq!(c.to_hex(), "#ffffff");
    }

    #[test]
    fn parses_short_and_alpha_hex() {
        assert_eq!(parse_color("#0f0").unwrap().to_rgba8(), [0, 255, 0, 255]);
        assert_eq!(
            parse_color("#ff000080").unwrap().to_rgba8(),
            [255, 0, 0, 128]
        );
        assert_eq!(parse_color("#ff000080").unwrap().to_hex(), "#ff000080");
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(
            parse_color("rgb(255, 128, 0)").unwrap().to_rgba8(),
            [255, 128, 0, 255]
        );
        assert_eq!(
            parse_color(" rgba(0,0,255,0.5) ").unwrap().to_rgba8(),
            [0, 0, 255, 128]
        );
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "white", "#12", "#gggggg", "rgb(1,2)", "#fff extra"] {
            assert!(
                matches!(parse_color(bad), Err(EditorError::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::from_rgba8(0, 255, 0, 255)).unwrap();
        assert_eq!(json, r##""#00ff00""##);
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_rgba8(), [0, 255, 0, 255]);
    }
}
