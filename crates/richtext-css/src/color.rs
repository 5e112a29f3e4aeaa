//! Color literal parsing.
//!
//! Two forms are understood: `#rrggbb` / `#rrggbbaa` hex literals and
//! functional `rgb(r, g, b)` / `rgba(r, g, b, a)` literals with 8-bit
//! integer channels. Alpha defaults to fully opaque in both forms.

use thiserror::Error;

/// Errors that can occur while parsing a color literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color literal: {0}")]
    InvalidColor(String),

    #[error("unrecognized color form: {0}")]
    UnrecognizedForm(String),
}

/// An RGBA color with normalized `f32` channels.
///
/// 8-bit input maps onto `0.0..=1.0`. The functional form does not clamp,
/// so `rgb(300, 0, 0)` yields a red channel above 1.0; out-of-range
/// channels are the consumer's to deal with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Convert to `[r, g, b, a]` for the host color system.
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Parse a color literal.
///
/// Text starting with `#` must be exactly `#rrggbb` or `#rrggbbaa` with
/// case-insensitive hex digits. Text starting with `rgb` must be a
/// parenthesized list of three or four comma-separated non-negative
/// integers; either spelling accepts the alpha group. Anything else is an
/// unrecognized form.
pub fn parse_color(value: &str) -> Result<Color, ColorError> {
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(value, hex);
    }
    if value.starts_with("rgb") {
        return parse_functional(value);
    }
    Err(ColorError::UnrecognizedForm(value.to_string()))
}

fn parse_hex(literal: &str, hex: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidColor(literal.to_string());
    if hex.len() != 6 && hex.len() != 8 {
        return Err(invalid());
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let byte = |range| u8::from_str_radix(&hex[range], 16).map_err(|_| invalid());
    let r = byte(0..2)?;
    let g = byte(2..4)?;
    let b = byte(4..6)?;
    let a = if hex.len() == 8 { byte(6..8)? } else { 255 };
    Ok(Color::from_rgba8(r, g, b, a))
}

fn parse_functional(literal: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidColor(literal.to_string());
    let args = literal
        .strip_prefix("rgba")
        .or_else(|| literal.strip_prefix("rgb"))
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .and_then(|rest| rest.trim_end().strip_suffix(')'))
        .ok_or_else(|| invalid())?;

    let parts: Vec<&str> = args.split(',').collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(invalid());
    }
    // Alpha slot stays at 255 when the literal has no alpha group.
    let mut channels = [255u32; 4];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part.trim().parse::<u32>().map_err(|_| invalid())?;
    }
    Ok(Color::new(
        channels[0] as f32 / 255.0,
        channels[1] as f32 / 255.0,
        channels[2] as f32 / 255.0,
        channels[3] as f32 / 255.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_without_alpha_is_opaque() {
        let c = parse_color("#ff0000").unwrap();
        assert_eq!(c, Color::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn hex_with_alpha() {
        let c = parse_color("#ff000080").unwrap();
        assert_eq!(c.a, 128.0 / 255.0);
    }

    #[test]
    fn hex_digits_are_case_insensitive() {
        assert_eq!(parse_color("#FF0000"), parse_color("#ff0000"));
        assert_eq!(parse_color("#aAbBcC"), parse_color("#aabbcc"));
    }

    #[test]
    fn hex_length_is_strict() {
        assert!(matches!(
            parse_color("#fff"),
            Err(ColorError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("#123456七"),
            Err(ColorError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("#1234567"),
            Err(ColorError::InvalidColor(_))
        ));
    }

    #[test]
    fn non_hex_digits_are_invalid() {
        assert!(matches!(
            parse_color("#xx0000"),
            Err(ColorError::InvalidColor(_))
        ));
    }

    #[test]
    fn functional_rgb_matches_rgba_with_opaque_alpha() {
        assert_eq!(
            parse_color("rgb(10, 20, 30)").unwrap(),
            parse_color("rgba(10, 20, 30, 255)").unwrap()
        );
    }

    #[test]
    fn functional_whitespace_is_flexible() {
        assert_eq!(
            parse_color("rgb( 10 ,20,  30 )").unwrap(),
            parse_color("rgb(10,20,30)").unwrap()
        );
    }

    #[test]
    fn functional_channels_pass_through_unclamped() {
        let c = parse_color("rgb(300, 0, 0)").unwrap();
        assert!(c.r > 1.0);
    }

    #[test]
    fn functional_rejects_bad_fields() {
        assert!(matches!(
            parse_color("rgb(10, 20)"),
            Err(ColorError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("rgb(10, 20, blue)"),
            Err(ColorError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("rgb(-1, 0, 0)"),
            Err(ColorError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_color("rgb 10, 20, 30"),
            Err(ColorError::InvalidColor(_))
        ));
    }

    #[test]
    fn other_forms_are_unrecognized() {
        assert!(matches!(
            parse_color("hsl(0, 100%, 50%)"),
            Err(ColorError::UnrecognizedForm(_))
        ));
        assert!(matches!(
            parse_color("red"),
            Err(ColorError::UnrecognizedForm(_))
        ));
    }

    #[test]
    fn to_array_round_trips_channels() {
        let c = Color::from_rgba8(255, 0, 0, 255);
        assert_eq!(c.to_array(), [1.0, 0.0, 0.0, 1.0]);
    }
}
