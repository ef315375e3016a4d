//! Color parsing and formatting for text-encoded colors.
//!
//! Accepted inputs: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` and
//! `rgba(r, g, b, a)`. Output is always the normalized `rgba(r, g, b, a)` form
//! with alpha rounded to three decimals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
    #[error("invalid functional color '{0}'")]
    InvalidFunction(String),
    #[error("unrecognized color format '{0}'")]
    Unrecognized(String),
}

/// 8-bit RGB with a float alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

#[inline]
fn round_alpha(a: f32) -> f32 {
    ((a * 1000.0).round() / 1000.0).clamp(0.0, 1.0)
}

#[inline]
fn channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse any supported textual color.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'));
        match args {
            Some(args) => {
                Self::parse_args(args).ok_or_else(|| ColorError::InvalidFunction(s.to_string()))
            }
            None => Err(ColorError::Unrecognized(s.to_string())),
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let digits: Vec<u8> = hex
            .bytes()
            .map(hex_digit)
            .collect::<Option<Vec<u8>>>()?;
        let bytes: Vec<u8> = match digits.len() {
            // Short forms expand each nibble: #abc -> #aabbcc
            3 | 4 => digits.iter().map(|d| d * 17).collect(),
            6 | 8 => digits.chunks(2).map(|p| p[0] * 16 + p[1]).collect(),
            _ => return None,
        };
        let a = bytes
            .get(3)
            .map(|b| round_alpha(*b as f32 / 255.0))
            .unwrap_or(1.0);
        Some(Self::new(bytes[0], bytes[1], bytes[2], a))
    }

    fn parse_args(args: &str) -> Option<Self> {
        let parts: Vec<f32> = args
            .split(',')
            .map(|p| p.trim().parse::<f32>().ok())
            .collect::<Option<Vec<f32>>>()?;
        if parts.iter().any(|p| !p.is_finite()) {
            return None;
        }
        match parts.as_slice() {
            [r, g, b] => Some(Self::rgb(channel(*r), channel(*g), channel(*b))),
            [r, g, b, a] => Some(Self::new(
                channel(*r),
                channel(*g),
                channel(*b),
                round_alpha(*a),
            )),
            _ => None,
        }
    }

    /// Blend two colors: RGB channels are rounded to the nearest integer and
    /// alpha to three decimals. `t` outside [0, 1] extrapolates and clamps.
    pub fn lerp(a: Rgba, b: Rgba, t: f32) -> Rgba {
        let mix = |x: u8, y: u8| channel(x as f32 + (y as f32 - x as f32) * t);
        Rgba {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: round_alpha(a.a + (b.a - a.a) * t),
        }
    }

    /// True when the string parses as a supported color.
    pub fn is_color(s: &str) -> bool {
        Self::parse(s).is_ok()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            round_alpha(self.a)
        )
    }
}

impl FromStr for Rgba {
    type Err = ColorError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_hex_lengths() {
        assert_eq!(Rgba::parse("#f00").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("#00ff00").unwrap(), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::parse("#0000FF80").unwrap(), Rgba::new(0, 0, 255, 0.502));
        assert_eq!(Rgba::parse("#0008").unwrap(), Rgba::new(0, 0, 0, 0.533));
    }

    #[test]
    fn parses_functional_forms() {
        assert_eq!(Rgba::parse("rgb(10, 20, 30)").unwrap(), Rgba::rgb(10, 20, 30));
        assert_eq!(
            Rgba::parse(" RGBA(1,2,3,0.25) ").unwrap(),
            Rgba::new(1, 2, 3, 0.25)
        );
        assert_eq!(Rgba::parse("rgb(300, -4, 7.6)").unwrap(), Rgba::rgb(255, 0, 8));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Rgba::parse(""), Err(ColorError::Empty));
        assert!(matches!(Rgba::parse("#12"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(Rgba::parse("#ggg"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(
            Rgba::parse("rgb(1, 2)"),
            Err(ColorError::InvalidFunction(_))
        ));
        assert!(matches!(Rgba::parse("red"), Err(ColorError::Unrecognized(_))));
    }

    #[test]
    fn formats_normalized_rgba() {
        assert_eq!(Rgba::rgb(255, 0, 0).to_string(), "rgba(255, 0, 0, 1)");
        assert_eq!(Rgba::new(0, 0, 0, 0.5).to_string(), "rgba(0, 0, 0, 0.5)");
        assert_eq!(Rgba::new(1, 2, 3, 0.12345).to_string(), "rgba(1, 2, 3, 0.123)");
    }

    #[test]
    fn lerp_rounds_channels_and_alpha() {
        let a = Rgba::new(0, 0, 0, 0.0);
        let b = Rgba::new(255, 100, 1, 1.0);
        assert_eq!(Rgba::lerp(a, b, 0.0), a);
        assert_eq!(Rgba::lerp(a, b, 1.0), b);
        let mid = Rgba::lerp(a, b, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (128, 50, 1));
        assert_eq!(mid.a, 0.5);
    }
}
