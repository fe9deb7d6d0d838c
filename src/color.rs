//! Hex color strings and their normalized RGBA decoding.
//!
//! A [`Color`] stores exactly the string the user set, so round-trips through
//! the codec return it unchanged. Decoding accepts 6-digit hex with an
//! optional `#` and the 3-digit shorthand (each nibble doubled),
//! case-insensitive. Anything else decodes to opaque white — the fallback is
//! observable through [`Color::try_rgba`], which returns `None` exactly when
//! the fallback would fire.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_COLOR;

/// Normalized color channels, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Opaque white, the fallback for undecodable color strings.
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// The channels as a flat `[r, g, b, a]` array.
    #[must_use]
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A color as the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw string, exactly as set.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode to normalized RGBA, falling back to opaque white when the
    /// string is not valid hex.
    #[must_use]
    pub fn rgba(&self) -> Rgba {
        self.try_rgba().unwrap_or(Rgba::WHITE)
    }

    /// Decode to normalized RGBA, or `None` when the string is not valid hex
    /// (the case [`Color::rgba`] papers over with white).
    #[must_use]
    pub fn try_rgba(&self) -> Option<Rgba> {
        decode_hex(&self.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_owned())
    }
}

impl From<&str> for Color {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

fn decode_hex(raw: &str) -> Option<Rgba> {
    let hex = raw.strip_prefix('#').unwrap_or(raw);

    // Expand shorthand ("03F" -> "0033FF") by doubling each nibble.
    let expanded: String;
    let hex = if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        expanded = hex.chars().flat_map(|c| [c, c]).collect();
        &expanded
    } else {
        hex
    };

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let mut channels = [0.0; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let Ok(byte) = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16) else {
            return None;
        };
        *channel = f64::from(byte) / 255.0;
    }

    Some(Rgba {
        r: channels[0],
        g: channels[1],
        b: channels[2],
        a: 1.0,
    })
}
