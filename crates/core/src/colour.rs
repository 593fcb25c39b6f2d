// SPDX-License-Identifier: MIT

//!
//! Parse, convert, and manipulate the colours used when drawing a scene
//!

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can arise when parsing a [`Colour`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColourError {
    #[error("Hex colour `{0}` must have 6 digits (optionally with a leading `#` or an alpha pair)")]
    InvalidLength(String),

    #[error("Hex colour `{0}` contains non-hex digits")]
    InvalidDigits(String),
}

/// The `Colour` type.
///
/// (De)serialises as a CSS hex string (e.g. `"#ab66ef"`) because that is what
/// callers in the browser send.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::from_rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::from_rgb(255, 255, 255);
    pub const RED: Colour = Colour::from_rgb(255, 0, 0);

    /// Create a colour from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Colour { r, g, b }
    }

    /// Create a colour from a hex colour (e.g. `#ab66ef`, `ab66ef`, `#ab66efff`).
    /// If the hex value has an alpha component, it is removed.
    pub fn from_hex<S: AsRef<str>>(hex_colour: S) -> Result<Self, ColourError> {
        let original = hex_colour.as_ref().trim();
        if !original.is_ascii() {
            return Err(ColourError::InvalidDigits(original.to_string()));
        }

        // Drop the alpha pair
        let len = original.len();
        let hex_colour = if len == 8 || len == 9 {
            &original[0..(len - 2)]
        } else {
            original
        };

        // Check the hex length
        let len = hex_colour.len();
        let has_hash = hex_colour.starts_with('#');
        if !((len == 6 && !has_hash) || (len == 7 && has_hash)) {
            return Err(ColourError::InvalidLength(original.to_string()));
        }
        if !hex_colour
            .trim_start_matches('#')
            .chars()
            .all(|c| c.is_ascii_hexdigit())
        {
            return Err(ColourError::InvalidDigits(original.to_string()));
        }

        // Work backwards so that it's independent of a leading "#"
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex_colour[range], 16)
                .map_err(|_| ColourError::InvalidDigits(original.to_string()))
        };
        let r = component((len - 6)..(len - 4))?;
        let g = component((len - 4)..(len - 2))?;
        let b = component((len - 2)..len)?;
        Ok(Colour::from_rgb(r, g, b))
    }

    /// Get a colour as RGB values
    pub fn as_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// To get RGB as, say, #0affc3 (for CSS)
    pub fn to_hex(&self) -> String {
        // {:02x} means print as hex, requesting 2 chars (pad left with "0" if only 1 char otherwise)
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Get a lighter shade of the specified colour
    pub fn lightened_colour(colour: Colour) -> Colour {
        let old_r: f64 = colour.r.into();
        let old_g: f64 = colour.g.into();
        let old_b: f64 = colour.b.into();
        let new_r: f64 = (old_r + (0.5 * (255.0 - old_r))).round();
        let new_g: f64 = (old_g + (0.5 * (255.0 - old_g))).round();
        let new_b: f64 = (old_b + (0.5 * (255.0 - old_b))).round();
        Colour::from_rgb(new_r as u8, new_g as u8, new_b as u8)
    }
}

impl From<Colour> for [u8; 3] {
    fn from(value: Colour) -> Self {
        [value.r, value.g, value.b]
    }
}

impl From<[u8; 3]> for Colour {
    fn from(value: [u8; 3]) -> Self {
        Colour::from_rgb(value[0], value[1], value[2])
    }
}

impl From<Colour> for String {
    fn from(value: Colour) -> Self {
        value.to_hex()
    }
}

impl TryFrom<String> for Colour {
    type Error = ColourError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Colour::from_hex(value)
    }
}
