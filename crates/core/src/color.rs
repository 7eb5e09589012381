//! 8-bit RGB → 4-bit-per-channel color quantization.
//!
//! The firmware stores each channel as an inverted 4-bit intensity: 0 is full
//! brightness, 15 is off.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Parses the descriptor notation `rgb(R,G,B)`. Whitespace around components
/// is tolerated; each component must fit in a byte.
impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || Error::Encoding {
            field: "color",
            value: s.to_string(),
        };

        let inner = s
            .trim()
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(malformed());
        }

        let channel = |part: &str| part.parse::<u8>().map_err(|_| malformed());
        Ok(Rgb::new(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
        ))
    }
}

/// Encode one channel: `(255 - byte) / 16`, truncating. Always 0..=15.
pub fn encode_channel(byte: u8) -> u8 {
    (255 - byte) / 16
}
