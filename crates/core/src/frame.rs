//! Control frame assembly.
//!
//! Every frame is exactly [`FRAME_LEN`] bytes:
//!
//! | Opcode | b2 | b3 | b4 | padding |
//! |---|---|---|---|---|
//! | 0x09 DPI | `0x3F + active` | `code << 4 \| (p + 7)` | state mask | 3 |
//! | 0x11 scroll | `0x01` volume / `0x00` | | | 5 |
//! | 0x13 RGB | cyclic mask | scheme byte | | 4 |
//! | 0x14 color | `(p-1)*2 << 4 \| enc(g)` | `enc(r) << 4 \| enc(b)` | state mask | 3 |

use crate::codebook::{opcodes, CHANNEL_SELECTOR, FRAME_LEN, HEADER_LEN};
use crate::color::{encode_channel, Rgb};
use crate::dpi;
use crate::error::{Error, Result};
use crate::lighting::{LightingScheme, ScrollwheelMode};
use crate::mask::{CyclicColors, ProfileStates};
use crate::safety;
use serde::Serialize;
use std::fmt;

/// Maximum number of data bytes after the header.
pub const MAX_DATA_LEN: usize = FRAME_LEN - HEADER_LEN;

/// A complete 8-byte control payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Build a frame from an opcode and its data bytes, zero-padding the rest.
    pub fn new(opcode: u8, data: &[u8]) -> Result<Self> {
        safety::validate_opcode(opcode)?;
        if data.len() > MAX_DATA_LEN {
            return Err(Error::Encoding {
                field: "frame_data",
                value: format!("{} bytes (maximum {})", data.len(), MAX_DATA_LEN),
            });
        }

        let mut buf = [0u8; FRAME_LEN];
        buf[0] = CHANNEL_SELECTOR;
        buf[1] = opcode;
        buf[HEADER_LEN..HEADER_LEN + data.len()].copy_from_slice(data);
        Ok(Self(buf))
    }

    /// Set DPI for 0-based `profile`, in the context of `active_profile` (1..=6).
    pub fn dpi(
        active_profile: u8,
        profile: usize,
        dpi_value: i64,
        states: &ProfileStates,
    ) -> Result<Self> {
        let active = safety::validate_profile_number("active_profile", active_profile as i64)?;
        let profile = safety::validate_dpi_profile(profile)?;
        let code = dpi::quantize(dpi_value)?;

        Self::new(
            opcodes::DPI,
            &[0x3F + active, (code << 4) | (profile + 7), states.encode()],
        )
    }

    /// Set the scroll-wheel function.
    pub fn scrollwheel(mode: ScrollwheelMode) -> Result<Self> {
        Self::new(opcodes::SCROLLWHEEL, &[mode.as_byte()])
    }

    /// Set the lighting animation and cyclic color participation.
    pub fn rgb_lighting(colors: &CyclicColors, scheme: &LightingScheme) -> Result<Self> {
        Self::new(
            opcodes::RGB_LIGHTING,
            &[colors.encode(), scheme.scheme_byte()?],
        )
    }

    /// Set the color of 1-based `profile`.
    pub fn profile_color(profile: i64, color: Rgb, states: &ProfileStates) -> Result<Self> {
        let profile = safety::validate_profile_number("color_profile", profile)?;
        let slot = (profile - 1) * 2;

        Self::new(
            opcodes::COLOR_PROFILE,
            &[
                (slot << 4) | encode_channel(color.g),
                (encode_channel(color.r) << 4) | encode_channel(color.b),
                states.encode(),
            ],
        )
    }

    pub fn opcode(&self) -> u8 {
        self.0[1]
    }

    /// Data bytes after the header, padding included.
    pub fn data(&self) -> &[u8] {
        &self.0[HEADER_LEN..]
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Space-separated uppercase hex, e.g. `07 09 42 77 3F 00 00 00`.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}
