//! Safety layer: validates frame parameters against the ranges the firmware
//! is known to accept before anything is sent to the device.
//!
//! # X9 bounds
//!
//! ## Profiles
//! - **DPI frames** address profiles 0..=5. The profile nibble is `p + 7`.
//! - **Color frames** address profiles 1..=6. The profile slot is `(p - 1) * 2`
//!   in the high nibble of byte 2.
//! - **Active profile** is 1..=6 and rides in DPI frame byte 2 as `0x3F + p`.
//!
//! ## Lighting duration
//! - The vendor tool offers speeds 1..=10.
//! - Larger values are not rejected: `0x86 - d` / `0x96 - d` is emitted as-is
//!   as long as it still fits in a byte, and a warning is logged.
//!
//! ## Opcodes
//! Only the four documented opcodes may be framed; anything else is refused
//! before reaching the device.

use crate::codebook::{opcodes, PROFILE_COUNT};
use crate::error::{Error, Result};
use tracing::warn;

/// Opcodes the builder is allowed to emit.
const ALLOWED_OPCODES: &[u8] = &[
    opcodes::DPI,
    opcodes::SCROLLWHEEL,
    opcodes::RGB_LIGHTING,
    opcodes::COLOR_PROFILE,
];

/// Documented lighting speed range.
pub const DURATION_MIN: i64 = 1;
pub const DURATION_MAX: i64 = 10;

/// Validate that an opcode is one the firmware documents.
pub fn validate_opcode(opcode: u8) -> Result<()> {
    if ALLOWED_OPCODES.contains(&opcode) {
        Ok(())
    } else {
        Err(Error::Encoding {
            field: "opcode",
            value: format!("0x{opcode:02X}"),
        })
    }
}

/// Validate a 0-based profile index used by DPI frames.
pub fn validate_dpi_profile(index: usize) -> Result<u8> {
    if index >= PROFILE_COUNT {
        return Err(Error::OutOfRange {
            field: "dpi_profile",
            value: index as i64,
            min: 0,
            max: (PROFILE_COUNT - 1) as i64,
        });
    }
    Ok(index as u8)
}

/// Validate a 1-based profile number (color frames, active profile).
pub fn validate_profile_number(field: &'static str, number: i64) -> Result<u8> {
    if !(1..=PROFILE_COUNT as i64).contains(&number) {
        return Err(Error::OutOfRange {
            field,
            value: number,
            min: 1,
            max: PROFILE_COUNT as i64,
        });
    }
    Ok(number as u8)
}

/// Compute `base - duration` as a scheme byte.
///
/// Fails only when the result is not a byte; values outside the documented
/// speed range are passed through with a warning.
pub fn checked_scheme_byte(base: u8, duration: i64) -> Result<u8> {
    if !(DURATION_MIN..=DURATION_MAX).contains(&duration) {
        warn!(
            duration,
            min = DURATION_MIN,
            max = DURATION_MAX,
            "Lighting duration outside documented range; emitting unclamped"
        );
    }

    let out_of_range = || Error::OutOfRange {
        field: "lighting_duration",
        value: duration,
        min: base as i64 - u8::MAX as i64,
        max: base as i64,
    };
    let value = (base as i64).checked_sub(duration).ok_or_else(out_of_range)?;
    u8::try_from(value).map_err(|_| out_of_range())
}
