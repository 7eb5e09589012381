//! Lighting animation and scroll-wheel modes.

use crate::codebook::scheme;
use crate::error::{Error, Result};
use crate::safety;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB lighting animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingMode {
    /// Breathing on the profile color; speed from duration.
    Fixed,
    /// Rotation through the cyclic color set; speed from duration.
    Cyclic,
    /// Solid profile color.
    Static,
    Off,
}

impl LightingMode {
    pub const ALL: [LightingMode; 4] = [
        LightingMode::Fixed,
        LightingMode::Cyclic,
        LightingMode::Static,
        LightingMode::Off,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Cyclic => "Cyclic",
            Self::Static => "Static",
            Self::Off => "Off",
        }
    }

    /// Whether the duration takes part in the scheme byte.
    pub fn uses_duration(&self) -> bool {
        matches!(self, Self::Fixed | Self::Cyclic)
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LightingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Encoding {
                field: "lighting_mode",
                value: s.to_string(),
            })
    }
}

/// Lighting mode plus animation duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightingScheme {
    pub mode: LightingMode,
    pub duration: i64,
}

impl Default for LightingScheme {
    fn default() -> Self {
        Self {
            mode: LightingMode::Static,
            duration: 1,
        }
    }
}

impl LightingScheme {
    pub fn new(mode: LightingMode, duration: i64) -> Self {
        Self { mode, duration }
    }

    /// Scheme byte (RGB lighting frame byte 3).
    ///
    /// Fixed: `0x86 - duration`, Cyclic: `0x96 - duration`,
    /// Static: `0x86`, Off: `0x87`.
    pub fn scheme_byte(&self) -> Result<u8> {
        match self.mode {
            LightingMode::Fixed => safety::checked_scheme_byte(scheme::FIXED_BASE, self.duration),
            LightingMode::Cyclic => {
                safety::checked_scheme_byte(scheme::CYCLIC_BASE, self.duration)
            }
            LightingMode::Static => Ok(scheme::STATIC),
            LightingMode::Off => Ok(scheme::OFF),
        }
    }
}

/// Scroll-wheel function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollwheelMode {
    /// Wheel adjusts system volume.
    Volume,
    /// Regular scrolling.
    Scroll,
}

impl ScrollwheelMode {
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Volume => 0x01,
            Self::Scroll => 0x00,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Volume => "Volume",
            Self::Scroll => "Scroll",
        }
    }
}

impl fmt::Display for ScrollwheelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Only `Volume` is special; every other name selects plain scrolling.
impl FromStr for ScrollwheelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("volume") {
            Ok(Self::Volume)
        } else {
            Ok(Self::Scroll)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_bytes() {
        assert_eq!(
            LightingScheme::new(LightingMode::Fixed, 1).scheme_byte().unwrap(),
            0x85
        );
        assert_eq!(
            LightingScheme::new(LightingMode::Cyclic, 2).scheme_byte().unwrap(),
            0x94
        );
        assert_eq!(
            LightingScheme::new(LightingMode::Static, 1).scheme_byte().unwrap(),
            0x86
        );
        assert_eq!(
            LightingScheme::new(LightingMode::Off, 1).scheme_byte().unwrap(),
            0x87
        );
    }

    #[test]
    fn static_and_off_ignore_duration() {
        for duration in [-500, 0, 3, 1000] {
            assert_eq!(
                LightingScheme::new(LightingMode::Static, duration)
                    .scheme_byte()
                    .unwrap(),
                0x86
            );
            assert_eq!(
                LightingScheme::new(LightingMode::Off, duration)
                    .scheme_byte()
                    .unwrap(),
                0x87
            );
        }
    }

    #[test]
    fn unrepresentable_duration_fails() {
        assert!(LightingScheme::new(LightingMode::Fixed, 200)
            .scheme_byte()
            .is_err());
        assert!(LightingScheme::new(LightingMode::Cyclic, 0x97)
            .scheme_byte()
            .is_err());
    }

    #[test]
    fn parse_lighting_mode() {
        assert_eq!("Fixed".parse::<LightingMode>().unwrap(), LightingMode::Fixed);
        assert_eq!("cyclic".parse::<LightingMode>().unwrap(), LightingMode::Cyclic);
        assert_eq!(" OFF ".parse::<LightingMode>().unwrap(), LightingMode::Off);
        assert!("Rainbow".parse::<LightingMode>().is_err());
    }

    #[test]
    fn default_scheme_is_static_one() {
        let scheme = LightingScheme::default();
        assert_eq!(scheme.mode, LightingMode::Static);
        assert_eq!(scheme.duration, 1);
    }

    #[test]
    fn scrollwheel_mode_parsing() {
        assert_eq!("Volume".parse::<ScrollwheelMode>().unwrap(), ScrollwheelMode::Volume);
        assert_eq!("scroll".parse::<ScrollwheelMode>().unwrap(), ScrollwheelMode::Scroll);
        assert_eq!("anything".parse::<ScrollwheelMode>().unwrap(), ScrollwheelMode::Scroll);
        assert_eq!(ScrollwheelMode::Volume.as_byte(), 0x01);
        assert_eq!(ScrollwheelMode::Scroll.as_byte(), 0x00);
    }

    #[test]
    fn modes_display_their_names() {
        assert_eq!(ScrollwheelMode::Volume.to_string(), "Volume");
        assert_eq!(ScrollwheelMode::Scroll.to_string(), "Scroll");
        assert_eq!(LightingMode::Cyclic.to_string(), "Cyclic");
    }
}
