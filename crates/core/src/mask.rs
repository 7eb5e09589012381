//! Bit-packed multi-profile state.
//!
//! Two single-byte masks travel inside frames:
//!   - profile enablement (bits 0..5, one per hardware profile)
//!   - cyclic color participation (bits 0..6, in [`CyclicColor::ALL`] order)

use crate::codebook::PROFILE_COUNT;
use serde::{Deserialize, Serialize};

/// Enablement of the six hardware profiles. Default: all enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStates([bool; PROFILE_COUNT]);

impl Default for ProfileStates {
    fn default() -> Self {
        Self([true; PROFILE_COUNT])
    }
}

impl ProfileStates {
    pub fn new(states: [bool; PROFILE_COUNT]) -> Self {
        Self(states)
    }

    /// Whether profile `index` (0-based) is enabled.
    pub fn is_enabled(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn set(&mut self, index: usize, enabled: bool) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = enabled;
        }
    }

    /// Bit i set iff profile i is enabled; bits 6-7 stay clear.
    pub fn encode(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, enabled)| **enabled)
            .fold(0u8, |mask, (i, _)| mask | (1 << i))
    }

    /// Inverse of [`encode`](Self::encode); bits 6-7 are ignored.
    pub fn decode(mask: u8) -> Self {
        let mut states = [false; PROFILE_COUNT];
        for (i, state) in states.iter_mut().enumerate() {
            *state = mask & (1 << i) != 0;
        }
        Self(states)
    }

    pub fn as_array(&self) -> [bool; PROFILE_COUNT] {
        self.0
    }
}

/// Colors the firmware rotates through in cyclic lighting mode.
///
/// Declaration order is the wire bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CyclicColor {
    Yellow,
    Blue,
    Violet,
    Green,
    Red,
    Cyan,
    White,
}

impl CyclicColor {
    /// All colors, in wire bit order.
    pub const ALL: [CyclicColor; 7] = [
        CyclicColor::Yellow,
        CyclicColor::Blue,
        CyclicColor::Violet,
        CyclicColor::Green,
        CyclicColor::Red,
        CyclicColor::Cyan,
        CyclicColor::White,
    ];

    /// Bit position inside the cyclic color mask.
    pub fn bit(self) -> u8 {
        self as u8
    }

    /// Lower-cased name, as used for descriptor keys.
    pub fn key(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Green => "green",
            Self::Red => "red",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.key().eq_ignore_ascii_case(name.trim()))
    }
}

/// Participation of each [`CyclicColor`] in the rotation. Default: all on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclicColors([bool; 7]);

impl Default for CyclicColors {
    fn default() -> Self {
        Self([true; 7])
    }
}

impl CyclicColors {
    pub fn none() -> Self {
        Self([false; 7])
    }

    pub fn contains(&self, color: CyclicColor) -> bool {
        self.0[color.bit() as usize]
    }

    pub fn set(&mut self, color: CyclicColor, enabled: bool) {
        self.0[color.bit() as usize] = enabled;
    }

    /// Bit i set iff `CyclicColor::ALL[i]` participates; bit 7 stays clear.
    pub fn encode(&self) -> u8 {
        CyclicColor::ALL
            .into_iter()
            .filter(|&color| self.contains(color))
            .fold(0u8, |mask, color| mask | (1 << color.bit()))
    }

    /// Inverse of [`encode`](Self::encode); bit 7 is ignored.
    pub fn decode(mask: u8) -> Self {
        let mut colors = Self::none();
        for color in CyclicColor::ALL {
            colors.set(color, mask & (1 << color.bit()) != 0);
        }
        colors
    }

    /// Participating colors in wire order.
    pub fn enabled(&self) -> Vec<CyclicColor> {
        CyclicColor::ALL
            .into_iter()
            .filter(|&color| self.contains(color))
            .collect()
    }
}
