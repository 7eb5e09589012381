//! DPI quantization into the sensor's 4-bit codebook.
//!
//! The sensor only knows twelve DPI steps (see [`SUPPORTED_DPIS`]). Arbitrary
//! requests are first snapped to a table entry, then mapped to the nibble the
//! firmware expects in the high half of DPI frame byte 3.

use crate::codebook::{DPI_CODES, SUPPORTED_DPIS};
use crate::error::{Error, Result};
use tracing::trace;

/// Initial running threshold for the nearest-match scan.
const INITIAL_DIFFERENCE: i64 = 4800;

/// Snap a requested DPI to a supported table entry.
///
/// Exact hits are returned unchanged. Otherwise the table is scanned in
/// ascending order and a candidate is accepted when
/// `difference >= |dpi - candidate|`, after which `difference` takes the
/// *signed* value `dpi - candidate`. Ties therefore resolve upward, and once a
/// candidate above `dpi` is accepted the negative threshold rejects everything
/// after it. Firmware-compatible output depends on this exact scan.
///
/// Returns `None` when no candidate passes the initial threshold
/// (requests above 9600 or below -4600).
pub fn nearest_supported(dpi: i64) -> Option<u32> {
    if let Some(&exact) = SUPPORTED_DPIS.iter().find(|&&s| s as i64 == dpi) {
        return Some(exact);
    }

    let mut difference = INITIAL_DIFFERENCE;
    let mut best_match = None;
    for &candidate in &SUPPORTED_DPIS {
        // Distances that do not fit an i64 are never within the threshold.
        let Some(signed) = dpi.checked_sub(candidate as i64) else {
            continue;
        };
        if signed.checked_abs().is_some_and(|distance| difference >= distance) {
            best_match = Some(candidate);
            difference = signed;
        }
    }

    trace!(requested = dpi, matched = ?best_match, "DPI nearest match");
    best_match
}

/// Map a supported DPI value to its 4-bit code.
pub fn encode(dpi: u32) -> Result<u8> {
    DPI_CODES
        .iter()
        .find(|(value, _)| *value == dpi)
        .map(|(_, code)| *code)
        .ok_or_else(|| Error::Encoding {
            field: "dpi",
            value: dpi.to_string(),
        })
}

/// Snap and encode in one step.
pub fn quantize(dpi: i64) -> Result<u8> {
    let matched = nearest_supported(dpi).ok_or(Error::OutOfRange {
        field: "dpi",
        value: dpi,
        min: SUPPORTED_DPIS[0] as i64,
        max: SUPPORTED_DPIS[SUPPORTED_DPIS.len() - 1] as i64,
    })?;
    encode(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values_are_fixed_points() {
        for dpi in SUPPORTED_DPIS {
            assert_eq!(nearest_supported(dpi as i64), Some(dpi));
        }
    }

    #[test]
    fn encode_documented_nibbles() {
        let expected = [
            (200, 0x1),
            (400, 0x2),
            (600, 0x3),
            (800, 0x4),
            (1000, 0x5),
            (1200, 0x6),
            (1600, 0x7),
            (2000, 0x9),
            (2400, 0xB),
            (3200, 0xD),
            (4000, 0xE),
            (4800, 0xF),
        ];
        for (dpi, code) in expected {
            assert_eq!(encode(dpi).unwrap(), code, "dpi {dpi}");
        }
    }

    #[test]
    fn nearest_match_pinned_outputs() {
        // Outputs of the signed running-difference scan.
        let cases: [(i64, Option<u32>); 14] = [
            (1300, Some(1200)),
            (1400, Some(1600)), // tie resolves upward
            (1500, Some(1600)),
            (2200, Some(2400)), // tie
            (2800, Some(3200)), // tie
            (3500, Some(3200)),
            (4500, Some(4800)),
            (100, Some(200)),
            (0, Some(200)),
            (-4600, Some(200)),
            (5000, Some(4800)),
            (9600, Some(4800)),
            (9601, None),
            (-4601, None),
        ];
        for (input, expected) in cases {
            assert_eq!(nearest_supported(input), expected, "input {input}");
        }
    }

    #[test]
    fn extreme_requests_match_nothing() {
        assert_eq!(nearest_supported(i64::MIN), None);
        assert_eq!(nearest_supported(i64::MIN + 200), None);
        assert_eq!(nearest_supported(i64::MAX), None);
        assert!(matches!(
            quantize(i64::MIN),
            Err(Error::OutOfRange { field: "dpi", .. })
        ));
        assert!(quantize(i64::MAX).is_err());
    }

    #[test]
    fn encode_rejects_unlisted_value() {
        assert!(encode(1300).is_err());
        assert!(encode(0).is_err());
        assert!(encode(6400).is_err());
    }

    #[test]
    fn quantize_snaps_then_encodes() {
        assert_eq!(quantize(1300).unwrap(), 0x6);
        assert_eq!(quantize(1550).unwrap(), 0x7);
        assert_eq!(quantize(3900).unwrap(), 0xE);
    }

    #[test]
    fn quantize_rejects_unmatched() {
        assert!(matches!(
            quantize(20000),
            Err(Error::OutOfRange { field: "dpi", .. })
        ));
    }

    #[test]
    fn reserved_codes_never_emitted() {
        for dpi in (-5000..10000).step_by(50) {
            if let Ok(code) = quantize(dpi) {
                assert!(![0x8, 0xA, 0xC].contains(&code), "dpi {dpi} -> {code:X}");
            }
        }
    }
}
