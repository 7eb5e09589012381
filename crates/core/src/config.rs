//! Settings descriptor (`driver.conf`) parsing.
//!
//! The descriptor is an INI document:
//!
//! ```ini
//! [Active_Profile]
//! profile = 3
//!
//! [Profile_DPIs]
//! profile_1 = 1600
//!
//! [Profile_States]
//! profile_2 = 0
//!
//! [Profile_Colors]
//! profile_1 = rgb(0,0,0)
//!
//! [Color_Scheme]
//! type = Cyclic
//! duration = 2
//!
//! [Cyclic_Colors]
//! white = 0
//! ```
//!
//! Section and key names are case-insensitive. Missing keys take their
//! default. A malformed value, or a missing section, is reported as a
//! [`Error::ConfigSection`] warning and the whole section falls back to its
//! defaults; other sections are unaffected.

use crate::codebook::PROFILE_COUNT;
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::lighting::{LightingMode, LightingScheme};
use crate::mask::{CyclicColor, CyclicColors, ProfileStates};
use crate::safety;
use configparser::ini::Ini;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Default descriptor path used by the CLI.
pub const DEFAULT_CONFIG_PATH: &str = "driver.conf";

/// Descriptor section names.
pub mod sections {
    pub const ACTIVE_PROFILE: &str = "Active_Profile";
    pub const PROFILE_DPIS: &str = "Profile_DPIs";
    pub const PROFILE_STATES: &str = "Profile_States";
    pub const PROFILE_COLORS: &str = "Profile_Colors";
    pub const COLOR_SCHEME: &str = "Color_Scheme";
    pub const CYCLIC_COLORS: &str = "Cyclic_Colors";
}

/// Per-profile default DPI.
pub const DEFAULT_DPI: i64 = 1200;
/// Default active profile (1-based).
pub const DEFAULT_ACTIVE_PROFILE: u8 = 1;

type Section = HashMap<String, Option<String>>;

/// A fully typed device configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceConfig {
    /// Active profile, 1..=6.
    pub active_profile: u8,
    /// Requested DPI per profile (0-based index). Quantized at frame build time.
    pub dpis: [i64; PROFILE_COUNT],
    pub states: ProfileStates,
    pub colors: [Rgb; PROFILE_COUNT],
    pub scheme: LightingScheme,
    pub cyclic_colors: CyclicColors,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            active_profile: DEFAULT_ACTIVE_PROFILE,
            dpis: [DEFAULT_DPI; PROFILE_COUNT],
            states: ProfileStates::default(),
            colors: [Rgb::WHITE; PROFILE_COUNT],
            scheme: LightingScheme::default(),
            cyclic_colors: CyclicColors::default(),
        }
    }
}

/// Parse outcome: the configuration plus recovered section errors.
#[derive(Debug)]
pub struct ParsedConfig {
    pub config: DeviceConfig,
    /// One [`Error::ConfigSection`] per section that fell back to defaults.
    pub warnings: Vec<Error>,
}

/// Read and parse a descriptor file.
pub fn load_config(path: &Path) -> Result<ParsedConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    debug!(path = %path.display(), "Loaded settings descriptor");
    parse_config(&text)
}

/// Parse descriptor text.
///
/// Fails only if the text is not INI at all; every section-level problem is
/// recovered and reported in [`ParsedConfig::warnings`].
pub fn parse_config(text: &str) -> Result<ParsedConfig> {
    let mut ini = Ini::new();
    ini.read(text.to_string())
        .map_err(|e| Error::Config(format!("INI parse error: {e}")))?;

    let defaults = DeviceConfig::default();
    let mut warnings = Vec::new();

    let active_profile = read_section(
        &ini,
        sections::ACTIVE_PROFILE,
        defaults.active_profile,
        parse_active_profile,
        &mut warnings,
    );
    let dpis = read_section(
        &ini,
        sections::PROFILE_DPIS,
        defaults.dpis,
        parse_dpis,
        &mut warnings,
    );
    let states = read_section(
        &ini,
        sections::PROFILE_STATES,
        defaults.states,
        parse_states,
        &mut warnings,
    );
    let colors = read_section(
        &ini,
        sections::PROFILE_COLORS,
        defaults.colors,
        parse_colors,
        &mut warnings,
    );
    let scheme = read_section(
        &ini,
        sections::COLOR_SCHEME,
        defaults.scheme,
        parse_scheme,
        &mut warnings,
    );
    let cyclic_colors = read_section(
        &ini,
        sections::CYCLIC_COLORS,
        defaults.cyclic_colors,
        parse_cyclic_colors,
        &mut warnings,
    );

    Ok(ParsedConfig {
        config: DeviceConfig {
            active_profile,
            dpis,
            states,
            colors,
            scheme,
            cyclic_colors,
        },
        warnings,
    })
}

/// Parse one section, substituting `default` and recording a warning on error.
fn read_section<T>(
    ini: &Ini,
    name: &'static str,
    default: T,
    parse: fn(&Section, T) -> std::result::Result<T, String>,
    warnings: &mut Vec<Error>,
) -> T
where
    T: Copy,
{
    let Some(section) = ini.get_map_ref().get(&name.to_lowercase()) else {
        warn!(section = name, "Section missing; using defaults");
        warnings.push(Error::ConfigSection {
            section: name,
            reason: "section missing".to_string(),
        });
        return default;
    };

    match parse(section, default) {
        Ok(value) => value,
        Err(reason) => {
            warn!(section = name, %reason, "Malformed section; using defaults");
            warnings.push(Error::ConfigSection {
                section: name,
                reason,
            });
            default
        }
    }
}

/// Look up a key. `Ok(None)` if absent; error if present without a value.
fn value<'a>(section: &'a Section, key: &str) -> std::result::Result<Option<&'a str>, String> {
    match section.get(key) {
        None => Ok(None),
        Some(Some(v)) => Ok(Some(v.trim())),
        Some(None) => Err(format!("{key}: missing value")),
    }
}

fn profile_key(index: usize) -> String {
    format!("profile_{}", index + 1)
}

fn parse_int(key: &str, raw: &str) -> std::result::Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("{key}: expected integer, got '{raw}'"))
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
fn parse_flag(key: &str, raw: &str) -> std::result::Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("{key}: expected boolean, got '{raw}'")),
    }
}

fn parse_active_profile(section: &Section, default: u8) -> std::result::Result<u8, String> {
    match value(section, "profile")? {
        None => Ok(default),
        Some(raw) => {
            let number = parse_int("profile", raw)?;
            safety::validate_profile_number("active_profile", number).map_err(|e| e.to_string())
        }
    }
}

fn parse_dpis(
    section: &Section,
    mut dpis: [i64; PROFILE_COUNT],
) -> std::result::Result<[i64; PROFILE_COUNT], String> {
    for (i, dpi) in dpis.iter_mut().enumerate() {
        let key = profile_key(i);
        if let Some(raw) = value(section, &key)? {
            *dpi = parse_int(&key, raw)?;
        }
    }
    Ok(dpis)
}

fn parse_states(
    section: &Section,
    mut states: ProfileStates,
) -> std::result::Result<ProfileStates, String> {
    for i in 0..PROFILE_COUNT {
        let key = profile_key(i);
        if let Some(raw) = value(section, &key)? {
            states.set(i, parse_flag(&key, raw)?);
        }
    }
    Ok(states)
}

fn parse_colors(
    section: &Section,
    mut colors: [Rgb; PROFILE_COUNT],
) -> std::result::Result<[Rgb; PROFILE_COUNT], String> {
    for (i, color) in colors.iter_mut().enumerate() {
        let key = profile_key(i);
        if let Some(raw) = value(section, &key)? {
            *color = raw
                .parse::<Rgb>()
                .map_err(|_| format!("{key}: expected rgb(R,G,B), got '{raw}'"))?;
        }
    }
    Ok(colors)
}

fn parse_scheme(
    section: &Section,
    mut scheme: LightingScheme,
) -> std::result::Result<LightingScheme, String> {
    if let Some(raw) = value(section, "type")? {
        scheme.mode = raw
            .parse::<LightingMode>()
            .map_err(|_| format!("type: unknown lighting mode '{raw}'"))?;
    }
    if let Some(raw) = value(section, "duration")? {
        scheme.duration = parse_int("duration", raw)?;
    }
    Ok(scheme)
}

fn parse_cyclic_colors(
    section: &Section,
    mut colors: CyclicColors,
) -> std::result::Result<CyclicColors, String> {
    for color in CyclicColor::ALL {
        if let Some(raw) = value(section, color.key())? {
            colors.set(color, parse_flag(color.key(), raw)?);
        }
    }
    Ok(colors)
}
