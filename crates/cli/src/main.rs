//! open-x9 CLI: command-line configuration tool for the X9 mouse.

use std::ffi::CString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use open_x9_core::apply::{self, ConfigSession};
use open_x9_core::color::Rgb;
use open_x9_core::comm::{self, DeviceStatus};
use open_x9_core::config::{self, DEFAULT_CONFIG_PATH};
use open_x9_core::device::{self, DeviceInfo};
use open_x9_core::error::Error;
use open_x9_core::frame::Frame;
use open_x9_core::lighting::{LightingMode, LightingScheme, ScrollwheelMode};
use open_x9_core::transport::ControlTransport;
use tracing::{debug, info};

/// Exclusively opened X9 control interface.
struct CliHidSession {
    info: DeviceInfo,
    device: hidapi::HidDevice,
}

impl CliHidSession {
    fn acquire() -> open_x9_core::error::Result<Self> {
        let info = device::find_device()?;
        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(format!("hidapi init: {e}")))?;
        let path = CString::new(info.path.clone())
            .map_err(|e| Error::Hid(format!("invalid device path {}: {e}", info.path)))?;
        let device = api
            .open_path(&path)
            .map_err(|e| comm::open_error(format!("open {}: {e}", info.path)))?;

        info!(path = %info.path, "Acquired X9 control interface");
        Ok(Self { info, device })
    }
}

impl ControlTransport for CliHidSession {
    fn write_control_payload(&self, frame: &Frame) -> open_x9_core::error::Result<()> {
        self.device
            .send_feature_report(frame.as_bytes())
            .map_err(|e| Error::Hid(format!("send_feature_report: {e}")))
    }
}

impl Drop for CliHidSession {
    fn drop(&mut self) {
        debug!(path = %self.info.path, "Released X9 control interface");
    }
}

/// Acquire the device or fail with the readiness hint.
fn open_ready_session() -> Result<CliHidSession> {
    let acquired = CliHidSession::acquire();
    let status = DeviceStatus::from_acquire(&acquired);
    match acquired {
        Ok(session) => Ok(session),
        Err(e) => {
            if let Some(hint) = status.hint() {
                eprintln!("{hint}");
            }
            Err(e).context("X9 is not ready")
        }
    }
}

#[derive(Parser)]
#[command(name = "open-x9", version, about = "Open-source X9 mouse configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the mouse and report whether it can be configured.
    Find,
    /// List connected X9 control interfaces.
    ListDevices,
    /// Set the DPI of one profile (snapped to the nearest supported step).
    SetDpi {
        /// Requested DPI.
        #[arg(allow_negative_numbers = true)]
        dpi: i64,
        /// Profile index (0-5).
        profile: usize,
    },
    /// Set the lighting mode.
    SetRgb {
        /// Fixed, Cyclic, Static or Off.
        mode: String,
        /// Animation speed (1-10) for Fixed and Cyclic.
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        speed: i64,
    },
    /// Set the color of one profile.
    SetColor {
        /// Profile number (1-6).
        profile: i64,
        r: u8,
        g: u8,
        b: u8,
    },
    /// Set the scroll-wheel function.
    SetScroll {
        /// Volume or Scroll.
        mode: String,
    },
    /// Apply a settings descriptor.
    Preset {
        /// Descriptor path.
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        conf: PathBuf,
        /// Print the frames instead of writing them.
        #[arg(long)]
        dry_run: bool,
        /// With --dry-run, print the configuration and frames as JSON.
        #[arg(long, requires = "dry_run")]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Find => {
            let session = open_ready_session()?;
            println!("Found {} at {}", session.info.name(), session.info.path);
            println!("Device ready.");
        }
        Commands::ListDevices => {
            let devices = device::discover_devices()?;
            if devices.is_empty() {
                println!("No X9 mice found.");
                println!("Ensure the receiver is plugged in and the udev rule is installed.");
            } else {
                for dev in &devices {
                    println!(
                        "{} (VID: 0x{:04X}, PID: 0x{:04X}, interface: {}, path: {})",
                        dev.name(),
                        dev.vid,
                        dev.pid,
                        dev.interface,
                        dev.path
                    );
                }
            }
        }
        Commands::SetDpi { dpi, profile } => {
            let session = open_ready_session()?;
            let frame = ConfigSession::new().set_dpi(&session, profile, dpi)?;
            println!("Profile {profile} DPI set ({frame})");
        }
        Commands::SetRgb { mode, speed } => {
            let mode: LightingMode = mode.parse()?;
            let scheme = LightingScheme::new(mode, speed);
            let session = open_ready_session()?;
            let frame = ConfigSession::new().set_lighting(&session, &scheme)?;
            println!("Lighting set to {mode} ({frame})");
        }
        Commands::SetColor { profile, r, g, b } => {
            let color = Rgb::new(r, g, b);
            let session = open_ready_session()?;
            let frame = ConfigSession::new().set_color(&session, profile, color)?;
            println!("Profile {profile} color set to {color} ({frame})");
        }
        Commands::SetScroll { mode } => {
            let mode: ScrollwheelMode = mode.parse()?;
            let session = open_ready_session()?;
            let frame = ConfigSession::new().set_scrollwheel(&session, mode)?;
            println!("Scroll wheel set to {mode} ({frame})");
        }
        Commands::Preset {
            conf,
            dry_run,
            json,
        } => run_preset(&conf, dry_run, json)?,
    }

    Ok(())
}

fn run_preset(conf: &std::path::Path, dry_run: bool, json: bool) -> Result<()> {
    let parsed = config::load_config(conf)?;
    for warning in &parsed.warnings {
        eprintln!("warning: {warning}; using defaults");
    }

    if dry_run {
        let frames = apply::plan(&parsed.config);
        if json {
            let hex: Vec<String> = frames.iter().map(Frame::to_string).collect();
            let out = serde_json::json!({
                "config": parsed.config,
                "frames": hex,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            for frame in &frames {
                println!("{frame}");
            }
        }
        return Ok(());
    }

    let session = open_ready_session()?;
    let report = ConfigSession::new().apply(&parsed.config, &session);
    for failure in &report.failures {
        eprintln!("warning: {:?} not applied: {}", failure.step, failure.error);
    }
    println!(
        "Applied {} ({} frames written, {} skipped)",
        conf.display(),
        report.written.len(),
        report.failures.len()
    );
    Ok(())
}
