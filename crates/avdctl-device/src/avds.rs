//! AVD (Android Virtual Device) discovery
//!
//! Enumerates the device images available for launching using the
//! `emulator -list-avds` command from the Android SDK.

use std::sync::LazyLock;

use regex::Regex;

use crate::exec::CommandRunner;
use avdctl_core::prelude::*;

/// Static regex pattern for extracting API level from AVD names
static API_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_API_(\d+)$").expect("Invalid API pattern regex"));

/// An Android Virtual Device image available on this host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvdInfo {
    /// AVD name (the launch identifier)
    pub name: String,
    /// Friendly display name
    pub display_name: String,
    /// API level (e.g., 30 for Android 11)
    pub api_level: Option<u32>,
}

/// List all AVDs known to the given emulator command
pub async fn list_avds<R: CommandRunner>(runner: &R, emulator_command: &str) -> Result<Vec<AvdInfo>> {
    let out = runner.run(emulator_command, &["-list-avds"]).await?;

    if !out.success {
        return Err(Error::bridge(format!(
            "emulator -list-avds failed: {}",
            out.stderr.trim()
        )));
    }

    Ok(parse_avd_list(&out.stdout))
}

/// Best-effort kill of whatever emulator is currently attached to adb
pub async fn kill_running_emulator<R: CommandRunner>(runner: &R, adb_command: &str) -> Result<()> {
    let _ = runner.run(adb_command, &["emu", "kill"]).await?;
    Ok(())
}

/// Parse the output of `emulator -list-avds`
///
/// Output format is one AVD name per line.
fn parse_avd_list(output: &str) -> Vec<AvdInfo> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|name| {
            let name = name.trim().to_string();
            let (display_name, api_level) = parse_avd_name(&name);

            AvdInfo {
                name,
                display_name,
                api_level,
            }
        })
        .collect()
}

/// Parse an AVD name to extract display name and API level
///
/// Common naming patterns:
/// - "pixel2_API_30" -> ("pixel2", Some(30))
/// - "Pixel_6_API_33" -> ("Pixel 6", Some(33))
/// - "My_Custom_AVD" -> ("My Custom AVD", None)
fn parse_avd_name(name: &str) -> (String, Option<u32>) {
    if let Some(caps) = API_PATTERN.captures(name) {
        let api_level = caps.get(1).and_then(|m| m.as_str().parse().ok());
        let display = API_PATTERN.replace(name, "").replace('_', " ");
        return (display.trim().to_string(), api_level);
    }

    (name.replace('_', " "), None)
}
