//! avdctl - Android emulator session manager
//!
//! This is the binary entry point. All session logic lives in the
//! workspace crates.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use avdctl_core::prelude::*;
use avdctl_device::{
    kill_running_emulator, list_avds, DeviceSession, SessionConfig, SystemRunner, Toolchain,
};

/// Manage a single Android emulator session for automated APK deployment
#[derive(Parser, Debug)]
#[command(name = "avdctl")]
#[command(about = "Boot an Android emulator, install APKs, inspect the device", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Boot an AVD, install packages, and report device properties
    Run {
        /// AVD name to boot (overrides the config file)
        #[arg(value_name = "AVD")]
        avd: Option<String>,

        /// APK file to install once the device is ready (repeatable)
        #[arg(long = "apk", value_name = "PATH")]
        apks: Vec<PathBuf>,

        /// Boot timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Path to a config file (default: .avdctl.toml if present)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Shut down immediately instead of waiting for Enter
        #[arg(long)]
        no_wait: bool,
    },

    /// List AVDs available on this machine
    List,

    /// Best-effort kill of the currently running emulator
    Kill,
}

#[tokio::main]
async fn main() -> Result<()> {
    avdctl_core::logging::init()?;
    let args = Args::parse();

    match args.command {
        Command::Run {
            avd,
            apks,
            timeout,
            config,
            no_wait,
        } => run_session(avd, apks, timeout, config, no_wait).await,
        Command::List => list_images().await,
        Command::Kill => kill().await,
    }
}

async fn run_session(
    avd: Option<String>,
    apks: Vec<PathBuf>,
    timeout: Option<u64>,
    config_path: Option<PathBuf>,
    no_wait: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => SessionConfig::load(&path)?,
        None => SessionConfig::load_default()?,
    };
    if let Some(avd) = avd {
        config.avd = avd;
    }
    if let Some(timeout) = timeout {
        config.boot_timeout_secs = timeout;
    }

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e);
        eprintln!("Hint: pass an AVD name (avdctl run <AVD>) or set one in .avdctl.toml.");
        eprintln!("      Available images: avdctl list");
        std::process::exit(2);
    }

    let toolchain = Toolchain::detect();
    config.apply_toolchain(&toolchain);

    let mut session = DeviceSession::new(SystemRunner, config);

    println!(
        "Booting {} (timeout {}s)...",
        session.config().avd,
        session.config().boot_timeout_secs
    );
    if let Err(e) = session.launch().await {
        eprintln!("❌ Failed to start emulator: {}", e);
        if let Some(hint) = toolchain.unavailable_message() {
            eprintln!("   {}", hint);
        }
        // The process may be up but unbootable; make sure nothing lingers
        let _ = session.shutdown().await;
        std::process::exit(1);
    }
    println!("✅ Device is ready.");

    for apk in &apks {
        match session.install_package(apk).await {
            Ok(()) => println!("✅ Installed {}", apk.display()),
            Err(e) => eprintln!("❌ Install failed for {}: {}", apk.display(), e),
        }
    }

    match session.display_properties().await {
        Ok(report) => println!("\n{}", report),
        Err(e) => eprintln!("❌ Could not read device properties: {}", e),
    }

    if !no_wait {
        println!("Press Enter to shut down the emulator...");
        let mut line = String::new();
        let _ = BufReader::new(tokio::io::stdin()).read_line(&mut line).await;
    }

    match session.shutdown().await {
        Ok(()) => println!("Emulator shut down."),
        Err(e) => {
            warn!("Shutdown instruction failed: {}", e);
            eprintln!("⚠️  Emulator may still be running: {}", e);
        }
    }

    Ok(())
}

async fn list_images() -> Result<()> {
    let toolchain = Toolchain::detect();
    let emulator = toolchain
        .emulator
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "emulator".to_string());

    let avds = match list_avds(&SystemRunner, &emulator).await {
        Ok(avds) => avds,
        Err(e) => {
            eprintln!("❌ Could not list AVDs: {}", e);
            if let Some(hint) = toolchain.unavailable_message() {
                eprintln!("   {}", hint);
            }
            std::process::exit(1);
        }
    };

    if avds.is_empty() {
        println!("No AVDs found. Create one with Android Studio's Device Manager.");
        return Ok(());
    }

    for avd in avds {
        match avd.api_level {
            Some(api) => println!("{}  ({}, API {})", avd.name, avd.display_name, api),
            None => println!("{}  ({})", avd.name, avd.display_name),
        }
    }
    Ok(())
}

async fn kill() -> Result<()> {
    let toolchain = Toolchain::detect();
    let adb = toolchain
        .adb
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "adb".to_string());

    kill_running_emulator(&SystemRunner, &adb).await?;
    println!("Kill instruction sent.");
    Ok(())
}
