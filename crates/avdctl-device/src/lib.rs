//! # avdctl-device - Emulator Session Management
//!
//! Manages a single Android emulator session through the `emulator` and
//! `adb` command-line tools: fire-and-forget launch, bounded boot polling,
//! APK installation, and device property inspection.
//!
//! Depends on [`avdctl_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Execution
//! - [`CommandRunner`] - Seam over external command execution
//! - [`SystemRunner`] - Production runner backed by `tokio::process`
//!
//! ### Session Lifecycle
//! - [`DeviceSession`] - State machine over one managed emulator
//! - [`SessionConfig`] - Explicit device/tool/timeout configuration
//! - [`await_predicate()`] - Reusable bounded polling primitive
//!
//! ### Device Inspection
//! - [`PropertySnapshot`] - Last-observed device properties, label-ordered
//! - [`PROPERTY_PROBES`] - The fixed label → shell probe table
//!
//! ### Host Tooling
//! - [`Toolchain`] - Locate `emulator`/`adb` on this machine
//! - [`list_avds()`] - Enumerate AVDs via `emulator -list-avds`

pub mod avds;
pub mod config;
pub mod exec;
pub mod interpret;
pub mod poll;
pub mod probes;
pub mod session;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tools;

// Public API re-exports
pub use avds::{kill_running_emulator, list_avds, AvdInfo};
pub use config::{SessionConfig, DEFAULT_CONFIG_FILENAME};
pub use exec::{CommandOutput, CommandRunner, ProcessHandle, SystemRunner};
pub use poll::{await_predicate, PollConfig};
pub use probes::{ProbeOutcome, PropertyProbe, PropertyReading, PropertySnapshot, PROPERTY_PROBES};
pub use session::{DeviceSession, BOOT_POLL_INTERVAL};
pub use tools::Toolchain;
