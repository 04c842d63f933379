//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

use crate::state::SessionState;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Toolchain Errors
    // ─────────────────────────────────────────────────────────────
    #[error("'{tool}' not found. Ensure the Android SDK tools are in your PATH.")]
    ToolNotFound { tool: String },

    // ─────────────────────────────────────────────────────────────
    // Session/Lifecycle Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to spawn emulator process: {reason}")]
    Spawn { reason: String },

    #[error("Device did not finish booting within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Operation requires a ready device, session is {state}")]
    NotReady { state: SessionState },

    // ─────────────────────────────────────────────────────────────
    // Bridge (adb) Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Package not found: {}", path.display())]
    PackageNotFound { path: PathBuf },

    #[error("Device rejected install: {detail}")]
    InstallRejected { detail: String },

    #[error("Bridge error: {message}")]
    Bridge { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    pub fn spawn(reason: impl Into<String>) -> Self {
        Self::Spawn {
            reason: reason.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn not_ready(state: SessionState) -> Self {
        Self::NotReady { state }
    }

    pub fn package_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PackageNotFound { path: path.into() }
    }

    pub fn install_rejected(detail: impl Into<String>) -> Self {
        Self::InstallRejected {
            detail: detail.into(),
        }
    }

    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors leave the session usable; the caller can retry
    /// the operation or move on to the next one.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Bridge { .. }
                | Error::InstallRejected { .. }
                | Error::PackageNotFound { .. }
                | Error::NotReady { .. }
        )
    }

    /// Check if this error should abort the enclosing workflow
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ToolNotFound { .. }
                | Error::Spawn { .. }
                | Error::Timeout { .. }
                | Error::ConfigNotFound { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::timeout(60);
        assert_eq!(err.to_string(), "Device did not finish booting within 60s");

        let err = Error::tool_not_found("adb");
        assert!(err.to_string().contains("'adb' not found"));

        let err = Error::not_ready(SessionState::AwaitingBoot);
        assert!(err.to_string().contains("awaiting-boot"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::tool_not_found("emulator").is_fatal());
        assert!(Error::spawn("resource exhausted").is_fatal());
        assert!(Error::timeout(60).is_fatal());
        assert!(!Error::bridge("device offline").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::bridge("device offline").is_recoverable());
        assert!(Error::install_rejected("INSTALL_FAILED_INVALID_APK").is_recoverable());
        assert!(Error::package_not_found("/tmp/missing.apk").is_recoverable());
        assert!(!Error::timeout(60).is_recoverable());
    }

    #[test]
    fn test_package_not_found_names_path() {
        let err = Error::package_not_found("/tmp/app.apk");
        assert!(err.to_string().contains("/tmp/app.apk"));
    }

    #[test]
    fn test_timeout_names_configured_value() {
        let err = Error::timeout(45);
        assert!(err.to_string().contains("45"));
    }

    #[test]
    fn test_result_context_preserves_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("creating log directory").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
