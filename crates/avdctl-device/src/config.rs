//! Session configuration
//!
//! Device identity and tool locations are always explicit configuration,
//! never read from ambient state at call sites. Values come from an
//! optional TOML file, with CLI flags layered on top by the binary.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::tools::Toolchain;
use avdctl_core::prelude::*;

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILENAME: &str = ".avdctl.toml";

/// Default boot-wait deadline in seconds.
pub const DEFAULT_BOOT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_EMULATOR_COMMAND: &str = "emulator";
const DEFAULT_ADB_COMMAND: &str = "adb";

/// Everything a [`crate::DeviceSession`] needs to target one device.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Name of the AVD image to launch. Fixed for the session lifetime.
    pub avd: String,

    /// Emulator launcher command or absolute path
    pub emulator_command: String,

    /// Bridge (adb) command or absolute path
    pub adb_command: String,

    /// Boot-wait deadline in seconds
    pub boot_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            avd: String::new(),
            emulator_command: DEFAULT_EMULATOR_COMMAND.to_string(),
            adb_command: DEFAULT_ADB_COMMAND.to_string(),
            boot_timeout_secs: DEFAULT_BOOT_TIMEOUT_SECS,
        }
    }
}

impl SessionConfig {
    /// Construct a config for one AVD with default tool commands.
    pub fn for_avd(avd: impl Into<String>) -> Self {
        Self {
            avd: avd.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        toml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Load the default config file if it exists, otherwise defaults.
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILENAME);
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(Error::ConfigNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Fill in tool commands left at their defaults from a detected toolchain.
    ///
    /// Explicitly configured paths always win over detection.
    pub fn apply_toolchain(&mut self, tools: &Toolchain) {
        if self.emulator_command == DEFAULT_EMULATOR_COMMAND {
            if let Some(path) = &tools.emulator {
                self.emulator_command = path.display().to_string();
            }
        }
        if self.adb_command == DEFAULT_ADB_COMMAND {
            if let Some(path) = &tools.adb {
                self.adb_command = path.display().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.avd.trim().is_empty() {
            return Err(Error::config("no AVD name configured"));
        }
        if self.boot_timeout_secs == 0 {
            return Err(Error::config("boot_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    pub fn boot_timeout(&self) -> Duration {
        Duration::from_secs(self.boot_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.emulator_command, "emulator");
        assert_eq!(config.adb_command, "adb");
        assert_eq!(config.boot_timeout_secs, 60);
        assert!(config.avd.is_empty());
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config: SessionConfig = toml::from_str(r#"avd = "pixel2_api_30""#).unwrap();
        assert_eq!(config.avd, "pixel2_api_30");
        assert_eq!(config.boot_timeout_secs, 60);
        assert_eq!(config.adb_command, "adb");
    }

    #[test]
    fn test_parse_full_file() {
        let content = r#"
            avd = "pixel2_api_30"
            emulator_command = "/opt/android/emulator/emulator"
            adb_command = "/opt/android/platform-tools/adb"
            boot_timeout_secs = 120
        "#;
        let config: SessionConfig = toml::from_str(content).unwrap();
        assert_eq!(config.emulator_command, "/opt/android/emulator/emulator");
        assert_eq!(config.boot_timeout_secs, 120);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: std::result::Result<SessionConfig, _> =
            toml::from_str(r#"avd_name = "typo""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_not_found() {
        let err = SessionConfig::load(Path::new("/definitely/missing/.avdctl.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "avd = \"pixel2_api_30\"").unwrap();
        writeln!(file, "boot_timeout_secs = 30").unwrap();

        let config = SessionConfig::load(file.path()).unwrap();
        assert_eq!(config.avd, "pixel2_api_30");
        assert_eq!(config.boot_timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "boot_timeout_secs = \"soon\"").unwrap();

        let err = SessionConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_validate_requires_avd_and_timeout() {
        assert!(SessionConfig::default().validate().is_err());

        let mut config = SessionConfig::for_avd("pixel2_api_30");
        assert!(config.validate().is_ok());

        config.boot_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_toolchain_respects_explicit_paths() {
        let tools = Toolchain {
            emulator: Some("/sdk/emulator/emulator".into()),
            adb: Some("/sdk/platform-tools/adb".into()),
        };

        let mut config = SessionConfig::for_avd("x");
        config.apply_toolchain(&tools);
        assert_eq!(config.emulator_command, "/sdk/emulator/emulator");
        assert_eq!(config.adb_command, "/sdk/platform-tools/adb");

        let mut config = SessionConfig::for_avd("x");
        config.adb_command = "/custom/adb".to_string();
        config.apply_toolchain(&tools);
        assert_eq!(config.adb_command, "/custom/adb");
    }
}
