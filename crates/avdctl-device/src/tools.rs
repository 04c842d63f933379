//! Android SDK tool discovery
//!
//! Locates the `emulator` and `adb` executables: PATH first, then the
//! conventional layout under `$ANDROID_HOME` / `$ANDROID_SDK_ROOT`.

use std::path::PathBuf;

/// Resolved locations of the external tools this crate shells out to.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    /// Emulator launcher, if found
    pub emulator: Option<PathBuf>,
    /// adb bridge, if found
    pub adb: Option<PathBuf>,
}

impl Toolchain {
    /// Probe the host for emulator and adb (run once at startup).
    pub fn detect() -> Self {
        Self {
            emulator: find_tool("emulator", "emulator"),
            adb: find_tool("adb", "platform-tools"),
        }
    }

    /// Get a user-friendly message when the Android SDK is unavailable.
    pub fn unavailable_message(&self) -> Option<&'static str> {
        if self.emulator.is_some() && self.adb.is_some() {
            None
        } else {
            Some("Android SDK not found. Set ANDROID_HOME or install Android Studio.")
        }
    }
}

/// SDK roots from the conventional environment variables.
fn sdk_roots() -> Vec<PathBuf> {
    ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .map(PathBuf::from)
        .collect()
}

/// Look up a tool on PATH, falling back to `<sdk root>/<subdir>/<name>`.
fn find_tool(name: &str, sdk_subdir: &str) -> Option<PathBuf> {
    if let Ok(path) = which::which(name) {
        return Some(path);
    }

    tracing::debug!("{} not on PATH, checking SDK roots", name);
    for root in sdk_roots() {
        let candidate = root.join(sdk_subdir).join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        #[cfg(windows)]
        {
            let candidate = root.join(sdk_subdir).join(format!("{name}.exe"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toolchain_reports_unavailable() {
        let tools = Toolchain::default();
        assert!(tools.unavailable_message().is_some());
    }

    #[test]
    fn test_complete_toolchain_has_no_message() {
        let tools = Toolchain {
            emulator: Some("/sdk/emulator/emulator".into()),
            adb: Some("/sdk/platform-tools/adb".into()),
        };
        assert!(tools.unavailable_message().is_none());
    }

    #[test]
    fn test_find_tool_checks_sdk_root_layout() {
        let sdk = tempfile::tempdir().unwrap();
        let tool_dir = sdk.path().join("platform-tools");
        std::fs::create_dir_all(&tool_dir).unwrap();
        std::fs::write(tool_dir.join("avdctl-fake-tool"), b"").unwrap();

        std::env::set_var("ANDROID_HOME", sdk.path());
        let found = find_tool("avdctl-fake-tool", "platform-tools");
        std::env::remove_var("ANDROID_HOME");

        assert_eq!(found, Some(tool_dir.join("avdctl-fake-tool")));
    }

    #[test]
    fn test_find_tool_missing_everywhere() {
        assert_eq!(find_tool("avdctl-no-such-tool", "nowhere"), None);
    }
}
