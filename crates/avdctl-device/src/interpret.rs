//! Result interpreters for unstructured bridge output
//!
//! adb reports success through free text, not status codes. Each command
//! kind gets exactly one interpreter function so the heuristic is
//! swappable without touching call sites.

/// Interpreter signature shared by all command kinds.
pub type OutputInterpreter = fn(&str) -> bool;

/// Boot-completed probe: `getprop sys.boot_completed` prints `1` once the
/// device has finished booting. Anything else (including empty output from
/// a device that is not yet attachable) means keep waiting.
pub fn boot_completed(stdout: &str) -> bool {
    stdout.trim() == "1"
}

/// Install marker: `adb install` prints a line containing `Success` on a
/// completed install. Failures print `Failure [REASON]` instead.
pub fn install_succeeded(stdout: &str) -> bool {
    stdout.contains("Success")
}
