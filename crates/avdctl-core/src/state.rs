//! Lifecycle states of a managed emulator session

use std::fmt;

/// Where a device session is in its lifecycle.
///
/// The happy path is `Unstarted → Launching → AwaitingBoot → Ready →
/// ShuttingDown → Stopped`. `Failed` is terminal and reachable from
/// `Launching` (spawn failure) or `AwaitingBoot` (boot timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, no emulator process requested yet
    Unstarted,
    /// Emulator process spawn has been requested
    Launching,
    /// Process spawned, polling for boot completion
    AwaitingBoot,
    /// Device reported itself booted; install/query operations are valid
    Ready,
    /// Termination instruction in flight
    ShuttingDown,
    /// Terminal: session is over, no further operations are valid
    Stopped,
    /// Terminal: launch or boot wait failed
    Failed,
}

impl SessionState {
    /// Whether the session has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Stopped | SessionState::Failed)
    }

    /// Whether install/query operations are valid in this state
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Unstarted => "unstarted",
            SessionState::Launching => "launching",
            SessionState::AwaitingBoot => "awaiting-boot",
            SessionState::Ready => "ready",
            SessionState::ShuttingDown => "shutting-down",
            SessionState::Stopped => "stopped",
            SessionState::Failed => "failed",
        };
        f.write_str(name)
    }
}
