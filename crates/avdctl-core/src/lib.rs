//! # avdctl-core - Domain Types and Error Handling
//!
//! Shared foundation for the avdctl crates: the session state machine
//! vocabulary, the error taxonomy, and the logging bootstrap.
//!
//! ## Public API
//!
//! - [`SessionState`] - Lifecycle states of a managed emulator session
//! - [`Error`] / [`Result`] - Error taxonomy for every external interaction
//! - [`logging::init()`] - File-based tracing setup
//! - [`prelude`] - Common imports for the other avdctl crates

pub mod error;
pub mod logging;
pub mod prelude;
pub mod state;

pub use error::{Error, Result, ResultExt};
pub use state::SessionState;
