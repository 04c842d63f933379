//! Prelude for common imports used throughout all avdctl crates

pub use crate::error::{Error, Result, ResultExt};
pub use crate::state::SessionState;
pub use tracing::{debug, error, info, instrument, trace, warn};
