//! Builder error types.
//!
//! These are contract violations in how the builder is driven. A step that
//! returns `false` is not an error and never shows up here.

use thiserror::Error;

use crate::builder::BuildPhase;

/// Builder errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A composition call was made before the build was started.
    #[error("cannot {operation}: build has not been started")]
    NotStarted { operation: &'static str },

    /// The build was started again while restarts are rejected.
    #[error("build already started (phase: {phase})")]
    AlreadyStarted { phase: BuildPhase },
}

impl BuildError {
    pub fn not_started(operation: &'static str) -> Self {
        Self::NotStarted { operation }
    }

    pub fn already_started(phase: BuildPhase) -> Self {
        Self::AlreadyStarted { phase }
    }

    /// Returns true if this is a call made before `start_build`.
    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted { .. })
    }
}

/// Result type for builder operations.
pub type BuildResult<T> = Result<T, BuildError>;
