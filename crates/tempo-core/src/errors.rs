//! Client error types.
//!
//! The taxonomy is intentionally shallow: the dominant failure mode of a
//! UCI engine (it simply never answers) is not represented here. An
//! operation whose terminal event never arrives never completes; callers
//! who need deadlines wrap operations in their own timeout.

/// Errors surfaced by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Failed to spawn the engine subprocess.
    #[error("failed to spawn engine: {0}")]
    Spawn(std::io::Error),

    /// Failed to write a command to the engine.
    #[error("failed to write to engine: {0}")]
    Transport(std::io::Error),

    /// A search was requested while another is in flight, or while the
    /// handle is mid-startup.
    #[error("engine is busy ({state})")]
    Busy {
        /// Human-readable name of the current lifecycle state.
        state: &'static str,
    },

    /// A search was requested before `start` completed.
    #[error("engine has not been started")]
    NotStarted,

    /// A search completed without a single evaluation snapshot, so no
    /// result could be synthesized.
    #[error("search finished without any evaluation")]
    NoEvaluation,
}

impl EngineError {
    /// Error category string for logging.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Spawn(_) => "spawn",
            Self::Transport(_) => "transport",
            Self::Busy { .. } => "busy",
            Self::NotStarted => "not_started",
            Self::NoEvaluation => "no_evaluation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = EngineError::Busy { state: "analyzing" };
        assert_eq!(err.to_string(), "engine is busy (analyzing)");
        assert_eq!(err.category(), "busy");
        assert_eq!(EngineError::NoEvaluation.category(), "no_evaluation");
    }
}
