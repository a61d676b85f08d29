//! Engine handle lifecycle.
//!
//! The source of truth for what the handle is allowed to do:
//!
//! ```text
//! Uninitialized → DiscoveringOptions → AwaitingReady → Ready ⇄ Analyzing
//! ```
//!
//! `start` drives the forward chain; a search toggles `Ready ⇄ Analyzing`.
//! Invalid transitions surface as [`EngineError::Busy`] or
//! [`EngineError::NotStarted`] instead of queueing work.

use tempo_core::errors::EngineError;

/// Lifecycle state of an engine handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed; no protocol exchange yet.
    #[default]
    Uninitialized,
    /// `uci` sent, accumulating option descriptors until `uciok`.
    DiscoveringOptions,
    /// `isready` sent, waiting for `readyok`.
    AwaitingReady,
    /// Started and idle; searches may begin.
    Ready,
    /// A search is in flight; terminal `bestmove` pending.
    Analyzing,
}

impl Lifecycle {
    /// Human-readable state name, for errors and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::DiscoveringOptions => "discovering options",
            Self::AwaitingReady => "awaiting ready",
            Self::Ready => "ready",
            Self::Analyzing => "analyzing",
        }
    }

    /// Whether `start` has completed.
    #[must_use]
    pub fn is_started(self) -> bool {
        matches!(self, Self::Ready | Self::Analyzing)
    }

    /// Enter `Analyzing`. Only valid from `Ready`.
    pub fn begin_search(&mut self) -> Result<(), EngineError> {
        match *self {
            Self::Ready => {
                *self = Self::Analyzing;
                Ok(())
            }
            Self::Uninitialized => Err(EngineError::NotStarted),
            state @ (Self::DiscoveringOptions | Self::AwaitingReady | Self::Analyzing) => {
                Err(EngineError::Busy { state: state.name() })
            }
        }
    }

    /// Leave `Analyzing` after the terminal bestmove.
    pub fn finish_search(&mut self) {
        if *self == Self::Analyzing {
            *self = Self::Ready;
        }
    }
}
