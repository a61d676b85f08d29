//! # tempo-engine
//!
//! Orchestration layer of the tempo UCI client.
//!
//! - **Engine**: the handle owning one subprocess; request/response-shaped
//!   operations (`start`, `discover_options`, `go`, `analyze_position`,
//!   `stop`) over the asynchronous event stream
//! - **Event bus**: named-channel publish/subscribe with persistent and
//!   one-shot subscriptions; the correlation primitive
//! - **Lifecycle**: the explicit state machine guarding operations
//! - **Transport**: the subprocess boundary (write commands, stream lines)
//!
//! ## Crate Position
//!
//! Aggregation layer. Depends on: tempo-core, tempo-protocol.
//!
//! ## Example
//!
//! ```no_run
//! use tempo_engine::{Engine, GoConfig, Position};
//!
//! # async fn demo() -> Result<(), tempo_engine::EngineError> {
//! let engine = Engine::spawn("stockfish")?;
//! engine.start(None).await?;
//! let result = engine
//!     .analyze_position(&Position::startpos(), &GoConfig::depth(18))
//!     .await?;
//! println!("best: {:?} score: {:?}", result.best_move.best, result.analysis.score);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod bus;
pub mod engine;
pub mod lifecycle;
pub mod transport;

#[cfg(test)]
mod testutil;

// Re-export main public API
pub use bus::{EventBus, Subscription};
pub use engine::Engine;
pub use lifecycle::Lifecycle;
pub use transport::{ProcessTransport, Transport};

pub use tempo_core::{
    Analysis, BestMove, EngineConfig, EngineError, EngineEvent, EngineOption, EventKind, GoConfig,
    OptionKind, Position, Score, SearchResult,
};
