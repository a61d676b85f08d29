//! # tempo-core
//!
//! Foundation types for the tempo UCI engine client.
//!
//! This crate provides the shared vocabulary the other tempo crates depend on:
//!
//! - **Events**: [`events::EngineEvent`] decoded from engine output lines,
//!   keyed by [`events::EventKind`] for channel dispatch
//! - **Options**: [`options::EngineOption`] configurable engine parameters
//!   reported during capability discovery
//! - **Analysis**: [`analysis::Analysis`] evaluation snapshots,
//!   [`analysis::BestMove`], and the final [`analysis::SearchResult`]
//! - **Commands**: [`search::Position`], [`search::GoConfig`], and
//!   [`search::EngineConfig`] which render their own protocol text
//! - **Errors**: [`errors::EngineError`] via `thiserror`
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `tempo-protocol` and `tempo-engine`.

#![deny(unsafe_code)]

pub mod analysis;
pub mod errors;
pub mod events;
pub mod options;
pub mod search;

pub use analysis::{Analysis, BestMove, Score, SearchResult};
pub use errors::EngineError;
pub use events::{EngineEvent, EventKind};
pub use options::{EngineOption, OptionKind};
pub use search::{EngineConfig, GoConfig, Position};
