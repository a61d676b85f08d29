//! Evaluation snapshots, best moves, and search results.

use serde::{Deserialize, Serialize};

use crate::search::{GoConfig, Position};

/// Engine evaluation of a position, from the side to move's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Score {
    /// Centipawn score.
    Cp(i32),
    /// Moves until forced mate (negative: side to move is being mated).
    Mate(i32),
}

/// One evaluation snapshot decoded from an `info` line.
///
/// A search retains at most one of these at a time; later snapshots
/// overwrite earlier ones (latest-wins, not accumulation).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Search depth in plies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Selective search depth in plies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seldepth: Option<u32>,
    /// Principal variation rank (1 = best line).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multipv: Option<u32>,
    /// Evaluation score.
    pub score: Score,
    /// Nodes searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,
    /// Nodes per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nps: Option<u64>,
    /// Search time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
    /// Principal variation, long algebraic notation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pv: Vec<String>,
}

impl Analysis {
    /// Create a snapshot carrying only a score.
    #[must_use]
    pub fn with_score(score: Score) -> Self {
        Self {
            depth: None,
            seldepth: None,
            multipv: None,
            score,
            nodes: None,
            nps: None,
            time_ms: None,
            pv: Vec::new(),
        }
    }
}

/// Terminal search event payload: the engine's chosen move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMove {
    /// Best move in long algebraic notation, `None` when the engine reported
    /// `bestmove (none)` (no legal move: mate or stalemate on the board).
    pub best: Option<String>,
    /// Expected reply to ponder on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ponder: Option<String>,
}

/// Immutable aggregate of a completed analysis: the inputs plus the final
/// evaluation snapshot observed before the terminal bestmove.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Position that was analyzed.
    pub position: Position,
    /// Search configuration that was used.
    pub config: GoConfig,
    /// Last evaluation snapshot before the bestmove arrived.
    pub analysis: Analysis,
    /// The engine's chosen move.
    pub best_move: BestMove,
}
