//! Position, search, and engine configuration, each rendering its own
//! protocol command text.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Standard starting-position FEN, for reference and tests.
pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A board position: the starting position or a FEN string, optionally
/// followed by moves played from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// FEN of the base position; `None` means `startpos`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    /// Moves from the base position, long algebraic notation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moves: Vec<String>,
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn startpos() -> Self {
        Self {
            fen: None,
            moves: Vec::new(),
        }
    }

    /// A position given by a FEN string. Not validated here; the engine is
    /// the authority on legality.
    #[must_use]
    pub fn from_fen(fen: impl Into<String>) -> Self {
        Self {
            fen: Some(fen.into()),
            moves: Vec::new(),
        }
    }

    /// Append moves played from the base position.
    #[must_use]
    pub fn with_moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.moves.extend(moves.into_iter().map(Into::into));
        self
    }

    /// Render the `position` command for this position.
    #[must_use]
    pub fn to_command(&self) -> String {
        let mut cmd = match &self.fen {
            Some(fen) => format!("position fen {fen}"),
            None => String::from("position startpos"),
        };
        if !self.moves.is_empty() {
            cmd.push_str(" moves");
            for mv in &self.moves {
                let _ = write!(cmd, " {mv}");
            }
        }
        cmd
    }
}

/// Search limits for one `go` command.
///
/// With no limits set, the rendered command is `go infinite`; the search
/// then only ends when the engine is told to stop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoConfig {
    /// Maximum search depth in plies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    /// Fixed search time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movetime_ms: Option<u64>,
    /// Maximum nodes to search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,
}

impl GoConfig {
    /// Limit the search to `depth` plies.
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    /// Limit the search to a fixed time in milliseconds.
    #[must_use]
    pub fn movetime_ms(ms: u64) -> Self {
        Self {
            movetime_ms: Some(ms),
            ..Self::default()
        }
    }

    /// Limit the search to a node count.
    #[must_use]
    pub fn nodes(nodes: u64) -> Self {
        Self {
            nodes: Some(nodes),
            ..Self::default()
        }
    }

    /// Render the `go` command for these limits.
    #[must_use]
    pub fn to_command(&self) -> String {
        let mut cmd = String::from("go");
        if let Some(depth) = self.depth {
            let _ = write!(cmd, " depth {depth}");
        }
        if let Some(ms) = self.movetime_ms {
            let _ = write!(cmd, " movetime {ms}");
        }
        if let Some(nodes) = self.nodes {
            let _ = write!(cmd, " nodes {nodes}");
        }
        if cmd == "go" {
            cmd.push_str(" infinite");
        }
        cmd
    }
}

/// Ordered `setoption` assignments applied during engine startup.
///
/// Order is preserved: commands are issued to the engine in the order the
/// options were set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    options: Vec<(String, String)>,
}

impl EngineConfig {
    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an arbitrary option by name.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.options.push((name.into(), value.to_string()));
        self
    }

    /// Set the transposition table size in MiB.
    #[must_use]
    pub fn hash_mb(self, mb: u32) -> Self {
        self.option("Hash", mb)
    }

    /// Set the number of search threads.
    #[must_use]
    pub fn threads(self, threads: u32) -> Self {
        self.option("Threads", threads)
    }

    /// Set the number of principal variations to report.
    #[must_use]
    pub fn multipv(self, lines: u32) -> Self {
        self.option("MultiPV", lines)
    }

    /// Render one `setoption` command per assignment, in insertion order.
    #[must_use]
    pub fn to_commands(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|(name, value)| format!("setoption name {name} value {value}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_startpos_command() {
        assert_eq!(Position::startpos().to_command(), "position startpos");
    }

    #[test]
    fn position_startpos_with_moves() {
        let pos = Position::startpos().with_moves(["e2e4", "c7c5"]);
        assert_eq!(pos.to_command(), "position startpos moves e2e4 c7c5");
    }

    #[test]
    fn position_fen_command() {
        let pos = Position::from_fen(STARTPOS_FEN);
        assert_eq!(pos.to_command(), format!("position fen {STARTPOS_FEN}"));
    }

    #[test]
    fn go_default_is_infinite() {
        assert_eq!(GoConfig::default().to_command(), "go infinite");
    }

    #[test]
    fn go_depth_command() {
        assert_eq!(GoConfig::depth(20).to_command(), "go depth 20");
    }

    #[test]
    fn go_combined_limits_are_ordered() {
        let cfg = GoConfig {
            depth: Some(12),
            movetime_ms: Some(5000),
            nodes: None,
        };
        assert_eq!(cfg.to_command(), "go depth 12 movetime 5000");
    }

    #[test]
    fn engine_config_preserves_order() {
        let cfg = EngineConfig::new()
            .threads(4)
            .hash_mb(256)
            .option("UCI_ShowWDL", "true");
        assert_eq!(
            cfg.to_commands(),
            vec![
                "setoption name Threads value 4",
                "setoption name Hash value 256",
                "setoption name UCI_ShowWDL value true",
            ]
        );
    }

    #[test]
    fn engine_config_empty_renders_nothing() {
        assert!(EngineConfig::new().to_commands().is_empty());
    }
}
