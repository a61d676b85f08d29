//! Events decoded from engine output lines.
//!
//! [`EngineEvent`] is a closed tagged union: every protocol message the
//! client reacts to has a variant, and [`EventKind`] is the channel key the
//! event bus dispatches on. Keeping the union closed gives exhaustiveness
//! checking everywhere events are matched, while `kind()` preserves the
//! "subscribe by name" ergonomics.

use serde::{Deserialize, Serialize};

use crate::analysis::{Analysis, BestMove};
use crate::options::EngineOption;

/// Channel key for event dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// `readyok`: the engine is ready for commands.
    Ready,
    /// `uciok`: capability discovery is complete.
    UciOk,
    /// `option …`: one configurable parameter descriptor.
    Option,
    /// `info … score …`: an evaluation snapshot.
    Evaluation,
    /// `bestmove …`: terminal event of a search.
    BestMove,
}

/// A typed event decoded from one engine output line.
///
/// Events are ephemeral value objects, never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The engine answered `isready`.
    Ready,
    /// The engine finished listing its capabilities.
    UciOk,
    /// One engine option descriptor.
    Option(EngineOption),
    /// An evaluation snapshot from an `info` line.
    Evaluation(Analysis),
    /// The engine's chosen move; terminal event of a search.
    BestMove(BestMove),
}

impl EngineEvent {
    /// The channel this event dispatches on.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Ready => EventKind::Ready,
            Self::UciOk => EventKind::UciOk,
            Self::Option(_) => EventKind::Option,
            Self::Evaluation(_) => EventKind::Evaluation,
            Self::BestMove(_) => EventKind::BestMove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Score;
    use crate::options::OptionKind;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(EngineEvent::Ready.kind(), EventKind::Ready);
        assert_eq!(EngineEvent::UciOk.kind(), EventKind::UciOk);
        let opt = EngineEvent::Option(EngineOption::new("Hash", OptionKind::Spin));
        assert_eq!(opt.kind(), EventKind::Option);
        let eval = EngineEvent::Evaluation(Analysis::with_score(Score::Cp(10)));
        assert_eq!(eval.kind(), EventKind::Evaluation);
        let bm = EngineEvent::BestMove(BestMove {
            best: Some("e2e4".into()),
            ponder: None,
        });
        assert_eq!(bm.kind(), EventKind::BestMove);
    }

    #[test]
    fn serde_tags_by_type() {
        let json = serde_json::to_value(EngineEvent::UciOk).unwrap();
        assert_eq!(json, serde_json::json!({"type": "uci_ok"}));

        let bm = EngineEvent::BestMove(BestMove {
            best: Some("g1f3".into()),
            ponder: Some("d7d5".into()),
        });
        let json = serde_json::to_value(&bm).unwrap();
        assert_eq!(json["type"], "best_move");
        assert_eq!(json["best"], "g1f3");
        assert_eq!(json["ponder"], "d7d5");
    }

    #[test]
    fn all_variants_have_distinct_kinds() {
        let events = [
            EngineEvent::Ready,
            EngineEvent::UciOk,
            EngineEvent::Option(EngineOption::new("Ponder", OptionKind::Check)),
            EngineEvent::Evaluation(Analysis::with_score(Score::Mate(2))),
            EngineEvent::BestMove(BestMove {
                best: None,
                ponder: None,
            }),
        ];
        let mut kinds: Vec<EventKind> = events.iter().map(EngineEvent::kind).collect();
        kinds.dedup();
        assert_eq!(kinds.len(), events.len());
    }
}
