//! # tempo-protocol
//!
//! Decoder for UCI engine output.
//!
//! One raw output line in, at most one [`EngineEvent`] out. Lines that do
//! not correspond to a recognized protocol message (banners, `id` lines,
//! `info string` chatter) decode to `None` and are dropped at this boundary;
//! event dispatch is the caller's concern.
//!
//! ## Crate Position
//!
//! Depends on `tempo-core`. Depended on by `tempo-engine`.

#![deny(unsafe_code)]

mod info;
mod option;

use tempo_core::analysis::BestMove;
use tempo_core::events::EngineEvent;
use tracing::trace;

/// Decode one engine output line into a typed event.
///
/// Returns `None` for unrecognized or malformed lines.
#[must_use]
pub fn decode(line: &str) -> Option<EngineEvent> {
    let trimmed = line.trim();
    let mut tokens = trimmed.split_whitespace();
    let event = match tokens.next()? {
        "uciok" => Some(EngineEvent::UciOk),
        "readyok" => Some(EngineEvent::Ready),
        "option" => option::parse(tokens).map(EngineEvent::Option),
        "info" => info::parse(tokens).map(EngineEvent::Evaluation),
        "bestmove" => parse_bestmove(tokens).map(EngineEvent::BestMove),
        _ => None,
    };
    if event.is_none() {
        trace!(line = trimmed, "dropping unrecognized engine output");
    }
    event
}

/// Parse the tokens after `bestmove`.
///
/// `bestmove (none)` is reported when the position has no legal move.
fn parse_bestmove<'a, I>(mut tokens: I) -> Option<BestMove>
where
    I: Iterator<Item = &'a str>,
{
    let best = match tokens.next()? {
        "(none)" => None,
        mv => Some(mv.to_string()),
    };
    let ponder = match tokens.next() {
        Some("ponder") => tokens.next().map(ToString::to_string),
        _ => None,
    };
    Some(BestMove { best, ponder })
}
