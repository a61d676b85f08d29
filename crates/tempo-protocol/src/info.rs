//! Parser for `info` lines.
//!
//! Only lines carrying a `score` field become evaluation snapshots; other
//! `info` output (currmove progress, `info string` chatter) is dropped.

use tempo_core::analysis::{Analysis, Score};

/// Parse the tokens following `info`. Returns `None` when the line has no
/// score.
pub(crate) fn parse<'a, I>(tokens: I) -> Option<Analysis>
where
    I: Iterator<Item = &'a str>,
{
    let tokens: Vec<&str> = tokens.collect();
    let mut pos = 0;

    let mut depth = None;
    let mut seldepth = None;
    let mut multipv = None;
    let mut score = None;
    let mut nodes = None;
    let mut nps = None;
    let mut time_ms = None;
    let mut pv = Vec::new();

    while let Some(&keyword) = tokens.get(pos) {
        pos += 1;
        match keyword {
            "depth" => depth = next_number(&tokens, &mut pos),
            "seldepth" => seldepth = next_number(&tokens, &mut pos),
            "multipv" => multipv = next_number(&tokens, &mut pos),
            "nodes" => nodes = next_number(&tokens, &mut pos),
            "nps" => nps = next_number(&tokens, &mut pos),
            "time" => time_ms = next_number(&tokens, &mut pos),
            "score" => score = parse_score(&tokens, &mut pos),
            "pv" => {
                // The pv is always the last field; it runs to end of line.
                pv = tokens[pos..].iter().map(ToString::to_string).collect();
                pos = tokens.len();
            }
            "string" => return None,
            // Fields we don't model (hashfull, tbhits, currmove, …): skip
            // the keyword and let the loop resynchronize on the next one.
            _ => {}
        }
    }

    Some(Analysis {
        depth,
        seldepth,
        multipv,
        score: score?,
        nodes,
        nps,
        time_ms,
        pv,
    })
}

/// Parse `score cp <n>` or `score mate <n>`, tolerating a trailing
/// `lowerbound`/`upperbound` marker.
fn parse_score(tokens: &[&str], pos: &mut usize) -> Option<Score> {
    let unit = *tokens.get(*pos)?;
    *pos += 1;
    let value: i32 = tokens.get(*pos)?.parse().ok()?;
    *pos += 1;
    if matches!(tokens.get(*pos), Some(&"lowerbound" | &"upperbound")) {
        *pos += 1;
    }
    match unit {
        "cp" => Some(Score::Cp(value)),
        "mate" => Some(Score::Mate(value)),
        _ => None,
    }
}

fn next_number<T: std::str::FromStr>(tokens: &[&str], pos: &mut usize) -> Option<T> {
    let value = tokens.get(*pos)?.parse().ok()?;
    *pos += 1;
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_line(line: &str) -> Option<Analysis> {
        parse(line.split_whitespace())
    }

    #[test]
    fn full_stockfish_line() {
        let a = parse_line(
            "depth 24 seldepth 33 multipv 1 score cp 32 nodes 10110460 nps 1265442 \
             hashfull 999 tbhits 0 time 7990 pv e2e4 e7e5 g1f3 b8c6",
        )
        .unwrap();
        assert_eq!(a.depth, Some(24));
        assert_eq!(a.seldepth, Some(33));
        assert_eq!(a.multipv, Some(1));
        assert_eq!(a.score, Score::Cp(32));
        assert_eq!(a.nodes, Some(10_110_460));
        assert_eq!(a.nps, Some(1_265_442));
        assert_eq!(a.time_ms, Some(7990));
        assert_eq!(a.pv, vec!["e2e4", "e7e5", "g1f3", "b8c6"]);
    }

    #[test]
    fn mate_score() {
        let a = parse_line("depth 12 score mate -4 pv h7h8").unwrap();
        assert_eq!(a.score, Score::Mate(-4));
    }

    #[test]
    fn bound_marker_is_tolerated() {
        let a = parse_line("depth 18 score cp 55 lowerbound nodes 500").unwrap();
        assert_eq!(a.score, Score::Cp(55));
        assert_eq!(a.nodes, Some(500));
    }

    #[test]
    fn no_score_is_dropped() {
        assert_eq!(parse_line("depth 5 currmove e2e4 currmovenumber 1"), None);
        assert_eq!(parse_line("string NNUE evaluation enabled"), None);
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let a = parse_line("depth 8 wdl 334 562 104 score cp 20").unwrap();
        assert_eq!(a.depth, Some(8));
        assert_eq!(a.score, Score::Cp(20));
    }
}
