//! Parser for `option` lines.
//!
//! Grammar (UCI):
//!
//! ```text
//! option name <name…> type <kind> [default <value…>] [min <n>] [max <n>] [var <v>]…
//! ```
//!
//! The name and the default may span multiple tokens (`Clear Hash`,
//! `<empty>` stands for an empty string default).

use tempo_core::options::{EngineOption, OptionKind};

/// Keywords that terminate a multi-token value.
const KEYWORDS: &[&str] = &["type", "default", "min", "max", "var"];

/// Parse the tokens following `option`.
pub(crate) fn parse<'a, I>(tokens: I) -> Option<EngineOption>
where
    I: Iterator<Item = &'a str>,
{
    let tokens: Vec<&str> = tokens.collect();
    let mut pos = 0;

    if tokens.first() != Some(&"name") {
        return None;
    }
    pos += 1;
    let name = take_value(&tokens, &mut pos);
    if name.is_empty() {
        return None;
    }

    if tokens.get(pos) != Some(&"type") {
        return None;
    }
    pos += 1;
    let kind = OptionKind::parse(tokens.get(pos)?)?;
    pos += 1;

    let mut option = EngineOption::new(name, kind);
    while let Some(&keyword) = tokens.get(pos) {
        pos += 1;
        match keyword {
            "default" => {
                let value = take_value(&tokens, &mut pos);
                option.default = match value.as_str() {
                    "<empty>" => Some(String::new()),
                    _ => Some(value),
                };
            }
            "min" => option.min = next_number(&tokens, &mut pos),
            "max" => option.max = next_number(&tokens, &mut pos),
            "var" => {
                let value = take_value(&tokens, &mut pos);
                if !value.is_empty() {
                    option.vars.push(value);
                }
            }
            _ => return None,
        }
    }
    Some(option)
}

fn next_number(tokens: &[&str], pos: &mut usize) -> Option<i64> {
    let value = tokens.get(*pos)?.parse().ok()?;
    *pos += 1;
    Some(value)
}

/// Collect tokens up to the next keyword (or end of line) into one
/// space-joined value.
fn take_value(tokens: &[&str], pos: &mut usize) -> String {
    let start = *pos;
    while let Some(token) = tokens.get(*pos) {
        if KEYWORDS.contains(token) {
            break;
        }
        *pos += 1;
    }
    tokens[start..*pos].join(" ")
}
