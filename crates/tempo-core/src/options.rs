//! Engine option descriptors reported during capability discovery.

use serde::{Deserialize, Serialize};

/// The UCI type of a configurable engine option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Boolean toggle (`type check`).
    Check,
    /// Bounded integer (`type spin`).
    Spin,
    /// One of a fixed set of strings (`type combo`).
    Combo,
    /// Stateless trigger with no value (`type button`).
    Button,
    /// Free-form text (`type string`).
    String,
}

impl OptionKind {
    /// Parse the UCI `type` token.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "check" => Some(Self::Check),
            "spin" => Some(Self::Spin),
            "combo" => Some(Self::Combo),
            "button" => Some(Self::Button),
            "string" => Some(Self::String),
            _ => None,
        }
    }
}

/// One engine-configurable parameter, as reported by an `option` line.
///
/// Produced only during capability discovery; a handle's option list is
/// fully replaced, never merged, each time discovery runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOption {
    /// Option name. May contain spaces (e.g. `Clear Hash`).
    pub name: String,
    /// Option type.
    pub kind: OptionKind,
    /// Default value, if the engine reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Lower bound for `spin` options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Upper bound for `spin` options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Allowed values for `combo` options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vars: Vec<String>,
}

impl EngineOption {
    /// Create an option descriptor with no default or bounds.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            min: None,
            max: None,
            vars: Vec::new(),
        }
    }
}
