//! Option values and the text conversions shared by the parser and accessors

use std::fmt;

use serde::{Deserialize, Serialize};

const TRUE_TOKENS: [&str; 4] = ["1", "yes", "true", "on"];
const FALSE_TOKENS: [&str; 4] = ["0", "no", "false", "off"];

/// Declared type of an option, used by [`Schema`](super::Schema) rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Str,
    Bool,
    Int,
    List,
}

/// A resolved option value.
///
/// Untyped options always hold `Str` with the raw text from the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    List(Vec<String>),
    Str(String),
}

impl Value {
    /// Convert raw document text into a value of the given kind.
    ///
    /// On failure returns a human readable message; callers attach location.
    pub fn from_raw(raw: &str, kind: OptionKind) -> Result<Value, String> {
        match kind {
            OptionKind::Str => Ok(Value::Str(raw.to_string())),
            OptionKind::Bool => parse_bool(raw).map(Value::Bool),
            OptionKind::Int => parse_int(raw).map(Value::Int),
            OptionKind::List => Ok(Value::List(split_list(raw))),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret as a boolean. `Str` values are converted with the boolean token rules.
    pub fn to_bool(&self) -> Result<bool, String> {
        match self {
            Value::Bool(b) => Ok(*b),
            Value::Str(s) => parse_bool(s),
            other => Err(format!("expected a boolean, found {}", other.kind_name())),
        }
    }

    /// Interpret as an integer. `Str` values are parsed as decimal.
    pub fn to_int(&self) -> Result<i64, String> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Str(s) => parse_int(s),
            other => Err(format!("expected an integer, found {}", other.kind_name())),
        }
    }

    /// Interpret as a list. `Str` values are split on commas and newlines.
    pub fn to_list(&self) -> Result<Vec<String>, String> {
        match self {
            Value::List(items) => Ok(items.clone()),
            Value::Str(s) => Ok(split_list(s)),
            other => Err(format!("expected a list, found {}", other.kind_name())),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "a boolean",
            Value::Int(_) => "an integer",
            Value::List(_) => "a list",
            Value::Str(_) => "a string",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::List(items) => write!(f, "{}", items.join(", ")),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Parse a boolean token (case-insensitive).
pub fn parse_bool(raw: &str) -> Result<bool, String> {
    let token = raw.trim().to_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Ok(true)
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Ok(false)
    } else {
        Err(format!("'{}' is not a boolean", raw.trim()))
    }
}

fn parse_int(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not an integer", raw.trim()))
}

/// Split a comma and/or newline separated list into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
