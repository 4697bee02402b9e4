//! Validation rules for form inputs
//!
//! Each rule maps a raw model value to pass or a user-facing message. Every
//! rule except `Required` lets "empty" values through (null, `""`, `false`,
//! `0`), so requiredness is enforced only where a field is declared NON_NULL.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

static CYCLE_POINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9T]+(Z|[+-][0-9]+)?$").expect("cycle point regex"));
static CYCLE_POINT_GLOB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9T*]+$").expect("cycle point glob regex"));
static TASK_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+\..+$").expect("task id regex"));
// [a][b]c, [b]a, a and [a] pass; a[b], a] and ]a do not
static CONFIG_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((\[[^=\]]+\])+)?([^\[=\]\-]+)?$").expect("config item regex")
});

/// A named validation rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Value must be present (NON_NULL fields)
    Required,
    /// Value must be an integral number
    Integer,
    /// Text must not contain whitespace
    NoSpaces,
    /// Digits and `T`, optionally a trailing `Z` or signed offset
    CyclePoint,
    /// Digits, `T` and `*`
    CyclePointGlob,
    /// `name.cycle`
    TaskId,
    /// `[section][subsection]setting`
    RuntimeConfigItem,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::Required,
        Rule::Integer,
        Rule::NoSpaces,
        Rule::CyclePoint,
        Rule::CyclePointGlob,
        Rule::TaskId,
        Rule::RuntimeConfigItem,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Integer => "integer",
            Rule::NoSpaces => "no_spaces",
            Rule::CyclePoint => "cycle_point",
            Rule::CyclePointGlob => "cycle_point_glob",
            Rule::TaskId => "task_id",
            Rule::RuntimeConfigItem => "runtime_config_item",
        }
    }

    /// Check a value, returning the failure message if it does not pass
    pub fn check(&self, value: &Value) -> Result<(), &'static str> {
        if let Rule::Required = self {
            return match value {
                Value::Null => Err("Required"),
                Value::String(s) if s.is_empty() => Err("Required"),
                _ => Ok(()),
            };
        }

        if is_empty(value) {
            return Ok(());
        }

        let passed = match self {
            Rule::Required => true,
            Rule::Integer => is_integral(value),
            Rule::NoSpaces => match value {
                Value::String(s) => !s.chars().any(char::is_whitespace),
                _ => true,
            },
            Rule::CyclePoint => matches_text(&CYCLE_POINT_RE, value),
            Rule::CyclePointGlob => matches_text(&CYCLE_POINT_GLOB_RE, value),
            Rule::TaskId => matches_text(&TASK_ID_RE, value),
            Rule::RuntimeConfigItem => matches_text(&CONFIG_ITEM_RE, value),
        };

        if passed {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required => "Required",
            Rule::Integer => "Integer",
            Rule::NoSpaces => "Cannot contain spaces",
            Rule::CyclePoint => "Invalid Cycle Point",
            Rule::CyclePointGlob => "Invalid Cycle Point Glob",
            Rule::TaskId | Rule::RuntimeConfigItem => "Invalid",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .find(|r| r.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown rule '{}'", s))
    }
}

/// Run every rule in order, collecting failure messages
pub fn validate(rules: &[Rule], value: &Value) -> Vec<&'static str> {
    rules.iter().filter_map(|r| r.check(value).err()).collect()
}

/// Falsy values in the sense of a browser form model
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
        }
        _ => false,
    }
}

fn matches_text(re: &Regex, value: &Value) -> bool {
    match value {
        Value::String(s) => re.is_match(s),
        Value::Number(n) => re.is_match(&n.to_string()),
        _ => false,
    }
}
