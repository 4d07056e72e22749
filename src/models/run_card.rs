//! Run Card Model
//!
//! Scalar run-card options attached to a process definition. Values are
//! rendered the way MadGraph expects them in `set <key> <value>` lines.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Run-card key for the number of events to generate
pub const NEVENTS: &str = "nevents";

/// Run-card key for the lower HT cut
pub const IHTMIN: &str = "ihtmin";

/// Run-card key for the upper HT cut
pub const IHTMAX: &str = "ihtmax";

/// MadGraph's "no upper limit" value for `ihtmax`
pub const UNBOUNDED: i64 = -1;

/// A single run-card value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardValue {
    /// Boolean flag, rendered as `True`/`False`
    Bool(bool),
    /// Integer option
    Int(i64),
    /// Floating point option
    Float(f64),
    /// Free text option
    Text(String),
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Bool(true) => write!(f, "True"),
            CardValue::Bool(false) => write!(f, "False"),
            CardValue::Int(v) => write!(f, "{}", v),
            CardValue::Float(v) => write!(f, "{}", v),
            CardValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for CardValue {
    fn from(v: bool) -> Self {
        CardValue::Bool(v)
    }
}

impl From<i64> for CardValue {
    fn from(v: i64) -> Self {
        CardValue::Int(v)
    }
}

impl From<u32> for CardValue {
    fn from(v: u32) -> Self {
        CardValue::Int(i64::from(v))
    }
}

impl From<u64> for CardValue {
    fn from(v: u64) -> Self {
        CardValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CardValue {
    fn from(v: f64) -> Self {
        CardValue::Float(v)
    }
}

impl From<&str> for CardValue {
    fn from(v: &str) -> Self {
        CardValue::Text(v.to_string())
    }
}

impl From<String> for CardValue {
    fn from(v: String) -> Self {
        CardValue::Text(v)
    }
}

/// Ordered option-name to value mapping.
///
/// Cloning copies every value, so a cloned card never observes edits made
/// to the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunCard {
    entries: BTreeMap<String, CardValue>,
}

impl RunCard {
    /// Create an empty run card
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<CardValue>) -> Option<CardValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up an option
    pub fn get(&self, key: &str) -> Option<&CardValue> {
        self.entries.get(key)
    }

    /// Integer view of an option, if it holds one
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.entries.get(key) {
            Some(CardValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Copy every entry of `other` into this card, overriding existing keys
    pub fn merge(&mut self, other: &RunCard) {
        for (key, value) in other.iter() {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CardValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<CardValue>> FromIterator<(K, V)> for RunCard {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
