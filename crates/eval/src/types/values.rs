//! Runtime value types and JSON conversion helpers.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::numeric::decimal_from_json;

// ──────────────────────────────────────────────
// Runtime values
// ──────────────────────────────────────────────

/// A fact value or condition threshold.
/// All numeric values use `rust_decimal::Decimal` -- never `f64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(Decimal),
    Text(String),
}

impl Value {
    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Text(_) => "Text",
        }
    }

    /// Convert a JSON scalar into a Value. Returns `None` for booleans,
    /// nulls, arrays and objects, which have no place in a condition.
    pub fn from_json(v: &serde_json::Value) -> Option<Value> {
        match v {
            serde_json::Value::Number(n) => decimal_from_json(n).map(Value::Number),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            _ => None,
        }
    }

    /// Serialize back to JSON. Whole numbers are emitted as integers.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(d) => number_to_json(*d),
            Value::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(d) => write!(f, "{}", d.normalize()),
            Value::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Number(d)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Decimal::from(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Decimal::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn number_to_json(d: Decimal) -> serde_json::Value {
    let d = d.normalize();
    if d.scale() == 0 {
        if let Some(i) = d.to_i64() {
            return serde_json::Value::from(i);
        }
    }
    // Non-integral decimals go through the textual form so that `3.7`
    // round-trips as `3.7` rather than a binary approximation.
    serde_json::from_str::<serde_json::Value>(&d.to_string())
        .unwrap_or_else(|_| serde_json::Value::String(d.to_string()))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
