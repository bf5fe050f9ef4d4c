//! Numeric model and comparison semantics using `rust_decimal`.
//!
//! Fact values and thresholds are exact decimals. No `f64` anywhere in
//! the evaluation path: JSON numbers are converted through their textual
//! form, so a threshold written as `3.7` compares equal to a CGPA of `3.7`.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::{Operator, Value};

/// Convert a JSON number to an exact Decimal.
///
/// Integers convert directly; floats are parsed from their shortest
/// textual representation, falling back to scientific notation.
/// Returns `None` when the number is outside Decimal's range.
pub fn decimal_from_json(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Parse a user-entered decimal such as `3.85` or `12000`.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Compare a fact value against a threshold.
///
/// Numbers compare numerically and text compares lexicographically.
/// Mixed Number/Text pairs are never equal, so `!=` holds and every
/// other operator fails. This never errors: a comparison that makes no
/// sense simply does not hold.
pub fn compare_values(fact: &Value, op: Operator, threshold: &Value) -> bool {
    match (fact, threshold) {
        (Value::Number(l), Value::Number(r)) => op.holds(l.cmp(r)),
        (Value::Text(l), Value::Text(r)) => op.holds(l.as_str().cmp(r.as_str())),
        _ => op == Operator::Ne,
    }
}

impl Operator {
    /// Whether this operator accepts the given ordering of fact vs threshold.
    pub fn holds(self, ord: Ordering) -> bool {
        match self {
            Operator::Eq => ord == Ordering::Equal,
            Operator::Ne => ord != Ordering::Equal,
            Operator::Gt => ord == Ordering::Greater,
            Operator::Ge => ord != Ordering::Less,
            Operator::Lt => ord == Ordering::Less,
            Operator::Le => ord != Ordering::Greater,
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
