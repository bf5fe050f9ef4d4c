//! Rule representation and JSON deserialization.
//!
//! Rule text is a JSON array of rule objects:
//!
//! ```json
//! [
//!   {
//!     "name": "Low CGPA - not eligible",
//!     "priority": 95,
//!     "conditions": [["cgpa", "<", 2.5]],
//!     "action": { "decision": "REJECT", "reason": "CGPA below minimum" }
//!   }
//! ]
//! ```
//!
//! Operators are resolved to [`Operator`] once, here, so evaluation never
//! dispatches on strings. Objects that do not have this shape become
//! [`RuleEntry::Malformed`] and never trigger.

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeSeq, SerializeStruct, SerializeTuple};
use serde::{Serialize, Serializer};

use rust_decimal::prelude::ToPrimitive;

use super::values::Value;
use super::{json_kind, ParseError};
use crate::numeric::decimal_from_json;

// ──────────────────────────────────────────────
// Operators
// ──────────────────────────────────────────────

/// The six comparison operators a condition may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operator '{}'", s))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Conditions, actions, rules
// ──────────────────────────────────────────────

/// A single `field op threshold` comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub op: Operator,
    pub threshold: Value,
}

impl Condition {
    pub fn new(field: &str, op: Operator, threshold: impl Into<Value>) -> Self {
        Condition {
            field: field.to_string(),
            op,
            threshold: threshold.into(),
        }
    }

    /// Parse a `[field, op, threshold]` triple.
    pub fn from_json(v: &serde_json::Value) -> Result<Condition, String> {
        let parts = v
            .as_array()
            .ok_or_else(|| format!("condition must be an array, found {}", json_kind(v)))?;
        if parts.len() != 3 {
            return Err(format!(
                "condition must have 3 elements [field, op, threshold], found {}",
                parts.len()
            ));
        }
        let field = parts[0].as_str().ok_or_else(|| {
            format!(
                "condition field must be a string, found {}",
                json_kind(&parts[0])
            )
        })?;
        let op_str = parts[1].as_str().ok_or_else(|| {
            format!(
                "condition operator must be a string, found {}",
                json_kind(&parts[1])
            )
        })?;
        let op = op_str.parse::<Operator>()?;
        let threshold = Value::from_json(&parts[2]).ok_or_else(|| match &parts[2] {
            serde_json::Value::Number(n) => format!(
                "threshold for '{}' is outside the supported numeric range: {}",
                field, n
            ),
            other => format!(
                "threshold for '{}' must be a number or string, found {}",
                field,
                json_kind(other)
            ),
        })?;
        Ok(Condition {
            field: field.to_string(),
            op,
            threshold,
        })
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.threshold)
    }
}

/// What a triggered rule decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub decision: String,
    pub reason: String,
}

/// A named, prioritized set of conditions with an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub priority: i64,
    pub conditions: Vec<Condition>,
    pub action: Action,
}

impl Rule {
    /// Deserialize a rule object. Returns a human-readable reason on
    /// failure; the caller decides whether that is fatal.
    pub fn from_json(v: &serde_json::Value) -> Result<Rule, String> {
        let obj = v
            .as_object()
            .ok_or_else(|| format!("rule must be an object, found {}", json_kind(v)))?;

        let name = obj
            .get("name")
            .ok_or("missing 'name'")?
            .as_str()
            .ok_or("'name' must be a string")?
            .to_string();

        let priority = match obj.get("priority").ok_or("missing 'priority'")? {
            serde_json::Value::Number(n) => whole_number(n),
            _ => None,
        }
        .ok_or("'priority' must be an integer")?;

        let conditions = obj
            .get("conditions")
            .ok_or("missing 'conditions'")?
            .as_array()
            .ok_or("'conditions' must be an array")?
            .iter()
            .enumerate()
            .map(|(i, c)| Condition::from_json(c).map_err(|e| format!("condition {}: {}", i, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let action_obj = obj
            .get("action")
            .ok_or("missing 'action'")?
            .as_object()
            .ok_or("'action' must be an object")?;
        let decision = action_obj
            .get("decision")
            .and_then(|d| d.as_str())
            .ok_or("'action.decision' must be a string")?
            .to_string();
        let reason = action_obj
            .get("reason")
            .and_then(|r| r.as_str())
            .ok_or("'action.reason' must be a string")?
            .to_string();

        Ok(Rule {
            name,
            priority,
            conditions,
            action: Action { decision, reason },
        })
    }
}

/// A JSON number with no fractional part, as an `i64`. `100.0` and `1e2`
/// count; JSON Schema's `integer` type accepts the same values.
fn whole_number(n: &serde_json::Number) -> Option<i64> {
    let d = decimal_from_json(n)?;
    if !d.fract().is_zero() {
        return None;
    }
    d.to_i64()
}

// ──────────────────────────────────────────────
// Rule sets
// ──────────────────────────────────────────────

/// One element of a parsed rule array, in input position.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleEntry {
    Active(Rule),
    /// A rule object that could not be interpreted. It is kept so the
    /// rule text round-trips, but it never triggers.
    Malformed {
        index: usize,
        name: Option<String>,
        reason: String,
        raw: serde_json::Value,
    },
}

impl RuleEntry {
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            RuleEntry::Active(rule) => Some(rule),
            RuleEntry::Malformed { .. } => None,
        }
    }
}

/// How strictly rule objects are checked while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Malformed rule objects are kept as [`RuleEntry::Malformed`].
    #[default]
    Lenient,
    /// The first malformed rule object fails the whole parse.
    Strict,
}

/// An ordered, immutable sequence of rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    entries: Vec<RuleEntry>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleSet {
            entries: rules.into_iter().map(RuleEntry::Active).collect(),
        }
    }

    pub fn from_entries(entries: Vec<RuleEntry>) -> Self {
        RuleSet { entries }
    }

    /// Build a rule set from an already-parsed JSON document.
    pub fn from_json(doc: &serde_json::Value, mode: ParseMode) -> Result<RuleSet, ParseError> {
        let items = doc.as_array().ok_or_else(|| ParseError::NotAnArray {
            found: json_kind(doc).to_string(),
        })?;

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match Rule::from_json(item) {
                Ok(rule) => entries.push(RuleEntry::Active(rule)),
                Err(reason) => {
                    if mode == ParseMode::Strict {
                        return Err(ParseError::InvalidRule {
                            index,
                            message: reason,
                        });
                    }
                    entries.push(RuleEntry::Malformed {
                        index,
                        name: item
                            .get("name")
                            .and_then(|n| n.as_str())
                            .map(|s| s.to_string()),
                        reason,
                        raw: item.clone(),
                    });
                }
            }
        }
        Ok(RuleSet { entries })
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    /// Well-formed rules, in input order.
    pub fn active(&self) -> impl Iterator<Item = &Rule> {
        self.entries.iter().filter_map(RuleEntry::as_rule)
    }

    /// Entries that will never trigger, in input order.
    pub fn malformed(&self) -> impl Iterator<Item = &RuleEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e, RuleEntry::Malformed { .. }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render back to rule text (pretty-printed JSON array).
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "[]".to_string())
    }
}

// ──────────────────────────────────────────────
// Serialization back to rule text
// ──────────────────────────────────────────────

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut t = serializer.serialize_tuple(3)?;
        t.serialize_element(&self.field)?;
        t.serialize_element(self.op.as_str())?;
        t.serialize_element(&self.threshold)?;
        t.end()
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Rule", 4)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("priority", &self.priority)?;
        s.serialize_field("conditions", &self.conditions)?;
        s.serialize_field("action", &self.action)?;
        s.end()
    }
}

impl Serialize for RuleEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleEntry::Active(rule) => rule.serialize(serializer),
            RuleEntry::Malformed { raw, .. } => raw.serialize(serializer),
        }
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for entry in &self.entries {
            seq.serialize_element(entry)?;
        }
        seq.end()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
