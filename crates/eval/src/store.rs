//! Rule store: turns rule text into a [`RuleSet`].
//!
//! A user-supplied rule text replaces the built-in set entirely; there is
//! no merging with the defaults. Every parse yields a fresh set.

use crate::types::{ParseError, ParseMode, RuleEntry, RuleSet};

/// The built-in rule set, used when no rule text is supplied.
pub const DEFAULT_RULES: &str = r#"[
  {
    "name": "Top merit candidate",
    "priority": 100,
    "conditions": [
      ["cgpa", ">=", 3.7],
      ["co_curricular_score", ">=", 80],
      ["family_income", "<=", 8000],
      ["disciplinary_actions", "==", 0]
    ],
    "action": {
      "decision": "AWARD_FULL",
      "reason": "Excellent academic & co-curricular performance, with acceptable need"
    }
  },
  {
    "name": "Good candidate - partial scholarship",
    "priority": 80,
    "conditions": [
      ["cgpa", ">=", 3.3],
      ["co_curricular_score", ">=", 60],
      ["family_income", "<=", 12000],
      ["disciplinary_actions", "<=", 1]
    ],
    "action": {
      "decision": "AWARD_PARTIAL",
      "reason": "Good academic & involvement record with moderate need"
    }
  },
  {
    "name": "Need-based review",
    "priority": 70,
    "conditions": [
      ["cgpa", ">=", 2.5],
      ["family_income", "<=", 4000]
    ],
    "action": {
      "decision": "REVIEW",
      "reason": "High need but borderline academic score"
    }
  },
  {
    "name": "Low CGPA - not eligible",
    "priority": 95,
    "conditions": [
      ["cgpa", "<", 2.5]
    ],
    "action": {
      "decision": "REJECT",
      "reason": "CGPA below minimum scholarship requirement"
    }
  },
  {
    "name": "Serious disciplinary record",
    "priority": 90,
    "conditions": [
      ["disciplinary_actions", ">=", 2]
    ],
    "action": {
      "decision": "REJECT",
      "reason": "Too many disciplinary records"
    }
  }
]
"#;

/// Parse rule text, keeping malformed rule objects as never-triggering
/// entries.
pub fn parse(text: &str) -> Result<RuleSet, ParseError> {
    parse_with_mode(text, ParseMode::Lenient)
}

/// Parse rule text, rejecting the first malformed rule object.
pub fn parse_strict(text: &str) -> Result<RuleSet, ParseError> {
    parse_with_mode(text, ParseMode::Strict)
}

pub fn parse_with_mode(text: &str, mode: ParseMode) -> Result<RuleSet, ParseError> {
    let doc: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ParseError::from_json_error(&e))?;
    let set = RuleSet::from_json(&doc, mode)?;

    for entry in set.malformed() {
        if let RuleEntry::Malformed {
            index,
            name,
            reason,
            ..
        } = entry
        {
            tracing::warn!(
                index = *index,
                name = name.as_deref().unwrap_or("<unnamed>"),
                %reason,
                "rule will never trigger"
            );
        }
    }
    tracing::debug!(
        total = set.len(),
        active = set.active().count(),
        "parsed rule text"
    );

    Ok(set)
}

impl RuleSet {
    /// The built-in default rule set.
    pub fn default_rules() -> RuleSet {
        // DEFAULT_RULES is a compile-time constant covered by tests.
        parse_strict(DEFAULT_RULES).unwrap_or_default()
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
