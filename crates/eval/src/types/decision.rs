//! The outcome of one evaluation.

use serde::{Deserialize, Serialize};

use super::rule::Rule;

/// Decision code returned when no rule triggers.
pub const NO_MATCH: &str = "NO_MATCH";

/// Reason returned when no rule triggers.
pub const NO_MATCH_REASON: &str = "No rule matched the applicant's profile";

/// Exactly one of these is produced per evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub decision: String,
    pub reason: String,
    /// Name of the winning rule; absent only for `NO_MATCH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_rule: Option<String>,
}

impl Decision {
    pub fn no_match() -> Self {
        Decision {
            decision: NO_MATCH.to_string(),
            reason: NO_MATCH_REASON.to_string(),
            triggered_rule: None,
        }
    }

    pub fn from_rule(rule: &Rule) -> Self {
        Decision {
            decision: rule.action.decision.clone(),
            reason: rule.action.reason.clone(),
            triggered_rule: Some(rule.name.clone()),
        }
    }

    /// Whether some rule triggered.
    pub fn is_match(&self) -> bool {
        self.triggered_rule.is_some()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_match_omits_triggered_rule() {
        let d = Decision::no_match();
        assert!(!d.is_match());
        assert_eq!(
            d.to_json(),
            json!({
                "decision": "NO_MATCH",
                "reason": "No rule matched the applicant's profile"
            })
        );
    }

    #[test]
    fn match_includes_triggered_rule() {
        let d = Decision {
            decision: "REVIEW".to_string(),
            reason: "High need".to_string(),
            triggered_rule: Some("Need-based review".to_string()),
        };
        assert!(d.is_match());
        assert_eq!(d.to_json()["triggered_rule"], json!("Need-based review"));
    }

    #[test]
    fn deserializes_without_triggered_rule() {
        let d: Decision = serde_json::from_value(json!({
            "decision": "NO_MATCH",
            "reason": "No rule matched the applicant's profile"
        }))
        .unwrap();
        assert_eq!(d, Decision::no_match());
    }
}
