//! Presentation of decisions and rules in the terminal.
//!
//! The evaluator knows nothing about labels; the mapping from decision
//! code to wording lives only here.

use scholarship_eval::{Decision, Rule, RuleEntry, RuleSet};

use crate::OutputFormat;

/// Human wording for a decision code.
pub(crate) fn decision_label(code: &str) -> &'static str {
    match code {
        "AWARD_FULL" => "Full Scholarship",
        "AWARD_PARTIAL" => "Partial Scholarship",
        "REVIEW" => "Manual Review Recommended",
        "REJECT" => "Not Eligible",
        _ => "No decision",
    }
}

/// Text block for a decision, indented by `indent`.
pub(crate) fn decision_text(decision: &Decision, indent: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}[{}] {}\n",
        indent,
        decision.decision,
        decision_label(&decision.decision)
    ));
    out.push_str(&format!("{}Reason: {}\n", indent, decision.reason));
    if let Some(rule) = &decision.triggered_rule {
        out.push_str(&format!("{}Triggered rule: {}\n", indent, rule));
    }
    out
}

pub(crate) fn print_decision(decision: &Decision, output: OutputFormat) {
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&decision.to_json())
                    .unwrap_or_else(|e| format!("serialization error: {}", e))
            );
        }
        OutputFormat::Text => {
            println!("Result");
            print!("{}", decision_text(decision, "  "));
        }
    }
}

/// One-line summary of a rule followed by its conditions.
pub(crate) fn rule_text(rule: &Rule) -> String {
    let mut out = format!(
        "[{}] {} -> {}\n",
        rule.priority, rule.name, rule.action.decision
    );
    if rule.conditions.is_empty() {
        out.push_str("    (always)\n");
    }
    for c in &rule.conditions {
        out.push_str(&format!("    {}\n", c));
    }
    out
}

/// Text listing of a rule set in input order.
pub(crate) fn rule_set_text(set: &RuleSet) -> String {
    let mut out = String::new();
    for entry in set.entries() {
        match entry {
            RuleEntry::Active(rule) => out.push_str(&rule_text(rule)),
            RuleEntry::Malformed {
                index,
                name,
                reason,
                ..
            } => out.push_str(&malformed_text(*index, name.as_deref(), reason)),
        }
    }
    out
}

pub(crate) fn malformed_text(index: usize, name: Option<&str>, reason: &str) -> String {
    format!(
        "[skipped] rule #{} ({}): {}\n",
        index,
        name.unwrap_or("unnamed"),
        reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_known_codes() {
        assert_eq!(decision_label("AWARD_FULL"), "Full Scholarship");
        assert_eq!(decision_label("AWARD_PARTIAL"), "Partial Scholarship");
        assert_eq!(decision_label("REVIEW"), "Manual Review Recommended");
        assert_eq!(decision_label("REJECT"), "Not Eligible");
        assert_eq!(decision_label("NO_MATCH"), "No decision");
        assert_eq!(decision_label("WAITLIST"), "No decision");
    }

    #[test]
    fn decision_text_without_rule() {
        let text = decision_text(&Decision::no_match(), "");
        assert_eq!(
            text,
            "[NO_MATCH] No decision\nReason: No rule matched the applicant's profile\n"
        );
    }

    #[test]
    fn decision_text_with_rule() {
        let d = Decision {
            decision: "REJECT".to_string(),
            reason: "Too many disciplinary records".to_string(),
            triggered_rule: Some("Serious disciplinary record".to_string()),
        };
        let text = decision_text(&d, "  ");
        assert!(text.contains("  [REJECT] Not Eligible\n"));
        assert!(text.contains("  Triggered rule: Serious disciplinary record\n"));
    }

    #[test]
    fn rule_listing() {
        let set = RuleSet::default_rules();
        let text = rule_set_text(&set);
        assert!(text.starts_with("[100] Top merit candidate -> AWARD_FULL\n    cgpa >= 3.7\n"));
        assert!(text.contains("[95] Low CGPA - not eligible -> REJECT\n    cgpa < 2.5\n"));
    }

    #[test]
    fn malformed_listing() {
        assert_eq!(
            malformed_text(2, None, "missing 'action'"),
            "[skipped] rule #2 (unnamed): missing 'action'\n"
        );
    }
}
