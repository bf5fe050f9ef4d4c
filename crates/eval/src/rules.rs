//! Prioritized rule evaluation.
//!
//! Every rule is tested against the facts in input order. A rule triggers
//! when all of its conditions hold (an empty condition list always holds).
//! Among triggered rules the highest priority wins; on a tie the rule that
//! appears first in the input wins. No rule fires another rule.
//!
//! Evaluation is total: a missing fact, a type mismatch or a malformed
//! rule entry makes the affected rule not trigger, and never aborts the
//! evaluation of the remaining rules.

use crate::numeric::compare_values;
use crate::types::{Condition, Decision, FactSet, Rule, RuleSet};

/// Decide for one applicant. Pure: same inputs, same decision.
pub fn evaluate(facts: &FactSet, rules: &RuleSet) -> Decision {
    let mut winner: Option<&Rule> = None;

    for rule in rules.active() {
        if !rule_triggers(rule, facts) {
            continue;
        }
        tracing::debug!(rule = %rule.name, priority = rule.priority, "rule triggered");
        // Strictly greater: an equal priority never displaces an earlier rule.
        if winner.map_or(true, |w| rule.priority > w.priority) {
            winner = Some(rule);
        }
    }

    match winner {
        Some(rule) => Decision::from_rule(rule),
        None => Decision::no_match(),
    }
}

/// Whether every condition of the rule holds.
pub fn rule_triggers(rule: &Rule, facts: &FactSet) -> bool {
    rule.conditions.iter().all(|c| condition_holds(c, facts))
}

/// Whether a single condition holds.
///
/// A condition on a field absent from the facts does not hold, whatever
/// its operator (including `!=`).
pub fn condition_holds(condition: &Condition, facts: &FactSet) -> bool {
    match facts.get(&condition.field) {
        Some(value) => compare_values(value, condition.op, &condition.threshold),
        None => false,
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
