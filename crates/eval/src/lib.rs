//! Scholarship decision evaluator -- accepts rule text + applicant facts,
//! produces the single highest-priority decision.
//!
//! Two pieces, composed by the caller:
//! - the rule store ([`store::parse`]) turns rule text into a [`RuleSet`]
//! - the evaluator ([`rules::evaluate`]) picks the winning rule for a
//!   [`FactSet`], or `NO_MATCH`
//!
//! Both are pure functions. A rule set is never mutated after parsing;
//! a new rule text yields a new set.

pub mod applicant;
pub mod assemble;
pub mod numeric;
pub mod rules;
pub mod store;
pub mod types;

pub use applicant::{Applicant, ApplicantError, Field};
pub use rules::evaluate;
pub use store::{parse, parse_strict, parse_with_mode, DEFAULT_RULES};
pub use types::{
    Action, Condition, Decision, EvalError, FactError, FactSet, Operator, ParseError, ParseMode,
    Rule, RuleEntry, RuleSet, Value,
};

/// Evaluate rule text against a facts JSON object.
///
/// This is the top-level text-in, decision-out entry point. A rule text
/// that does not parse is an [`EvalError::Rules`], never a `NO_MATCH`.
///
/// # Arguments
/// * `rules_text` - JSON array of rule objects
/// * `facts` - JSON object mapping field names to values
/// * `mode` - whether malformed rule objects fail the parse
pub fn evaluate_text(
    rules_text: &str,
    facts: &serde_json::Value,
    mode: ParseMode,
) -> Result<Decision, EvalError> {
    let rule_set = store::parse_with_mode(rules_text, mode)?;
    let fact_set = assemble::assemble_facts(facts)?;
    Ok(rules::evaluate(&fact_set, &rule_set))
}

// ──────────────────────────────────────────────
// Integration tests
// ──────────────────────────────────────────────
