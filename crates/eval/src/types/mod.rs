//! Value, fact, rule and decision types for the scholarship evaluator.
//!
//! Rules are deserialized from rule text (a JSON array); facts come from
//! the form or a facts JSON object. Nothing here holds global state.

pub mod decision;
pub mod fact;
pub mod rule;
pub mod values;

pub use decision::Decision;
pub use fact::FactSet;
pub use rule::{Action, Condition, Operator, ParseMode, Rule, RuleEntry, RuleSet};
pub use values::Value;

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Rule text could not be turned into a usable rule set.
///
/// Callers must not evaluate after receiving one of these; the refusal is
/// reported separately from a `NO_MATCH` decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text is not well-formed JSON.
    #[error("malformed rule text at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    /// Well-formed JSON whose top-level value is not an array.
    #[error("rule text must be a JSON array of rule objects, found {found}")]
    NotAnArray { found: String },
    /// A rule object failed validation (strict mode only).
    #[error("rule #{index} is invalid: {message}")]
    InvalidRule { index: usize, message: String },
}

impl ParseError {
    pub(crate) fn from_json_error(e: &serde_json::Error) -> ParseError {
        ParseError::Syntax {
            line: e.line(),
            column: e.column(),
            message: strip_position(e),
        }
    }
}

/// Facts could not be assembled from input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactError {
    #[error("malformed facts text at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    #[error("facts must be a JSON object, found {found}")]
    NotAnObject { found: String },
    #[error("fact '{fact}' must be a number or string, found {found}")]
    Unsupported { fact: String, found: String },
    /// A number too large or too precise for exact decimal arithmetic.
    #[error("fact '{fact}' is outside the supported numeric range: {value}")]
    OutOfRange { fact: String, value: String },
}

impl FactError {
    pub(crate) fn from_json_error(e: &serde_json::Error) -> FactError {
        FactError::Syntax {
            line: e.line(),
            column: e.column(),
            message: strip_position(e),
        }
    }
}

/// Errors from the text-level evaluation entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("rules not usable: {0}")]
    Rules(#[from] ParseError),
    #[error("facts not usable: {0}")]
    Facts(#[from] FactError),
}

/// serde_json appends " at line L column C" to its messages; the position
/// is carried in dedicated fields instead.
fn strip_position(e: &serde_json::Error) -> String {
    let full = e.to_string();
    let suffix = format!(" at line {} column {}", e.line(), e.column());
    full.strip_suffix(&suffix).unwrap_or(&full).to_string()
}

/// Short JSON type name for error messages.
pub(crate) fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_carries_position_once() {
        let e = serde_json::from_str::<serde_json::Value>("[\n  {\"name\": }").unwrap_err();
        let err = ParseError::from_json_error(&e);
        match &err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => {
                assert_eq!(*line, 2);
                assert!(*column > 0);
                assert!(!message.contains("at line"), "{}", message);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
        assert!(err.to_string().starts_with("malformed rule text at line 2"));
    }

    #[test]
    fn shape_error_message_differs_from_syntax() {
        let shape = ParseError::NotAnArray {
            found: "object".to_string(),
        };
        assert_eq!(
            shape.to_string(),
            "rule text must be a JSON array of rule objects, found object"
        );
    }

    #[test]
    fn eval_error_wraps_sources() {
        let err: EvalError = ParseError::NotAnArray {
            found: "null".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("rules not usable:"));

        let err: EvalError = FactError::NotAnObject {
            found: "array".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "facts not usable: facts must be a JSON object, found array");
    }

    #[test]
    fn json_kind_names() {
        assert_eq!(json_kind(&serde_json::json!(null)), "null");
        assert_eq!(json_kind(&serde_json::json!([])), "array");
        assert_eq!(json_kind(&serde_json::json!("x")), "string");
    }
}
