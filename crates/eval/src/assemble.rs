//! FactSet assembly from facts JSON.
//!
//! Facts are a flat JSON object of field name to value:
//! - numbers become `Value::Number` (exact decimals)
//! - strings become `Value::Text`
//! - `null` means the fact is absent
//! - anything else is rejected
//!
//! No field is required here. A condition on a missing field simply
//! does not hold (see `rules::condition_holds`).

use crate::types::{json_kind, FactError, FactSet, Value};

/// Assemble a FactSet from a facts JSON object.
pub fn assemble_facts(facts_json: &serde_json::Value) -> Result<FactSet, FactError> {
    let facts_obj = facts_json
        .as_object()
        .ok_or_else(|| FactError::NotAnObject {
            found: json_kind(facts_json).to_string(),
        })?;

    let mut fact_set = FactSet::new();

    for (field, raw) in facts_obj {
        if raw.is_null() {
            continue;
        }
        let value = Value::from_json(raw).ok_or_else(|| match raw {
            serde_json::Value::Number(n) => FactError::OutOfRange {
                fact: field.clone(),
                value: n.to_string(),
            },
            _ => FactError::Unsupported {
                fact: field.clone(),
                found: json_kind(raw).to_string(),
            },
        })?;
        fact_set.insert(field.clone(), value);
    }

    Ok(fact_set)
}

/// Parse facts text, then assemble.
pub fn assemble_facts_text(text: &str) -> Result<FactSet, FactError> {
    let facts_json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| FactError::from_json_error(&e))?;
    assemble_facts(&facts_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn assemble_numbers_and_text() {
        let facts = assemble_facts(&json!({
            "cgpa": 3.85,
            "family_income": 5000,
            "faculty": "engineering"
        }))
        .unwrap();
        assert_eq!(
            facts.get("cgpa"),
            Some(&Value::Number(Decimal::from_str("3.85").unwrap()))
        );
        assert_eq!(facts.get("family_income"), Some(&Value::from(5000)));
        assert_eq!(facts.get("faculty"), Some(&Value::from("engineering")));
    }

    #[test]
    fn null_fact_is_absent() {
        let facts = assemble_facts(&json!({"cgpa": null})).unwrap();
        assert!(facts.is_empty());
    }

    #[test]
    fn rejects_boolean_fact() {
        let err = assemble_facts(&json!({"scholar": true})).unwrap_err();
        assert_eq!(
            err,
            FactError::Unsupported {
                fact: "scholar".to_string(),
                found: "boolean".to_string()
            }
        );
    }

    #[test]
    fn huge_number_is_out_of_range_not_unsupported() {
        let err = assemble_facts_text(r#"{"family_income": 1e40}"#).unwrap_err();
        assert_eq!(
            err,
            FactError::OutOfRange {
                fact: "family_income".to_string(),
                value: "1e40".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "fact 'family_income' is outside the supported numeric range: 1e40"
        );
    }

    #[test]
    fn rejects_non_object() {
        let err = assemble_facts(&json!([1, 2])).unwrap_err();
        assert_eq!(
            err,
            FactError::NotAnObject {
                found: "array".to_string()
            }
        );
    }

    #[test]
    fn text_syntax_error() {
        let err = assemble_facts_text("{\"cgpa\": ").unwrap_err();
        assert!(matches!(err, FactError::Syntax { line: 1, .. }), "{:?}", err);
    }
}
