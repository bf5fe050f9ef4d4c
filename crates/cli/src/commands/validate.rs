use std::path::Path;
use std::process;

use crate::{report_error, OutputFormat, EXIT_INVALID_RULES};

static RULES_SCHEMA_STR: &str = include_str!("../../../../docs/rules-schema.json");

/// Check a rule file against the rule JSON Schema.
///
/// Stricter than `check`: a rule object the lenient parser would skip
/// is a schema violation here, and so are keys the parser ignores.
/// Exits 2 when the file is not a valid rule text, 1 when it cannot be read.
pub(crate) fn cmd_validate(rules_path: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(RULES_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("internal error: failed to parse embedded rules schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc_str = match std::fs::read_to_string(rules_path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", rules_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc: serde_json::Value = match serde_json::from_str(&doc_str) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", rules_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(EXIT_INVALID_RULES);
        }
    };

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
        return;
    }

    match output {
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid");
                for err in &errors {
                    eprintln!("  - {}", err);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": false,
                "errors": errors
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
    }
    process::exit(EXIT_INVALID_RULES);
}
