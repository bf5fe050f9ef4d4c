use std::path::Path;

use scholarship_eval::RuleEntry;

use crate::config::Config;
use crate::render::{malformed_text, rule_set_text};
use crate::OutputFormat;

use super::{load_or_exit, parsed_or_exit};

/// Parse rule text and report what the evaluator will see.
///
/// Malformed rule objects are warnings in lenient mode; the command
/// still succeeds. Unparsable text exits with status 2.
pub(crate) fn cmd_check(
    config: &Config,
    file: Option<&Path>,
    strict: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let loaded = load_or_exit(config, file, config.parse_mode(strict), output, quiet);
    let rules = parsed_or_exit(&loaded, "fix the rule text and run check again", output, quiet);

    let active = rules.active().count();
    let malformed: Vec<_> = rules
        .malformed()
        .filter_map(|e| match e {
            RuleEntry::Malformed {
                index,
                name,
                reason,
                ..
            } => Some((*index, name.as_deref(), reason.as_str())),
            RuleEntry::Active(_) => None,
        })
        .collect();

    match output {
        OutputFormat::Json => {
            let warnings: Vec<serde_json::Value> = malformed
                .iter()
                .map(|(index, name, reason)| {
                    serde_json::json!({
                        "index": index,
                        "name": name,
                        "reason": reason,
                    })
                })
                .collect();
            let json = serde_json::json!({
                "valid": true,
                "source": loaded.source.to_string(),
                "rules": rules.len(),
                "active": active,
                "malformed": warnings,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            if quiet {
                return;
            }
            println!(
                "rules loaded from {}: {} rules, {} active",
                loaded.source,
                rules.len(),
                active
            );
            for (index, name, reason) in &malformed {
                eprint!("warning: {}", malformed_text(*index, *name, reason));
            }
            println!();
            print!("{}", rule_set_text(rules));
        }
    }
}
