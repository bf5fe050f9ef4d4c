mod check;
mod eval;
mod rules;
mod validate;

pub(crate) use check::cmd_check;
pub(crate) use eval::cmd_eval;
pub(crate) use rules::cmd_rules;
pub(crate) use validate::cmd_validate;

use std::path::Path;
use std::process;

use scholarship_eval::{ParseError, ParseMode, RuleSet};

use crate::config::Config;
use crate::loader::{load_rules, LoadedRules};
use crate::{report_error, OutputFormat, EXIT_INVALID_RULES};

/// Load rules or exit: 1 when the file cannot be read.
fn load_or_exit(
    config: &Config,
    explicit: Option<&Path>,
    mode: ParseMode,
    output: OutputFormat,
    quiet: bool,
) -> LoadedRules {
    match load_rules(config, explicit, mode) {
        Ok(loaded) => loaded,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

/// The parsed rule set, or exit 2 with the parse error.
fn parsed_or_exit<'a>(
    loaded: &'a LoadedRules,
    hint: &str,
    output: OutputFormat,
    quiet: bool,
) -> &'a RuleSet {
    match &loaded.parsed {
        Ok(set) => set,
        Err(e) => {
            report_parse_error(loaded, e, hint, output, quiet);
            process::exit(EXIT_INVALID_RULES);
        }
    }
}

fn report_parse_error(
    loaded: &LoadedRules,
    err: &ParseError,
    hint: &str,
    output: OutputFormat,
    quiet: bool,
) {
    match output {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "error": format!("invalid rules in {}: {}", loaded.source, err),
                "hint": hint,
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("invalid rules in {}: {}", loaded.source, err);
                eprintln!("  {}", hint);
            }
        }
    }
}
