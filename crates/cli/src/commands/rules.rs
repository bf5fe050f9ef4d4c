use std::path::Path;

use scholarship_eval::RuleSet;

use crate::config::Config;
use crate::loader::{LoadedRules, RuleSource};
use crate::OutputFormat;

use super::{load_or_exit, parsed_or_exit};

/// Print the active rule text so it can be edited and passed back with
/// `--rules`.
pub(crate) fn cmd_rules(
    config: &Config,
    rules_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let loaded = load_or_exit(config, rules_path, config.parse_mode(false), output, quiet);
    let rules = parsed_or_exit(&loaded, "fix the rule text and try again", output, quiet);

    match output {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "source": loaded.source.to_string(),
                "rules": rules,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            println!("{}", editable_text(&loaded, rules));
        }
    }
}

/// The built-in set is printed as written; a rule file is re-serialized,
/// which normalizes its layout.
fn editable_text(loaded: &LoadedRules, rules: &RuleSet) -> String {
    match loaded.source {
        RuleSource::Default => loaded.text.trim_end().to_string(),
        RuleSource::File(_) => rules.to_json_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarship_eval::{ParseMode, DEFAULT_RULES};

    #[test]
    fn builtin_rules_print_verbatim() {
        let loaded = LoadedRules::builtin(ParseMode::Lenient);
        let rules = loaded.parsed.clone().unwrap();
        assert_eq!(editable_text(&loaded, &rules), DEFAULT_RULES.trim_end());
    }

    #[test]
    fn file_rules_are_reformatted() {
        let loaded = LoadedRules::from_text(
            RuleSource::File("rules.json".into()),
            r#"[{"name":"A","priority":1,"conditions":[],"action":{"decision":"REVIEW","reason":"r"}}]"#
                .to_string(),
            ParseMode::Lenient,
        );
        let rules = loaded.parsed.clone().unwrap();
        let text = editable_text(&loaded, &rules);
        assert!(text.starts_with("[\n  {\n    \"name\": \"A\""), "{}", text);
    }
}
