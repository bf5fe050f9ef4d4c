//! `scholarship.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! [rules]
//! file = "rules/2025-intake.json"
//! strict = false
//!
//! [applicant]
//! cgpa = 3.5
//! co_curricular_score = 75
//! family_income = 6000
//! ```
//!
//! A relative `rules.file` is resolved against the directory holding the
//! config file. Command-line flags override everything here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use scholarship_eval::{Applicant, Field, ParseMode};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "scholarship.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub rules: RulesConfig,
    /// Form defaults, keyed by field name.
    pub applicant: BTreeMap<String, toml::Value>,
    /// Directory of the config file, for resolving relative paths.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// `[rules]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RulesConfig {
    /// Rule file replacing the built-in set.
    pub file: Option<PathBuf>,
    /// Reject malformed rule objects at parse time.
    pub strict: bool,
}

impl Config {
    /// Load from an explicit path, else `./scholarship.toml` when present,
    /// else built-in defaults.
    ///
    /// Returns a human-readable error string on failure.
    pub fn load(explicit: Option<&Path>) -> Result<Config, String> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Config::default());
                }
                p
            }
        };
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
        let mut config = Config::parse(&content)
            .map_err(|e| format!("could not parse '{}': {}", path.display(), e))?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Config, String> {
        let config: Config = toml::from_str(content).map_err(|e| e.to_string())?;
        config.applicant()?;
        Ok(config)
    }

    /// The configured rule file, resolved against the config directory.
    pub fn rules_file(&self) -> Option<PathBuf> {
        let file = self.rules.file.as_ref()?;
        match &self.base_dir {
            Some(base) if file.is_relative() => Some(base.join(file)),
            _ => Some(file.clone()),
        }
    }

    pub fn parse_mode(&self, strict_flag: bool) -> ParseMode {
        if strict_flag || self.rules.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Form defaults with `[applicant]` values applied.
    pub fn applicant(&self) -> Result<Applicant, String> {
        let mut applicant = Applicant::default();
        for (key, value) in &self.applicant {
            let field: Field = key
                .parse()
                .map_err(|e| format!("[applicant] {}", e))?;
            let text = match value {
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::String(s) => s.clone(),
                other => {
                    return Err(format!(
                        "[applicant] {} must be a number, found {}",
                        key,
                        other.type_str()
                    ))
                }
            };
            applicant
                .set_text(field, &text)
                .map_err(|e| format!("[applicant] {}", e))?;
        }
        Ok(applicant)
    }
}
