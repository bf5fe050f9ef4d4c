//! Resolve and parse the active rule text.
//!
//! Precedence: explicit `--rules` file, then `[rules] file` from the
//! config, then the built-in default set. A rule file fully replaces the
//! default set.

use std::fmt;
use std::path::{Path, PathBuf};

use scholarship_eval::{ParseError, ParseMode, RuleSet, DEFAULT_RULES};

use crate::config::Config;

/// Where the active rule text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RuleSource {
    Default,
    File(PathBuf),
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Default => f.write_str("built-in rules"),
            RuleSource::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Rule text plus the outcome of parsing it. A parse failure is kept
/// rather than returned so that callers can report it and refuse to
/// evaluate.
#[derive(Debug, Clone)]
pub(crate) struct LoadedRules {
    pub source: RuleSource,
    pub text: String,
    pub parsed: Result<RuleSet, ParseError>,
}

impl LoadedRules {
    pub fn from_text(source: RuleSource, text: String, mode: ParseMode) -> Self {
        let parsed = scholarship_eval::parse_with_mode(&text, mode);
        LoadedRules {
            source,
            text,
            parsed,
        }
    }

    pub fn builtin(mode: ParseMode) -> Self {
        LoadedRules::from_text(RuleSource::Default, DEFAULT_RULES.to_string(), mode)
    }

    /// Read and parse a rule file. Only I/O failures are errors here.
    pub fn from_file(path: &Path, mode: ParseMode) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("could not read rule file '{}': {}", path.display(), e))?;
        Ok(LoadedRules::from_text(
            RuleSource::File(path.to_path_buf()),
            text,
            mode,
        ))
    }
}

/// Load the rule text selected by flag, config, or default.
pub(crate) fn load_rules(
    config: &Config,
    explicit: Option<&Path>,
    mode: ParseMode,
) -> Result<LoadedRules, String> {
    match explicit
        .map(Path::to_path_buf)
        .or_else(|| config.rules_file())
    {
        Some(path) => LoadedRules::from_file(&path, mode),
        None => Ok(LoadedRules::builtin(mode)),
    }
}
