//! `scholarship form` -- interactive applicant form.
//!
//! Holds one applicant profile and one loaded rule text. Fields are
//! edited with `set`, rules are swapped with `rules FILE`, and `eval`
//! runs the evaluator on the current state. A rule text that does not
//! parse stays loaded but blocks evaluation until it is replaced.

use std::io::{self, BufRead, Write};
use std::path::Path;

use scholarship_eval::{Applicant, Field, ParseMode, RuleEntry};

use crate::config::Config;
use crate::loader::{load_rules, LoadedRules};
use crate::render::{decision_text, malformed_text, rule_set_text};

/// Run the form REPL on stdin/stdout.
pub fn run_form(config: &Config, rules_path: Option<&Path>) {
    let mode = config.parse_mode(false);
    let defaults = match config.applicant() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let rules = match load_rules(config, rules_path, mode) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = Session::new(defaults, rules, mode);

    println!();
    println!("  Scholarship Advisory Form");
    println!("  {}", session.rules_summary());
    println!();
    println!("  Commands: help, show, set, unset, reset, rules, eval, quit");
    println!();

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("scholarship> ");
        if io::stdout().flush().is_err() {
            break;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl-D)
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {}", e);
                break;
            }
        }

        match session.execute(&line) {
            Step::Output(text) => print!("{}", text),
            Step::Error(msg) => eprintln!("{}", msg),
            Step::Quit => break,
        }
    }
}

// ─── Session state ───────────────────────────────────────────────────────────

/// Result of one input line.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Output(String),
    Error(String),
    Quit,
}

struct Session {
    defaults: Applicant,
    applicant: Applicant,
    rules: LoadedRules,
    mode: ParseMode,
}

impl Session {
    fn new(defaults: Applicant, rules: LoadedRules, mode: ParseMode) -> Self {
        Session {
            applicant: defaults.clone(),
            defaults,
            rules,
            mode,
        }
    }

    fn execute(&mut self, line: &str) -> Step {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Step::Output(String::new());
        }

        let (word, rest) = next_word(trimmed);
        let cmd = word.to_lowercase();

        match cmd.as_str() {
            "help" => Step::Output(help_text()),
            "show" => Step::Output(self.show()),
            "set" => {
                let (name, value) = next_word(rest);
                if name.is_empty() || value.is_empty() {
                    return Step::Error("usage: set <field> <value>".to_string());
                }
                self.set(name, value)
            }
            "unset" => {
                let (name, _) = next_word(rest);
                if name.is_empty() {
                    return Step::Error("usage: unset <field>".to_string());
                }
                self.unset(name)
            }
            "reset" => {
                self.applicant = self.defaults.clone();
                Step::Output("  all fields restored to defaults\n".to_string())
            }
            "rules" => {
                if rest.is_empty() {
                    Step::Output(self.list_rules())
                } else if rest.eq_ignore_ascii_case("default") {
                    self.rules = LoadedRules::builtin(self.mode);
                    Step::Output(format!("  {}\n", self.rules_summary()))
                } else {
                    self.load(Path::new(rest))
                }
            }
            "eval" => self.eval(),
            "quit" | "exit" => Step::Quit,
            _ => Step::Error(format!(
                "unknown command: {}. Type 'help' for available commands.",
                cmd
            )),
        }
    }

    fn show(&self) -> String {
        let mut out = String::from("\n");
        for field in Field::ALL {
            let marker = if field.is_fact() { "" } else { " (not evaluated)" };
            out.push_str(&format!(
                "  {:<22} {:>8}   {}{}\n",
                field.name(),
                self.applicant.get(field).normalize(),
                field.label(),
                marker
            ));
        }
        out.push_str(&format!("\n  {}\n\n", self.rules_summary()));
        out
    }

    fn set(&mut self, name: &str, raw: &str) -> Step {
        let field: Field = match name.parse() {
            Ok(f) => f,
            Err(e) => return Step::Error(format!("  {}", e)),
        };
        match self.applicant.set_text(field, raw) {
            Ok(()) => Step::Output(format!(
                "  {} = {}\n",
                field,
                self.applicant.get(field).normalize()
            )),
            Err(e) => Step::Error(format!("  {}", e)),
        }
    }

    /// Restore one field to its default.
    fn unset(&mut self, name: &str) -> Step {
        let field: Field = match name.parse() {
            Ok(f) => f,
            Err(e) => return Step::Error(format!("  {}", e)),
        };
        let default = self.defaults.get(field);
        match self.applicant.set(field, default) {
            Ok(()) => Step::Output(format!("  {} = {} (default)\n", field, default.normalize())),
            Err(e) => Step::Error(format!("  {}", e)),
        }
    }

    /// Replace the loaded rules. An unreadable file leaves the current
    /// rules in place; an unparsable one replaces them and blocks `eval`.
    fn load(&mut self, path: &Path) -> Step {
        match LoadedRules::from_file(path, self.mode) {
            Ok(loaded) => {
                self.rules = loaded;
                match &self.rules.parsed {
                    Ok(_) => Step::Output(format!("  {}\n", self.rules_summary())),
                    Err(e) => Step::Error(format!(
                        "  invalid rules in {}: {}\n  evaluation is disabled until the rules are fixed",
                        self.rules.source, e
                    )),
                }
            }
            Err(e) => Step::Error(format!("  {}", e)),
        }
    }

    fn list_rules(&self) -> String {
        match &self.rules.parsed {
            Ok(set) if set.is_empty() => format!("  {} (empty)\n", self.rules.source),
            Ok(set) => format!("{}\n{}", self.rules_summary(), rule_set_text(set)),
            Err(e) => format!("  invalid rules in {}: {}\n", self.rules.source, e),
        }
    }

    fn eval(&self) -> Step {
        let rules = match &self.rules.parsed {
            Ok(set) => set,
            Err(e) => {
                return Step::Error(format!(
                    "  cannot evaluate: {}; fix rules first (rules FILE or rules default)",
                    e
                ))
            }
        };
        let decision = scholarship_eval::evaluate(&self.applicant.to_facts(), rules);

        let mut out = String::from("\n");
        for entry in rules.malformed() {
            if let RuleEntry::Malformed {
                index,
                name,
                reason,
                ..
            } = entry
            {
                out.push_str("  note: ");
                out.push_str(&malformed_text(*index, name.as_deref(), reason));
            }
        }
        out.push_str(&decision_text(&decision, "  "));
        out.push('\n');
        Step::Output(out)
    }

    fn rules_summary(&self) -> String {
        match &self.rules.parsed {
            Ok(set) => format!(
                "rules: {} ({} rules, {} active)",
                self.rules.source,
                set.len(),
                set.active().count()
            ),
            Err(_) => format!("rules: {} (invalid)", self.rules.source),
        }
    }
}

/// Split off the first whitespace-delimited word; the remainder is
/// returned trimmed.
fn next_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn help_text() -> String {
    let mut out = String::from("\n");
    out.push_str("  help                    Show this help\n");
    out.push_str("  show                    Show the applicant profile and loaded rules\n");
    out.push_str("  set <field> <value>     Set a field (e.g. set cgpa 3.8)\n");
    out.push_str("  unset <field>           Restore a field to its default\n");
    out.push_str("  reset                   Restore all fields to their defaults\n");
    out.push_str("  rules                   List the loaded rules\n");
    out.push_str("  rules <file>            Load rules from a JSON file\n");
    out.push_str("  rules default           Restore the built-in rules\n");
    out.push_str("  eval                    Evaluate the applicant\n");
    out.push_str("  quit                    Exit\n");
    out.push('\n');
    out
}
