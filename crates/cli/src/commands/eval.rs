use std::path::Path;
use std::process;

use scholarship_eval::{assemble, Applicant, FactSet, Field};

use crate::config::Config;
use crate::render::print_decision;
use crate::{report_error, FormArgs, OutputFormat};

use super::{load_or_exit, parsed_or_exit};

pub(crate) fn cmd_eval(
    config: &Config,
    rules_path: Option<&Path>,
    strict: bool,
    facts_path: Option<&Path>,
    form: &FormArgs,
    output: OutputFormat,
    quiet: bool,
) {
    // Step 1: facts, from the file or from the form
    let facts = match facts_path {
        Some(path) => {
            if form.any_set() {
                report_error(
                    "error: --facts cannot be combined with applicant field flags",
                    output,
                    quiet,
                );
                process::exit(1);
            }
            read_facts(path, output, quiet)
        }
        None => match form_applicant(config, form) {
            Ok(applicant) => applicant.to_facts(),
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        },
    };

    // Step 2: rules
    let loaded = load_or_exit(config, rules_path, config.parse_mode(strict), output, quiet);
    let rules = parsed_or_exit(
        &loaded,
        "fix the rule text before evaluating",
        output,
        quiet,
    );

    // Step 3: evaluate
    let decision = scholarship_eval::evaluate(&facts, rules);
    tracing::debug!(decision = %decision.decision, source = %loaded.source, "evaluated");

    if !quiet || output == OutputFormat::Json {
        print_decision(&decision, output);
    }
}

fn read_facts(path: &Path, output: OutputFormat, quiet: bool) -> FactSet {
    let text = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading facts file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    match assemble::assemble_facts_text(&text) {
        Ok(facts) => facts,
        Err(e) => {
            let msg = format!("error in facts file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Config defaults, then each flag that was given.
fn form_applicant(config: &Config, form: &FormArgs) -> Result<Applicant, String> {
    let mut applicant = config.applicant()?;
    for (field, raw) in form.values() {
        applicant
            .set_text(field, raw)
            .map_err(|e| e.to_string())?;
    }
    Ok(applicant)
}

impl FormArgs {
    fn values(&self) -> impl Iterator<Item = (Field, &str)> {
        [
            (Field::Cgpa, &self.cgpa),
            (Field::CoCurricularScore, &self.co_curricular_score),
            (Field::FamilyIncome, &self.family_income),
            (Field::CommunityService, &self.community_service),
            (Field::Semester, &self.semester),
            (Field::DisciplinaryActions, &self.disciplinary_actions),
        ]
        .into_iter()
        .filter_map(|(field, v)| v.as_deref().map(|s| (field, s)))
    }

    fn any_set(&self) -> bool {
        self.values().next().is_some()
    }
}
