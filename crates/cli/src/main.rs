mod commands;
mod config;
mod form;
mod loader;
mod render;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

use commands::{cmd_check, cmd_eval, cmd_rules, cmd_validate};

/// Exit status when the rule text cannot be used. Distinct from a
/// successful `NO_MATCH` decision (0) and from I/O or usage errors (1).
pub(crate) const EXIT_INVALID_RULES: i32 = 2;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// University scholarship advisory system.
#[derive(Parser)]
#[command(
    name = "scholarship",
    version,
    about = "University scholarship advisory system"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log rule parsing and evaluation to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Path to a scholarship.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Applicant values, one flag per form field.
#[derive(Debug, Default, Args)]
pub(crate) struct FormArgs {
    /// Cumulative GPA (0.00-4.00)
    #[arg(long)]
    pub cgpa: Option<String>,
    /// Co-curricular involvement score (0-100)
    #[arg(long)]
    pub co_curricular_score: Option<String>,
    /// Monthly family income (RM)
    #[arg(long)]
    pub family_income: Option<String>,
    /// Community service hours
    #[arg(long)]
    pub community_service: Option<String>,
    /// Current semester of study (1-14)
    #[arg(long)]
    pub semester: Option<String>,
    /// Number of disciplinary actions
    #[arg(long)]
    pub disciplinary_actions: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an applicant against the rule set
    Eval {
        /// Rule file (JSON array); replaces the built-in rules
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Reject malformed rule objects instead of skipping them
        #[arg(long)]
        strict: bool,
        /// Facts JSON file; used instead of the form flags
        #[arg(long)]
        facts: Option<PathBuf>,
        #[command(flatten)]
        form: FormArgs,
    },

    /// Print the active rule set
    Rules {
        /// Rule file to print instead of the configured or built-in rules
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Parse a rule file and report problems
    Check {
        /// Rule file to check (defaults to the configured or built-in rules)
        file: Option<PathBuf>,
        /// Treat malformed rule objects as errors
        #[arg(long)]
        strict: bool,
    },

    /// Validate a rule file against the rule JSON Schema
    Validate {
        /// Rule file to validate
        file: PathBuf,
    },

    /// Start the interactive applicant form
    Form {
        /// Rule file to load at start
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let output = cli.output;
    let quiet = cli.quiet;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Eval {
            rules,
            strict,
            facts,
            form,
        } => {
            cmd_eval(
                &load_config(config_path, output, quiet),
                rules.as_deref(),
                strict,
                facts.as_deref(),
                &form,
                output,
                quiet,
            );
        }
        Commands::Rules { rules } => {
            cmd_rules(
                &load_config(config_path, output, quiet),
                rules.as_deref(),
                output,
                quiet,
            );
        }
        Commands::Check { file, strict } => {
            cmd_check(
                &load_config(config_path, output, quiet),
                file.as_deref(),
                strict,
                output,
                quiet,
            );
        }
        Commands::Validate { file } => {
            cmd_validate(&file, output, quiet);
        }
        Commands::Form { rules } => {
            form::run_form(&load_config(config_path, output, quiet), rules.as_deref());
        }
    }
}

/// Load `--config` or `./scholarship.toml`. Only commands that read rules
/// or applicant defaults call this.
fn load_config(path: Option<&Path>, output: OutputFormat, quiet: bool) -> config::Config {
    match config::Config::load(path) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    use std::io::IsTerminal;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
