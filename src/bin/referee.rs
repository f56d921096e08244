//! Decision Referee CLI
//!
//! # Commands
//!
//! - `evaluate`: evaluate a constraint set from flags or a JSON document
//! - `rules`: list the active rule table
//! - `lint <file>`: check a JSON rule table for directive language
//! - `audit`: summarize rule coverage over every constraint set
//! - `insight`: print the observational insight for a constraint set
//!
//! Exit code 2 means the constraints were invalid; 1 is any other failure.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use referee::{
    audit, format_summary, format_trigger_label, render_text, CandidateConstraints,
    ConstraintSet, Dimension, InsightCatalogue, OutputFormat, RefereeConfig, RefereeEngine,
    RefereeError, RefereeResult, RuleTable,
};

const DEFAULT_CONFIG: &str = "referee.toml";

/// Deterministic comparison of REST, GraphQL and gRPC under project constraints
#[derive(Parser)]
#[command(name = "referee")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./referee.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON rule table to use instead of the configured one
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a constraint set
    Evaluate {
        #[command(flatten)]
        constraints: ConstraintArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the rule table in evaluation order
    Rules,
    /// Check a JSON rule table for directive language
    Lint {
        /// Rule table file
        file: PathBuf,
    },
    /// Summarize how the rule table covers every constraint set
    Audit {
        /// Print the audit as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the insight for a constraint set
    Insight {
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
}

#[derive(Args)]
struct ConstraintArgs {
    /// JSON constraint document, or `-` for stdin
    #[arg(long, conflicts_with_all = ["expertise", "scale", "time_to_market", "risk_tolerance"])]
    input: Option<PathBuf>,

    /// beginner | intermediate | expert
    #[arg(long)]
    expertise: Option<String>,

    /// small | medium | large
    #[arg(long)]
    scale: Option<String>,

    /// fast | balanced
    #[arg(long)]
    time_to_market: Option<String>,

    /// low | medium | high
    #[arg(long)]
    risk_tolerance: Option<String>,
}

impl ConstraintArgs {
    fn freeze(&self) -> RefereeResult<ConstraintSet> {
        let candidate = match &self.input {
            Some(path) => read_candidate(path)?,
            None => {
                let mut candidate = CandidateConstraints::new();
                let flags = [
                    (Dimension::Expertise, &self.expertise),
                    (Dimension::Scale, &self.scale),
                    (Dimension::TimeToMarket, &self.time_to_market),
                    (Dimension::RiskTolerance, &self.risk_tolerance),
                ];
                for (dimension, value) in flags {
                    if let Some(value) = value {
                        candidate = candidate.with(dimension, value.as_str());
                    }
                }
                candidate
            }
        };
        Ok(candidate.freeze()?)
    }
}

fn read_candidate(path: &Path) -> RefereeResult<CandidateConstraints> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| RefereeError::input("stdin", e))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| RefereeError::input(path.display().to_string(), e))?
    };
    Ok(CandidateConstraints::from_json_str(&contents)?)
}

fn load_config(cli: &Cli) -> RefereeResult<RefereeConfig> {
    let mut config = match &cli.config {
        Some(path) => RefereeConfig::load(path)?,
        None => RefereeConfig::load_or_default(DEFAULT_CONFIG)?,
    };
    if let Some(rules) = &cli.rules {
        config = config.with_rule_table(rules);
    }
    Ok(config)
}

fn init_logging(config: &RefereeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn to_json<T: serde::Serialize>(value: &T) -> RefereeResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| RefereeError::internal(format!("serializing output: {e}")))
}

fn run(cli: &Cli, config: &RefereeConfig) -> RefereeResult<ExitCode> {
    match &cli.command {
        Commands::Evaluate { constraints, json } => {
            let constraints = constraints.freeze()?;
            let engine = RefereeEngine::new(config.load_rule_table()?);
            let result = engine.evaluate(&constraints);
            if *json || config.output == OutputFormat::Json {
                println!("{}", to_json(&result)?);
            } else {
                print!("{}", render_text(&constraints, &result));
            }
        }
        Commands::Rules => {
            let table = config.load_rule_table()?;
            println!("{} rules, fingerprint {}", table.rule_count(), table.fingerprint().short());
            for rule in table.iter() {
                let label = format_trigger_label(&rule.when);
                let options: Vec<&str> = rule
                    .impacts
                    .affected_options()
                    .into_iter()
                    .map(|o| o.display_name())
                    .collect();
                println!(
                    "{:<24} {:<45} {}",
                    rule.id,
                    if label.is_empty() { "(any)" } else { label.as_str() },
                    options.join(", ")
                );
            }
        }
        Commands::Lint { file } => {
            let contents = std::fs::read_to_string(file)
                .map_err(|e| RefereeError::input(file.display().to_string(), e))?;
            let table = RuleTable::from_json_str(&contents)?;
            let findings = table.lint_language();
            for finding in &findings {
                println!("{finding}");
            }
            if !findings.is_empty() {
                println!("{} finding(s) in {} rules", findings.len(), table.rule_count());
                return Ok(ExitCode::FAILURE);
            }
            println!("{} rules, no directive language", table.rule_count());
        }
        Commands::Audit { json } => {
            let table = config.load_rule_table()?;
            let report = audit(&table);
            if *json || config.output == OutputFormat::Json {
                println!("{}", to_json(&report)?);
            } else {
                print!("{report}");
            }
        }
        Commands::Insight { constraints } => {
            let constraints = constraints.freeze()?;
            println!("{}", format_summary(&constraints));
            println!("{}", InsightCatalogue::builtin().select(&constraints));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);
    debug!(?config, "configuration loaded");

    match run(&cli, &config) {
        Ok(code) => code,
        Err(e) if e.is_invalid_constraints() => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
