//! Library half of the `tpclint` binary: argument surface, file
//! loading, rendering, and the exit-code policy. Kept out of `main.rs`
//! so the whole flow is testable without spawning a process.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use tpclint_kernel::parser::Document;
use tpclint_kernel::validator::{self, FileKind, Severity, ValidatorConfig, Violation};

/// Validate TPC plugin process and prompts configuration files.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Path to the process configuration file
    pub process: PathBuf,

    /// Path to the prompts configuration file
    pub prompts: PathBuf,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to a JSON validator configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Development policy: report enabled logging settings as INFO
    /// instead of CRITICAL
    #[clap(long)]
    pub dev: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run a full validation: load, parse, validate, render, and return
/// the process exit code.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let violations = collect_violations(&cli.process, &cli.prompts, &config)?;

    match cli.format {
        OutputFormat::Text => {
            for violation in &violations {
                println!("{violation}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&violations)?);
        }
    }

    Ok(ExitCode::from(exit_code(&violations)))
}

/// Resolve the validator configuration from the config file and flags.
/// Flags win over file values.
pub fn load_config(cli: &Cli) -> Result<ValidatorConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("config file \"{}\" is not readable", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("config file \"{}\" is not valid", path.display()))?
        }
        None => ValidatorConfig::default(),
    };
    if cli.dev {
        config.logging.enabled = false;
    }
    Ok(config)
}

/// Read and validate both documents.
///
/// A file that fails to lex is reported as a CRITICAL
/// `ParseErrorViolation` instead of aborting the run; both files are
/// always attempted so every parse failure surfaces at once. Rules run
/// only when both documents parsed — cross-file checks are meaningless
/// against half a model.
pub fn collect_violations(
    process_path: &Path,
    prompts_path: &Path,
    config: &ValidatorConfig,
) -> Result<Vec<Violation>> {
    let process_source = read_document(process_path)?;
    let prompts_source = read_document(prompts_path)?;

    let mut parse_failures = Vec::new();
    let process = match Document::parse(&process_source) {
        Ok(document) => Some(document),
        Err(error) => {
            parse_failures.push(Violation::from_lex_error(FileKind::Process, &error));
            None
        }
    };
    let prompts = match Document::parse(&prompts_source) {
        Ok(document) => Some(document),
        Err(error) => {
            parse_failures.push(Violation::from_lex_error(FileKind::Prompts, &error));
            None
        }
    };

    match (process, prompts) {
        (Some(process), Some(prompts)) => {
            debug!("both documents parsed, running rule sets");
            Ok(validator::validate(&process, &prompts, config))
        }
        _ => Ok(parse_failures),
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| {
        format!(
            "file \"{}\" does not exist or is not accessible",
            path.display()
        )
    })
}

/// `0` when nothing CRITICAL was found, `1` otherwise.
pub fn exit_code(violations: &[Violation]) -> u8 {
    let critical = violations
        .iter()
        .any(|violation| violation.severity == Severity::Critical);
    u8::from(critical)
}
