//! `ads-scorecard` command line
//!
//! Argument parsing and command execution live here so they can be driven
//! from tests; `main.rs` only wires stdout and the exit code.

use ads_app::{AppConfig, ExportOutcome, ScorecardApp};
use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// What a command run amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Exit 0
    Success,
    /// Exit 1
    Failure,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Subcommand and its own arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Load and print the views
    Render {
        /// Source override
        source: Option<String>,
    },
    /// Load and write the evidence CSV
    Export {
        /// Source override
        source: Option<String>,
        /// Export directory override
        out_dir: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Subcommand
    pub command: CliCommand,
    /// Config file
    pub config_path: Option<PathBuf>,
    /// Force JSON log output
    pub log_json: bool,
}

/// Build the clap command tree
#[must_use]
pub fn build_cli() -> Command {
    let source = Arg::new("source")
        .long("source")
        .value_name("URL|PATH")
        .help("Scorecard document URL or file path");

    Command::new("ads-scorecard")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render assessment scorecards and export evidence as CSV")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (.toml, .yaml, .yml or .json)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("render")
                .about("Load the scorecard and print summary, sections and evidence")
                .arg(source.clone()),
        )
        .subcommand(
            Command::new("export")
                .about("Load the scorecard and save the evidence CSV")
                .arg(source)
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory to write scorecard-demo.csv into"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration as TOML"))
}

impl Invocation {
    /// Interpret parsed arguments
    ///
    /// # Errors
    /// No recognized subcommand was given.
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let (name, args) = matches.subcommand().context("a subcommand is required")?;
        let command = match name {
            "render" => CliCommand::Render {
                source: args.get_one::<String>("source").cloned(),
            },
            "export" => CliCommand::Export {
                source: args.get_one::<String>("source").cloned(),
                out_dir: args.get_one::<PathBuf>("out-dir").cloned(),
            },
            "config" => CliCommand::Config,
            other => anyhow::bail!("unknown subcommand '{other}'"),
        };

        Ok(Self {
            command,
            config_path: args.get_one::<PathBuf>("config").cloned(),
            log_json: args.get_flag("log-json"),
        })
    }

    /// Config file, then environment, then command-line overrides
    ///
    /// # Errors
    /// The config cannot be read or fails validation.
    pub fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config_path {
            Some(path) => AppConfig::from_path(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AppConfig::default(),
        };
        config.apply_process_env().context("reading ADS_* environment")?;

        match &self.command {
            CliCommand::Render { source } => {
                if let Some(source) = source {
                    config.source.clone_from(source);
                }
            }
            CliCommand::Export { source, out_dir } => {
                if let Some(source) = source {
                    config.source.clone_from(source);
                }
                if let Some(dir) = out_dir {
                    config.export_dir.clone_from(dir);
                }
            }
            CliCommand::Config => {}
        }
        if self.log_json {
            config.log.json = true;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

/// Run the command, writing user-facing output to `out`
///
/// # Errors
/// Output could not be written, or the configured source cannot be opened.
pub async fn execute<W: Write>(
    invocation: &Invocation,
    config: &AppConfig,
    out: &mut W,
) -> anyhow::Result<RunStatus> {
    match &invocation.command {
        CliCommand::Config => {
            write!(out, "{}", config.to_toml()?)?;
            Ok(RunStatus::Success)
        }
        CliCommand::Render { .. } => {
            let app = ScorecardApp::from_config(config)?;
            let outcome = app.on_trigger_load().await;
            writeln!(out, "{}", app.page())?;
            Ok(if outcome.is_loaded() {
                RunStatus::Success
            } else {
                RunStatus::Failure
            })
        }
        CliCommand::Export { .. } => {
            let app = ScorecardApp::from_config(config)?;
            if !app.on_trigger_load().await.is_loaded() {
                writeln!(out, "{}", app.page().status)?;
                return Ok(RunStatus::Failure);
            }

            match app.on_trigger_export().await {
                Ok(ExportOutcome::Saved(saved)) => {
                    writeln!(out, "saved {}", saved.location)?;
                    writeln!(out, "sha256 {}", saved.sha256)?;
                    Ok(RunStatus::Success)
                }
                Ok(ExportOutcome::Skipped) => {
                    writeln!(out, "No evidence to export.")?;
                    Ok(RunStatus::Success)
                }
                Err(err) => {
                    tracing::error!(error = %err, "export failed");
                    writeln!(out, "{}", app.page().status)?;
                    Ok(RunStatus::Failure)
                }
            }
        }
    }
}
