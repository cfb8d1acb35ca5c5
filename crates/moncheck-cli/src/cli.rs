use clap::{Args, Parser, Subcommand, ValueEnum};
use moncheck::engine::violation::CheckKind;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "moncheck - A referential-integrity checker for CIF monomer libraries.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the internal consistency of a monomer library.
    Check(CheckArgs),
    /// List the available checks and the severity of their findings.
    ListChecks,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Itemized findings followed by a per-check summary.
    #[default]
    Text,
    /// One row per violation.
    Csv,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Root directory of the monomer library (defaults to the current directory).
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Path to a session configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Dictionary Location Overrides ---
    /// Override the master index location (default: ROOT/list/mon_lib_list.cif).
    #[arg(long, value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// Override the energy-type catalog location (default: ROOT/ener_lib.cif).
    #[arg(long, value_name = "PATH")]
    pub energy_lib: Option<PathBuf>,

    // --- Check Selection ---
    /// Run only this check. Can be used multiple times.
    #[arg(long = "only", value_name = "CHECK")]
    pub only: Vec<CheckKind>,

    /// Skip this check. Can be used multiple times.
    #[arg(long = "skip", value_name = "CHECK")]
    pub skip: Vec<CheckKind>,

    /// Link/mod-only group qualifier. Can be used multiple times; replaces the defaults.
    #[arg(long = "pseudo-group", value_name = "TOKEN")]
    pub pseudo_groups: Vec<String>,

    /// Treat advisory findings as failures.
    #[arg(long)]
    pub warnings_as_errors: bool,

    // --- Report Output ---
    /// Report format.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// Write the report to a file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_arguments_parse_check_names_and_repeats() {
        let cli = Cli::parse_from([
            "moncheck",
            "-vv",
            "check",
            "/monlib",
            "--only",
            "group-consistency",
            "--only",
            "monomer-cross",
            "--pseudo-group",
            "pept",
            "--format",
            "csv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Check(args) = cli.command else {
            panic!("Expected 'check' subcommand");
        };
        assert_eq!(args.root, Some(PathBuf::from("/monlib")));
        assert_eq!(args.only, vec![CheckKind::GroupConsistency, CheckKind::MonomerCross]);
        assert_eq!(args.pseudo_groups, vec!["pept"]);
        assert_eq!(args.format, Some(ReportFormat::Csv));
        assert!(!args.warnings_as_errors);
    }

    #[test]
    fn unknown_check_name_is_rejected() {
        let result = Cli::try_parse_from(["moncheck", "check", "--skip", "spelling"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["moncheck", "-q", "-v", "list-checks"]);
        assert!(result.is_err());
    }
}
