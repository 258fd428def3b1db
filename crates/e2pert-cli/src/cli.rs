use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const ANALYZE_AFTER_HELP: &str = "\
The input files are written by JANPA when run with:
  -doFock -Fock_NAO_File -SDS_NAO_File -CLPO2LHO_File -LHO2NAO_File";

#[derive(Parser, Debug)]
#[command(
    author = "E2PERT Developers",
    version,
    about = "E2PERT CLI - Second-order perturbation (E2) analysis of donor-acceptor interactions between JANPA localized orbitals (CLPOs).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform JANPA matrices to the CLPO basis and tabulate donor-acceptor E2 energies.
    Analyze(AnalyzeArgs),
}

/// Output format of the interaction table.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Text,
    /// Comma-separated values
    Csv,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
#[command(after_help = ANALYZE_AFTER_HELP)]
pub struct AnalyzeArgs {
    // --- Input Files ---
    /// Fock matrix in the NAO basis [default: Fock_NAO.txt]
    #[arg(short = 'F', long, value_name = "FILE")]
    pub fock_matrix: Option<PathBuf>,

    /// Density (SDS) matrix in the NAO basis [default: SDS_NAO.txt]
    #[arg(short = 'D', long, value_name = "FILE")]
    pub sds_matrix: Option<PathBuf>,

    /// CLPO to LHO transformation matrix, with orbital labels [default: CLPO2LHO.txt]
    #[arg(long, visible_alias = "c2l", value_name = "FILE")]
    pub clpo2lho_matrix: Option<PathBuf>,

    /// LHO to NAO transformation matrix [default: LHO2NAO.txt]
    #[arg(long, visible_alias = "l2n", value_name = "FILE")]
    pub lho2nao_matrix: Option<PathBuf>,

    // --- Output ---
    /// Path for the interaction table [default: E2_output.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output table format [default: text]
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Analysis Overrides ---
    /// Minimum charge transfer (e) for an interaction to be listed [default: 0.01]
    #[arg(long, value_name = "FLOAT")]
    pub qct_threshold: Option<f64>,

    /// Energy threshold (kcal/mol); accepted for compatibility, not applied [default: 0.1]
    #[arg(long, value_name = "FLOAT")]
    pub energy_threshold: Option<f64>,

    /// Skip donor-acceptor pairs with degenerate orbital energies instead of failing.
    #[arg(long)]
    pub skip_degenerate: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S analysis.qct-threshold=0.005
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_accepts_short_and_alias_flags() {
        let cli = Cli::try_parse_from([
            "e2pert",
            "-vv",
            "analyze",
            "-F",
            "fock.txt",
            "-D",
            "sds.txt",
            "--c2l",
            "c2l.txt",
            "--l2n",
            "l2n.txt",
            "-o",
            "out.txt",
            "--qct-threshold",
            "0.005",
            "--format",
            "csv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Analyze(args) = cli.command;
        assert_eq!(args.fock_matrix, Some(PathBuf::from("fock.txt")));
        assert_eq!(args.clpo2lho_matrix, Some(PathBuf::from("c2l.txt")));
        assert_eq!(args.lho2nao_matrix, Some(PathBuf::from("l2n.txt")));
        assert_eq!(args.qct_threshold, Some(0.005));
        assert_eq!(args.format, Some(OutputFormat::Csv));
        assert!(!args.skip_degenerate);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["e2pert", "-q", "-v", "analyze"]);
        assert!(result.is_err());
    }
}
