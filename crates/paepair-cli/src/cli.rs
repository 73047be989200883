use clap::{Args, Parser, Subcommand};
use paepair::engine::config::ChainLabeling;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "PAEPair CLI - Pairwise chain interaction scoring from predicted aligned error matrices of multimer structure predictions.",
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

    /// Write logs to a specified file in addition to the console output.
    /// The file records at least INFO, even with --quiet.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every prediction found in a predictor output directory.
    Scan(ScanArgs),
    /// Score a single prediction from its scores file and structure file.
    Score(ScoreArgs),
}

/// Analysis settings shared by both subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How chains are labeled in the output: 'positional' or 'name-fragments'.
    #[arg(short, long, value_name = "MODE")]
    pub labeling: Option<ChainLabeling>,

    /// Override the signal threshold (30 minus the smallest error) for an interaction call.
    #[arg(long, value_name = "FLOAT")]
    pub signal_threshold: Option<f64>,

    /// Override the spread threshold (coefficient of variation) for an interaction call.
    #[arg(long, value_name = "FLOAT")]
    pub spread_threshold: Option<f64>,

    /// Override the upper bound of the error scale used to compute the signal.
    #[arg(long, value_name = "FLOAT")]
    pub signal_scale: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S analysis.signal-threshold=25
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory holding the predictor's scores and structure files.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub input: PathBuf,

    /// Path for the CSV results.
    /// Defaults to 'Scores_pairwise_<dirname>.csv' next to the input directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the number of structure files expected per prediction family.
    #[arg(long, value_name = "INT")]
    pub expected_companions: Option<usize>,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the JSON scores file of the prediction.
    #[arg(long, required = true, value_name = "PATH")]
    pub scores: PathBuf,

    /// Path to the PDB structure file of the same prediction.
    #[arg(long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Prediction identifier written on every row. Defaults to the scores file stem.
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Path for the CSV results. Rows are written to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}
