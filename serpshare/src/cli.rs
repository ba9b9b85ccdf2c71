//! Command-line interface definition for the serpshare application.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "serpshare",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Estimate a domain's share of a keyword's AI query volume",
    long_about = "serpshare combines an external keyword volume estimate with a softmax attribution model over the keyword's SERP results. Each result gets a share of the volume based on its rank, its semantic match with the keyword and its SERP features.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Runs the attribution model on a recorded response file.
    #[command(about = "Attribute a keyword's volume to the domains in its SERP.")]
    Analyze(AnalyzeCommand),

    /// Prints the effective logit weights.
    #[command(about = "Show the feature weights the model would use.")]
    Importance(ModelArgs),
}

/// Options shared by every command that builds a model.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Lambda weights for [vis, sem, auth, feat, est_clicks].
    #[arg(long, short = 'w', num_args = 5, value_name = "W", allow_negative_numbers = true,
          help = "Lambda weights for vis, sem, auth, feat, est_clicks (five values).")]
    pub weights: Option<Vec<f64>>,

    /// Visibility decay parameter.
    #[arg(long, short = 'a', value_name = "ALPHA", help = "Visibility decay parameter (default: 0.15).")]
    pub alpha: Option<f64>,

    /// Path to a model configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "SERPSHARE_CONFIG",
          help = "Path to a model configuration file (YAML).")]
    pub config: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeCommand {
    /// Recorded API responses, or a keyword query object (JSON).
    #[arg(value_name = "FILE", help = "JSON file with recorded API responses or a keyword query.")]
    pub input: PathBuf,

    /// Domain to report separately.
    #[arg(long, short = 'D', value_name = "DOMAIN", help = "Target domain whose statistics are reported separately.")]
    pub domain: Option<String>,

    /// Number of rows to display.
    #[arg(long, short = 't', value_name = "N", default_value_t = 10, help = "Number of top rows to display.")]
    pub top: usize,

    #[arg(long, value_enum, default_value = "volume", help = "Order of the per-result view.")]
    pub sort: SortChoice,

    #[arg(long, value_enum, default_value = "both", help = "Which tables to print.")]
    pub view: ViewChoice,

    /// Print the full report as JSON to stdout.
    #[arg(long, help = "Print the report as JSON instead of tables.")]
    pub json: bool,

    /// Show feature importance weights before the results.
    #[arg(long = "show-importance", help = "Show feature importance weights.")]
    pub show_importance: bool,

    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SortChoice {
    /// Highest attributed volume first.
    Volume,
    /// SERP order.
    Rank,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ViewChoice {
    /// One row per SERP result.
    Normal,
    /// One row per domain.
    Aggregated,
    Both,
}
