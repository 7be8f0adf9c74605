//! CLI parser and command dispatch.

mod commands;
mod helpers;
mod icons;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use ocr_aggregate::config::Config;

#[derive(Parser)]
#[command(name = "ocragg")]
#[command(about = "Aggregate, correct, and score OCR text regions")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "OCRAGG_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Output format for aggregation results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full result as pretty JSON
    #[default]
    Json,
    /// Human-readable report
    Summary,
    /// Aggregated text only
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate the OCR regions of one document (JSON page array)
    Aggregate {
        /// Input JSON file ("-" for stdin)
        input: PathBuf,
        /// Skip correction and scoring
        #[arg(long)]
        raw: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the correction engine on a text
    Correct {
        /// Text to correct (reads --file or stdin when omitted)
        text: Option<String>,
        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Score an aggregated text file
    Score {
        /// Text file to score ("-" for stdin)
        input: PathBuf,
        /// Document-level OCR confidence to use for recommendations
        #[arg(long, default_value = "1.0")]
        confidence: f64,
    },

    /// Print the text of regions carrying an entity type, one per line
    Extract {
        /// Input JSON file ("-" for stdin)
        input: PathBuf,
        /// Entity type to extract (e.g. "title", "date")
        #[arg(short, long)]
        entity_type: String,
    },

    /// Aggregate many documents concurrently
    Batch {
        /// Input JSON files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Number of concurrent workers (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,
        /// Directory for <stem>.result.json outputs
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the path of the config file in use
    Path,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Aggregate {
            input,
            raw,
            format,
            output,
        } => commands::aggregate::cmd_aggregate(&config, &input, raw, format, output.as_deref()),
        Commands::Correct { text, file } => {
            commands::correct::cmd_correct(text.as_deref(), file.as_deref())
        }
        Commands::Score { input, confidence } => {
            commands::score::cmd_score(&config, &input, confidence)
        }
        Commands::Extract { input, entity_type } => {
            commands::extract::cmd_extract(&input, &entity_type)
        }
        Commands::Batch {
            inputs,
            workers,
            output_dir,
        } => commands::batch::cmd_batch(config, inputs, workers, output_dir).await,
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config_cmd::cmd_config_show(&config),
            ConfigCommands::Path => commands::config_cmd::cmd_config_path(&config),
        },
    }
}
