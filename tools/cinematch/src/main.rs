use anyhow::{Context, Result};
use cinematch_core::{init_logging, load_dotenv, ConfigLoader, LogConfig, LogFormat};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "cinematch")]
#[command(about = "Find movies similar to a title in a JSON Lines catalogue", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        long,
        global = true,
        env = "CINEMATCH_LOG_FORMAT",
        default_value_t = LogFormat::Pretty,
        help = "Log output format (pretty or json)"
    )]
    log_format: LogFormat,

    #[arg(
        long,
        global = true,
        env = "CINEMATCH_LOG_LEVEL",
        default_value = "warn",
        help = "Log filter directive, e.g. info or cinematch_similarity=debug"
    )]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List the titles most similar to TITLE")]
    Similar {
        #[arg(help = "JSON Lines catalogue, one movie per line")]
        file: PathBuf,

        #[arg(help = "Exact, case-sensitive title to look up")]
        title: String,

        #[arg(short = 'n', long, help = "Number of results (default: CINEMATCH_TOP_N or 10)")]
        top_n: Option<usize>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        #[arg(
            short,
            long,
            env = "CINEMATCH_CONFIG",
            help = "Scoring config file (TOML, JSON or YAML)"
        )]
        config: Option<PathBuf>,
    },

    #[command(about = "Show load and normalization statistics for a catalogue")]
    Stats {
        #[arg(help = "JSON Lines catalogue, one movie per line")]
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    load_dotenv();

    let cli = Cli::parse();

    let log_config = LogConfig {
        level: cli.log_level,
        format: cli.log_format,
        ..LogConfig::default()
    };
    log_config.validate()?;
    init_logging(&log_config).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Similar {
            file,
            title,
            top_n,
            format,
            config,
        } => commands::similar(&file, &title, top_n, format, config.as_deref()),
        Commands::Stats { file, format } => commands::stats(&file, format),
    }
}
