use crate::OutputFormat;
use anyhow::{Context, Result};
use cinematch_core::{ConfigLoader, ScoringConfig};
use cinematch_similarity::{PipelineStats, ScoringWeights, SimilarTitle, SimilarityIndex};
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

/// Exit status when the queried title is not in the catalogue
const NOT_FOUND_EXIT: u8 = 2;

const NOT_FOUND_MESSAGE: &str = "Movie not found in database.";

const TITLE_WIDTH: usize = 40;
const GENRES_WIDTH: usize = 30;

pub fn similar(
    file: &Path,
    title: &str,
    top_n: Option<usize>,
    format: OutputFormat,
    config: Option<&Path>,
) -> Result<ExitCode> {
    let scoring = load_scoring_config(config)?;
    let weights = ScoringWeights::from_config(&scoring)?;
    let top_n = top_n.unwrap_or(scoring.top_n);

    debug!(
        text_weight = weights.text(),
        rating_weight = weights.rating(),
        top_n,
        "Resolved scoring configuration"
    );

    let index = SimilarityIndex::from_path(file, weights)
        .with_context(|| format!("Failed to build similarity index from {}", file.display()))?;

    let results = match index.similar_to(title, top_n) {
        Ok(results) => results,
        Err(e) if e.is_not_found() => {
            println!("{}", NOT_FOUND_MESSAGE.yellow());
            return Ok(ExitCode::from(NOT_FOUND_EXIT));
        }
        Err(e) => return Err(e.into()),
    };

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Table => write_results_table(&mut stdout, title, &results)?,
        OutputFormat::Json => write_json(&mut stdout, &results)?,
    }

    Ok(ExitCode::SUCCESS)
}

pub fn stats(file: &Path, format: OutputFormat) -> Result<ExitCode> {
    let index = SimilarityIndex::from_path(file, ScoringWeights::default())
        .with_context(|| format!("Failed to load catalogue {}", file.display()))?;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Table => write_stats_table(&mut stdout, file, &index.stats())?,
        OutputFormat::Json => write_json(&mut stdout, &index.stats())?,
    }

    Ok(ExitCode::SUCCESS)
}

/// File config when given, otherwise `CINEMATCH_*` environment variables
fn load_scoring_config(path: Option<&Path>) -> Result<ScoringConfig> {
    match path {
        Some(path) => ScoringConfig::from_file(path)
            .with_context(|| format!("Failed to load scoring config {}", path.display())),
        None => {
            let config = ScoringConfig::from_env()?;
            config.validate()?;
            Ok(config)
        }
    }
}

fn write_results_table<W: Write>(out: &mut W, query: &str, results: &[SimilarTitle]) -> Result<()> {
    writeln!(out, "{} {}\n", "Movies similar to".cyan().bold(), query.white().bold())?;

    if results.is_empty() {
        writeln!(out, "{}", "No other titles in the catalogue.".yellow())?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>4}  {:<title$}  {:<genres$}  {:>6}  {:>6}",
        "#",
        "Title",
        "Genres",
        "Rating",
        "Score",
        title = TITLE_WIDTH,
        genres = GENRES_WIDTH,
    )?;

    for (rank, result) in results.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<title$}  {:<genres$}  {:>6.1}  {:>6.3}",
            rank + 1,
            truncate(&result.title, TITLE_WIDTH),
            truncate(&result.genres, GENRES_WIDTH),
            result.imdb_rating,
            result.score,
            title = TITLE_WIDTH,
            genres = GENRES_WIDTH,
        )?;
    }

    Ok(())
}

fn write_stats_table<W: Write>(out: &mut W, file: &Path, stats: &PipelineStats) -> Result<()> {
    writeln!(out, "{} {}\n", "Catalogue".cyan().bold(), file.display())?;

    let rows = [
        ("Lines read", stats.lines_read),
        ("Skipped lines", stats.skipped_lines),
        ("Records parsed", stats.records_parsed),
        ("Dropped records", stats.dropped_records),
        ("Defaulted ratings", stats.defaulted_ratings),
        ("Dataset rows", stats.rows),
        ("Vocabulary size", stats.vocabulary_size),
    ];

    for (label, value) in rows {
        writeln!(out, "  {:<18} {}", label, value)?;
    }

    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

/// Shorten `text` to `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
