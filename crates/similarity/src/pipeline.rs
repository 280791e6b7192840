//! End-to-end pipeline: load → normalize → score → query
//!
//! `SimilarityIndex` keeps the dataset, the matrix built from it and the
//! fitted vocabulary together, so repeated queries reuse one matrix.

use crate::error::Result;
use crate::loader::{load_records, LoadStats};
use crate::models::Dataset;
use crate::normalizer::{normalize_records, NormalizeStats};
use crate::query::{find_similar, SimilarTitle, DEFAULT_TOP_N};
use crate::scorer::{compute_similarity, ScoringWeights, SimilarityMatrix};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

/// Counts collected across the pipeline stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub lines_read: usize,
    pub skipped_lines: usize,
    pub records_parsed: usize,
    pub dropped_records: usize,
    pub defaulted_ratings: usize,
    pub rows: usize,
    pub vocabulary_size: usize,
}

impl PipelineStats {
    fn from_stages(load: LoadStats, normalize: NormalizeStats) -> Self {
        Self {
            lines_read: load.lines_read,
            skipped_lines: load.skipped_lines,
            records_parsed: load.records_parsed(),
            dropped_records: normalize.dropped_records,
            defaulted_ratings: normalize.defaulted_ratings,
            ..Default::default()
        }
    }
}

/// Dataset, similarity matrix and vocabulary built in one pass
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    dataset: Dataset,
    matrix: SimilarityMatrix,
    vocabulary: Vec<String>,
    weights: ScoringWeights,
    stats: PipelineStats,
}

impl SimilarityIndex {
    /// Score an already normalized dataset
    pub fn build(dataset: Dataset, weights: ScoringWeights) -> Self {
        Self::with_stats(dataset, weights, PipelineStats::default())
    }

    fn with_stats(dataset: Dataset, weights: ScoringWeights, mut stats: PipelineStats) -> Self {
        let scores = compute_similarity(&dataset, weights);

        stats.rows = dataset.len();
        stats.vocabulary_size = scores.vocabulary.len();

        Self {
            dataset,
            matrix: scores.matrix,
            vocabulary: scores.vocabulary,
            weights,
            stats,
        }
    }

    /// Load a JSON Lines file and build the index
    ///
    /// # Errors
    ///
    /// Returns `SimilarityError::Io` if the file cannot be read. Malformed
    /// lines and incomplete records are skipped and counted in `stats()`.
    #[instrument(skip(path, weights), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>, weights: ScoringWeights) -> Result<Self> {
        let loaded = load_records(path)?;
        let normalized = normalize_records(&loaded.records);

        let stats = PipelineStats::from_stages(loaded.stats, normalized.stats);
        let index = Self::with_stats(normalized.dataset, weights, stats);

        info!(
            rows = index.stats.rows,
            skipped_lines = index.stats.skipped_lines,
            dropped_records = index.stats.dropped_records,
            vocabulary_size = index.stats.vocabulary_size,
            "Similarity index built"
        );

        Ok(index)
    }

    /// Top `top_n` titles most similar to `title`
    pub fn similar_to(&self, title: &str, top_n: usize) -> Result<Vec<SimilarTitle>> {
        find_similar(&self.dataset, &self.matrix, title, top_n)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}

/// Single-call entry point: load `path` and rank titles similar to `title`
///
/// Uses the default 0.8 / 0.2 weights and `DEFAULT_TOP_N` when `top_n` is
/// `None`.
pub fn recommend(
    path: impl AsRef<Path>,
    title: &str,
    top_n: Option<usize>,
) -> Result<Vec<SimilarTitle>> {
    SimilarityIndex::from_path(path, ScoringWeights::default())?
        .similar_to(title, top_n.unwrap_or(DEFAULT_TOP_N))
}
