//! Top-N similar title lookup

use crate::error::{Result, SimilarityError};
use crate::models::Dataset;
use crate::scorer::SimilarityMatrix;
use serde::Serialize;
use tracing::{debug, instrument};

/// Number of results returned when the caller does not choose one
pub const DEFAULT_TOP_N: usize = 10;

/// One ranked result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarTitle {
    /// Row index in the dataset
    pub index: usize,
    pub title: String,
    pub genres: String,
    pub imdb_rating: f64,
    /// Blended similarity to the queried title
    pub score: f64,
}

/// Rank every other row by similarity to `title`
///
/// The queried row is excluded by index, not by rank, so it never appears in
/// the output even when another row scores as high or higher. Ties are broken
/// by ascending row index. When several rows share the title, the first one is
/// used.
///
/// # Errors
///
/// - `TitleNotFound` if no row has exactly this title (case-sensitive)
/// - `InvalidTopN` if `top_n` is 0
/// - `ShapeMismatch` if the matrix was not built from this dataset
#[instrument(skip(dataset, matrix))]
pub fn find_similar(
    dataset: &Dataset,
    matrix: &SimilarityMatrix,
    title: &str,
    top_n: usize,
) -> Result<Vec<SimilarTitle>> {
    if top_n == 0 {
        return Err(SimilarityError::InvalidTopN);
    }

    if matrix.len() != dataset.len() {
        return Err(SimilarityError::ShapeMismatch {
            matrix: matrix.len(),
            dataset: dataset.len(),
        });
    }

    let target = dataset
        .position(title)
        .ok_or_else(|| SimilarityError::TitleNotFound {
            title: title.to_string(),
        })?;

    let scores = matrix
        .row(target)
        .ok_or_else(|| SimilarityError::ShapeMismatch {
            matrix: matrix.len(),
            dataset: dataset.len(),
        })?;

    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != target)
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);

    debug!(target, results = ranked.len(), "Ranked similar titles");

    Ok(ranked
        .into_iter()
        .filter_map(|(index, score)| {
            dataset.get(index).map(|row| SimilarTitle {
                index,
                title: row.title.clone(),
                genres: row.genres.clone(),
                imdb_rating: row.imdb_rating,
                score,
            })
        })
        .collect())
}
