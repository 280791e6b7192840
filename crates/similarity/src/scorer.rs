//! Blended similarity scoring
//!
//! `matrix[i][j] = text_weight * cos(features_i, features_j) + rating_weight * scaled_rating_j`
//!
//! The rating term depends only on the candidate column `j`, so every row
//! receives the same bonus for a given candidate and the matrix is not
//! symmetric in general.

use crate::error::Result;
use crate::models::Dataset;
use crate::tfidf::TfidfVectorizer;
use cinematch_core::ScoringConfig;
use ndarray::{Array1, Array2, ArrayView1};
use tracing::{debug, instrument};

/// Scaled rating assigned to every row when all ratings are equal
pub const CONSTANT_RATING_SCALE: f64 = 0.0;

/// Blend weights for text and rating similarity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    text: f64,
    rating: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            text: 0.8,
            rating: 0.2,
        }
    }
}

impl ScoringWeights {
    /// Create validated weights
    ///
    /// Weights must be finite, non-negative and sum to 1.0 (within 1e-4).
    /// They are rescaled to sum to exactly 1.0 so blended scores stay within
    /// [0, 1].
    pub fn new(text: f64, rating: f64) -> Result<Self> {
        Self::from_config(&ScoringConfig {
            text_weight: text,
            rating_weight: rating,
            ..ScoringConfig::default()
        })
    }

    /// Weights from a scoring configuration
    ///
    /// Only the weight fields are validated; `top_n` is ignored.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        config.validate_weights()?;

        let sum = config.text_weight + config.rating_weight;
        Ok(Self {
            text: config.text_weight / sum,
            rating: config.rating_weight / sum,
        })
    }

    pub fn text(&self) -> f64 {
        self.text
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }
}

/// Square matrix of blended similarity scores, row i ↔ dataset row i
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    values: Array2<f64>,
}

impl SimilarityMatrix {
    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get((row, column)).copied()
    }

    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.len()).then(|| self.values.row(index))
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.values
    }
}

/// Scorer output: the matrix and the vocabulary it was built from
#[derive(Debug, Clone)]
pub struct SimilarityScores {
    pub matrix: SimilarityMatrix,
    /// Vectorizer vocabulary ordered by column index
    pub vocabulary: Vec<String>,
}

/// Min-max scale `values` into [0, 1]
///
/// When every value is equal the range is zero and each value maps to
/// `CONSTANT_RATING_SCALE`. Empty input yields empty output.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    // Halved so that `max - min` cannot overflow for finite extremes
    let half_range = max / 2.0 - min / 2.0;
    if !(half_range > 0.0) || !half_range.is_finite() {
        return vec![CONSTANT_RATING_SCALE; values.len()];
    }

    values
        .iter()
        .map(|&v| ((v / 2.0 - min / 2.0) / half_range).clamp(0.0, 1.0))
        .collect()
}

/// Pairwise cosine similarity of L2-normalized rows, clamped to [0, 1]
///
/// Zero rows have similarity 0 with every row, including themselves.
pub fn cosine_similarity_matrix(features: &Array2<f64>) -> Array2<f64> {
    let mut similarities = features.dot(&features.t());
    similarities.mapv_inplace(|v| v.clamp(0.0, 1.0));
    similarities
}

/// Blend text similarity with the per-column rating bonus
pub fn blend(cosine: &Array2<f64>, scaled_ratings: &[f64], weights: ScoringWeights) -> Array2<f64> {
    let bonus: Array1<f64> = scaled_ratings.iter().map(|s| s * weights.rating()).collect();

    let mut blended = cosine * weights.text();
    // Broadcasts along rows: blended[[i, j]] += bonus[j]
    blended += &bonus;
    blended
}

/// Build the blended similarity matrix for a dataset
#[instrument(skip(dataset), fields(rows = dataset.len()))]
pub fn compute_similarity(dataset: &Dataset, weights: ScoringWeights) -> SimilarityScores {
    let mut vectorizer = TfidfVectorizer::new();
    let features = vectorizer.fit_transform(&dataset.features());

    let cosine = cosine_similarity_matrix(&features);
    let scaled = min_max_scale(&dataset.ratings());
    let values = blend(&cosine, &scaled, weights);

    debug!(
        vocabulary_size = vectorizer.vocabulary_size(),
        text_weight = weights.text(),
        rating_weight = weights.rating(),
        "Computed similarity matrix"
    );

    SimilarityScores {
        matrix: SimilarityMatrix { values },
        vocabulary: vectorizer.feature_names(),
    }
}
