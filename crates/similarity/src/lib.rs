//! Cinematch content-based similarity
//!
//! Scores movies against each other from a JSON Lines catalogue: genre text is
//! vectorized with TF-IDF and compared by cosine similarity, then blended with
//! the min-max scaled average rating of each candidate.
//!
//! ```no_run
//! use cinematch_similarity::{ScoringWeights, SimilarityIndex};
//!
//! # fn example() -> cinematch_similarity::Result<()> {
//! let index = SimilarityIndex::from_path("movies.jsonl", ScoringWeights::default())?;
//! for movie in index.similar_to("Kate & Leopold", 10)? {
//!     println!("{} ({:.3})", movie.title, movie.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod query;
pub mod scorer;
pub mod tfidf;

pub use error::{Result, SimilarityError};
pub use loader::{load_records, read_records, LoadStats, LoadedRecords};
pub use models::{Dataset, FeatureRow, Rating, RawRecord, Record, RequiredField};
pub use normalizer::{normalize_records, NormalizeStats, Normalized};
pub use pipeline::{recommend, PipelineStats, SimilarityIndex};
pub use query::{find_similar, SimilarTitle, DEFAULT_TOP_N};
pub use scorer::{
    blend, compute_similarity, cosine_similarity_matrix, min_max_scale, ScoringWeights,
    SimilarityMatrix, SimilarityScores, CONSTANT_RATING_SCALE,
};
pub use tfidf::TfidfVectorizer;

#[cfg(test)]
mod tests;
