use cinematch_core::CinematchError;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Errors returned by the similarity pipeline
///
/// Malformed lines and records with missing fields are not errors: they are
/// skipped and counted in the load and normalization statistics.
#[derive(Debug, thiserror::Error)]
pub enum SimilarityError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Movie not found in database: {title}")]
    TitleNotFound { title: String },

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("Similarity matrix has {matrix} rows but the dataset has {dataset}")]
    ShapeMismatch { matrix: usize, dataset: usize },

    #[error(transparent)]
    Config(#[from] CinematchError),
}

impl SimilarityError {
    /// True when the queried title is absent from the dataset
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TitleNotFound { .. })
    }
}
