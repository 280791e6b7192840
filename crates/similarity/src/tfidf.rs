//! TF-IDF vectorization of feature text
//!
//! Tokens are whitespace-delimited and lowercased by default. The vocabulary
//! is every distinct token in the fitted corpus, sorted lexicographically.
//! Term weights are raw term frequency times smoothed inverse document
//! frequency, and every output row is scaled to unit L2 norm.

use cinematch_core::normalize_vector;
use ndarray::{Array1, Array2};
use std::collections::{BTreeMap, HashMap, HashSet};

/// TF-IDF vectorizer over whitespace tokens
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    lowercase: bool,
    smooth_idf: bool,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    fitted: bool,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            lowercase: true,
            smooth_idf: true,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
            fitted: false,
        }
    }

    /// Fold tokens to lowercase before counting (default: true)
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Use `ln((1 + n) / (1 + df)) + 1` instead of `ln(n / df) + 1` (default: true)
    pub fn with_smooth_idf(mut self, smooth_idf: bool) -> Self {
        self.smooth_idf = smooth_idf;
        self
    }

    fn tokenize(&self, document: &str) -> Vec<String> {
        document
            .split_whitespace()
            .map(|token| {
                if self.lowercase {
                    token.to_lowercase()
                } else {
                    token.to_string()
                }
            })
            .collect()
    }

    /// Learn vocabulary and document frequencies from `documents`
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        let n_docs = documents.len() as f64;
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique: HashSet<String> = self.tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        self.idf = doc_freq
            .values()
            .map(|&df| {
                let df = df as f64;
                if self.smooth_idf {
                    ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
                } else {
                    (n_docs / df).ln() + 1.0
                }
            })
            .collect();

        self.vocabulary = doc_freq
            .into_keys()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        self.fitted = true;
    }

    /// Project `documents` onto the fitted vocabulary
    ///
    /// Returns an `n_documents × vocabulary_size` matrix with L2-normalized
    /// rows. Documents without any known token produce a zero row. An
    /// unfitted vectorizer has an empty vocabulary.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Array2<f64> {
        let n_terms = self.vocabulary.len();
        let mut matrix = Array2::<f64>::zeros((documents.len(), n_terms));

        for (i, doc) in documents.iter().enumerate() {
            let mut counts: HashMap<usize, usize> = HashMap::new();
            for token in self.tokenize(doc.as_ref()) {
                if let Some(&column) = self.vocabulary.get(&token) {
                    *counts.entry(column).or_insert(0) += 1;
                }
            }

            let mut row = vec![0.0; n_terms];
            for (column, count) in counts {
                row[column] = count as f64 * self.idf[column];
            }
            normalize_vector(&mut row);

            matrix.row_mut(i).assign(&Array1::from(row));
        }

        matrix
    }

    /// Fit on `documents` and transform them in one pass
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Array2<f64> {
        self.fit(documents);
        self.transform(documents)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vocabulary terms ordered by column index
    pub fn feature_names(&self) -> Vec<String> {
        // BTreeMap iteration order matches the column assignment
        self.vocabulary.keys().cloned().collect()
    }

    /// IDF weight per column
    pub fn idf_values(&self) -> &[f64] {
        &self.idf
    }
}
