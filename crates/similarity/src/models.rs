//! Data model for the similarity pipeline
//!
//! `RawRecord` is what the loader produces, `Record` is the validated view of
//! one movie, and `FeatureRow` is the normalized row that the scorer consumes.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// One successfully decoded input line
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source file
    pub line: usize,
    pub value: Value,
}

/// Average rating extracted from the nested `rating` field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Present(f64),
    /// Rating field exists but carries no usable `avg`
    Absent,
}

impl Rating {
    /// Rating used when the field carries no usable `avg`
    pub const DEFAULT: f64 = 0.0;

    /// Interpret a `rating` value
    ///
    /// Only a mapping with a numeric `avg` yields `Present`. Any other shape
    /// (scalar, list, missing or null `avg`, non-numeric `avg`) is `Absent`.
    pub fn from_value(value: &Value) -> Self {
        value
            .as_object()
            .and_then(|rating| rating.get("avg"))
            .and_then(Value::as_f64)
            .map_or(Self::Absent, Self::Present)
    }

    pub fn value_or_default(self) -> f64 {
        match self {
            Self::Present(avg) => avg,
            Self::Absent => Self::DEFAULT,
        }
    }
}

/// Fields every record must carry to survive normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Genres,
    Rating,
}

impl RequiredField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Genres => "genres",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated view of one movie record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    /// Genre tags; empty when the source value is not a list
    pub genres: Vec<String>,
    pub rating: Rating,
}

impl Record {
    /// Build a record from a decoded JSON value
    ///
    /// A field that is absent or `null` is missing. A value that is not a JSON
    /// object has no fields at all. A non-string title such as `42` is kept
    /// under its JSON text.
    pub fn from_value(value: &Value) -> Result<Self, RequiredField> {
        let title = match present(value, RequiredField::Title)? {
            Value::String(title) => title.clone(),
            other => other.to_string(),
        };

        let genres = match present(value, RequiredField::Genres)? {
            Value::Array(tags) => tags
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        let rating = Rating::from_value(present(value, RequiredField::Rating)?);

        Ok(Self {
            title,
            genres,
            rating,
        })
    }

    /// Project the record onto the fixed feature schema
    pub fn into_feature_row(self) -> FeatureRow {
        let genres = self.genres.join(" ");
        FeatureRow {
            title: self.title,
            features: genres.clone(),
            genres,
            imdb_rating: self.rating.value_or_default(),
        }
    }
}

fn present(value: &Value, field: RequiredField) -> Result<&Value, RequiredField> {
    match value.get(field.as_str()) {
        None | Some(Value::Null) => Err(field),
        Some(v) => Ok(v),
    }
}

/// Normalized movie row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub title: String,
    /// Space-joined genre tags as stored
    pub genres: String,
    /// Text fed to the vectorizer (currently the genre blob only)
    pub features: String,
    pub imdb_rating: f64,
}

/// Ordered rows, index-aligned with the similarity matrix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<FeatureRow>,
}

impl Dataset {
    pub fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FeatureRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter()
    }

    /// Index of the first row whose title matches exactly (case-sensitive)
    pub fn position(&self, title: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.title == title)
    }

    /// Feature text of every row, in order
    pub fn features(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.features.as_str()).collect()
    }

    /// Numeric rating of every row, in order
    pub fn ratings(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.imdb_rating).collect()
    }
}

impl From<Vec<FeatureRow>> for Dataset {
    fn from(rows: Vec<FeatureRow>) -> Self {
        Self::new(rows)
    }
}
