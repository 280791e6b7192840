//! Feature normalization
//!
//! Projects raw records onto the fixed `FeatureRow` schema. Records missing a
//! title, genres or rating are dropped; a rating without a usable `avg` is
//! kept and defaults to 0.

use crate::models::{Dataset, Rating, RawRecord, Record};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Record counts collected during normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub records_in: usize,
    pub dropped_records: usize,
    /// Kept records whose rating had no usable `avg`
    pub defaulted_ratings: usize,
}

/// Normalized dataset plus statistics
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub dataset: Dataset,
    pub stats: NormalizeStats,
}

/// Normalize raw records into a dataset, preserving input order
#[instrument(skip(records), fields(records = records.len()))]
pub fn normalize_records(records: &[RawRecord]) -> Normalized {
    let mut stats = NormalizeStats {
        records_in: records.len(),
        ..Default::default()
    };

    let rows = records
        .iter()
        .filter_map(|raw| match Record::from_value(&raw.value) {
            Ok(record) => {
                if record.rating == Rating::Absent {
                    stats.defaulted_ratings += 1;
                }
                Some(record.into_feature_row())
            }
            Err(field) => {
                stats.dropped_records += 1;
                debug!(line = raw.line, field = %field, "Dropping record with missing field");
                None
            }
        })
        .collect::<Vec<_>>();

    info!(
        rows = rows.len(),
        dropped_records = stats.dropped_records,
        defaulted_ratings = stats.defaulted_ratings,
        "Normalized records"
    );

    Normalized {
        dataset: Dataset::new(rows),
        stats,
    }
}
