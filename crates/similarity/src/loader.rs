//! JSON Lines record loader
//!
//! Each line of the input is decoded on its own. Lines that are not valid JSON
//! (including blank lines) are skipped and counted; they never abort the load.

use crate::error::{Result, SimilarityError};
use crate::models::RawRecord;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Line counts collected while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub lines_read: usize,
    pub skipped_lines: usize,
}

impl LoadStats {
    pub fn records_parsed(&self) -> usize {
        self.lines_read - self.skipped_lines
    }
}

/// Decoded records in input order
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<RawRecord>,
    pub stats: LoadStats,
}

/// Load records from a JSON Lines file
///
/// # Errors
///
/// Returns `SimilarityError::Io` if the file cannot be opened or read. A line
/// that is not valid UTF-8 is a read failure.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_records(path: impl AsRef<Path>) -> Result<LoadedRecords> {
    let path = path.as_ref();
    let io_error = |source| SimilarityError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let loaded = read_records(BufReader::new(file)).map_err(io_error)?;

    if loaded.stats.skipped_lines > 0 {
        warn!(
            lines_read = loaded.stats.lines_read,
            skipped_lines = loaded.stats.skipped_lines,
            "Skipped malformed lines while loading records"
        );
    } else {
        info!(lines_read = loaded.stats.lines_read, "Loaded records");
    }

    Ok(loaded)
}

/// Decode records from any buffered reader
pub fn read_records<R: BufRead>(reader: R) -> std::io::Result<LoadedRecords> {
    let mut loaded = LoadedRecords::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        loaded.stats.lines_read += 1;

        match serde_json::from_str::<Value>(&line) {
            Ok(value) => loaded.records.push(RawRecord {
                line: line_number,
                value,
            }),
            Err(e) => {
                loaded.stats.skipped_lines += 1;
                debug!(line = line_number, error = %e, "Skipping malformed line");
            }
        }
    }

    Ok(loaded)
}
