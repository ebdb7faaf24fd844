//! Read/write scan estimates as JSON.
//!
//! The JSON form is the portable record of a scan: the selected Mc (or null),
//! alpha, every evaluated candidate with its mean p-value and event count, and
//! the candidates skipped for having too few events. The schema is defined by
//! `domain::McEstimate`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::McEstimate;
use crate::error::McError;

/// Serialize `estimate` as pretty-printed JSON.
pub fn estimate_to_json(estimate: &McEstimate) -> Result<String, McError> {
    Ok(serde_json::to_string_pretty(estimate)?)
}

/// Write an estimate JSON file.
pub fn write_estimate_json(path: &Path, estimate: &McEstimate) -> Result<(), McError> {
    let file = File::create(path).map_err(|source| McError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, estimate)?;
    writer.flush().map_err(|source| McError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Read an estimate JSON file.
pub fn read_estimate_json(path: &Path) -> Result<McEstimate, McError> {
    let file = File::open(path).map_err(|source| McError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
