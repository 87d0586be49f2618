// 💾 Table persistence - one CSV per normalized table

use crate::error::{EtlError, Result};
use crate::tables::OutputTable;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Write `rows` to `path` as CSV.
///
/// The header is written from `T::COLUMNS` rather than inferred from the
/// first row, so an empty table still gets its header. Missing values are
/// written as empty cells; no index column.
pub fn write_table<T: OutputTable>(path: &Path, rows: &[T]) -> Result<usize> {
    info!("Saving {} data to {}...", T::NAME, path.display());

    let write_err = |source: csv::Error| EtlError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(write_err)?;

    writer.write_record(T::COLUMNS).map_err(write_err)?;
    for row in rows {
        writer.serialize(row).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(csv::Error::from(e)))?;

    Ok(rows.len())
}

/// Read a persisted table back into typed rows
pub fn read_table<T: OutputTable + DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let read_err = |source: csv::Error| EtlError::ReadBack {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result.map_err(read_err)?);
    }
    Ok(rows)
}

/// Header row of a persisted table
pub fn read_header(path: &Path) -> Result<Vec<String>> {
    let read_err = |source: csv::Error| EtlError::ReadBack {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
    let headers = reader.headers().map_err(read_err)?;
    Ok(headers.iter().map(|h| h.to_string()).collect())
}
