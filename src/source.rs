// 📥 Source loader - raw bank marketing CSV → Vec<SourceRecord>
// No filtering, no sorting: row order in == row order out.

use crate::error::{EtlError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// SOURCE SCHEMA
// ============================================================================

/// Columns the raw file must carry, in the order they are documented
pub const SOURCE_COLUMNS: [&str; 16] = [
    "client_id",
    "age",
    "job",
    "marital",
    "education",
    "credit_default",
    "mortgage",
    "number_contacts",
    "contact_duration",
    "previous_campaign_contacts",
    "previous_outcome",
    "campaign_outcome",
    "day",
    "month",
    "cons_price_idx",
    "euribor_three_months",
];

/// Older exports name the identifier column `id`
const IDENTIFIER_ALIAS: &str = "id";

/// One row of the raw dataset, as read.
///
/// String columns are optional: an empty cell deserializes to `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRecord {
    #[serde(alias = "id")]
    pub client_id: i64,
    pub age: i64,
    pub job: Option<String>,
    pub marital: Option<String>,
    pub education: Option<String>,
    pub credit_default: Option<String>,
    pub mortgage: Option<String>,
    pub number_contacts: i64,
    pub contact_duration: i64,
    pub previous_campaign_contacts: i64,
    pub previous_outcome: Option<String>,
    pub campaign_outcome: Option<String>,
    pub day: u32,
    pub month: String,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

// ============================================================================
// LOADING
// ============================================================================

/// Load the raw dataset from disk
pub fn load_source(path: &Path) -> Result<Vec<SourceRecord>> {
    info!("Loading data from {}...", path.display());

    let file = File::open(path).map_err(|source| EtlError::MissingSource {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_source(file, path)?;
    info!("Loaded {} records.", records.len());
    Ok(records)
}

/// Parse source rows from any reader; `origin` is only used in errors
pub fn read_source<R: Read>(reader: R, origin: &Path) -> Result<Vec<SourceRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|source| EtlError::MalformedRecord {
        path: origin.to_path_buf(),
        line: 1,
        source,
    })?;

    let header_names: Vec<&str> = headers.iter().collect();
    let missing = missing_columns(&header_names);
    if !missing.is_empty() {
        return Err(EtlError::SchemaMismatch {
            path: origin.to_path_buf(),
            missing,
        });
    }
    debug!("Header has {} columns, all expected columns present", header_names.len());

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<SourceRecord>().enumerate() {
        let record = result.map_err(|source| EtlError::MalformedRecord {
            path: origin.to_path_buf(),
            // +2 because: 1-indexed + header row
            line: source
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2),
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Expected columns absent from `headers`
pub fn missing_columns(headers: &[&str]) -> Vec<String> {
    SOURCE_COLUMNS
        .iter()
        .filter(|&&column| {
            let present = headers.contains(&column);
            let aliased = column == "client_id" && headers.contains(&IDENTIFIER_ALIAS);
            !(present || aliased)
        })
        .map(|column| column.to_string())
        .collect()
}
