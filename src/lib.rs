// Bank Marketing ETL - Core Library
// Splits the flat campaign export into client, campaign and economics tables

pub mod cleaning;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod source;
pub mod tables;
pub mod writer;

// Re-export commonly used types
pub use cleaning::{
    flag, month_number, normalize_category, recode_education, synthesize_contact_date,
    to_campaign, to_client, to_economics, CONTACT_YEAR, MONTH_TABLE,
};
pub use config::PipelineConfig;
pub use db::{insert_tables, load_processed, orphaned_client_ids, setup_database, table_counts, TableCounts};
pub use error::{EtlError, Result};
pub use pipeline::{run, split, ProcessingReport};
pub use source::{load_source, SourceRecord, SOURCE_COLUMNS};
pub use tables::{CampaignRow, ClientRow, EconomicsRow, NormalizedTables, OutputTable};
pub use writer::{read_header, read_table, write_table};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
