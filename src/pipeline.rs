// 🔀 Transform pipeline - load → split → persist
//
// Straight-line batch job. Any error halts the run; nothing is partially
// recovered.

use crate::cleaning::{to_campaign, to_client, to_economics};
use crate::config::PipelineConfig;
use crate::error::{EtlError, Result};
use crate::source::{load_source, SourceRecord};
use crate::tables::NormalizedTables;
use crate::writer::write_table;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Row counts of one run, for the verification summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingReport {
    pub source_rows: usize,
    pub client_rows: usize,
    pub campaign_rows: usize,
    pub economics_rows: usize,
    pub client_output: PathBuf,
    pub campaign_output: PathBuf,
    pub economics_output: PathBuf,
}

impl ProcessingReport {
    /// Every output has exactly as many rows as the source
    pub fn is_consistent(&self) -> bool {
        self.client_rows == self.source_rows
            && self.campaign_rows == self.source_rows
            && self.economics_rows == self.source_rows
    }

    pub fn print_verification(&self) {
        println!("\nData verification:");
        println!("{}: {} records", file_label(&self.client_output), self.client_rows);
        println!("{}: {} records", file_label(&self.campaign_output), self.campaign_rows);
        println!("{}: {} records", file_label(&self.economics_output), self.economics_rows);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Derive the three normalized tables from the source rows, preserving order
pub fn split(records: &[SourceRecord]) -> Result<NormalizedTables> {
    let mut tables = NormalizedTables::with_capacity(records.len());

    info!("Processing client data...");
    tables.clients.extend(records.iter().map(to_client));

    info!("Processing campaign data...");
    for record in records {
        tables.campaigns.push(to_campaign(record)?);
    }

    info!("Processing economics data...");
    tables.economics.extend(records.iter().map(to_economics));

    Ok(tables)
}

/// Create `dir` and its parents; existing directories are left alone
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| EtlError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    info!("Created directory: {}", dir.display());
    Ok(())
}

/// Write every table to its configured location
pub fn persist(config: &PipelineConfig, tables: &NormalizedTables) -> Result<()> {
    write_table(&config.client_output, &tables.clients)?;
    write_table(&config.campaign_output, &tables.campaigns)?;
    write_table(&config.economics_output, &tables.economics)?;
    Ok(())
}

/// Run the whole job
pub fn run(config: &PipelineConfig) -> Result<ProcessingReport> {
    ensure_output_dir(&config.output_dir)?;

    let records = load_source(&config.input_path)?;
    let tables = split(&records)?;
    persist(config, &tables)?;

    info!("Data processing completed successfully!");

    Ok(ProcessingReport {
        source_rows: records.len(),
        client_rows: tables.clients.len(),
        campaign_rows: tables.campaigns.len(),
        economics_rows: tables.economics.len(),
        client_output: config.client_output.clone(),
        campaign_output: config.campaign_output.clone(),
        economics_output: config.economics_output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn record(client_id: i64, education: &str, day: u32, month: &str) -> SourceRecord {
        SourceRecord {
            client_id,
            age: 30 + client_id,
            job: Some("admin.".to_string()),
            marital: Some("single".to_string()),
            education: Some(education.to_string()),
            credit_default: Some("no".to_string()),
            mortgage: None,
            number_contacts: 1,
            contact_duration: 60,
            previous_campaign_contacts: 0,
            previous_outcome: Some("nonexistent".to_string()),
            campaign_outcome: Some("no".to_string()),
            day,
            month: month.to_string(),
            cons_price_idx: 92.893,
            euribor_three_months: 1.313,
        }
    }

    #[test]
    fn test_split_preserves_count_and_ids() {
        let records = vec![
            record(10, "basic.4y", 5, "Jan"),
            record(3, "unknown", 31, "Dec"),
            record(10, "high.school", 15, "may"),
        ];

        let tables = split(&records).unwrap();

        assert_eq!(tables.row_count(), Some(records.len()));
        assert!(tables.ids_aligned());
        let ids: Vec<i64> = tables.clients.iter().map(|c| c.client_id).collect();
        assert_eq!(ids, vec![10, 3, 10]);

        assert_eq!(tables.clients[0].job.as_deref(), Some("admin_"));
        assert_eq!(tables.clients[0].education.as_deref(), Some("basic_4y"));
        assert_eq!(tables.clients[1].education, None);
        assert_eq!(
            tables.campaigns[0].last_contact_date,
            NaiveDate::from_ymd_opt(2022, 1, 5).unwrap()
        );
        assert_eq!(
            tables.campaigns[1].last_contact_date,
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_split_empty_source() {
        let tables = split(&[]).unwrap();
        assert_eq!(tables.row_count(), Some(0));
    }

    #[test]
    fn test_split_stops_on_bad_month() {
        let records = vec![record(1, "basic.4y", 5, "jan"), record(2, "basic.4y", 5, "xyz")];
        let result = split(&records);
        assert!(matches!(
            result,
            Err(EtlError::UnknownMonth { client_id: 2, .. })
        ));
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("data").join("processed");

        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
        ensure_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn test_run_without_source_fails_but_creates_dir() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::rooted_at(dir.path());

        let result = run(&config);

        assert!(matches!(result, Err(EtlError::MissingSource { .. })));
        assert!(config.output_dir.is_dir());
        assert!(!config.client_output.exists());
    }

    #[test]
    fn test_report_consistency() {
        let report = ProcessingReport {
            source_rows: 4,
            client_rows: 4,
            campaign_rows: 4,
            economics_rows: 4,
            client_output: PathBuf::from("data/processed/client.csv"),
            campaign_output: PathBuf::from("data/processed/campaign.csv"),
            economics_output: PathBuf::from("data/processed/economics.csv"),
        };
        assert!(report.is_consistent());

        let short = ProcessingReport {
            economics_rows: 3,
            ..report
        };
        assert!(!short.is_consistent());
        assert_eq!(file_label(&short.client_output), "client.csv");
    }
}
