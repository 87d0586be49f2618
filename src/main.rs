use anyhow::{Context, Result};
use rusqlite::Connection;
use std::env;

use bank_marketing_etl::{load_processed, logging, orphaned_client_ids, run, table_counts, PipelineConfig};

fn main() -> Result<()> {
    logging::init_logging();

    let args: Vec<String> = env::args().collect();
    let config = PipelineConfig::default();

    if args.len() > 1 && args[1] == "load-db" {
        // Load mode
        run_load_db(&config)?;
    } else {
        // Transform mode (default)
        run_transform(&config)?;
    }

    Ok(())
}

fn run_transform(config: &PipelineConfig) -> Result<()> {
    let report = run(config).context("Bank marketing processing failed")?;
    report.print_verification();

    if !report.is_consistent() {
        anyhow::bail!(
            "Row counts diverged from source ({} rows)",
            report.source_rows
        );
    }

    Ok(())
}

fn run_load_db(config: &PipelineConfig) -> Result<()> {
    println!("🗄️  Loading processed tables into {}", config.database_path.display());

    let conn = Connection::open(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;

    let inserted = load_processed(config, &conn)?;
    println!("✓ Inserted {} rows", inserted);

    let counts = table_counts(&conn)?;
    println!("✓ client: {} rows", counts.client);
    println!("✓ campaign: {} rows", counts.campaign);
    println!("✓ economics: {} rows", counts.economics);

    let orphans = orphaned_client_ids(&conn)?;
    if orphans.is_empty() {
        println!("✅ Every campaign/economics row joins to a client");
    } else {
        anyhow::bail!("{} client ids have no client row: {:?}", orphans.len(), orphans);
    }

    Ok(())
}
