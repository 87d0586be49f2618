// 🗄️ Relational load - normalized tables → SQLite
// The three CSV outputs map 1:1 onto three tables joined by client_id.

use crate::config::PipelineConfig;
use crate::tables::{CampaignRow, ClientRow, EconomicsRow, NormalizedTables, OutputTable};
use crate::writer::read_table;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub client: i64,
    pub campaign: i64,
    pub economics: i64,
}

impl TableCounts {
    pub fn all_equal(&self) -> bool {
        self.client == self.campaign && self.campaign == self.economics
    }
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    // client_id is not UNIQUE: the load never rejects rows
    conn.execute(
        "CREATE TABLE IF NOT EXISTS client (
            client_id INTEGER NOT NULL,
            age INTEGER NOT NULL,
            job TEXT,
            marital TEXT,
            education TEXT,
            credit_default INTEGER NOT NULL CHECK (credit_default IN (0, 1)),
            mortgage INTEGER NOT NULL CHECK (mortgage IN (0, 1))
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS campaign (
            client_id INTEGER NOT NULL,
            number_contacts INTEGER NOT NULL,
            contact_duration INTEGER NOT NULL,
            previous_campaign_contacts INTEGER NOT NULL,
            previous_outcome INTEGER NOT NULL CHECK (previous_outcome IN (0, 1)),
            campaign_outcome INTEGER NOT NULL CHECK (campaign_outcome IN (0, 1)),
            last_contact_date TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS economics (
            client_id INTEGER NOT NULL,
            cons_price_idx REAL NOT NULL,
            euribor_three_months REAL NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_client_id ON client(client_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_campaign_client_id ON campaign(client_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_economics_client_id ON economics(client_id)",
        [],
    )?;

    Ok(())
}

/// Replace the contents of all three tables with `tables`.
///
/// Runs in one SQL transaction; returns the number of rows inserted
/// across the three tables.
pub fn insert_tables(conn: &Connection, tables: &NormalizedTables) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;

    tx.execute("DELETE FROM client", [])?;
    tx.execute("DELETE FROM campaign", [])?;
    tx.execute("DELETE FROM economics", [])?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO client (
                client_id, age, job, marital, education, credit_default, mortgage
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for row in &tables.clients {
            stmt.execute(params![
                row.client_id,
                row.age,
                row.job,
                row.marital,
                row.education,
                row.credit_default,
                row.mortgage,
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO campaign (
                client_id, number_contacts, contact_duration, previous_campaign_contacts,
                previous_outcome, campaign_outcome, last_contact_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for row in &tables.campaigns {
            stmt.execute(params![
                row.client_id,
                row.number_contacts,
                row.contact_duration,
                row.previous_campaign_contacts,
                row.previous_outcome,
                row.campaign_outcome,
                row.last_contact_date.format("%Y-%m-%d").to_string(),
            ])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO economics (
                client_id, cons_price_idx, euribor_three_months
            ) VALUES (?1, ?2, ?3)",
        )?;
        for row in &tables.economics {
            stmt.execute(params![
                row.client_id,
                row.cons_price_idx,
                row.euribor_three_months,
            ])?;
        }
    }

    tx.commit()?;

    let inserted = tables.clients.len() + tables.campaigns.len() + tables.economics.len();
    info!("Inserted {} rows across 3 tables", inserted);
    Ok(inserted)
}

pub fn table_counts(conn: &Connection) -> Result<TableCounts> {
    let count = |table: &str| -> Result<i64> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })?;
        Ok(n)
    };

    Ok(TableCounts {
        client: count(ClientRow::NAME)?,
        campaign: count(CampaignRow::NAME)?,
        economics: count(EconomicsRow::NAME)?,
    })
}

/// Identifiers in campaign or economics with no matching client row
pub fn orphaned_client_ids(conn: &Connection) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT client_id FROM (
            SELECT client_id FROM campaign
            UNION ALL
            SELECT client_id FROM economics
        )
        WHERE client_id NOT IN (SELECT client_id FROM client)
        ORDER BY client_id",
    )?;

    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(ids)
}

/// Read the processed CSVs back and load them
pub fn load_processed(config: &PipelineConfig, conn: &Connection) -> Result<usize> {
    let tables = NormalizedTables {
        clients: read_table(&config.client_output)
            .with_context(|| format!("Failed to load {}", config.client_output.display()))?,
        campaigns: read_table(&config.campaign_output)
            .with_context(|| format!("Failed to load {}", config.campaign_output.display()))?,
        economics: read_table(&config.economics_output)
            .with_context(|| format!("Failed to load {}", config.economics_output.display()))?,
    };

    setup_database(conn)?;
    insert_tables(conn, &tables)
}
