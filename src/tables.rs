// 🗂️ Normalized tables - client, campaign, economics
// All three share `client_id` as the join key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A row type that is persisted as its own CSV table.
///
/// `COLUMNS` is the header row, in the same order as the struct fields,
/// so the header can be written even when the table has no rows.
pub trait OutputTable: Serialize {
    const NAME: &'static str;
    const COLUMNS: &'static [&'static str];

    fn client_id(&self) -> i64;
}

/// Per-person demographics and loan flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRow {
    pub client_id: i64,
    pub age: i64,
    pub job: Option<String>,
    pub marital: Option<String>,
    /// `None` where the source said "unknown"
    pub education: Option<String>,
    pub credit_default: u8,
    pub mortgage: u8,
}

/// Per-interaction contact and outcome facts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRow {
    pub client_id: i64,
    pub number_contacts: i64,
    pub contact_duration: i64,
    pub previous_campaign_contacts: i64,
    pub previous_outcome: u8,
    pub campaign_outcome: u8,
    pub last_contact_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomicsRow {
    pub client_id: i64,
    pub cons_price_idx: f64,
    pub euribor_three_months: f64,
}

impl OutputTable for ClientRow {
    const NAME: &'static str = "client";
    const COLUMNS: &'static [&'static str] = &[
        "client_id",
        "age",
        "job",
        "marital",
        "education",
        "credit_default",
        "mortgage",
    ];

    fn client_id(&self) -> i64 {
        self.client_id
    }
}

impl OutputTable for CampaignRow {
    const NAME: &'static str = "campaign";
    const COLUMNS: &'static [&'static str] = &[
        "client_id",
        "number_contacts",
        "contact_duration",
        "previous_campaign_contacts",
        "previous_outcome",
        "campaign_outcome",
        "last_contact_date",
    ];

    fn client_id(&self) -> i64 {
        self.client_id
    }
}

impl OutputTable for EconomicsRow {
    const NAME: &'static str = "economics";
    const COLUMNS: &'static [&'static str] =
        &["client_id", "cons_price_idx", "euribor_three_months"];

    fn client_id(&self) -> i64 {
        self.client_id
    }
}

/// The three tables derived from one source load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTables {
    pub clients: Vec<ClientRow>,
    pub campaigns: Vec<CampaignRow>,
    pub economics: Vec<EconomicsRow>,
}

impl NormalizedTables {
    pub fn with_capacity(rows: usize) -> Self {
        NormalizedTables {
            clients: Vec::with_capacity(rows),
            campaigns: Vec::with_capacity(rows),
            economics: Vec::with_capacity(rows),
        }
    }

    /// Row count shared by all three tables, or `None` if they disagree
    pub fn row_count(&self) -> Option<usize> {
        let n = self.clients.len();
        if self.campaigns.len() == n && self.economics.len() == n {
            Some(n)
        } else {
            None
        }
    }

    /// True when row `i` of every table carries the same identifier
    pub fn ids_aligned(&self) -> bool {
        self.row_count().is_some()
            && self
                .clients
                .iter()
                .zip(&self.campaigns)
                .zip(&self.economics)
                .all(|((c, p), e)| {
                    c.client_id() == p.client_id() && p.client_id() == e.client_id()
                })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables_for(ids: &[i64]) -> NormalizedTables {
        let mut tables = NormalizedTables::with_capacity(ids.len());
        for &id in ids {
            tables.clients.push(ClientRow {
                client_id: id,
                age: 30,
                job: Some("admin_".to_string()),
                marital: Some("single".to_string()),
                education: None,
                credit_default: 0,
                mortgage: 1,
            });
            tables.campaigns.push(CampaignRow {
                client_id: id,
                number_contacts: 1,
                contact_duration: 100,
                previous_campaign_contacts: 0,
                previous_outcome: 0,
                campaign_outcome: 1,
                last_contact_date: NaiveDate::from_ymd_opt(2022, 5, 1).unwrap(),
            });
            tables.economics.push(EconomicsRow {
                client_id: id,
                cons_price_idx: 93.2,
                euribor_three_months: 4.857,
            });
        }
        tables
    }

    #[test]
    fn test_row_count_and_alignment() {
        let tables = tables_for(&[1, 2, 3]);
        assert_eq!(tables.row_count(), Some(3));
        assert!(tables.ids_aligned());
    }

    #[test]
    fn test_misaligned_ids_detected() {
        let mut tables = tables_for(&[1, 2]);
        tables.economics[1].client_id = 99;
        assert!(!tables.ids_aligned());

        tables.campaigns.pop();
        assert_eq!(tables.row_count(), None);
    }

    #[test]
    fn test_columns_match_output_contract() {
        assert_eq!(ClientRow::COLUMNS.len(), 7);
        assert_eq!(CampaignRow::COLUMNS.len(), 7);
        assert_eq!(EconomicsRow::COLUMNS.len(), 3);
        assert_eq!(CampaignRow::COLUMNS[6], "last_contact_date");
        assert!(ClientRow::COLUMNS
            .iter()
            .chain(CampaignRow::COLUMNS)
            .chain(EconomicsRow::COLUMNS)
            .filter(|c| **c == "client_id")
            .count()
            == 3);
    }
}
