// 🧹 Cleaning rules - column-wise recodes applied to each source row
//
// Every function here is pure: one source row in, one output row out.
// Yes/no style flags are intentionally lenient: anything that is not the
// exact truthy literal (missing, "no", "unknown", typos) becomes 0.

use crate::error::{EtlError, Result};
use crate::source::SourceRecord;
use crate::tables::{CampaignRow, ClientRow, EconomicsRow};
use chrono::NaiveDate;

/// All contact dates fall in this year; the source only carries day + month
pub const CONTACT_YEAR: i32 = 2022;

/// Sentinel education value that means "not recorded"
pub const EDUCATION_UNKNOWN: &str = "unknown";

/// Lower-case month abbreviation → two-digit month
pub const MONTH_TABLE: [(&str, &str); 12] = [
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

// ============================================================================
// FIELD RECODES
// ============================================================================

/// Replace every literal "." with "_" (e.g. "admin." → "admin_")
pub fn normalize_category(value: &str) -> String {
    value.replace('.', "_")
}

/// Normalize, then map the "unknown" sentinel to missing
pub fn recode_education(value: Option<&str>) -> Option<String> {
    value
        .map(normalize_category)
        .filter(|education| education != EDUCATION_UNKNOWN)
}

/// 1 if `value` is exactly `truthy`, else 0
pub fn flag(value: Option<&str>, truthy: &str) -> u8 {
    match value {
        Some(v) if v == truthy => 1,
        _ => 0,
    }
}

/// Two-digit month for an abbreviation, case-insensitive
pub fn month_number(abbreviation: &str) -> Option<&'static str> {
    let key = abbreviation.to_lowercase();
    MONTH_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, number)| *number)
}

/// Build "2022-MM-DD" from the source day/month and parse it into a date.
///
/// An abbreviation outside `MONTH_TABLE` or a day that does not exist in
/// that month is an error; nothing is coerced.
pub fn synthesize_contact_date(client_id: i64, day: u32, month: &str) -> Result<NaiveDate> {
    let month_num = month_number(month).ok_or_else(|| EtlError::UnknownMonth {
        client_id,
        month: month.to_string(),
    })?;

    let day_str = format!("{:0>2}", day);
    let composed = format!("{}-{}-{}", CONTACT_YEAR, month_num, day_str);

    NaiveDate::parse_from_str(&composed, "%Y-%m-%d").map_err(|source| EtlError::InvalidDate {
        client_id,
        date: composed,
        source,
    })
}

// ============================================================================
// ROW PROJECTIONS
// ============================================================================

pub fn to_client(record: &SourceRecord) -> ClientRow {
    ClientRow {
        client_id: record.client_id,
        age: record.age,
        job: record.job.as_deref().map(normalize_category),
        marital: record.marital.clone(),
        education: recode_education(record.education.as_deref()),
        credit_default: flag(record.credit_default.as_deref(), "yes"),
        mortgage: flag(record.mortgage.as_deref(), "yes"),
    }
}

pub fn to_campaign(record: &SourceRecord) -> Result<CampaignRow> {
    Ok(CampaignRow {
        client_id: record.client_id,
        number_contacts: record.number_contacts,
        contact_duration: record.contact_duration,
        previous_campaign_contacts: record.previous_campaign_contacts,
        previous_outcome: flag(record.previous_outcome.as_deref(), "success"),
        campaign_outcome: flag(record.campaign_outcome.as_deref(), "yes"),
        last_contact_date: synthesize_contact_date(record.client_id, record.day, &record.month)?,
    })
}

/// Straight pass-through, no cleaning
pub fn to_economics(record: &SourceRecord) -> EconomicsRow {
    EconomicsRow {
        client_id: record.client_id,
        cons_price_idx: record.cons_price_idx,
        euribor_three_months: record.euribor_three_months,
    }
}
