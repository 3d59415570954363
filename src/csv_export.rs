//! CSV export of advanced search results
//!
//! Columns carry the labels already resolved (status and type codes become
//! display labels, dates become midnight-UTC timestamps) so the file needs
//! no further lookup to read. Quoting and line termination are left to the
//! csv writer.

use crate::enumerations::{resolve_status, resolve_type};
use crate::format::{format_address_flat, format_csv_timestamp};
use crate::results::ResultItem;
use anyhow::{Context, Result};

pub const CSV_HEADERS: [&str; 8] = [
    "company_name",
    "company_number",
    "company_status",
    "company_type",
    "dissolution_date",
    "incorporation_date",
    "nature_of_business",
    "registered_office_address",
];

pub fn advanced_csv(items: &[ResultItem]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADERS)
        .context("Failed to write CSV header row")?;

    for item in items {
        writer
            .write_record([
                item.company_name.clone(),
                item.company_number.clone(),
                item.company_status
                    .as_deref()
                    .map(resolve_status)
                    .unwrap_or_default(),
                item.company_type
                    .as_deref()
                    .map(resolve_type)
                    .unwrap_or_default(),
                format_csv_timestamp(item.date_of_cessation),
                format_csv_timestamp(item.date_of_creation),
                nature_of_business(&item.sic_codes),
                format_address_flat(item.address.as_ref()),
            ])
            .with_context(|| format!("Failed to write CSV row for {}", item.company_number))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| err.into_error())
        .context("Failed to flush CSV output")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// SIC codes joined with the separating commas replaced by spaces, so the
/// list never fights the CSV delimiter.
fn nature_of_business(sic_codes: &[String]) -> String {
    sic_codes.join(",").replace(',', " ")
}

// ============================================================================
// Tests
// ============================================================================
