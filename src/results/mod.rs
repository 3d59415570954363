//! Result normalization
//!
//! The upstream surfaces return three distinct dissolved-company schemas
//! plus the advanced-search schema. Everything converges on [`ResultItem`],
//! and each surface's mapper then produces [`DisplayRow`]s ready to render:
//! resolved labels, formatted dates, assembled addresses and pre-escaped
//! markup where a cell is a link.

pub mod advanced;
pub mod dissolved;

use crate::search_api::types::{
    AdvancedCompany, DissolvedCompany, PreviousCompanyName, RegisteredOfficeAddress,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Company numbers with this prefix are overseas branch registrations;
/// no report can be produced for them.
const BRANCH_COMPANY_PREFIX: &str = "BR";
const REPORT_WINDOW_YEARS: i32 = 20;

/// One company, normalized across the upstream schemas. Fields a schema
/// does not supply stay empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultItem {
    pub company_name: String,
    pub company_number: String,
    pub company_status: Option<String>,
    pub company_type: Option<String>,
    pub company_subtype: Option<String>,
    pub date_of_creation: Option<NaiveDate>,
    pub date_of_cessation: Option<NaiveDate>,
    pub address: Option<RegisteredOfficeAddress>,
    pub sic_codes: Vec<String>,
    pub previous_names: Vec<PreviousName>,
    pub matched_previous_name: Option<PreviousName>,
    /// Collation key the alphabetical cursors and top-hit matching use.
    pub sort_key: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviousName {
    pub name: String,
    pub effective_from: Option<NaiveDate>,
    pub ceased_on: Option<NaiveDate>,
}

impl From<PreviousCompanyName> for PreviousName {
    fn from(previous: PreviousCompanyName) -> Self {
        PreviousName {
            name: previous.name,
            effective_from: previous.date_of_name_effectiveness,
            ceased_on: previous.date_of_name_cessation,
        }
    }
}

impl From<DissolvedCompany> for ResultItem {
    fn from(company: DissolvedCompany) -> Self {
        ResultItem {
            company_name: company.company_name,
            company_number: company.company_number,
            company_status: company.company_status,
            company_type: company.company_type,
            company_subtype: None,
            date_of_creation: company.date_of_creation,
            date_of_cessation: company.date_of_cessation,
            address: company.registered_office_address,
            sic_codes: Vec::new(),
            previous_names: company
                .previous_company_names
                .into_iter()
                .map(PreviousName::from)
                .collect(),
            matched_previous_name: company.matched_previous_company_name.map(PreviousName::from),
            sort_key: company.ordered_alpha_key_with_id,
        }
    }
}

impl From<AdvancedCompany> for ResultItem {
    fn from(company: AdvancedCompany) -> Self {
        ResultItem {
            sort_key: company.company_number.clone(),
            company_name: company.company_name,
            company_number: company.company_number,
            company_status: company.company_status,
            company_type: company.company_type,
            company_subtype: company.company_subtype,
            date_of_creation: company.date_of_creation,
            date_of_cessation: company.date_of_cessation,
            address: company.registered_office_address,
            sic_codes: company.sic_codes,
            previous_names: Vec::new(),
            matched_previous_name: None,
        }
    }
}

// ============================================================================
// Display rows
// ============================================================================

/// One cell of a result row. `markup` marks the value as pre-escaped HTML
/// rather than plain text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayCell {
    pub label: &'static str,
    pub value: String,
    pub markup: bool,
}

impl DisplayCell {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        DisplayCell {
            label,
            value: value.into(),
            markup: false,
        }
    }

    pub fn markup(label: &'static str, value: impl Into<String>) -> Self {
        DisplayCell {
            label,
            value: value.into(),
            markup: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub cells: Vec<DisplayCell>,
    /// At most one row per page carries the nearest-match highlight.
    pub nearest: bool,
}

// ============================================================================
// Report availability
// ============================================================================

/// Reports exist for companies dissolved within the twenty years before
/// `today`, and never for branch registrations. Callers supply the clock;
/// the service passes the current date.
pub fn report_available_on(
    company_number: &str,
    date_of_cessation: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    if company_number.starts_with(BRANCH_COMPANY_PREFIX) {
        return false;
    }
    let Some(ceased) = date_of_cessation else {
        return false;
    };

    let cutoff = match today.with_year(today.year() - REPORT_WINDOW_YEARS) {
        Some(date) => date,
        // 29 Feb with no counterpart twenty years back rolls to 1 Mar,
        // exactly as the service this replaces did
        None => NaiveDate::from_ymd_opt(today.year() - REPORT_WINDOW_YEARS, 3, 1)
            .unwrap_or(today),
    };

    // Kept as a lexicographic comparison of ISO strings rather than a
    // calendar-aware duration, to preserve the exact legacy availability
    // boundary
    let ceased_iso = ceased.format("%Y-%m-%d").to_string();
    let cutoff_iso = cutoff.format("%Y-%m-%d").to_string();
    ceased_iso > cutoff_iso
}

// ============================================================================
// Tests
// ============================================================================
