//! Upstream search API response types
//!
//! The upstream service exposes four search surfaces, each with its own
//! response schema:
//! - Alphabetical search: ordered batch around a match point, with cursors
//! - Dissolved best-match search: ranked batch with a total hit count
//! - Previous-name search: ranked batch where each item carries the
//!   previous name that matched
//! - Advanced search: filtered, offset-paged batch
//!
//! All shapes deserialize tolerantly: absent fields fall back to defaults so
//! a sparse upstream item never sinks the whole response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Shared fragments
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredOfficeAddress {
    pub premises: Option<String>,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviousCompanyName {
    pub name: String,
    pub date_of_name_effectiveness: Option<NaiveDate>,
    pub date_of_name_cessation: Option<NaiveDate>,
}

// ============================================================================
// Dissolved search family (alphabetical, best-match, previous-name)
// ============================================================================

/// One company as returned by the dissolved search surfaces. The
/// `matched_previous_company_name` field is only populated by the
/// previous-name surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DissolvedCompany {
    pub company_name: String,
    pub company_number: String,
    pub company_status: Option<String>,
    pub company_type: Option<String>,
    pub date_of_creation: Option<NaiveDate>,
    pub date_of_cessation: Option<NaiveDate>,
    pub registered_office_address: Option<RegisteredOfficeAddress>,
    pub previous_company_names: Vec<PreviousCompanyName>,
    pub matched_previous_company_name: Option<PreviousCompanyName>,
    pub ordered_alpha_key: Option<String>,
    /// Collation key with the company number appended; unique per company
    /// and the value the alphabetical cursors are built from.
    pub ordered_alpha_key_with_id: String,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphabeticalSearchResponse {
    pub items: Vec<DissolvedCompany>,
    pub top_hit: Option<DissolvedCompany>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BestMatchSearchResponse {
    pub items: Vec<DissolvedCompany>,
    pub top_hit: Option<DissolvedCompany>,
    pub hits: u64,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviousNamesSearchResponse {
    pub items: Vec<DissolvedCompany>,
    pub hits: u64,
    pub kind: Option<String>,
}

// ============================================================================
// Advanced search
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedCompany {
    pub company_name: String,
    pub company_number: String,
    pub company_status: Option<String>,
    pub company_type: Option<String>,
    pub company_subtype: Option<String>,
    pub date_of_creation: Option<NaiveDate>,
    pub date_of_cessation: Option<NaiveDate>,
    pub registered_office_address: Option<RegisteredOfficeAddress>,
    pub sic_codes: Vec<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSearchResponse {
    pub items: Vec<AdvancedCompany>,
    pub hits: u64,
    pub kind: Option<String>,
}

/// Filter set sent to the advanced search surface. Field values are the
/// upstream's own vocabulary: ISO dates and fully expanded type codes
/// (the logical `icvc` option never reaches the wire).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedSearchQuery {
    pub company_name_includes: Option<String>,
    pub company_name_excludes: Option<String>,
    pub location: Option<String>,
    pub incorporated_from: Option<NaiveDate>,
    pub incorporated_to: Option<NaiveDate>,
    pub dissolved_from: Option<NaiveDate>,
    pub dissolved_to: Option<NaiveDate>,
    pub company_status: Option<String>,
    pub company_type: Option<String>,
    pub company_subtype: Option<String>,
    pub sic_codes: Option<String>,
}
