//! Search parameters and the query-string codec
//!
//! [`SearchParameters`] is the canonical form of a user's query across every
//! search surface. Decoding is total: malformed numbers, dates and lists
//! degrade to defaults or absence rather than erroring, so any inbound query
//! string yields usable parameters. Encoding emits the advanced-search
//! filter fields in a fixed order with absent fields omitted entirely.

use crate::search_api::types::AdvancedSearchQuery;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use url::form_urlencoded;

/// Logical company-type option covering all three investment-company codes.
pub const ICVC_LOGICAL: &str = "icvc";
pub const ICVC_EXPANDED: [&str; 3] = ["icvc-securities", "icvc-warrant", "icvc-umbrella"];

/// Codes submitted under `type` that the upstream treats as subtypes.
const SUBTYPE_CODES: [&str; 2] = [
    "community-interest-company",
    "private-fund-limited-partnership",
];

const SEARCH_TYPE_ALPHABETICAL: &str = "alphabetical";
const CHANGED_NAME_PREVIOUS: &str = "previousNameDissolved";

/// Which of the three name-search variants a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSearchMode {
    Alphabetical,
    BestMatch,
    PreviousNames,
}

/// Canonical representation of a search request.
///
/// Company-type lists are stored in logical form: the icvc triple is
/// contracted to `icvc` and subtype codes live in their own field. Both
/// transformations are undone when the query is encoded for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    /// 1-based page number for the numbered-page surfaces.
    pub page: u32,
    pub page_size: Option<u32>,
    pub company_name: Option<String>,
    pub search_type: Option<String>,
    pub changed_name: Option<String>,
    pub search_before: Option<String>,
    pub search_after: Option<String>,
    pub original_company_number: Option<String>,
    pub name_includes: Option<String>,
    pub name_excludes: Option<String>,
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

impl Default for SearchParameters {
    fn default() -> Self {
        SearchParameters {
            page: 1,
            page_size: None,
            company_name: None,
            search_type: None,
            changed_name: None,
            search_before: None,
            search_after: None,
            original_company_number: None,
            name_includes: None,
            name_excludes: None,
            location: None,
            incorporated_from: None,
            incorporated_to: None,
            dissolved_from: None,
            dissolved_to: None,
            company_status: None,
            company_type: None,
            company_subtype: None,
            sic_codes: None,
        }
    }
}

impl SearchParameters {
    pub fn name_search_mode(&self) -> NameSearchMode {
        if self.search_type.as_deref() == Some(SEARCH_TYPE_ALPHABETICAL) {
            NameSearchMode::Alphabetical
        } else if self.changed_name.as_deref() == Some(CHANGED_NAME_PREVIOUS) {
            NameSearchMode::PreviousNames
        } else {
            NameSearchMode::BestMatch
        }
    }
}

impl From<&SearchParameters> for AdvancedSearchQuery {
    fn from(params: &SearchParameters) -> Self {
        AdvancedSearchQuery {
            company_name_includes: params.name_includes.clone(),
            company_name_excludes: params.name_excludes.clone(),
            location: params.location.clone(),
            incorporated_from: params.incorporated_from,
            incorporated_to: params.incorporated_to,
            dissolved_from: params.dissolved_from,
            dissolved_to: params.dissolved_to,
            company_status: params.company_status.clone(),
            company_type: params
                .company_type
                .as_deref()
                .map(expand_icvc)
                .filter(|list| !list.is_empty()),
            company_subtype: params.company_subtype.clone(),
            sic_codes: params.sic_codes.clone(),
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode an inbound query string into [`SearchParameters`]. Never fails;
/// anything unparseable is treated as absent.
pub fn decode_query_string(raw: &str) -> SearchParameters {
    let pairs: Vec<(String, String)> = form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect();

    let page = first(&pairs, "page")
        .and_then(|value| value.parse::<u32>().ok())
        .map(|page| page.max(1))
        .unwrap_or(1);

    let page_size = first(&pairs, "pageSize")
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|size| *size >= 1);

    let (company_type, company_subtype) = decode_type_list(joined(&pairs, "type"));

    SearchParameters {
        page,
        page_size,
        company_name: first(&pairs, "companyName").map(str::to_string),
        search_type: first(&pairs, "searchType").map(str::to_string),
        changed_name: first(&pairs, "changedName").map(str::to_string),
        search_before: first(&pairs, "searchBefore").map(str::to_string),
        search_after: first(&pairs, "searchAfter").map(str::to_string),
        original_company_number: first(&pairs, "originalCompanyNumber").map(str::to_string),
        name_includes: first(&pairs, "companyNameIncludes").map(str::to_string),
        name_excludes: first(&pairs, "companyNameExcludes").map(str::to_string),
        location: first(&pairs, "registeredOfficeAddress").map(str::to_string),
        incorporated_from: decode_date(&pairs, "incorporatedFrom", "incorporationFrom"),
        incorporated_to: decode_date(&pairs, "incorporatedTo", "incorporationTo"),
        dissolved_from: decode_date(&pairs, "dissolvedFrom", "dissolvedFrom"),
        dissolved_to: decode_date(&pairs, "dissolvedTo", "dissolvedTo"),
        company_status: joined(&pairs, "status"),
        company_type,
        company_subtype,
        sic_codes: joined(&pairs, "sicCodes"),
    }
}

/// Parse a user-entered `DD/MM/YYYY` date. The shape is gated by pattern
/// first, then the parts must form a real calendar date; anything else is
/// absent, never an error.
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if !input_date_pattern().is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}

fn input_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("input date pattern is valid")
    })
}

/// A date arrives either as one `DD/MM/YYYY` field or as a day/month/year
/// triple; the single field takes precedence when both are present.
fn decode_date(
    pairs: &[(String, String)],
    single_name: &str,
    parts_prefix: &str,
) -> Option<NaiveDate> {
    if let Some(raw) = first(pairs, single_name) {
        if let Some(date) = parse_input_date(raw) {
            return Some(date);
        }
    }

    let day = first(pairs, &format!("{}Day", parts_prefix))?;
    let month = first(pairs, &format!("{}Month", parts_prefix))?;
    let year = first(pairs, &format!("{}Year", parts_prefix))?;
    parse_input_date(&format!("{}/{}/{}", day, month, year))
}

fn decode_type_list(raw: Option<String>) -> (Option<String>, Option<String>) {
    let Some(raw) = raw else {
        return (None, None);
    };

    let contracted = contract_icvc(&raw);
    let mut types = Vec::new();
    let mut subtypes = Vec::new();
    for code in split_codes(&contracted) {
        if SUBTYPE_CODES.contains(&code.as_str()) {
            subtypes.push(code);
        } else {
            types.push(code);
        }
    }
    (list_or_none(types), list_or_none(subtypes))
}

fn first<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.as_str())
}

/// Collect every non-empty value for `name` into one comma list, so
/// repeated form fields and pre-joined lists decode the same way.
fn joined(pairs: &[(String, String)], name: &str) -> Option<String> {
    let values: Vec<&str> = pairs
        .iter()
        .filter(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.as_str())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode advanced-search state as a query string with a fixed field order.
/// Absent fields are omitted entirely, the subtype list is folded back into
/// `type`, the logical `icvc` option is expanded, and dates become
/// day/month/year triples.
pub fn encode(params: &SearchParameters) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();

    push_text(&mut pairs, "companyNameIncludes", params.name_includes.as_deref());
    push_text(&mut pairs, "companyNameExcludes", params.name_excludes.as_deref());
    push_text(&mut pairs, "registeredOfficeAddress", params.location.as_deref());
    push_date(&mut pairs, "incorporationFrom", params.incorporated_from);
    push_date(&mut pairs, "incorporationTo", params.incorporated_to);
    push_text(&mut pairs, "status", params.company_status.as_deref());
    push_text(&mut pairs, "sicCodes", params.sic_codes.as_deref());
    push_text(&mut pairs, "type", submission_type_list(params).as_deref());
    push_date(&mut pairs, "dissolvedFrom", params.dissolved_from);
    push_date(&mut pairs, "dissolvedTo", params.dissolved_to);

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in &pairs {
        query.append_pair(name, value);
    }
    query.finish()
}

fn push_text(pairs: &mut Vec<(String, String)>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        pairs.push((name.to_string(), value.to_string()));
    }
}

fn push_date(pairs: &mut Vec<(String, String)>, prefix: &str, date: Option<NaiveDate>) {
    if let Some(date) = date {
        use chrono::Datelike;
        pairs.push((format!("{}Day", prefix), date.day().to_string()));
        pairs.push((format!("{}Month", prefix), date.month().to_string()));
        pairs.push((format!("{}Year", prefix), date.year().to_string()));
    }
}

/// Company types as submitted upstream: subtype codes rejoin the `type`
/// list and the logical icvc option becomes the three concrete codes.
fn submission_type_list(params: &SearchParameters) -> Option<String> {
    let mut codes = Vec::new();
    if let Some(types) = params.company_type.as_deref() {
        codes.extend(split_codes(types));
    }
    if let Some(subtypes) = params.company_subtype.as_deref() {
        codes.extend(split_codes(subtypes));
    }
    if codes.is_empty() {
        None
    } else {
        Some(expand_icvc(&codes.join(",")))
    }
}

// ============================================================================
// icvc expansion and contraction
// ============================================================================

/// Replace the logical `icvc` entry with the three concrete codes,
/// preserving order and dropping duplicates. A list with no `icvc` entry
/// passes through unchanged, which makes the expansion idempotent.
pub fn expand_icvc(list: &str) -> String {
    let mut expanded: Vec<String> = Vec::new();
    for code in split_codes(list) {
        if code == ICVC_LOGICAL {
            for concrete in ICVC_EXPANDED {
                if !expanded.iter().any(|existing| existing == concrete) {
                    expanded.push(concrete.to_string());
                }
            }
        } else if !expanded.contains(&code) {
            expanded.push(code);
        }
    }
    expanded.join(",")
}

/// Collapse the full icvc triple back to the logical `icvc` entry, at the
/// position of the first member. A partial subset is left untouched, and a
/// list already in logical form passes through unchanged.
pub fn contract_icvc(list: &str) -> String {
    let codes = split_codes(list);
    let has_full_triple = ICVC_EXPANDED
        .iter()
        .all(|concrete| codes.iter().any(|code| code == concrete));
    if !has_full_triple {
        return codes.join(",");
    }

    let mut contracted: Vec<String> = Vec::new();
    for code in codes {
        let logical = if ICVC_EXPANDED.contains(&code.as_str()) {
            ICVC_LOGICAL.to_string()
        } else {
            code
        };
        if !contracted.contains(&logical) {
            contracted.push(logical);
        }
    }
    contracted.join(",")
}

fn split_codes(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn list_or_none(codes: Vec<String>) -> Option<String> {
    if codes.is_empty() {
        None
    } else {
        Some(codes.join(","))
    }
}

// ============================================================================
// Tests
// ============================================================================
