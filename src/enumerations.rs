//! Enumeration resolver
//!
//! Maps upstream enumeration codes (company status, company type, company
//! subtype) to their display labels, and picks the date labels that vary by
//! company type or status. Unknown codes resolve to themselves so a new
//! upstream code never breaks rendering.

use std::collections::HashMap;
use std::sync::OnceLock;

static STATUS_LABELS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static TYPE_LABELS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
static SUBTYPE_LABELS: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn status_labels() -> &'static HashMap<&'static str, &'static str> {
    STATUS_LABELS.get_or_init(|| {
        HashMap::from([
            ("active", "Active"),
            ("dissolved", "Dissolved"),
            ("liquidation", "Liquidation"),
            ("receivership", "Receiver Action"),
            ("converted-closed", "Converted / Closed"),
            ("open", "Open"),
            ("closed", "Closed"),
            ("insolvency-proceedings", "Insolvency Proceedings"),
            ("voluntary-arrangement", "Voluntary Arrangement"),
            ("administration", "In Administration"),
            ("registered", "Registered"),
            ("removed", "Removed"),
        ])
    })
}

fn type_labels() -> &'static HashMap<&'static str, &'static str> {
    TYPE_LABELS.get_or_init(|| {
        HashMap::from([
            ("ltd", "Private limited company"),
            ("plc", "Public limited company"),
            ("llp", "Limited liability partnership"),
            ("limited-partnership", "Limited partnership"),
            ("private-unlimited", "Private unlimited company"),
            ("private-unlimited-nsc", "Private unlimited company without share capital"),
            (
                "private-limited-guarant-nsc",
                "Private limited by guarantee without share capital",
            ),
            (
                "private-limited-guarant-nsc-limited-exemption",
                "Private limited by guarantee without share capital, use of 'Limited' exemption",
            ),
            (
                "private-limited-shares-section-30-exemption",
                "Private limited company, use of 'Limited' exemption",
            ),
            ("old-public-company", "Old public company"),
            ("royal-charter", "Royal charter company"),
            ("oversea-company", "Overseas company"),
            ("uk-establishment", "UK establishment company"),
            ("northern-ireland", "Northern Ireland company"),
            ("northern-ireland-other", "Credit union (Northern Ireland)"),
            ("scottish-partnership", "Scottish qualifying partnership"),
            (
                "industrial-and-provident-society",
                "Industrial and Provident society",
            ),
            (
                "registered-society-non-jurisdictional",
                "Registered society",
            ),
            (
                "charitable-incorporated-organisation",
                "Charitable incorporated organisation",
            ),
            (
                "scottish-charitable-incorporated-organisation",
                "Scottish charitable incorporated organisation",
            ),
            (
                "further-education-or-sixth-form-college-corporation",
                "Further education or sixth form college corporation",
            ),
            ("eeig", "European Economic Interest Grouping (EEIG)"),
            ("ukeig", "United Kingdom Economic Interest Grouping"),
            ("unregistered-company", "Unregistered company"),
            ("registered-overseas-entity", "Overseas entity"),
            ("protected-cell-company", "Protected cell company"),
            (
                "icvc-securities",
                "Investment company with variable capital (securities)",
            ),
            (
                "icvc-warrant",
                "Investment company with variable capital (warrant)",
            ),
            (
                "icvc-umbrella",
                "Investment company with variable capital (umbrella)",
            ),
        ])
    })
}

fn subtype_labels() -> &'static HashMap<&'static str, &'static str> {
    SUBTYPE_LABELS.get_or_init(|| {
        HashMap::from([
            ("community-interest-company", "Community Interest Company (CIC)"),
            (
                "private-fund-limited-partnership",
                "Private Fund Limited Partnership (PFLP)",
            ),
        ])
    })
}

/// Resolve a company status code to its display label.
pub fn resolve_status(code: &str) -> String {
    resolve(status_labels(), code)
}

/// Resolve a company type code to its display label.
pub fn resolve_type(code: &str) -> String {
    resolve(type_labels(), code)
}

/// Resolve a company subtype code to its display label.
pub fn resolve_subtype(code: &str) -> String {
    resolve(subtype_labels(), code)
}

fn resolve(labels: &HashMap<&'static str, &'static str>, code: &str) -> String {
    labels
        .get(code)
        .map(|label| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Label for the date a company came into existence. Most types are
/// incorporated; a few are registered with another body first.
pub fn birth_date_label(company_type: Option<&str>) -> &'static str {
    match company_type {
        Some("charitable-incorporated-organisation")
        | Some("scottish-charitable-incorporated-organisation")
        | Some("industrial-and-provident-society")
        | Some("registered-society-non-jurisdictional")
        | Some("further-education-or-sixth-form-college-corporation") => "Registered on",
        Some("uk-establishment") => "Opened on",
        _ => "Incorporated on",
    }
}

/// Label for the date a company ceased, varying with how it went.
pub fn cessation_date_label(company_status: Option<&str>) -> &'static str {
    match company_status {
        Some("removed") => "Removed on",
        Some("closed") | Some("converted-closed") => "Closed on",
        _ => "Dissolved on",
    }
}

// ============================================================================
// Tests
// ============================================================================
