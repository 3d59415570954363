//! Field formatters
//!
//! Pure helpers that turn optional upstream values into display strings.
//! Absent input always yields a defined output (empty string or a
//! placeholder), never an error.

use crate::search_api::types::RegisteredOfficeAddress;
use chrono::NaiveDate;

/// Human-readable date for result rows, e.g. "12 Dec 1991".
pub fn format_display_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%-d %b %Y").to_string(),
        None => String::new(),
    }
}

/// Timestamp form used in CSV exports, e.g. "1991-12-12T00:00:00.000Z".
/// Dates carry no time component upstream so the time part is fixed at
/// midnight UTC.
pub fn format_csv_timestamp(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{}T00:00:00.000Z", d.format("%Y-%m-%d")),
        None => String::new(),
    }
}

/// Single-line address for result rows: comma-joined fields with the
/// postcode appended after a space. A wholly absent address renders as
/// "Not available".
pub fn format_address_lines(address: Option<&RegisteredOfficeAddress>) -> String {
    let Some(address) = address else {
        return "Not available".to_string();
    };

    let joined = address_parts(address).join(", ");
    let line = match postcode(address) {
        Some(code) if joined.is_empty() => code.to_string(),
        Some(code) => format!("{} {}", joined, code),
        None => joined,
    };

    if line.is_empty() {
        "Not available".to_string()
    } else {
        line
    }
}

/// Space-joined address variant used in CSV exports. A wholly absent
/// address renders as an empty field, not a placeholder.
pub fn format_address_flat(address: Option<&RegisteredOfficeAddress>) -> String {
    let Some(address) = address else {
        return String::new();
    };

    let mut parts = address_parts(address);
    if let Some(code) = postcode(address) {
        parts.push(code);
    }
    parts.join(" ")
}

fn address_parts(address: &RegisteredOfficeAddress) -> Vec<&str> {
    [
        address.premises.as_deref(),
        address.address_line_1.as_deref(),
        address.address_line_2.as_deref(),
        address.locality.as_deref(),
        address.region.as_deref(),
        address.country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.trim().is_empty())
    .collect()
}

fn postcode(address: &RegisteredOfficeAddress) -> Option<&str> {
    address
        .postal_code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
}

/// Minimal HTML escaping for values embedded in pre-rendered markup cells.
pub fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_address() -> RegisteredOfficeAddress {
        RegisteredOfficeAddress {
            premises: Some("61".to_string()),
            address_line_1: Some("Main Street".to_string()),
            address_line_2: Some("Westside".to_string()),
            locality: Some("Anytown".to_string()),
            region: Some("Surrey".to_string()),
            country: Some("England".to_string()),
            postal_code: Some("AB1 2CD".to_string()),
        }
    }

    #[test]
    fn test_format_display_date_unpadded_day() {
        let date = NaiveDate::from_ymd_opt(1991, 12, 12);
        assert_eq!(format_display_date(date), "12 Dec 1991");

        let single_digit = NaiveDate::from_ymd_opt(2003, 4, 5);
        assert_eq!(format_display_date(single_digit), "5 Apr 2003");
    }

    #[test]
    fn test_format_display_date_absent() {
        assert_eq!(format_display_date(None), "");
    }

    #[test]
    fn test_format_csv_timestamp() {
        let date = NaiveDate::from_ymd_opt(1991, 12, 12);
        assert_eq!(format_csv_timestamp(date), "1991-12-12T00:00:00.000Z");
        assert_eq!(format_csv_timestamp(None), "");
    }

    #[test]
    fn test_format_address_lines_full() {
        assert_eq!(
            format_address_lines(Some(&full_address())),
            "61, Main Street, Westside, Anytown, Surrey, England AB1 2CD"
        );
    }

    #[test]
    fn test_format_address_lines_postcode_only() {
        let address = RegisteredOfficeAddress {
            postal_code: Some("AB1 2CD".to_string()),
            ..Default::default()
        };
        assert_eq!(format_address_lines(Some(&address)), "AB1 2CD");
    }

    #[test]
    fn test_format_address_lines_absent() {
        assert_eq!(format_address_lines(None), "Not available");
        assert_eq!(
            format_address_lines(Some(&RegisteredOfficeAddress::default())),
            "Not available"
        );
    }

    #[test]
    fn test_format_address_lines_skips_blank_fields() {
        let address = RegisteredOfficeAddress {
            premises: Some("  ".to_string()),
            address_line_1: Some("Main Street".to_string()),
            locality: Some("Anytown".to_string()),
            ..Default::default()
        };
        assert_eq!(format_address_lines(Some(&address)), "Main Street, Anytown");
    }

    #[test]
    fn test_format_address_flat() {
        assert_eq!(
            format_address_flat(Some(&full_address())),
            "61 Main Street Westside Anytown Surrey England AB1 2CD"
        );
        assert_eq!(format_address_flat(None), "");
        assert_eq!(
            format_address_flat(Some(&RegisteredOfficeAddress::default())),
            ""
        );
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"Smith & Sons <"Oldest">"#),
            "Smith &amp; Sons &lt;&quot;Oldest&quot;&gt;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }
}
