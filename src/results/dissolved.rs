//! Display rows for the dissolved search surfaces
//!
//! Name-match results (alphabetical and best-match) share a six-cell row.
//! Previous-name results prepend the previous name that matched, making
//! seven cells. The download cell is a pre-escaped link when a report is
//! available and plain "Not available" text otherwise.

use super::{report_available_on, DisplayCell, DisplayRow, ResultItem};
use crate::enumerations::{birth_date_label, cessation_date_label};
use crate::format::{format_address_lines, format_display_date, html_escape};
use crate::highlight::flag_nearest;
use chrono::NaiveDate;
use url::form_urlencoded;

/// Rows for alphabetical and best-match results, with the nearest match to
/// the upstream top hit flagged (first occurrence only, at most one row).
pub fn name_match_rows(
    items: &[ResultItem],
    top_hit_key: Option<&str>,
    today: NaiveDate,
) -> Vec<DisplayRow> {
    let nearest = flag_nearest(items, top_hit_key, |item| item.sort_key.as_str());
    items
        .iter()
        .enumerate()
        .map(|(index, item)| DisplayRow {
            cells: company_cells(item, today, false),
            nearest: nearest == Some(index),
        })
        .collect()
}

/// Rows for previous-name results. No nearest-match highlighting on this
/// surface.
pub fn previous_name_rows(items: &[ResultItem], today: NaiveDate) -> Vec<DisplayRow> {
    items
        .iter()
        .map(|item| {
            let matched = item
                .matched_previous_name
                .as_ref()
                .map(|previous| previous.name.clone())
                .unwrap_or_default();

            let mut cells = vec![DisplayCell::text("Previous company name", matched)];
            cells.extend(company_cells(item, today, true));
            DisplayRow {
                cells,
                nearest: false,
            }
        })
        .collect()
}

fn company_cells(item: &ResultItem, today: NaiveDate, previous_name_mode: bool) -> Vec<DisplayCell> {
    vec![
        DisplayCell::text("Company name", item.company_name.clone()),
        DisplayCell::text("Company number", item.company_number.clone()),
        DisplayCell::text(
            birth_date_label(item.company_type.as_deref()),
            format_display_date(item.date_of_creation),
        ),
        DisplayCell::text(
            cessation_date_label(item.company_status.as_deref()),
            format_display_date(item.date_of_cessation),
        ),
        DisplayCell::text(
            "Registered office address",
            format_address_lines(item.address.as_ref()),
        ),
        report_cell(item, today, previous_name_mode),
    ]
}

fn report_cell(item: &ResultItem, today: NaiveDate, previous_name_mode: bool) -> DisplayCell {
    if report_available_on(&item.company_number, item.date_of_cessation, today) {
        let link = report_link(item, previous_name_mode);
        DisplayCell::markup(
            "Download report",
            format!("<a href=\"{}\">Download report</a>", html_escape(&link)),
        )
    } else {
        DisplayCell::text("Download report", "Not available")
    }
}

fn report_link(item: &ResultItem, previous_name_mode: bool) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("companyNumber", &item.company_number);
    if previous_name_mode {
        query.append_pair("changedName", "previousNameDissolved");
    }
    format!("/download-report?{}", query.finish())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::PreviousName;
    use crate::search_api::types::RegisteredOfficeAddress;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn dissolved_item(name: &str, number: &str, key: &str) -> ResultItem {
        ResultItem {
            company_name: name.to_string(),
            company_number: number.to_string(),
            company_status: Some("dissolved".to_string()),
            company_type: Some("ltd".to_string()),
            date_of_creation: NaiveDate::from_ymd_opt(1991, 12, 12),
            date_of_cessation: NaiveDate::from_ymd_opt(2015, 6, 30),
            address: Some(RegisteredOfficeAddress {
                address_line_1: Some("Main Street".to_string()),
                locality: Some("Anytown".to_string()),
                postal_code: Some("AB1 2CD".to_string()),
                ..Default::default()
            }),
            sort_key: key.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_name_match_row_layout() {
        let items = vec![dissolved_item("TEST LIMITED", "00123456", "TEST:00123456")];
        let rows = name_match_rows(&items, None, today());

        assert_eq!(rows.len(), 1);
        let labels: Vec<&str> = rows[0].cells.iter().map(|cell| cell.label).collect();
        assert_eq!(
            labels,
            vec![
                "Company name",
                "Company number",
                "Incorporated on",
                "Dissolved on",
                "Registered office address",
                "Download report",
            ]
        );
        assert_eq!(rows[0].cells[0].value, "TEST LIMITED");
        assert_eq!(rows[0].cells[2].value, "12 Dec 1991");
        assert_eq!(rows[0].cells[3].value, "30 Jun 2015");
        assert_eq!(rows[0].cells[4].value, "Main Street, Anytown AB1 2CD");
        assert!(!rows[0].nearest);
    }

    #[test]
    fn test_name_match_rows_flag_top_hit_once() {
        let items = vec![
            dissolved_item("ALPHA LTD", "00000001", "ALPHA:00000001"),
            dissolved_item("BRAVO LTD", "00000002", "BRAVO:00000002"),
            dissolved_item("BRAVO LTD", "00000003", "BRAVO:00000002"),
        ];
        let rows = name_match_rows(&items, Some("BRAVO:00000002"), today());

        let flagged: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.nearest)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(flagged, vec![1]);
    }

    #[test]
    fn test_recent_dissolution_gets_download_link() {
        let items = vec![dissolved_item("TEST LIMITED", "00123456", "TEST:00123456")];
        let rows = name_match_rows(&items, None, today());

        let report = &rows[0].cells[5];
        assert!(report.markup);
        assert!(report.value.contains("/download-report?companyNumber=00123456"));
    }

    #[test]
    fn test_old_dissolution_report_not_available() {
        let mut item = dissolved_item("OLD LIMITED", "00000009", "OLD:00000009");
        item.date_of_cessation = NaiveDate::from_ymd_opt(1995, 1, 1);
        let rows = name_match_rows(&[item], None, today());

        let report = &rows[0].cells[5];
        assert!(!report.markup);
        assert_eq!(report.value, "Not available");
    }

    #[test]
    fn test_missing_address_renders_placeholder() {
        let mut item = dissolved_item("TEST LIMITED", "00123456", "TEST:00123456");
        item.address = None;
        let rows = name_match_rows(&[item], None, today());
        assert_eq!(rows[0].cells[4].value, "Not available");
    }

    #[test]
    fn test_previous_name_row_layout() {
        let mut item = dissolved_item("NEW NAME LIMITED", "00999999", "NEWNAME:00999999");
        item.matched_previous_name = Some(PreviousName {
            name: "OLD NAME LIMITED".to_string(),
            ..Default::default()
        });

        let rows = previous_name_rows(&[item], today());
        assert_eq!(rows[0].cells.len(), 7);
        assert_eq!(rows[0].cells[0].label, "Previous company name");
        assert_eq!(rows[0].cells[0].value, "OLD NAME LIMITED");
        assert_eq!(rows[0].cells[1].value, "NEW NAME LIMITED");
        assert!(!rows[0].nearest);

        let report = &rows[0].cells[6];
        assert!(report.value.contains("changedName=previousNameDissolved"));
    }
}
