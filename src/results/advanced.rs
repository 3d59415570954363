//! Display rows for advanced search results
//!
//! Nine labeled cells per company. These rows cover live companies too, so
//! the company name links to the company profile and status/type codes are
//! resolved to their display labels.

use super::{DisplayCell, DisplayRow, ResultItem};
use crate::enumerations::{
    birth_date_label, cessation_date_label, resolve_status, resolve_subtype, resolve_type,
};
use crate::format::{format_address_lines, format_display_date, html_escape};

pub fn rows(items: &[ResultItem]) -> Vec<DisplayRow> {
    items
        .iter()
        .map(|item| DisplayRow {
            cells: company_cells(item),
            nearest: false,
        })
        .collect()
}

fn company_cells(item: &ResultItem) -> Vec<DisplayCell> {
    vec![
        DisplayCell::markup("Company name", profile_anchor(item)),
        DisplayCell::text("Company number", item.company_number.clone()),
        DisplayCell::text(
            "Company status",
            item.company_status
                .as_deref()
                .map(resolve_status)
                .unwrap_or_default(),
        ),
        DisplayCell::text(
            "Company type",
            item.company_type
                .as_deref()
                .map(resolve_type)
                .unwrap_or_default(),
        ),
        DisplayCell::text(
            "Company subtype",
            item.company_subtype
                .as_deref()
                .map(resolve_subtype)
                .unwrap_or_default(),
        ),
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
        DisplayCell::text("Nature of business", item.sic_codes.join(", ")),
    ]
}

fn profile_anchor(item: &ResultItem) -> String {
    format!(
        "<a href=\"/company/{}\">{}</a>",
        html_escape(&item.company_number),
        html_escape(&item.company_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn advanced_item() -> ResultItem {
        ResultItem {
            company_name: "SMITH & SONS LIMITED".to_string(),
            company_number: "00123456".to_string(),
            company_status: Some("active".to_string()),
            company_type: Some("ltd".to_string()),
            company_subtype: Some("community-interest-company".to_string()),
            date_of_creation: NaiveDate::from_ymd_opt(2003, 4, 5),
            sic_codes: vec!["07210".to_string(), "64191".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_advanced_row_layout() {
        let rows = rows(&[advanced_item()]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), 9);
        assert!(!rows[0].nearest);

        let labels: Vec<&str> = rows[0].cells.iter().map(|cell| cell.label).collect();
        assert_eq!(
            labels,
            vec![
                "Company name",
                "Company number",
                "Company status",
                "Company type",
                "Company subtype",
                "Incorporated on",
                "Dissolved on",
                "Registered office address",
                "Nature of business",
            ]
        );
    }

    #[test]
    fn test_company_name_cell_is_escaped_profile_link() {
        let rows = rows(&[advanced_item()]);
        let name = &rows[0].cells[0];
        assert!(name.markup);
        assert_eq!(
            name.value,
            "<a href=\"/company/00123456\">SMITH &amp; SONS LIMITED</a>"
        );
    }

    #[test]
    fn test_codes_resolve_to_labels() {
        let rows = rows(&[advanced_item()]);
        assert_eq!(rows[0].cells[2].value, "Active");
        assert_eq!(rows[0].cells[3].value, "Private limited company");
        assert_eq!(rows[0].cells[4].value, "Community Interest Company (CIC)");
        assert_eq!(rows[0].cells[8].value, "07210, 64191");
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let item = ResultItem {
            company_name: "BARE LIMITED".to_string(),
            company_number: "00000001".to_string(),
            ..Default::default()
        };
        let rows = rows(&[item]);
        assert_eq!(rows[0].cells[2].value, "");
        assert_eq!(rows[0].cells[4].value, "");
        assert_eq!(rows[0].cells[6].value, "");
        assert_eq!(rows[0].cells[8].value, "");
    }
}
