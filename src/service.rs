//! Search page services
//!
//! Orchestrates a page render per search surface:
//! 1. Decode the request into canonical parameters (done by the caller)
//! 2. Call the upstream surface for the batch
//! 3. Normalize items and build display rows
//! 4. Work out paging: a page-link window for numbered surfaces, cursor
//!    links (confirmed by speculative probes) for the alphabetical surface
//!
//! An upstream failure never fails the page: the service logs it and
//! returns an empty page with zero hits.

use crate::paging::{batch_cursors, page_count, page_window, slice_oversized_batch, PageWindow};
use crate::params::{encode, NameSearchMode, SearchParameters};
use crate::results::{advanced, dissolved, DisplayRow, ResultItem};
use crate::search_api::types::{AdvancedSearchQuery, AlphabeticalSearchResponse};
use crate::search_api::CompanySearchApi;
use crate::{config::Config, csv_export};
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, warn};
use url::form_urlencoded;

/// Items requested per alphabetical batch: enough context either side of
/// the match point to carve out the visible slice.
const ALPHABETICAL_BATCH_SIZE: u32 = 81;
/// A probe only needs to know whether anything exists past the cursor.
const PROBE_BATCH_SIZE: u32 = 1;

const DISSOLVED_PAGE_SIZE: u32 = 20;
const DISSOLVED_MAX_PAGES: u32 = 50;
const ADVANCED_MAX_PAGES: u32 = 500;

/// A fully normalized, render-ready page of search results.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub rows: Vec<DisplayRow>,
    /// Total matches reported upstream; row count when no total exists.
    pub hits: u64,
    pub current_page: u32,
    pub total_pages: u32,
    /// Page-link window for the numbered surfaces.
    pub page_window: Option<PageWindow>,
    /// Cursor links for the alphabetical surface.
    pub previous_link: Option<String>,
    pub next_link: Option<String>,
    /// Query string that page-number links append `page=N` to.
    pub paging_query: String,
}

impl SearchPage {
    pub fn empty(current_page: u32) -> Self {
        SearchPage {
            rows: Vec::new(),
            hits: 0,
            current_page,
            total_pages: 0,
            page_window: None,
            previous_link: None,
            next_link: None,
            paging_query: String::new(),
        }
    }
}

/// Which side of the visible batch a probe looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacentPage {
    Previous,
    Next,
}

pub struct SearchService {
    api: Arc<dyn CompanySearchApi>,
    advanced_page_size: u32,
    csv_download_limit: u32,
}

impl SearchService {
    pub fn new(api: Arc<dyn CompanySearchApi>) -> Self {
        SearchService {
            api,
            advanced_page_size: 20,
            csv_download_limit: 5000,
        }
    }

    pub fn with_config(api: Arc<dyn CompanySearchApi>, config: &Config) -> Self {
        SearchService {
            api,
            advanced_page_size: config.advanced_page_size.max(1),
            csv_download_limit: config.csv_download_limit.max(1),
        }
    }

    /// Render a company-name search page, dispatching on the mode the
    /// parameters select.
    pub async fn name_search(&self, params: &SearchParameters) -> SearchPage {
        match params.name_search_mode() {
            NameSearchMode::Alphabetical => self.alphabetical_page(params).await,
            NameSearchMode::BestMatch => self.best_match_page(params).await,
            NameSearchMode::PreviousNames => self.previous_names_page(params).await,
        }
    }

    async fn alphabetical_page(&self, params: &SearchParameters) -> SearchPage {
        let company_name = params.company_name.as_deref().unwrap_or_default();

        let response = match self
            .api
            .alphabetical_search(
                company_name,
                params.search_before.as_deref(),
                params.search_after.as_deref(),
                Some(ALPHABETICAL_BATCH_SIZE),
            )
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "alphabetical search failed");
                return SearchPage::empty(params.page);
            }
        };

        let AlphabeticalSearchResponse { items, top_hit, .. } = response;
        let top_hit_key = top_hit.map(|hit| hit.ordered_alpha_key_with_id);

        let items: Vec<ResultItem> = items.into_iter().map(ResultItem::from).collect();
        let visible = slice_oversized_batch(items);
        let cursors = batch_cursors(&visible, |item| item.sort_key.as_str());

        // The two probes are independent of each other and run concurrently;
        // both must resolve before the page is built.
        let (has_previous, has_next) = tokio::join!(
            self.probe_adjacent_page(
                company_name,
                AdjacentPage::Previous,
                cursors.previous.as_deref(),
            ),
            self.probe_adjacent_page(
                company_name,
                AdjacentPage::Next,
                cursors.next.as_deref(),
            ),
        );

        let rows = dissolved::name_match_rows(&visible, top_hit_key.as_deref(), today());

        let previous_link = match (&cursors.previous, has_previous) {
            (Some(cursor), true) => Some(alphabetical_link(company_name, "searchBefore", cursor)),
            _ => None,
        };
        let next_link = match (&cursors.next, has_next) {
            (Some(cursor), true) => Some(alphabetical_link(company_name, "searchAfter", cursor)),
            _ => None,
        };

        SearchPage {
            hits: rows.len() as u64,
            current_page: 1,
            total_pages: if rows.is_empty() { 0 } else { 1 },
            page_window: None,
            previous_link,
            next_link,
            paging_query: String::new(),
            rows,
        }
    }

    /// Check whether a page exists on the given side of the visible batch
    /// by re-querying with the edge cursor. No cursor means no page; so
    /// does a failed probe, which keeps a broken link from being offered.
    pub async fn probe_adjacent_page(
        &self,
        company_name: &str,
        direction: AdjacentPage,
        cursor: Option<&str>,
    ) -> bool {
        let Some(cursor) = cursor else {
            return false;
        };

        let result = match direction {
            AdjacentPage::Previous => {
                self.api
                    .alphabetical_search(company_name, Some(cursor), None, Some(PROBE_BATCH_SIZE))
                    .await
            }
            AdjacentPage::Next => {
                self.api
                    .alphabetical_search(company_name, None, Some(cursor), Some(PROBE_BATCH_SIZE))
                    .await
            }
        };

        match result {
            Ok(response) => !response.items.is_empty(),
            Err(err) => {
                warn!(error = %err, ?direction, "adjacent page probe failed, hiding the link");
                false
            }
        }
    }

    async fn best_match_page(&self, params: &SearchParameters) -> SearchPage {
        let company_name = params.company_name.as_deref().unwrap_or_default();
        let start_index = (params.page - 1).saturating_mul(DISSOLVED_PAGE_SIZE);

        let response = match self
            .api
            .best_match_search(company_name, start_index, DISSOLVED_PAGE_SIZE)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "best-match search failed");
                return SearchPage::empty(params.page);
            }
        };

        let top_hit_key = response.top_hit.map(|hit| hit.ordered_alpha_key_with_id);
        let items: Vec<ResultItem> = response.items.into_iter().map(ResultItem::from).collect();
        let rows = dissolved::name_match_rows(&items, top_hit_key.as_deref(), today());

        let total_pages = page_count(response.hits, DISSOLVED_PAGE_SIZE, DISSOLVED_MAX_PAGES);
        SearchPage {
            rows,
            hits: response.hits,
            current_page: params.page,
            total_pages,
            page_window: Some(page_window(params.page, total_pages)),
            previous_link: None,
            next_link: None,
            paging_query: name_paging_query(params),
        }
    }

    async fn previous_names_page(&self, params: &SearchParameters) -> SearchPage {
        let company_name = params.company_name.as_deref().unwrap_or_default();
        let start_index = (params.page - 1).saturating_mul(DISSOLVED_PAGE_SIZE);

        let response = match self
            .api
            .previous_names_search(company_name, start_index, DISSOLVED_PAGE_SIZE)
            .await
        {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "previous-name search failed");
                return SearchPage::empty(params.page);
            }
        };

        let items: Vec<ResultItem> = response.items.into_iter().map(ResultItem::from).collect();
        let rows = dissolved::previous_name_rows(&items, today());

        let total_pages = page_count(response.hits, DISSOLVED_PAGE_SIZE, DISSOLVED_MAX_PAGES);
        SearchPage {
            rows,
            hits: response.hits,
            current_page: params.page,
            total_pages,
            page_window: Some(page_window(params.page, total_pages)),
            previous_link: None,
            next_link: None,
            paging_query: name_paging_query(params),
        }
    }

    /// Render an advanced search page.
    pub async fn advanced_search(&self, params: &SearchParameters) -> SearchPage {
        let query = AdvancedSearchQuery::from(params);
        let size = params.page_size.unwrap_or(self.advanced_page_size).max(1);
        let start_index = (params.page - 1).saturating_mul(size);

        let response = match self.api.advanced_search(&query, start_index, size).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "advanced search failed");
                return SearchPage::empty(params.page);
            }
        };

        let items: Vec<ResultItem> = response.items.into_iter().map(ResultItem::from).collect();
        let rows = advanced::rows(&items);

        let total_pages = page_count(response.hits, size, ADVANCED_MAX_PAGES);
        SearchPage {
            rows,
            hits: response.hits,
            current_page: params.page,
            total_pages,
            page_window: Some(page_window(params.page, total_pages)),
            previous_link: None,
            next_link: None,
            paging_query: encode(params),
        }
    }

    /// Export the first `csv_download_limit` advanced results as CSV. A
    /// failed upstream call degrades to a header-only file; only a failure
    /// of the writer itself is an error.
    pub async fn advanced_csv(&self, params: &SearchParameters) -> Result<String> {
        let query = AdvancedSearchQuery::from(params);

        let items: Vec<ResultItem> = match self
            .api
            .advanced_search(&query, 0, self.csv_download_limit)
            .await
        {
            Ok(response) => response.items.into_iter().map(ResultItem::from).collect(),
            Err(err) => {
                error!(error = %err, "advanced download failed, exporting headers only");
                Vec::new()
            }
        };

        csv_export::advanced_csv(&items)
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn alphabetical_link(company_name: &str, cursor_param: &str, cursor: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("companyName", company_name);
    query.append_pair("searchType", "alphabetical");
    query.append_pair(cursor_param, cursor);
    format!("/company-search?{}", query.finish())
}

/// Base query for the numbered dissolved surfaces; the renderer appends
/// `page=N` for each link in the window.
fn name_paging_query(params: &SearchParameters) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(name) = &params.company_name {
        query.append_pair("companyName", name);
    }
    if let Some(changed) = &params.changed_name {
        query.append_pair("changedName", changed);
    }
    query.finish()
}

// ============================================================================
// Tests
// ============================================================================
