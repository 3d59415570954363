//! Canned search API implementation
//!
//! Serves fixed responses instead of calling the upstream service. Used by
//! the service tests and handy for running the server without credentials.
//! Every call is recorded so tests can assert which upstream requests a
//! page render produced.

use super::types::{
    AdvancedSearchQuery, AdvancedSearchResponse, AlphabeticalSearchResponse,
    BestMatchSearchResponse, PreviousNamesSearchResponse,
};
use super::CompanySearchApi;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub struct StubSearchApi {
    alphabetical: Option<AlphabeticalSearchResponse>,
    before_page: Option<AlphabeticalSearchResponse>,
    after_page: Option<AlphabeticalSearchResponse>,
    best_match: Option<BestMatchSearchResponse>,
    previous_names: Option<PreviousNamesSearchResponse>,
    advanced: Option<AdvancedSearchResponse>,
    fail: bool,
    fail_cursor_requests: bool,
    calls: Mutex<Vec<String>>,
}

impl StubSearchApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub where every upstream call fails.
    pub fn failing() -> Self {
        StubSearchApi {
            fail: true,
            ..Default::default()
        }
    }

    /// Fail only alphabetical requests that carry a cursor, leaving the
    /// primary fetch healthy.
    pub fn with_cursor_outage(mut self) -> Self {
        self.fail_cursor_requests = true;
        self
    }

    /// Response served for plain alphabetical requests (no cursor).
    pub fn with_alphabetical(mut self, response: AlphabeticalSearchResponse) -> Self {
        self.alphabetical = Some(response);
        self
    }

    /// Responses served for cursor requests: `before` when `search_before`
    /// is set, `after` when `search_after` is set. Unset pages serve empty.
    pub fn with_adjacent_pages(
        mut self,
        before: AlphabeticalSearchResponse,
        after: AlphabeticalSearchResponse,
    ) -> Self {
        self.before_page = Some(before);
        self.after_page = Some(after);
        self
    }

    pub fn with_best_match(mut self, response: BestMatchSearchResponse) -> Self {
        self.best_match = Some(response);
        self
    }

    pub fn with_previous_names(mut self, response: PreviousNamesSearchResponse) -> Self {
        self.previous_names = Some(response);
        self
    }

    pub fn with_advanced(mut self, response: AdvancedSearchResponse) -> Self {
        self.advanced = Some(response);
        self
    }

    /// The upstream calls made so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_availability(&self) -> Result<()> {
        if self.fail {
            Err(anyhow!("stubbed upstream outage"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CompanySearchApi for StubSearchApi {
    async fn alphabetical_search(
        &self,
        company_name: &str,
        search_before: Option<&str>,
        search_after: Option<&str>,
        _size: Option<u32>,
    ) -> Result<AlphabeticalSearchResponse> {
        let (label, response) = match (search_before, search_after) {
            (Some(_), _) => ("alphabetical:before", &self.before_page),
            (_, Some(_)) => ("alphabetical:after", &self.after_page),
            _ => ("alphabetical", &self.alphabetical),
        };
        self.record(format!("{} {}", label, company_name));
        self.check_availability()?;
        let is_cursor_request = search_before.is_some() || search_after.is_some();
        if is_cursor_request && self.fail_cursor_requests {
            return Err(anyhow!("stubbed cursor outage"));
        }
        Ok(response.clone().unwrap_or_default())
    }

    async fn best_match_search(
        &self,
        company_name: &str,
        start_index: u32,
        _size: u32,
    ) -> Result<BestMatchSearchResponse> {
        self.record(format!("best-match {} @{}", company_name, start_index));
        self.check_availability()?;
        Ok(self.best_match.clone().unwrap_or_default())
    }

    async fn previous_names_search(
        &self,
        company_name: &str,
        start_index: u32,
        _size: u32,
    ) -> Result<PreviousNamesSearchResponse> {
        self.record(format!("previous-names {} @{}", company_name, start_index));
        self.check_availability()?;
        Ok(self.previous_names.clone().unwrap_or_default())
    }

    async fn advanced_search(
        &self,
        query: &AdvancedSearchQuery,
        start_index: u32,
        size: u32,
    ) -> Result<AdvancedSearchResponse> {
        let mut call = format!("advanced @{} x{}", start_index, size);
        if let Some(types) = &query.company_type {
            call.push_str(&format!(" type={}", types));
        }
        self.record(call);
        self.check_availability()?;
        Ok(self.advanced.clone().unwrap_or_default())
    }
}
