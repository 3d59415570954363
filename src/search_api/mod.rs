//! Upstream search API access
//!
//! [`CompanySearchApi`] is the seam between the page services and the
//! remote company search service, one method per search surface. The
//! production implementation is [`client::SearchApiClient`]; tests and
//! offline development use [`stub::StubSearchApi`].

pub mod client;
pub mod stub;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::{
    AdvancedSearchQuery, AdvancedSearchResponse, AlphabeticalSearchResponse,
    BestMatchSearchResponse, PreviousNamesSearchResponse,
};

#[async_trait]
pub trait CompanySearchApi: Send + Sync {
    /// Ordered batch of dissolved companies around the closest alphabetical
    /// match, optionally continued from a cursor. At most one of
    /// `search_before` / `search_after` is expected per call.
    async fn alphabetical_search(
        &self,
        company_name: &str,
        search_before: Option<&str>,
        search_after: Option<&str>,
        size: Option<u32>,
    ) -> Result<AlphabeticalSearchResponse>;

    /// Ranked dissolved companies matched on their name at dissolution.
    async fn best_match_search(
        &self,
        company_name: &str,
        start_index: u32,
        size: u32,
    ) -> Result<BestMatchSearchResponse>;

    /// Ranked dissolved companies matched on a previous name.
    async fn previous_names_search(
        &self,
        company_name: &str,
        start_index: u32,
        size: u32,
    ) -> Result<PreviousNamesSearchResponse>;

    /// Filtered search across the full register.
    async fn advanced_search(
        &self,
        query: &AdvancedSearchQuery,
        start_index: u32,
        size: u32,
    ) -> Result<AdvancedSearchResponse>;
}
