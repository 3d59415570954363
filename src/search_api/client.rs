//! Search API client
//!
//! Rate-limited HTTP client for the upstream company search service.

use super::types::{
    AdvancedSearchQuery, AdvancedSearchResponse, AlphabeticalSearchResponse,
    BestMatchSearchResponse, PreviousNamesSearchResponse,
};
use super::CompanySearchApi;
use crate::config::Config;
use crate::error::SearchWebError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use url::form_urlencoded;

const RATE_LIMIT_DELAY_MS: u64 = 500; // ~2 req/sec to stay well inside the upstream quota

pub struct SearchApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    last_request: Mutex<Instant>,
}

impl SearchApiClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.search_api_base_url.clone(),
            config.search_api_key.clone(),
        )
    }

    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            last_request: Mutex::new(Instant::now()),
        })
    }

    /// Enforce rate limiting between requests
    async fn rate_limit(&self) {
        let elapsed = {
            let last = self.last_request.lock().unwrap();
            last.elapsed()
        };

        if elapsed < Duration::from_millis(RATE_LIMIT_DELAY_MS) {
            sleep(Duration::from_millis(RATE_LIMIT_DELAY_MS) - elapsed).await;
        }

        let mut last = self.last_request.lock().unwrap();
        *last = Instant::now();
    }

    /// Make a GET request with authentication
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.rate_limit().await;

        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, Option::<&str>::None)
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchWebError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            }
            .into());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", path))
    }
}

#[async_trait]
impl CompanySearchApi for SearchApiClient {
    async fn alphabetical_search(
        &self,
        company_name: &str,
        search_before: Option<&str>,
        search_after: Option<&str>,
        size: Option<u32>,
    ) -> Result<AlphabeticalSearchResponse> {
        self.get(&alphabetical_path(
            company_name,
            search_before,
            search_after,
            size,
        ))
        .await
    }

    async fn best_match_search(
        &self,
        company_name: &str,
        start_index: u32,
        size: u32,
    ) -> Result<BestMatchSearchResponse> {
        self.get(&dissolved_path(
            company_name,
            "best-match",
            start_index,
            size,
        ))
        .await
    }

    async fn previous_names_search(
        &self,
        company_name: &str,
        start_index: u32,
        size: u32,
    ) -> Result<PreviousNamesSearchResponse> {
        self.get(&dissolved_path(
            company_name,
            "previous-name-dissolved",
            start_index,
            size,
        ))
        .await
    }

    async fn advanced_search(
        &self,
        query: &AdvancedSearchQuery,
        start_index: u32,
        size: u32,
    ) -> Result<AdvancedSearchResponse> {
        self.get(&advanced_path(query, start_index, size)).await
    }
}

fn alphabetical_path(
    company_name: &str,
    search_before: Option<&str>,
    search_after: Option<&str>,
    size: Option<u32>,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("q", company_name);
    if let Some(cursor) = search_before {
        query.append_pair("search_before", cursor);
    }
    if let Some(cursor) = search_after {
        query.append_pair("search_after", cursor);
    }
    if let Some(size) = size {
        query.append_pair("size", &size.to_string());
    }
    format!("/alphabetical-search/companies?{}", query.finish())
}

fn dissolved_path(company_name: &str, search_type: &str, start_index: u32, size: u32) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("q", company_name);
    query.append_pair("search_type", search_type);
    query.append_pair("start_index", &start_index.to_string());
    query.append_pair("size", &size.to_string());
    format!("/dissolved-search/companies?{}", query.finish())
}

fn advanced_path(search: &AdvancedSearchQuery, start_index: u32, size: u32) -> String {
    let mut pairs: Vec<(String, String)> = Vec::new();

    push_text(&mut pairs, "company_name_includes", search.company_name_includes.as_deref());
    push_text(&mut pairs, "company_name_excludes", search.company_name_excludes.as_deref());
    push_text(&mut pairs, "location", search.location.as_deref());
    push_date(&mut pairs, "incorporated_from", search.incorporated_from);
    push_date(&mut pairs, "incorporated_to", search.incorporated_to);
    push_date(&mut pairs, "dissolved_from", search.dissolved_from);
    push_date(&mut pairs, "dissolved_to", search.dissolved_to);
    push_list(&mut pairs, "company_status", search.company_status.as_deref());
    push_list(&mut pairs, "company_type", search.company_type.as_deref());
    push_list(&mut pairs, "company_subtype", search.company_subtype.as_deref());
    push_list(&mut pairs, "sic_codes", search.sic_codes.as_deref());
    pairs.push(("start_index".to_string(), start_index.to_string()));
    pairs.push(("size".to_string(), size.to_string()));

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in &pairs {
        query.append_pair(name, value);
    }
    format!("/advanced-search/companies?{}", query.finish())
}

fn push_text(pairs: &mut Vec<(String, String)>, name: &str, value: Option<&str>) {
    if let Some(value) = value {
        pairs.push((name.to_string(), value.to_string()));
    }
}

fn push_date(pairs: &mut Vec<(String, String)>, name: &str, date: Option<NaiveDate>) {
    if let Some(date) = date {
        pairs.push((name.to_string(), date.format("%Y-%m-%d").to_string()));
    }
}

/// Comma lists go upstream as repeated parameters.
fn push_list(pairs: &mut Vec<(String, String)>, name: &str, list: Option<&str>) {
    if let Some(list) = list {
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            pairs.push((name.to_string(), entry.to_string()));
        }
    }
}
