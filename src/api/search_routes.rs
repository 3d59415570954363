//! Search endpoints
//!
//! One route per search surface. Handlers decode the raw query string
//! through the codec, call the page service and wrap the result in the
//! standard response envelope. Upstream trouble never becomes an HTTP
//! error here; only an unusable request or a failed CSV render does.

use crate::params::{decode_query_string, SearchParameters};
use crate::search_api::types::AdvancedSearchQuery;
use crate::service::{SearchPage, SearchService};
use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

// Application state
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

pub fn create_search_router(search: Arc<SearchService>) -> Router {
    let state = AppState { search };

    Router::new()
        .route("/health", get(health_check))
        .route("/company-search", get(company_search))
        .route("/advanced-search", get(advanced_search))
        .route("/advanced-search/download", get(advanced_search_download))
        .with_state(state)
}

async fn health_check() -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        success: true,
        data: Some("OK".to_string()),
        error: None,
    })
}

/// Name search: alphabetical, best-match or previous-name depending on the
/// query parameters.
async fn company_search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<SearchPage>>, (StatusCode, String)> {
    let params = decode_params(query);

    let company_name = params.company_name.as_deref().unwrap_or("").trim();
    if company_name.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "companyName is required".to_string(),
        ));
    }

    info!(company_name, mode = ?params.name_search_mode(), "company search");
    let page = state.search.name_search(&params).await;
    Ok(Json(ApiResponse {
        success: true,
        data: Some(page),
        error: None,
    }))
}

async fn advanced_search(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<SearchPage>>, (StatusCode, String)> {
    let params = decode_params(query);
    require_criteria(&params)?;

    info!(page = params.page, "advanced search");
    let page = state.search.advanced_search(&params).await;
    Ok(Json(ApiResponse {
        success: true,
        data: Some(page),
        error: None,
    }))
}

async fn advanced_search_download(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let params = decode_params(query);
    require_criteria(&params)?;

    info!("advanced search download");
    let csv = state
        .search
        .advanced_csv(&params)
        .await
        .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"company-search-results.csv\"",
            ),
        ],
        csv,
    ))
}

fn decode_params(query: Option<String>) -> SearchParameters {
    decode_query_string(query.as_deref().unwrap_or(""))
}

/// The advanced surfaces refuse a completely empty filter set rather than
/// paging the whole register.
fn require_criteria(params: &SearchParameters) -> Result<(), (StatusCode, String)> {
    if AdvancedSearchQuery::from(params) == AdvancedSearchQuery::default() {
        return Err((
            StatusCode::BAD_REQUEST,
            "at least one search criterion is required".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search_api::stub::StubSearchApi;
    use crate::search_api::types::{BestMatchSearchResponse, DissolvedCompany};

    fn state_with(stub: StubSearchApi) -> AppState {
        AppState {
            search: Arc::new(SearchService::new(Arc::new(stub))),
        }
    }

    #[tokio::test]
    async fn test_company_search_requires_a_name() {
        let result = company_search(
            State(state_with(StubSearchApi::new())),
            RawQuery(Some("searchType=alphabetical".to_string())),
        )
        .await;

        let err = result.err().unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_company_search_returns_page_envelope() {
        let stub = StubSearchApi::new().with_best_match(BestMatchSearchResponse {
            items: vec![DissolvedCompany {
                company_name: "TEST LIMITED".to_string(),
                company_number: "00123456".to_string(),
                ordered_alpha_key_with_id: "TEST:00123456".to_string(),
                ..Default::default()
            }],
            hits: 1,
            ..Default::default()
        });

        let result = company_search(
            State(state_with(stub)),
            RawQuery(Some("companyName=TEST".to_string())),
        )
        .await;

        let Json(envelope) = result.ok().unwrap();
        assert!(envelope.success);
        let page = envelope.data.unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.hits, 1);
    }

    #[tokio::test]
    async fn test_advanced_search_requires_some_criterion() {
        let result = advanced_search(
            State(state_with(StubSearchApi::new())),
            RawQuery(Some("page=3".to_string())),
        )
        .await;

        let err = result.err().unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_advanced_search_accepts_any_single_criterion() {
        let result = advanced_search(
            State(state_with(StubSearchApi::new())),
            RawQuery(Some("sicCodes=07210".to_string())),
        )
        .await;

        assert!(result.is_ok());
    }
}
