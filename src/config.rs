//! Process configuration
//!
//! Everything is sourced from the environment (with `.env` support via
//! dotenvy at startup). Only the upstream API key is mandatory; all other
//! settings fall back to sensible defaults when unset or unparseable.

use crate::error::{SearchWebError, SearchWebResult};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream company search API.
    pub search_api_base_url: String,
    /// API key sent as the basic-auth username on every upstream call.
    pub search_api_key: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Results per page on the advanced search surface.
    pub advanced_page_size: u32,
    /// Maximum number of results fetched for a CSV download.
    pub csv_download_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            search_api_base_url: "https://api.company-information.service.gov.uk".to_string(),
            search_api_key: String::new(),
            port: 3000,
            advanced_page_size: 20,
            csv_download_limit: 5000,
        }
    }
}

impl Config {
    pub fn from_env() -> SearchWebResult<Self> {
        let defaults = Config::default();

        let search_api_key = std::env::var("SEARCH_API_KEY").map_err(|_| {
            SearchWebError::configuration("SEARCH_API_KEY environment variable not set")
        })?;

        Ok(Config {
            search_api_base_url: std::env::var("SEARCH_API_BASE_URL")
                .unwrap_or(defaults.search_api_base_url),
            search_api_key,
            port: env_number("PORT", defaults.port),
            advanced_page_size: env_number("ADVANCED_SEARCH_PAGE_SIZE", defaults.advanced_page_size),
            csv_download_limit: env_number("CSV_DOWNLOAD_LIMIT", defaults.csv_download_limit),
        })
    }
}

fn env_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.advanced_page_size, 20);
        assert_eq!(config.csv_download_limit, 5000);
        assert!(config.search_api_base_url.starts_with("https://"));
    }

    #[test]
    fn test_env_number_falls_back_on_garbage() {
        // Unset / unparseable values keep the default
        assert_eq!(env_number("DOES_NOT_EXIST_FOR_SURE_12345", 42u32), 42);
    }
}
