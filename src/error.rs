//! Error handling for the company search front end
//!
//! Two failure classes matter here:
//! - Configuration problems that should stop the process at startup
//! - Upstream search API responses outside the 2xx range
//!
//! Upstream failures during a search are deliberately not surfaced to the
//! caller as errors; the service layer logs them and renders an empty page.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchWebError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Search API error {status}: {message}")]
    Upstream { status: u16, message: String },
}

pub type SearchWebResult<T> = Result<T, SearchWebError>;

impl SearchWebError {
    pub fn configuration(message: impl Into<String>) -> Self {
        SearchWebError::Configuration {
            message: message.into(),
        }
    }
}
