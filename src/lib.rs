//! Company search front end
//!
//! Server-side core of a company register search service. Three name-search
//! modes run against the register's search API:
//! - Alphabetical: a cursor-paged window around the closest name match
//! - Best match: ranked dissolved companies under numbered pages
//! - Previous names: dissolved companies matched on a former name
//!
//! plus an advanced filtered search with CSV export. Upstream responses are
//! normalized into display rows with labels resolved and dates formatted,
//! so rendering needs no further lookups.

// Core error handling
pub mod error;

// Configuration from the environment
pub mod config;

// Pure building blocks: formatters, label tables, paging, highlighting
pub mod enumerations;
pub mod format;
pub mod highlight;
pub mod paging;

// Canonical search parameters and the query-string codec
pub mod params;

// Upstream API access (trait, HTTP client, canned stub)
pub mod search_api;

// Normalization into display rows
pub mod results;

// Page orchestration and CSV export
pub mod csv_export;
pub mod service;

// HTTP surface
pub mod api;

// Public re-exports for the common path
pub use config::Config;
pub use error::{SearchWebError, SearchWebResult};
pub use params::{decode_query_string, encode, NameSearchMode, SearchParameters};
pub use service::{SearchPage, SearchService};
