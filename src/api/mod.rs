//! HTTP surface
//!
//! JSON endpoints for the search pages plus the CSV download. The page
//! model returned here is fully normalized; callers render it without
//! further lookups.

pub mod search_routes;

pub use search_routes::create_search_router;
