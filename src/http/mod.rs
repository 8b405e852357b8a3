//! HTTP protocol layer module
//!
//! Response builders, MIME lookup and cache validators, independent of
//! which endpoint produced the content.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_500_response,
    build_cached_response, build_health_response, build_html_response, build_json_response,
    build_options_response, ALLOWED_METHODS,
};
