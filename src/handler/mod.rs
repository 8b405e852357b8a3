//! Request handler module
//!
//! Route table, dispatch, and the three kinds of content the server
//! produces: the dashboard page, dataset passthroughs, static assets.

pub mod dashboard;
pub mod dataset;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, Endpoint, RouteTable};
