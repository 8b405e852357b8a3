//! Market dashboard server
//!
//! Serves one HTML dashboard page plus three read-only JSON datasets
//! (`marketShare`, `revenueTrends`, `marketSegmentation`) read from disk
//! on every request.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
