// Application state module
// Process-wide state shared by every connection task

use super::types::Config;
use crate::handler::RouteTable;

/// Application state
///
/// Built once at startup and shared behind an `Arc`; nothing in it is
/// mutated while serving.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let routes = RouteTable::new(&config);
        Self { config, routes }
    }
}
