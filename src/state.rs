use crate::config::Config;
use crate::forwarder::Forwarder;
use crate::route_table::RouteTable;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(config: &Config, forwarder: Forwarder) -> Self {
        Self {
            routes: Arc::new(RouteTable::from_config(config)),
            forwarder,
        }
    }
}
