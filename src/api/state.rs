//! Application state for the personnel records API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::error::RecordsResult;
use crate::query::QueryComposer;
use crate::service::{ReportAggregator, SearchService};
use crate::storage::PersonnelStore;

/// Shared application state.
///
/// Holds the services; the store they share is the only resource
/// common to concurrent requests.
#[derive(Clone)]
pub struct AppState {
    search: SearchService,
    reports: ReportAggregator,
}

impl AppState {
    /// Creates application state over a store and composer.
    pub fn new(store: Arc<dyn PersonnelStore>, composer: QueryComposer) -> Self {
        Self {
            search: SearchService::new(store.clone(), composer),
            reports: ReportAggregator::new(store, composer),
        }
    }

    /// Creates application state from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> RecordsResult<Self> {
        let store = Arc::new(config.open_store()?);
        Ok(Self::new(store, config.composer()))
    }

    /// The search service.
    pub fn search(&self) -> &SearchService {
        &self.search
    }

    /// The report aggregator.
    pub fn reports(&self) -> &ReportAggregator {
        &self.reports
    }
}
