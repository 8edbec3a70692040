use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::DashboardSettings;
use crate::config::{DashboardConfig, FilterDefaults};
use crate::error::DashboardError;
use crate::io::{Dataset, TableCache};

/// Shared state for all page-server workers.
///
/// The dataset itself is immutable; every request derives its own view.
pub struct AppState {
    pub data_path: PathBuf,
    pub cache: TableCache,
    pub settings: DashboardSettings,
    pub filter_defaults: FilterDefaults,
    /// Fixed seed for map samples, if configured
    pub seed: Option<u64>,
}

impl AppState {
    pub fn new(data_path: impl Into<PathBuf>, config: &DashboardConfig) -> Self {
        Self {
            data_path: data_path.into(),
            cache: TableCache::new(config.load_options()),
            settings: config.settings(),
            filter_defaults: config.filters.clone(),
            seed: config.map.seed,
        }
    }

    /// The current dataset, reloaded only when the file changed.
    pub fn dataset(&self) -> Result<Arc<Dataset>, DashboardError> {
        self.cache.load(&self.data_path)
    }
}
