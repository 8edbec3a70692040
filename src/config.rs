//! TOML configuration for the dashboard.
//!
//! Every section and key is optional:
//!
//! ```toml
//! [data]
//! path = "listings.csv"
//! min_price = 10.0
//! max_price = 1000.0
//!
//! [map]
//! sample_size = 500
//! seed = 42
//!
//! [insights]
//! top_n = 5
//! confidence = 0.95
//!
//! [filters]
//! price_min = 50.0
//! price_max = 300.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::{DashboardSettings, DEFAULT_MAP_SAMPLE, DEFAULT_TOP_N};
use crate::error::DashboardError;
use crate::io::LoadOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data: DataConfig,
    pub map: MapConfig,
    pub insights: InsightsConfig,
    pub filters: FilterDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Listings file used when no input is given on the command line
    pub path: Option<PathBuf>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub sample_size: usize,
    /// Fixed seed for reproducible map samples
    pub seed: Option<u64>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_MAP_SAMPLE,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    pub top_n: usize,
    pub confidence: f64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            confidence: 0.95,
        }
    }
}

/// Initial price range; unset bounds fall back to the dataset's range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
}

impl DashboardConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, DashboardError> {
        let config: DashboardConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if let (Some(min), Some(max)) = (self.data.min_price, self.data.max_price) {
            if min > max {
                return Err(DashboardError::Config(format!(
                    "data.min_price ({min}) exceeds data.max_price ({max})"
                )));
            }
        }
        if !(self.insights.confidence > 0.0 && self.insights.confidence < 1.0) {
            return Err(DashboardError::Config(format!(
                "insights.confidence must be in (0, 1), got {}",
                self.insights.confidence
            )));
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            min_price: self.data.min_price,
            max_price: self.data.max_price,
        }
    }

    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            map_sample_size: self.map.sample_size,
            top_n: self.insights.top_n,
            confidence: self.insights.confidence,
        }
    }
}
