use thiserror::Error;

/// Errors that can occur while loading or analyzing listings.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

impl DashboardError {
    /// Whether this error means the dataset could not be loaded at all.
    ///
    /// Load errors are fatal to startup: no partial dashboard is rendered.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            DashboardError::Io(_)
                | DashboardError::Csv(_)
                | DashboardError::MissingColumn(_)
                | DashboardError::EmptyDataset(_)
        )
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(e: toml::de::Error) -> Self {
        DashboardError::Config(e.to_string())
    }
}
