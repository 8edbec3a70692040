use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::error::DashboardError;
use crate::models::ListingTable;

/// Confidence interval for a mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub std_error: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
    pub sample_size: usize,
    /// Half-width of the interval as a percentage of the mean
    pub margin_percent: f64,
}

/// Distribution of nightly prices across a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub std_dev: f64,
    pub mean: ConfidenceInterval,
}

impl PriceStatistics {
    /// Compute price statistics at a given confidence level (e.g. 0.95).
    pub fn compute(table: &ListingTable, confidence: f64) -> Result<Self, DashboardError> {
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(DashboardError::ValidationError(format!(
                "confidence must be in (0, 1), got {confidence}"
            )));
        }

        let prices: Vec<f64> = table.iter().map(|l| l.price).collect();
        if prices.len() < 2 {
            return Err(DashboardError::InsufficientData(
                "Need at least 2 listings for price statistics".to_string(),
            ));
        }

        let (min, max) = prices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
                (lo.min(p), hi.max(p))
            });
        let std_dev = prices.iter().std_dev();
        let mean = compute_ci(&prices, confidence)?;
        let median = Data::new(prices).median();

        Ok(PriceStatistics {
            count: mean.sample_size,
            min,
            max,
            median,
            std_dev,
            mean,
        })
    }
}

/// Compute a Student-t confidence interval of the mean.
fn compute_ci(values: &[f64], confidence: f64) -> Result<ConfidenceInterval, DashboardError> {
    let n = values.len();
    if n < 2 {
        return Err(DashboardError::InsufficientData(
            "Need at least 2 observations".to_string(),
        ));
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std_error = variance.sqrt() / (n as f64).sqrt();

    let df = (n - 1) as f64;
    let alpha = 1.0 - confidence;
    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| DashboardError::InsufficientData(e.to_string()))?;
    let t_value = t_dist.inverse_cdf(1.0 - alpha / 2.0);

    let margin = t_value * std_error;
    let margin_percent = if mean.abs() > f64::EPSILON {
        (margin / mean) * 100.0
    } else {
        0.0
    };

    Ok(ConfidenceInterval {
        mean,
        std_error,
        lower: mean - margin,
        upper: mean + margin,
        confidence_level: confidence,
        sample_size: n,
        margin_percent,
    })
}
