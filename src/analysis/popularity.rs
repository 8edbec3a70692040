use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::models::ListingTable;

/// One listing on the price vs reviews chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub name: String,
    pub price: f64,
    pub number_of_reviews: u32,
    pub room_type: String,
    /// Drives the marker size
    pub accommodates: u32,
}

/// Price against number of reviews for every listing of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceReviewSeries {
    pub points: Vec<PricePoint>,
    /// Pearson correlation of price and reviews; `None` below two points or
    /// when either axis is constant
    pub correlation: Option<f64>,
}

impl PriceReviewSeries {
    pub fn from_table(table: &ListingTable) -> Self {
        let points: Vec<PricePoint> = table
            .iter()
            .map(|l| PricePoint {
                name: l.name.clone(),
                price: l.price,
                number_of_reviews: l.number_of_reviews,
                room_type: l.room_type.clone(),
                accommodates: l.accommodates,
            })
            .collect();
        let correlation = pearson(&points);
        Self {
            points,
            correlation,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Largest review count, used as the chart's vertical extent.
    pub fn max_reviews(&self) -> u32 {
        self.points
            .iter()
            .map(|p| p.number_of_reviews)
            .max()
            .unwrap_or(0)
    }
}

fn pearson(points: &[PricePoint]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    let reviews: Vec<f64> = points.iter().map(|p| f64::from(p.number_of_reviews)).collect();

    let spread = prices.iter().std_dev() * reviews.iter().std_dev();
    if !(spread > 0.0) {
        return None;
    }
    let r = prices.iter().covariance(reviews.iter()) / spread;
    r.is_finite().then_some(r.clamp(-1.0, 1.0))
}
