use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    apply, most_reviewed, room_type_prices, sample_with_rng, summarize,
    top_neighborhoods_by_price, CategoryPrice, MapInsights, PriceReviewSeries, PriceStatistics,
    SummaryStats, DEFAULT_MAP_SAMPLE, DEFAULT_TOP_N,
};
use crate::models::{FilterCriteria, Listing, ListingTable};

/// Tunables for a dashboard pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Maximum number of points on the map
    pub map_sample_size: usize,
    /// Number of entries in top-N views
    pub top_n: usize,
    /// Confidence level for the mean price interval
    pub confidence: f64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            map_sample_size: DEFAULT_MAP_SAMPLE,
            top_n: DEFAULT_TOP_N,
            confidence: 0.95,
        }
    }
}

/// Choices offered to the user when building filter criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub neighborhoods: Vec<String>,
    pub room_types: Vec<String>,
    /// Slider lower bound (floor of the cheapest price)
    pub price_floor: f64,
    /// Slider upper bound (ceiling of the highest price)
    pub price_ceiling: f64,
}

impl FilterOptions {
    pub fn from_table(table: &ListingTable) -> Self {
        let (lo, hi) = table.price_range().unwrap_or((0.0, 0.0));
        Self {
            neighborhoods: table.neighborhoods(),
            room_types: table.room_types(),
            price_floor: lo.floor(),
            price_ceiling: hi.ceil(),
        }
    }

    /// Criteria covering the whole slider range with nothing else selected.
    pub fn full_range(&self) -> FilterCriteria {
        FilterCriteria {
            price_min: self.price_floor,
            price_max: self.price_ceiling,
            ..FilterCriteria::all()
        }
    }
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub criteria: FilterCriteria,
    /// Listings in the full dataset
    pub total_listings: usize,
    pub summary: SummaryStats,
    /// `None` when fewer than two listings match
    pub price_statistics: Option<PriceStatistics>,
    /// Mean price by room type for the selected neighborhoods, ignoring other filters
    pub room_type_prices: Vec<CategoryPrice>,
    pub top_neighborhoods: Vec<CategoryPrice>,
    pub most_reviewed: Vec<Listing>,
    /// Price against reviews over the filtered listings
    pub price_reviews: PriceReviewSeries,
    pub filtered: ListingTable,
    pub map_sample: ListingTable,
    pub map_insights: Option<MapInsights>,
    /// True when the map shows a random subset of the mappable listings
    pub sampled: bool,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}

/// Runs the filter → aggregate/sample pipeline over one immutable table.
pub struct Dashboard<'a> {
    table: &'a ListingTable,
    settings: &'a DashboardSettings,
}

impl<'a> Dashboard<'a> {
    pub fn new(table: &'a ListingTable, settings: &'a DashboardSettings) -> Self {
        Self { table, settings }
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_table(self.table)
    }

    /// Render the dashboard for the given criteria.
    pub fn render(&self, criteria: &FilterCriteria) -> DashboardView {
        self.render_with_rng(criteria, &mut rand::rng())
    }

    /// Render with a caller-provided random source for the map sample.
    pub fn render_with_rng<R>(&self, criteria: &FilterCriteria, rng: &mut R) -> DashboardView
    where
        R: Rng + ?Sized,
    {
        let filtered = apply(self.table, criteria);
        let summary = summarize(&filtered);

        let neighborhood_context = FilterCriteria {
            neighborhoods: criteria.neighborhoods.clone(),
            ..FilterCriteria::all()
        };
        let room_types = room_type_prices(&apply(self.table, &neighborhood_context));

        let top_neighborhoods = if criteria.all_neighborhoods() {
            top_neighborhoods_by_price(self.table, self.settings.top_n)
        } else {
            top_neighborhoods_by_price(&filtered, self.settings.top_n)
        };

        let map_sample = sample_with_rng(&filtered, self.settings.map_sample_size, rng);
        let sampled = map_sample.len() < filtered.num_mappable();
        let map_insights = MapInsights::from_table(&map_sample);

        DashboardView {
            criteria: criteria.clone(),
            total_listings: self.table.len(),
            price_statistics: PriceStatistics::compute(&filtered, self.settings.confidence).ok(),
            room_type_prices: room_types,
            top_neighborhoods,
            most_reviewed: most_reviewed(&filtered, self.settings.top_n),
            price_reviews: PriceReviewSeries::from_table(&filtered),
            summary,
            map_sample,
            map_insights,
            sampled,
            filtered,
        }
    }
}
