mod filter;
mod summary;
mod ranking;
mod statistics;
mod sampler;
mod geo;
mod popularity;
mod dashboard;

pub use filter::apply;
pub use summary::{summarize, GroupStats, SummaryStats};
pub use ranking::{
    most_reviewed, room_type_prices, top_neighborhoods_by_price, CategoryPrice, DEFAULT_TOP_N,
};
pub use statistics::{ConfidenceInterval, PriceStatistics};
pub use sampler::{sample, sample_with_rng, DEFAULT_MAP_SAMPLE};
pub use geo::{MapInsights, PriceTier};
pub use popularity::{PricePoint, PriceReviewSeries};
pub use dashboard::{Dashboard, DashboardSettings, DashboardView, FilterOptions};
