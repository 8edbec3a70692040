pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{Dashboard, DashboardSettings, DashboardView};
pub use config::DashboardConfig;
pub use error::DashboardError;
pub use io::{ListingReader, TableCache};
pub use models::{FilterCriteria, Listing, ListingTable};
