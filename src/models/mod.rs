mod listing;
mod table;
mod criteria;

pub use listing::{Listing, UNKNOWN_CATEGORY};
pub(crate) use listing::{valid_latitude, valid_longitude};
pub use table::{DatasetOverview, ListingTable};
pub use criteria::FilterCriteria;
