use serde::{Deserialize, Serialize};

/// Placeholder used for a missing categorical value.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A single rental listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Listing title as shown to guests
    pub name: String,
    /// Nightly price, currency-normalized
    pub price: f64,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
    /// Room type (e.g., "Entire home/apt", "Private room")
    pub room_type: String,
    /// Cleansed neighborhood name
    pub neighborhood: String,
    /// Total number of reviews
    pub number_of_reviews: u32,
    /// Number of guests the listing accommodates
    pub accommodates: u32,
}

impl Listing {
    /// Both coordinates, if the listing can be placed on a map.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if valid_latitude(lat) && valid_longitude(lon) => {
                Some((lat, lon))
            }
            _ => None,
        }
    }

    /// Check if the listing has usable latitude and longitude.
    pub fn is_mappable(&self) -> bool {
        self.coordinates().is_some()
    }
}

pub(crate) fn valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

pub(crate) fn valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}
