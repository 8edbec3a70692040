use serde::{Deserialize, Serialize};

use crate::models::ListingTable;

/// Price band used to colour map points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    Budget,
    Medium,
    Premium,
    Luxury,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        PriceTier::Budget,
        PriceTier::Medium,
        PriceTier::Premium,
        PriceTier::Luxury,
    ];

    pub fn from_price(price: f64) -> Self {
        if price < 75.0 {
            PriceTier::Budget
        } else if price < 150.0 {
            PriceTier::Medium
        } else if price < 250.0 {
            PriceTier::Premium
        } else {
            PriceTier::Luxury
        }
    }

    /// Hex colour for map markers.
    pub fn color(&self) -> &'static str {
        match self {
            PriceTier::Budget => "#2E8B57",
            PriceTier::Medium => "#FFD700",
            PriceTier::Premium => "#FF8C00",
            PriceTier::Luxury => "#DC143C",
        }
    }

    /// Human-readable price band for legends.
    pub fn range_label(&self) -> &'static str {
        match self {
            PriceTier::Budget => "Under $75",
            PriceTier::Medium => "$75-$149",
            PriceTier::Premium => "$150-$249",
            PriceTier::Luxury => "$250+",
        }
    }
}

impl std::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTier::Budget => write!(f, "Budget"),
            PriceTier::Medium => write!(f, "Medium"),
            PriceTier::Premium => write!(f, "Premium"),
            PriceTier::Luxury => write!(f, "Luxury"),
        }
    }
}

/// Geographic summary of the listings shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapInsights {
    pub points: usize,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub mean_price: f64,
    pub northernmost: String,
    pub southernmost: String,
}

impl MapInsights {
    /// Compute insights over the mappable listings of a table.
    ///
    /// Returns `None` when no listing has usable coordinates.
    pub fn from_table(table: &ListingTable) -> Option<Self> {
        let mut points = table
            .iter()
            .filter_map(|l| l.coordinates().map(|(lat, lon)| (l, lat, lon)));

        let (first, lat0, lon0) = points.next()?;
        let mut insights = MapInsights {
            points: 1,
            center_latitude: lat0,
            center_longitude: lon0,
            min_latitude: lat0,
            max_latitude: lat0,
            min_longitude: lon0,
            max_longitude: lon0,
            min_price: first.price,
            max_price: first.price,
            mean_price: first.price,
            northernmost: first.neighborhood.clone(),
            southernmost: first.neighborhood.clone(),
        };

        // Running sums live in the center/mean fields until the end.
        for (listing, lat, lon) in points {
            insights.points += 1;
            insights.center_latitude += lat;
            insights.center_longitude += lon;
            insights.mean_price += listing.price;
            insights.min_price = insights.min_price.min(listing.price);
            insights.max_price = insights.max_price.max(listing.price);
            insights.min_longitude = insights.min_longitude.min(lon);
            insights.max_longitude = insights.max_longitude.max(lon);
            if lat > insights.max_latitude {
                insights.max_latitude = lat;
                insights.northernmost = listing.neighborhood.clone();
            }
            if lat < insights.min_latitude {
                insights.min_latitude = lat;
                insights.southernmost = listing.neighborhood.clone();
            }
        }

        let n = insights.points as f64;
        insights.center_latitude /= n;
        insights.center_longitude /= n;
        insights.mean_price /= n;
        Some(insights)
    }

    /// Latitude span in degrees.
    pub fn latitude_extent(&self) -> f64 {
        self.max_latitude - self.min_latitude
    }

    /// Longitude span in degrees.
    pub fn longitude_extent(&self) -> f64 {
        self.max_longitude - self.min_longitude
    }
}
