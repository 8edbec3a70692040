use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Listing;
use crate::error::DashboardError;

/// User-selected filter predicates.
///
/// An empty neighborhood or room-type set accepts every value. The price
/// range is inclusive on both ends and always satisfies `price_min <= price_max`
/// when built through [`FilterCriteria::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub neighborhoods: BTreeSet<String>,
    pub room_types: BTreeSet<String>,
    #[serde(serialize_with = "bound::serialize", deserialize_with = "bound::lower")]
    pub price_min: f64,
    #[serde(serialize_with = "bound::serialize", deserialize_with = "bound::upper")]
    pub price_max: f64,
}

/// Open price bounds are written as `null`.
mod bound {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn lower<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NEG_INFINITY))
    }

    pub fn upper<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

impl FilterCriteria {
    /// Criteria accepting every neighborhood and room type within a price range.
    ///
    /// # Examples
    ///
    /// ```
    /// use listing_dashboard::FilterCriteria;
    ///
    /// assert!(FilterCriteria::new(50.0, 300.0).is_ok());
    /// assert!(FilterCriteria::new(300.0, 50.0).is_err());
    /// ```
    pub fn new(price_min: f64, price_max: f64) -> Result<Self, DashboardError> {
        if !price_min.is_finite() || !price_max.is_finite() {
            return Err(DashboardError::ValidationError(format!(
                "price range must be finite, got [{price_min}, {price_max}]"
            )));
        }
        if price_min > price_max {
            return Err(DashboardError::ValidationError(format!(
                "price_min ({price_min}) must not exceed price_max ({price_max})"
            )));
        }
        Ok(Self {
            neighborhoods: BTreeSet::new(),
            room_types: BTreeSet::new(),
            price_min,
            price_max,
        })
    }

    /// Criteria that accept every listing.
    pub fn all() -> Self {
        Self {
            neighborhoods: BTreeSet::new(),
            room_types: BTreeSet::new(),
            price_min: f64::NEG_INFINITY,
            price_max: f64::INFINITY,
        }
    }

    pub fn with_neighborhoods<I, S>(mut self, neighborhoods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.neighborhoods = neighborhoods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_room_types<I, S>(mut self, room_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.room_types = room_types.into_iter().map(Into::into).collect();
        self
    }

    /// True when no neighborhood restriction is active.
    pub fn all_neighborhoods(&self) -> bool {
        self.neighborhoods.is_empty()
    }

    pub fn accepts_neighborhood(&self, neighborhood: &str) -> bool {
        self.neighborhoods.is_empty() || self.neighborhoods.contains(neighborhood)
    }

    pub fn accepts_room_type(&self, room_type: &str) -> bool {
        self.room_types.is_empty() || self.room_types.contains(room_type)
    }

    pub fn accepts_price(&self, price: f64) -> bool {
        self.price_min <= price && price <= self.price_max
    }

    /// Check all three predicates against a listing.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.accepts_neighborhood(&listing.neighborhood)
            && self.accepts_room_type(&listing.room_type)
            && self.accepts_price(listing.price)
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, neighborhood: &str, room_type: &str) -> Listing {
        Listing {
            name: "test".to_string(),
            price,
            latitude: None,
            longitude: None,
            room_type: room_type.to_string(),
            neighborhood: neighborhood.to_string(),
            number_of_reviews: 0,
            accommodates: 1,
        }
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let err = FilterCriteria::new(500.0, 100.0).unwrap_err();
        assert!(matches!(err, DashboardError::ValidationError(_)));
    }

    #[test]
    fn test_new_rejects_nan() {
        assert!(FilterCriteria::new(f64::NAN, 100.0).is_err());
        assert!(FilterCriteria::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_new_accepts_equal_bounds() {
        let c = FilterCriteria::new(100.0, 100.0).unwrap();
        assert!(c.accepts_price(100.0));
        assert!(!c.accepts_price(100.01));
    }

    #[test]
    fn test_empty_sets_mean_all() {
        let c = FilterCriteria::new(0.0, 1000.0).unwrap();
        assert!(c.all_neighborhoods());
        assert!(c.matches(&listing(50.0, "Anywhere", "Hotel room")));
    }

    #[test]
    fn test_neighborhood_membership() {
        let c = FilterCriteria::new(0.0, 1000.0)
            .unwrap()
            .with_neighborhoods(["A"]);
        assert!(c.matches(&listing(50.0, "A", "Private room")));
        assert!(!c.matches(&listing(50.0, "B", "Private room")));
    }

    #[test]
    fn test_room_type_membership() {
        let c = FilterCriteria::new(0.0, 1000.0)
            .unwrap()
            .with_room_types(["Private room", "Shared room"]);
        assert!(c.matches(&listing(50.0, "A", "Shared room")));
        assert!(!c.matches(&listing(50.0, "A", "Entire home/apt")));
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let c = FilterCriteria::new(50.0, 300.0).unwrap();
        assert!(c.matches(&listing(50.0, "A", "x")));
        assert!(c.matches(&listing(300.0, "A", "x")));
        assert!(!c.matches(&listing(49.99, "A", "x")));
        assert!(!c.matches(&listing(300.01, "A", "x")));
    }

    #[test]
    fn test_open_bounds_serialize_as_null() {
        let json = serde_json::to_value(FilterCriteria::all()).unwrap();
        assert!(json["price_min"].is_null());
        assert!(json["price_max"].is_null());

        let back: FilterCriteria = serde_json::from_value(json).unwrap();
        assert_eq!(back, FilterCriteria::all());
    }

    #[test]
    fn test_finite_bounds_round_trip() {
        let criteria = FilterCriteria::new(50.0, 300.0)
            .unwrap()
            .with_neighborhoods(["Pine Hills"]);
        let json = serde_json::to_string(&criteria).unwrap();
        assert!(json.contains("\"price_min\":50.0"));
        let back: FilterCriteria = serde_json::from_str(&json).unwrap();
        assert_eq!(back, criteria);
    }

    #[test]
    fn test_all_accepts_extremes() {
        let c = FilterCriteria::all();
        assert!(c.matches(&listing(0.0, "A", "x")));
        assert!(c.matches(&listing(1e9, "B", "y")));
    }
}
