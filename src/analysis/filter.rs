use crate::models::{FilterCriteria, ListingTable};

/// Return the listings that satisfy every predicate in `criteria`.
///
/// The result keeps the input order. Empty neighborhood or room-type
/// selections accept all values.
pub fn apply(table: &ListingTable, criteria: &FilterCriteria) -> ListingTable {
    ListingTable::from_listings(
        table.name.clone(),
        table
            .listings
            .iter()
            .filter(|l| criteria.matches(l))
            .cloned()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;

    fn listing(name: &str, price: f64, neighborhood: &str, room_type: &str) -> Listing {
        Listing {
            name: name.to_string(),
            price,
            latitude: Some(42.65),
            longitude: Some(-73.75),
            room_type: room_type.to_string(),
            neighborhood: neighborhood.to_string(),
            number_of_reviews: 0,
            accommodates: 2,
        }
    }

    fn sample_table() -> ListingTable {
        ListingTable::from_listings(
            "filter",
            vec![
                listing("one", 100.0, "A", "Entire home"),
                listing("two", 300.0, "B", "Private room"),
                listing("three", 45.0, "A", "Private room"),
                listing("four", 900.0, "C", "Entire home"),
                listing("five", 150.0, "B", "Entire home"),
            ],
        )
    }

    fn names(table: &ListingTable) -> Vec<&str> {
        table.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_neighborhood_only() {
        let criteria = FilterCriteria::new(0.0, 1000.0)
            .unwrap()
            .with_neighborhoods(["A"]);
        let result = apply(&sample_table(), &criteria);
        assert_eq!(names(&result), vec!["one", "three"]);
    }

    #[test]
    fn test_empty_selections_mean_all() {
        let criteria = FilterCriteria::new(0.0, 1000.0).unwrap();
        assert_eq!(apply(&sample_table(), &criteria).len(), 5);
    }

    #[test]
    fn test_combined_predicates() {
        let criteria = FilterCriteria::new(100.0, 300.0)
            .unwrap()
            .with_neighborhoods(["A", "B"])
            .with_room_types(["Entire home"]);
        let result = apply(&sample_table(), &criteria);
        assert_eq!(names(&result), vec!["one", "five"]);
    }

    #[test]
    fn test_preserves_order() {
        let criteria = FilterCriteria::new(100.0, 1000.0).unwrap();
        let result = apply(&sample_table(), &criteria);
        assert_eq!(names(&result), vec!["one", "two", "four", "five"]);
    }

    #[test]
    fn test_excludes_everything() {
        let criteria = FilterCriteria::new(0.0, 1000.0)
            .unwrap()
            .with_neighborhoods(["Nowhere"]);
        let result = apply(&sample_table(), &criteria);
        assert!(result.is_empty());
        assert_eq!(result.name, "filter");
    }

    #[test]
    fn test_idempotent() {
        let criteria = FilterCriteria::new(50.0, 500.0)
            .unwrap()
            .with_room_types(["Entire home"]);
        let once = apply(&sample_table(), &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_table() {
        let result = apply(&ListingTable::new("empty"), &FilterCriteria::all());
        assert!(result.is_empty());
    }
}
