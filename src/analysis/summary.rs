use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::ListingTable;

/// Aggregates for one (neighborhood, room type) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub neighborhood: String,
    pub room_type: String,
    pub count: usize,
    pub mean_price: f64,
    pub mean_reviews: f64,
}

/// Summary metrics over a (usually filtered) listing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    /// `None` for an empty table
    pub mean_price: Option<f64>,
    /// `None` for an empty table
    pub mean_reviews: Option<f64>,
    pub neighborhood_count: usize,
    /// Non-empty groups, sorted by neighborhood then room type
    pub groups: Vec<GroupStats>,
}

impl SummaryStats {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Look up a group by its key.
    pub fn group(&self, neighborhood: &str, room_type: &str) -> Option<&GroupStats> {
        self.groups
            .iter()
            .find(|g| g.neighborhood == neighborhood && g.room_type == room_type)
    }
}

pub(crate) fn mean(sum: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| sum / count as f64)
}

/// Compute overall and grouped statistics. Defined for empty tables.
pub fn summarize(table: &ListingTable) -> SummaryStats {
    // (count, price_sum, reviews_sum)
    let mut groups: BTreeMap<(&str, &str), (usize, f64, f64)> = BTreeMap::new();
    let mut price_sum = 0.0;
    let mut reviews_sum = 0.0;

    for listing in table {
        price_sum += listing.price;
        reviews_sum += f64::from(listing.number_of_reviews);

        let entry = groups
            .entry((listing.neighborhood.as_str(), listing.room_type.as_str()))
            .or_insert((0, 0.0, 0.0));
        entry.0 += 1;
        entry.1 += listing.price;
        entry.2 += f64::from(listing.number_of_reviews);
    }

    let count = table.len();
    let neighborhood_count = table
        .iter()
        .map(|l| l.neighborhood.as_str())
        .collect::<HashSet<_>>()
        .len();

    SummaryStats {
        count,
        mean_price: mean(price_sum, count),
        mean_reviews: mean(reviews_sum, count),
        neighborhood_count,
        groups: groups
            .into_iter()
            .map(|((neighborhood, room_type), (n, price, reviews))| GroupStats {
                neighborhood: neighborhood.to_string(),
                room_type: room_type.to_string(),
                count: n,
                mean_price: price / n as f64,
                mean_reviews: reviews / n as f64,
            })
            .collect(),
    }
}
