use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Listing, ListingTable};

/// Default number of entries in a top-N view.
pub const DEFAULT_TOP_N: usize = 5;

/// Mean price for one category value (a neighborhood or a room type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPrice {
    pub category: String,
    pub mean_price: f64,
    pub count: usize,
}

/// Mean price per category, in order of first appearance.
fn mean_price_by<F>(table: &ListingTable, key: F) -> Vec<CategoryPrice>
where
    F: Fn(&Listing) -> &str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    // (category, price_sum, count)
    let mut accum: Vec<(&str, f64, usize)> = Vec::new();

    for listing in table {
        let k = key(listing);
        let slot = *index.entry(k).or_insert_with(|| {
            accum.push((k, 0.0, 0));
            accum.len() - 1
        });
        accum[slot].1 += listing.price;
        accum[slot].2 += 1;
    }

    accum
        .into_iter()
        .map(|(category, sum, count)| CategoryPrice {
            category: category.to_string(),
            mean_price: sum / count as f64,
            count,
        })
        .collect()
}

fn sort_by_price_desc(prices: &mut [CategoryPrice]) {
    // Stable: equal means keep first-appearance order.
    prices.sort_by(|a, b| b.mean_price.total_cmp(&a.mean_price));
}

/// Neighborhoods with the highest mean price, most expensive first.
pub fn top_neighborhoods_by_price(table: &ListingTable, n: usize) -> Vec<CategoryPrice> {
    let mut prices = mean_price_by(table, |l| l.neighborhood.as_str());
    sort_by_price_desc(&mut prices);
    prices.truncate(n);
    prices
}

/// Mean price for every room type, most expensive first.
pub fn room_type_prices(table: &ListingTable) -> Vec<CategoryPrice> {
    let mut prices = mean_price_by(table, |l| l.room_type.as_str());
    sort_by_price_desc(&mut prices);
    prices
}

/// Listings with the most reviews; ties keep table order.
pub fn most_reviewed(table: &ListingTable, n: usize) -> Vec<Listing> {
    let mut listings: Vec<&Listing> = table.iter().collect();
    listings.sort_by(|a, b| b.number_of_reviews.cmp(&a.number_of_reviews));
    listings.into_iter().take(n).cloned().collect()
}
