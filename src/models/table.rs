use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::Listing;

/// An ordered collection of listings sharing one schema.
///
/// Every listing carries a finite price; rows that fail price
/// normalization never make it into a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingTable {
    /// Name or identifier for this dataset
    pub name: String,
    /// Listings in source order
    pub listings: Vec<Listing>,
}

/// High-level description of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub total_listings: usize,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Room types in order of first appearance
    pub room_types: Vec<String>,
    pub neighborhood_count: usize,
}

impl ListingTable {
    /// Create a new empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listings: Vec::new(),
        }
    }

    /// Create a table from listings.
    pub fn from_listings(name: impl Into<String>, listings: Vec<Listing>) -> Self {
        Self {
            name: name.into(),
            listings,
        }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    /// Sorted unique neighborhood names.
    pub fn neighborhoods(&self) -> Vec<String> {
        self.listings
            .iter()
            .map(|l| l.neighborhood.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted unique room types.
    pub fn room_types(&self) -> Vec<String> {
        self.listings
            .iter()
            .map(|l| l.room_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Lowest and highest price, or `None` for an empty table.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.listings.iter().map(|l| l.price).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }

    /// Number of listings that can be placed on a map.
    pub fn num_mappable(&self) -> usize {
        self.listings.iter().filter(|l| l.is_mappable()).count()
    }

    /// Listings with usable coordinates, in table order.
    pub fn mappable(&self) -> ListingTable {
        ListingTable::from_listings(
            self.name.clone(),
            self.listings
                .iter()
                .filter(|l| l.is_mappable())
                .cloned()
                .collect(),
        )
    }

    /// Summarize the table for the "data summary" panel.
    pub fn overview(&self) -> DatasetOverview {
        let mut seen = HashSet::new();
        let mut room_types = Vec::new();
        for listing in &self.listings {
            if seen.insert(listing.room_type.as_str()) {
                room_types.push(listing.room_type.clone());
            }
        }
        let range = self.price_range();
        DatasetOverview {
            total_listings: self.len(),
            price_min: range.map(|(lo, _)| lo),
            price_max: range.map(|(_, hi)| hi),
            room_types,
            neighborhood_count: self
                .listings
                .iter()
                .map(|l| l.neighborhood.as_str())
                .collect::<HashSet<_>>()
                .len(),
        }
    }
}

impl<'a> IntoIterator for &'a ListingTable {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}
