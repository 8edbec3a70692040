use rand::Rng;

use crate::models::ListingTable;

/// Default cap on the number of points rendered on the map.
pub const DEFAULT_MAP_SAMPLE: usize = 500;

/// Bound the mappable listings of `table` to at most `max_size` rows.
///
/// Uses the thread-local random generator. See [`sample_with_rng`].
pub fn sample(table: &ListingTable, max_size: usize) -> ListingTable {
    sample_with_rng(table, max_size, &mut rand::rng())
}

/// Bound the mappable listings of `table` to at most `max_size` rows.
///
/// Listings without usable coordinates are dropped first. When the
/// remaining rows fit, they are returned as-is and `rng` is not touched;
/// otherwise `max_size` rows are drawn uniformly without replacement. The
/// drawn rows keep their table order.
pub fn sample_with_rng<R>(table: &ListingTable, max_size: usize, rng: &mut R) -> ListingTable
where
    R: Rng + ?Sized,
{
    let mappable = table.mappable();
    if mappable.len() <= max_size {
        return mappable;
    }

    let mut indices = rand::seq::index::sample(rng, mappable.len(), max_size).into_vec();
    indices.sort_unstable();

    let mut slots: Vec<_> = mappable.listings.into_iter().map(Some).collect();
    let listings = indices
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    ListingTable::from_listings(mappable.name, listings)
}
