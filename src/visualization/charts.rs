use colored::{ColoredString, Colorize};

use crate::analysis::{CategoryPrice, MapInsights, PriceReviewSeries, PriceTier};
use crate::models::ListingTable;

use super::tables::format_money;

/// Map grid size in character cells.
pub const MAP_WIDTH: usize = 60;
pub const MAP_HEIGHT: usize = 20;

/// Price vs reviews grid size in character cells.
pub const SCATTER_WIDTH: usize = 60;
pub const SCATTER_HEIGHT: usize = 16;

/// Listings for this many guests or more get the upper-case marker.
const LARGE_LISTING: u32 = 4;

/// (small, large) marker per room type, cycled in sorted room-type order.
const ROOM_MARKERS: [(char, char); 4] = [('o', 'O'), ('^', 'A'), ('x', 'X'), ('+', '#')];

/// Format a bar chart of mean price per room type as a string.
pub fn format_room_type_chart(prices: &[CategoryPrice]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Average Price by Room Type".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if prices.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_price = prices.iter().map(|c| c.mean_price).fold(0.0f64, f64::max);
    let label_width = prices
        .iter()
        .map(|c| c.category.chars().count())
        .max()
        .unwrap_or(0);
    let bar_width = 40;

    for entry in prices {
        let bar_len = if max_price > 0.0 {
            ((entry.mean_price / max_price) * bar_width as f64).round() as usize
        } else {
            0
        };
        let bar = "\u{2588}".repeat(bar_len);
        output.push_str(&format!(
            "  {:<label_width$}  {:>6}  {}\n",
            entry.category,
            format_money(Some(entry.mean_price)),
            bar.green()
        ));
    }

    output.push('\n');
    output
}

/// Print the room type bar chart.
pub fn print_room_type_chart(prices: &[CategoryPrice]) {
    print!("{}", format_room_type_chart(prices));
}

/// Room types present in the series, sorted.
fn series_room_types(series: &PriceReviewSeries) -> Vec<&str> {
    let mut types: Vec<&str> = series.points.iter().map(|p| p.room_type.as_str()).collect();
    types.sort_unstable();
    types.dedup();
    types
}

/// Place each point of the series into a `width` x `height` grid of point indices.
///
/// Columns run from the cheapest to the most expensive listing, row 0 holds
/// the most reviewed. A cell holding several points keeps the one for the
/// most guests.
pub fn scatter_grid(series: &PriceReviewSeries, width: usize, height: usize) -> Vec<Vec<Option<usize>>> {
    let mut grid: Vec<Vec<Option<usize>>> = vec![vec![None; width]; height];
    if series.is_empty() || width == 0 || height == 0 {
        return grid;
    }

    let (min_price, max_price) = series
        .points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        });
    let price_span = max_price - min_price;
    let max_reviews = f64::from(series.max_reviews());

    for (i, point) in series.points.iter().enumerate() {
        let col = if price_span > 0.0 {
            (((point.price - min_price) / price_span) * (width - 1) as f64).round() as usize
        } else {
            width / 2
        };
        let row = if max_reviews > 0.0 {
            (((max_reviews - f64::from(point.number_of_reviews)) / max_reviews) * (height - 1) as f64)
                .round() as usize
        } else {
            height - 1
        };
        let cell = &mut grid[row.min(height - 1)][col.min(width - 1)];
        if cell.map_or(true, |j| point.accommodates > series.points[j].accommodates) {
            *cell = Some(i);
        }
    }
    grid
}

/// Format a scatter of price against number of reviews as a string.
pub fn format_review_scatter(series: &PriceReviewSeries) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Price vs Number of Reviews".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(SCATTER_WIDTH + 12)));

    if series.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let room_types = series_room_types(series);
    let marker_for = |index: usize| -> char {
        let point = &series.points[index];
        let slot = room_types
            .iter()
            .position(|t| *t == point.room_type)
            .unwrap_or(0);
        let (small, large) = ROOM_MARKERS[slot % ROOM_MARKERS.len()];
        if point.accommodates >= LARGE_LISTING {
            large
        } else {
            small
        }
    };

    let grid = scatter_grid(series, SCATTER_WIDTH, SCATTER_HEIGHT);
    let max_reviews = series.max_reviews();
    for (r, row) in grid.iter().enumerate() {
        let label = if r == 0 {
            max_reviews.to_string()
        } else if r == grid.len() - 1 {
            "0".to_string()
        } else {
            String::new()
        };
        let line: String = row
            .iter()
            .map(|cell| cell.map_or(' ', |i| marker_for(i)))
            .collect();
        output.push_str(&format!("  {label:>7} |{line}\n"));
    }
    output.push_str(&format!("  {:>7} +{}\n", "", "-".repeat(SCATTER_WIDTH)));

    let (min_price, max_price) = series
        .points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        });
    let low = format_money(Some(min_price));
    let high = format_money(Some(max_price));
    let gap = SCATTER_WIDTH.saturating_sub(low.len() + high.len());
    output.push_str(&format!("  {:>7}  {low}{}{high}\n", "", " ".repeat(gap)));
    output.push_str(&format!("  {:>7}  {}\n", "", "Price per night (y: reviews)".dimmed()));

    output.push_str("  Legend: ");
    let legend: Vec<String> = room_types
        .iter()
        .enumerate()
        .map(|(slot, t)| {
            let (small, large) = ROOM_MARKERS[slot % ROOM_MARKERS.len()];
            format!("{small}/{large} {t}")
        })
        .collect();
    output.push_str(&legend.join("  "));
    output.push('\n');
    output.push_str(&format!(
        "  Upper-case markers host {LARGE_LISTING}+ guests.\n"
    ));

    match series.correlation {
        Some(r) => output.push_str(&format!("  Price/reviews correlation: {r:+.2}\n")),
        None => output.push_str("  Price/reviews correlation: n/a\n"),
    }
    output
}

/// Print the price vs reviews scatter.
pub fn print_review_scatter(series: &PriceReviewSeries) {
    print!("{}", format_review_scatter(series));
}

fn tier_marker(tier: PriceTier) -> ColoredString {
    match tier {
        PriceTier::Budget => "o".green(),
        PriceTier::Medium => "o".yellow(),
        PriceTier::Premium => "O".bright_red(),
        PriceTier::Luxury => "@".red(),
    }
}

/// Place each mappable listing into a `width` x `height` grid.
///
/// Row 0 is the northern edge. A cell holding several listings keeps the
/// most expensive one.
pub fn plot_grid(sample: &ListingTable, width: usize, height: usize) -> Vec<Vec<Option<PriceTier>>> {
    let Some(insights) = MapInsights::from_table(sample).filter(|_| width > 0 && height > 0)
    else {
        return vec![vec![None; width]; height];
    };
    let mut grid: Vec<Vec<Option<(f64, PriceTier)>>> = vec![vec![None; width]; height];

    let lat_span = insights.latitude_extent();
    let lon_span = insights.longitude_extent();

    for listing in sample {
        let Some((lat, lon)) = listing.coordinates() else {
            continue;
        };
        let col = if lon_span > 0.0 {
            (((lon - insights.min_longitude) / lon_span) * (width - 1) as f64).round() as usize
        } else {
            width / 2
        };
        let row = if lat_span > 0.0 {
            (((insights.max_latitude - lat) / lat_span) * (height - 1) as f64).round() as usize
        } else {
            height / 2
        };
        let cell = &mut grid[row.min(height - 1)][col.min(width - 1)];
        if cell.map_or(true, |(price, _)| listing.price > price) {
            *cell = Some((listing.price, PriceTier::from_price(listing.price)));
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().map(|c| c.map(|(_, tier)| tier)).collect())
        .collect()
}

/// Format a character-cell map of the sampled listings with a legend and insights.
pub fn format_listing_map(sample: &ListingTable, total_mappable: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Geographic Distribution".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(MAP_WIDTH + 4)));

    let Some(insights) = MapInsights::from_table(sample) else {
        output.push_str(&format!(
            "  {}\n",
            "No listings with coordinates match the current filters.".yellow()
        ));
        return output;
    };

    let grid = plot_grid(sample, MAP_WIDTH, MAP_HEIGHT);
    output.push_str(&format!("  +{}+\n", "-".repeat(MAP_WIDTH)));
    for row in &grid {
        output.push_str("  |");
        for cell in row {
            match cell {
                Some(tier) => output.push_str(&tier_marker(*tier).to_string()),
                None => output.push(' '),
            }
        }
        output.push_str("|\n");
    }
    output.push_str(&format!("  +{}+\n", "-".repeat(MAP_WIDTH)));

    output.push_str("  Legend: ");
    let legend: Vec<String> = PriceTier::ALL
        .iter()
        .map(|t| format!("{} {} ({})", tier_marker(*t), t, t.range_label()))
        .collect();
    output.push_str(&legend.join("  "));
    output.push('\n');

    if sample.len() < total_mappable {
        output.push_str(&format!(
            "  {}\n",
            format!(
                "Showing a sample of {} listings out of {} for map performance.",
                sample.len(),
                total_mappable
            )
            .dimmed()
        ));
    }

    output.push_str(&format_map_insights(&insights));
    output
}

/// Format geographic insights as a string.
pub fn format_map_insights(insights: &MapInsights) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Geographic Insights".bold().green()));
    output.push_str(&format!(
        "  Center Point:   {:.4}, {:.4}\n",
        insights.center_latitude, insights.center_longitude
    ));
    output.push_str(&format!(
        "  Coverage Area:  {:.3} x {:.3} degrees\n",
        insights.latitude_extent(),
        insights.longitude_extent()
    ));
    output.push_str(&format!("  Northernmost:   {}\n", insights.northernmost));
    output.push_str(&format!("  Southernmost:   {}\n", insights.southernmost));
    output.push_str(&format!(
        "  Prices:         min {}  max {}  avg {}\n",
        format_money(Some(insights.min_price)),
        format_money(Some(insights.max_price)),
        format_money(Some(insights.mean_price))
    ));
    output
}

/// Print the listing map.
pub fn print_listing_map(sample: &ListingTable, total_mappable: usize) {
    print!("{}", format_listing_map(sample, total_mappable));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;

    fn listing(price: f64, neighborhood: &str, lat: f64, lon: f64) -> Listing {
        Listing {
            name: "x".to_string(),
            price,
            latitude: Some(lat),
            longitude: Some(lon),
            room_type: "Private room".to_string(),
            neighborhood: neighborhood.to_string(),
            number_of_reviews: 0,
            accommodates: 1,
        }
    }

    fn map_table() -> ListingTable {
        ListingTable::from_listings(
            "map",
            vec![
                listing(50.0, "North", 42.70, -73.80),
                listing(300.0, "South", 42.60, -73.70),
                listing(120.0, "Middle", 42.65, -73.75),
            ],
        )
    }

    #[test]
    fn test_room_type_chart_empty() {
        let output = format_room_type_chart(&[]);
        assert!(output.contains("Average Price by Room Type"));
        assert!(output.contains("No data available."));
    }

    #[test]
    fn test_room_type_chart_values() {
        let prices = vec![
            CategoryPrice {
                category: "Entire home/apt".to_string(),
                mean_price: 180.0,
                count: 4,
            },
            CategoryPrice {
                category: "Private room".to_string(),
                mean_price: 60.0,
                count: 2,
            },
        ];
        let output = format_room_type_chart(&prices);
        assert!(output.contains("Entire home/apt"));
        assert!(output.contains("$180"));
        assert!(output.contains("$60"));
    }

    #[test]
    fn test_plot_grid_corners() {
        let grid = plot_grid(&map_table(), 11, 11);
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0].len(), 11);
        // north-west and south-east corners
        assert_eq!(grid[0][0], Some(PriceTier::Budget));
        assert_eq!(grid[10][10], Some(PriceTier::Luxury));
        assert_eq!(grid[5][5], Some(PriceTier::Medium));
        let filled = grid.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(filled, 3);
    }

    #[test]
    fn test_plot_grid_keeps_most_expensive_in_cell() {
        let table = ListingTable::from_listings(
            "stack",
            vec![
                listing(50.0, "A", 42.6, -73.7),
                listing(400.0, "A", 42.6, -73.7),
            ],
        );
        let grid = plot_grid(&table, 5, 5);
        assert_eq!(grid[2][2], Some(PriceTier::Luxury));
    }

    #[test]
    fn test_plot_grid_empty() {
        let grid = plot_grid(&ListingTable::new("empty"), 4, 3);
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_format_listing_map() {
        let output = format_listing_map(&map_table(), 3);
        assert!(output.contains("Geographic Distribution"));
        assert!(output.contains("Legend"));
        assert!(output.contains("Northernmost:   North"));
        assert!(output.contains("Southernmost:   South"));
        assert!(!output.contains("Showing a sample"));
    }

    #[test]
    fn test_format_listing_map_sampled_notice() {
        let output = format_listing_map(&map_table(), 900);
        assert!(output.contains("Showing a sample of 3 listings out of 900"));
    }

    fn series(points: &[(f64, u32, &str, u32)]) -> PriceReviewSeries {
        let listings = points
            .iter()
            .map(|&(price, reviews, room_type, guests)| Listing {
                number_of_reviews: reviews,
                room_type: room_type.to_string(),
                accommodates: guests,
                ..listing(price, "A", 42.6, -73.7)
            })
            .collect();
        PriceReviewSeries::from_table(&ListingTable::from_listings("s", listings))
    }

    #[test]
    fn test_scatter_grid_corners() {
        let s = series(&[
            (50.0, 0, "Private room", 1),
            (250.0, 40, "Entire home/apt", 6),
            (150.0, 20, "Private room", 2),
        ]);
        let grid = scatter_grid(&s, 11, 5);
        // cheapest with no reviews: bottom-left; priciest and most reviewed: top-right
        assert_eq!(grid[4][0], Some(0));
        assert_eq!(grid[0][10], Some(1));
        assert_eq!(grid[2][5], Some(2));
        assert_eq!(grid.iter().flatten().filter(|c| c.is_some()).count(), 3);
    }

    #[test]
    fn test_scatter_grid_keeps_largest_listing() {
        let s = series(&[
            (80.0, 5, "Private room", 2),
            (80.0, 5, "Private room", 5),
        ]);
        let grid = scatter_grid(&s, 5, 5);
        assert_eq!(grid[0][2], Some(1));
    }

    #[test]
    fn test_format_review_scatter() {
        let s = series(&[
            (50.0, 30, "Private room", 1),
            (120.0, 10, "Entire home/apt", 6),
        ]);
        let output = format_review_scatter(&s);
        assert!(output.contains("Price vs Number of Reviews"));
        assert!(output.contains("o/O Entire home/apt"));
        assert!(output.contains("^/A Private room"));
        assert!(output.contains("$50"));
        assert!(output.contains("$120"));
        // the six-guest home is drawn upper-case in the rightmost column
        assert!(output
            .lines()
            .any(|l| l.contains('|') && l.ends_with('O')));
        assert!(output.lines().any(|l| l.contains("|^")));
        assert!(output.contains("correlation: -1.00"));
    }

    #[test]
    fn test_format_review_scatter_empty() {
        let output = format_review_scatter(&PriceReviewSeries::default());
        assert!(output.contains("No data available."));
    }

    #[test]
    fn test_format_listing_map_empty() {
        let output = format_listing_map(&ListingTable::new("empty"), 0);
        assert!(output.contains("No listings with coordinates"));
    }
}
