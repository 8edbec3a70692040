use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{CategoryPrice, DashboardView, FilterOptions, PriceStatistics, SummaryStats};
use crate::io::LoadReport;
use crate::models::{DatasetOverview, Listing};

/// Longest listing name shown before truncation.
const NAME_WIDTH: usize = 40;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn heading(title: &str, rule: usize) -> String {
    format!("\n{}\n{}\n", title.bold().green(), "=".repeat(rule))
}

pub(crate) fn format_money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${v:.0}"),
        None => "n/a".to_string(),
    }
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let short: String = name.chars().take(NAME_WIDTH).collect();
        format!("{short}...")
    } else {
        name.to_string()
    }
}

/// Format the headline metrics of a dashboard view as a string.
pub fn format_summary_metrics(view: &DashboardView) -> String {
    let mut output = heading("Dashboard Summary", 50);

    if view.is_empty() {
        output.push_str(&format!(
            "  {}\n",
            "No listings match the current filters. Adjust your criteria.".yellow()
        ));
        return output;
    }

    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Total Listings"),
        Cell::new(format!("{} of {}", view.summary.count, view.total_listings)),
    ]);
    table.add_row(vec![
        Cell::new("Average Price"),
        Cell::new(format_money(view.summary.mean_price)),
    ]);
    table.add_row(vec![
        Cell::new("Average Reviews"),
        Cell::new(
            view.summary
                .mean_reviews
                .map(|r| format!("{r:.1}"))
                .unwrap_or_else(|| "n/a".to_string()),
        ),
    ]);
    table.add_row(vec![
        Cell::new("Neighborhoods"),
        Cell::new(view.summary.neighborhood_count),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the headline metrics of a dashboard view.
pub fn print_summary_metrics(view: &DashboardView) {
    print!("{}", format_summary_metrics(view));
}

/// Format per (neighborhood, room type) statistics as a string.
pub fn format_group_table(summary: &SummaryStats) -> String {
    let mut output = heading("Neighborhood x Room Type", 50);

    if summary.groups.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let mut table = new_table();
    table.set_header(vec![
        "Neighborhood",
        "Room Type",
        "Listings",
        "Mean Price",
        "Mean Reviews",
    ]);
    for group in &summary.groups {
        table.add_row(vec![
            Cell::new(&group.neighborhood),
            Cell::new(&group.room_type),
            Cell::new(group.count),
            Cell::new(format_money(Some(group.mean_price))),
            Cell::new(format!("{:.1}", group.mean_reviews)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print grouped statistics.
pub fn print_group_table(summary: &SummaryStats) {
    print!("{}", format_group_table(summary));
}

/// Format the most expensive neighborhoods as a ranked list.
pub fn format_top_neighborhoods(top: &[CategoryPrice]) -> String {
    let mut output = heading("Most Expensive Neighborhoods", 50);
    if top.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }
    for (i, entry) in top.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {}: {} ({} listings)\n",
            i + 1,
            entry.category,
            format_money(Some(entry.mean_price)),
            entry.count
        ));
    }
    output
}

/// Print the most expensive neighborhoods.
pub fn print_top_neighborhoods(top: &[CategoryPrice]) {
    print!("{}", format_top_neighborhoods(top));
}

/// Format the most-reviewed listings.
pub fn format_most_reviewed(listings: &[Listing]) -> String {
    let mut output = heading("Most Reviewed Listings", 50);
    if listings.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }
    for listing in listings {
        output.push_str(&format!(
            "  - {} - {} reviews (${:.2})\n",
            truncate_name(&listing.name),
            listing.number_of_reviews,
            listing.price
        ));
    }
    output
}

/// Print the most-reviewed listings.
pub fn print_most_reviewed(listings: &[Listing]) {
    print!("{}", format_most_reviewed(listings));
}

/// Format price statistics with the confidence interval of the mean.
pub fn format_price_statistics(stats: &PriceStatistics) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Price Statistics".bold().green()));
    output.push_str(&format!(
        "{}\n",
        format!(
            "Confidence Level: {:.0}% | Sample Size: {} listings",
            stats.mean.confidence_level * 100.0,
            stats.count
        )
        .dimmed()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = new_table();
    table.set_header(vec!["Min", "Median", "Max", "Std Dev", "Mean", "Lower CI", "Upper CI"]);
    table.add_row(vec![
        Cell::new(format!("{:.2}", stats.min)),
        Cell::new(format!("{:.2}", stats.median)),
        Cell::new(format!("{:.2}", stats.max)),
        Cell::new(format!("{:.2}", stats.std_dev)),
        Cell::new(format!("{:.2}", stats.mean.mean)),
        Cell::new(format!("{:.2}", stats.mean.lower)),
        Cell::new(format!("{:.2}", stats.mean.upper)),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print price statistics.
pub fn print_price_statistics(stats: &PriceStatistics) {
    print!("{}", format_price_statistics(stats));
}

/// Format the dataset overview and load report.
pub fn format_dataset_overview(name: &str, overview: &DatasetOverview, report: &LoadReport) -> String {
    let mut output = heading("Data Summary", 40);
    output.push_str(&format!("  Dataset:        {name}\n"));
    output.push_str(&format!("  Listings:       {}\n", overview.total_listings));
    output.push_str(&format!(
        "  Price range:    {} - {}\n",
        format_money(overview.price_min),
        format_money(overview.price_max)
    ));
    output.push_str(&format!("  Room types:     {}\n", overview.room_types.join(", ")));
    output.push_str(&format!("  Neighborhoods:  {}\n", overview.neighborhood_count));
    output.push_str(&format!("  Rows read:      {}\n", report.rows_read));
    if report.skipped() > 0 {
        output.push_str(&format!(
            "  {}\n",
            format!(
                "Excluded {} rows ({} invalid price, {} out of range, {} malformed)",
                report.skipped(),
                report.invalid_price,
                report.out_of_range,
                report.malformed
            )
            .yellow()
        ));
    }
    output
}

/// Print the dataset overview and load report.
pub fn print_dataset_overview(name: &str, overview: &DatasetOverview, report: &LoadReport) {
    print!("{}", format_dataset_overview(name, overview, report));
}

/// Format the selectable filter values.
pub fn format_filter_options(options: &FilterOptions) -> String {
    let mut output = heading("Filter Options", 40);

    let mut table = new_table();
    table.set_header(vec!["Neighborhoods", "Room Types"]);
    let rows = options.neighborhoods.len().max(options.room_types.len());
    for i in 0..rows {
        table.add_row(vec![
            Cell::new(options.neighborhoods.get(i).map(String::as_str).unwrap_or("")),
            Cell::new(options.room_types.get(i).map(String::as_str).unwrap_or("")),
        ]);
    }
    output.push_str(&format!("{table}\n"));
    output.push_str(&format!(
        "  Price range: {} - {}\n",
        format_money(Some(options.price_floor)),
        format_money(Some(options.price_ceiling))
    ));
    output
}

/// Print the selectable filter values.
pub fn print_filter_options(options: &FilterOptions) {
    print!("{}", format_filter_options(options));
}
