use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DashboardError;
use crate::models::{
    valid_latitude, valid_longitude, Listing, ListingTable, UNKNOWN_CATEGORY,
};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "price",
    "latitude",
    "longitude",
    "room_type",
    "neighbourhood_cleansed",
    "number_of_reviews",
    "name",
    "accommodates",
];

const CURRENCY_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', '₹'];

/// Raw CSV row. Every field is read as text so a bad cell only affects its row.
#[derive(Debug, Deserialize)]
struct ListingRow {
    name: Option<String>,
    price: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    room_type: Option<String>,
    #[serde(rename = "neighbourhood_cleansed")]
    neighborhood: Option<String>,
    number_of_reviews: Option<String>,
    accommodates: Option<String>,
}

/// Options applied while loading a listings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Listings priced below this are excluded as outliers
    pub min_price: Option<f64>,
    /// Listings priced above this are excluded as outliers
    pub max_price: Option<f64>,
}

impl LoadOptions {
    fn accepts(&self, price: f64) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

/// Row accounting for a single load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Data rows encountered after the header
    pub rows_read: usize,
    /// Rows that made it into the table
    pub rows_loaded: usize,
    /// Rows dropped because the price could not be normalized
    pub invalid_price: usize,
    /// Rows dropped by the configured price bounds
    pub out_of_range: usize,
    /// Rows the CSV reader could not decode
    pub malformed: usize,
}

impl LoadReport {
    /// Total rows excluded from the table.
    pub fn skipped(&self) -> usize {
        self.invalid_price + self.out_of_range + self.malformed
    }
}

/// A loaded listing table together with its load report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub table: ListingTable,
    pub report: LoadReport,
}

/// Normalize a raw price cell into a number.
///
/// Strips one leading currency symbol and any `,` grouping separators.
/// Returns `None` for empty, non-numeric, non-finite or negative input.
///
/// # Examples
///
/// ```
/// use listing_dashboard::io::normalize_price;
///
/// assert_eq!(normalize_price("$1,234.50"), Some(1234.5));
/// assert_eq!(normalize_price("1200"), Some(1200.0));
/// assert_eq!(normalize_price("free"), None);
/// ```
pub fn normalize_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let unsigned = trimmed
        .strip_prefix(|c: char| CURRENCY_SYMBOLS.contains(&c))
        .unwrap_or(trimmed)
        .trim_start();
    let digits: String = unsigned.chars().filter(|&c| c != ',').collect();
    if digits.is_empty() {
        return None;
    }
    let value: f64 = digits.parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

fn clean_category(raw: Option<String>) -> String {
    match raw.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => UNKNOWN_CATEGORY.to_string(),
    }
}

fn parse_coordinate(raw: Option<&str>, valid: fn(f64) -> bool) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    valid(value).then_some(value)
}

fn parse_count(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse().ok()
}

fn check_headers<R: Read>(rdr: &mut csv::Reader<R>) -> Result<(), DashboardError> {
    let headers = rdr.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(DashboardError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    name: &str,
    options: &LoadOptions,
) -> Result<Dataset, DashboardError> {
    check_headers(rdr)?;

    let mut report = LoadReport::default();
    let mut listings = Vec::new();

    for (row_index, result) in rdr.deserialize::<ListingRow>().enumerate() {
        report.rows_read += 1;

        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(row_index, error = %e, "skipping undecodable row");
                report.malformed += 1;
                continue;
            }
        };

        let Some(price) = row.price.as_deref().and_then(normalize_price) else {
            debug!(row_index, raw = ?row.price, "skipping row with unparsable price");
            report.invalid_price += 1;
            continue;
        };

        if !options.accepts(price) {
            report.out_of_range += 1;
            continue;
        }

        listings.push(Listing {
            name: row.name.as_deref().map(str::trim).unwrap_or_default().to_string(),
            price,
            latitude: parse_coordinate(row.latitude.as_deref(), valid_latitude),
            longitude: parse_coordinate(row.longitude.as_deref(), valid_longitude),
            room_type: clean_category(row.room_type),
            neighborhood: clean_category(row.neighborhood),
            number_of_reviews: parse_count(row.number_of_reviews.as_deref()).unwrap_or(0),
            // every listing hosts at least one guest
            accommodates: parse_count(row.accommodates.as_deref())
                .filter(|&n| n > 0)
                .unwrap_or(1),
        });
    }

    report.rows_loaded = listings.len();

    if listings.is_empty() {
        return Err(DashboardError::EmptyDataset(format!(
            "no listings with a parsable price in '{name}' ({} rows read)",
            report.rows_read
        )));
    }

    info!(
        dataset = name,
        rows_read = report.rows_read,
        rows_loaded = report.rows_loaded,
        "loaded listings"
    );
    if report.skipped() > 0 {
        warn!(
            dataset = name,
            invalid_price = report.invalid_price,
            out_of_range = report.out_of_range,
            malformed = report.malformed,
            "excluded {} rows from analysis",
            report.skipped()
        );
    }

    Ok(Dataset {
        table: ListingTable::from_listings(name, listings),
        report,
    })
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All);
    builder
}

/// Read a listings CSV file together with its load report.
pub fn load_dataset(
    path: impl AsRef<Path>,
    options: &LoadOptions,
) -> Result<Dataset, DashboardError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut rdr = reader_builder().from_reader(file);

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    parse_csv_records(&mut rdr, &name, options)
}

/// Read a listings CSV file with default options.
pub fn read_csv(path: impl AsRef<Path>) -> Result<ListingTable, DashboardError> {
    load_dataset(path, &LoadOptions::default()).map(|d| d.table)
}

/// Read listings from in-memory CSV bytes.
pub fn read_csv_from_bytes(
    data: &[u8],
    name: &str,
    options: &LoadOptions,
) -> Result<Dataset, DashboardError> {
    let mut rdr = reader_builder().from_reader(data);
    parse_csv_records(&mut rdr, name, options)
}
