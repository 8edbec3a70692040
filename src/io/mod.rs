mod cache;
mod csv_io;

use std::path::Path;

use crate::error::DashboardError;
use crate::models::ListingTable;

pub use cache::TableCache;
pub use csv_io::{
    load_dataset, normalize_price, read_csv, read_csv_from_bytes, Dataset, LoadOptions,
    LoadReport, REQUIRED_COLUMNS,
};

/// Trait for reading a listing table from a file.
pub trait ListingReader {
    fn read(&self, path: &Path) -> Result<ListingTable, DashboardError>;
}

/// CSV format reader.
#[derive(Debug, Clone, Default)]
pub struct CsvFormat {
    pub options: LoadOptions,
}

impl ListingReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<ListingTable, DashboardError> {
        load_dataset(path, &self.options).map(|d| d.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_csv_trait_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "name,neighbourhood_cleansed,latitude,longitude,room_type,price,accommodates,number_of_reviews"
        )
        .unwrap();
        writeln!(file, "Loft,Pine Hills,42.66,-73.78,Private room,$65.00,2,14").unwrap();
        writeln!(file, "House,Delaware Area,42.64,-73.77,Entire home/apt,$2000.00,6,3").unwrap();
        drop(file);

        let reader: &dyn ListingReader = &CsvFormat::default();
        assert_eq!(reader.read(&path).unwrap().len(), 2);

        let bounded: &dyn ListingReader = &CsvFormat {
            options: LoadOptions {
                min_price: Some(10.0),
                max_price: Some(1000.0),
            },
        };
        let table = bounded.read(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.listings[0].name, "Loft");
    }
}
