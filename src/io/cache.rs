use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use tracing::{debug, info};

use super::csv_io::{load_dataset, Dataset, LoadOptions};
use crate::error::DashboardError;

struct CacheEntry {
    modified: SystemTime,
    dataset: Arc<Dataset>,
}

/// Memoizes loaded datasets keyed by file path and modification time.
///
/// Loading an unchanged file returns the cached `Arc`; a new modification
/// time triggers a reload. Failed loads are never cached.
pub struct TableCache {
    options: LoadOptions,
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl TableCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, CacheEntry>> {
        // Entries are only ever replaced whole, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Load a dataset, reusing the cached copy when the file is unchanged.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Arc<Dataset>, DashboardError> {
        let path = path.as_ref();
        let modified = std::fs::metadata(path)?.modified()?;

        if let Some(entry) = self.entries().get(path) {
            if entry.modified == modified {
                debug!(path = %path.display(), "dataset cache hit");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        info!(path = %path.display(), "loading dataset");
        let dataset = Arc::new(load_dataset(path, &self.options)?);
        self.entries().insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the cached copy of a file, if any.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        self.entries().remove(path.as_ref()).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl Default for TableCache {
    fn default() -> Self {
        Self::new(LoadOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;

    const HEADER: &str =
        "name,neighbourhood_cleansed,latitude,longitude,room_type,price,accommodates,number_of_reviews";

    fn write_listings(path: &Path, rows: &[&str]) {
        let mut file = File::create(path).unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(time).unwrap();
    }

    #[test]
    fn test_unchanged_file_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        write_listings(&path, &["Loft,A,42.6,-73.7,Private room,$80,2,3"]);

        let cache = TableCache::default();
        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_modified_file_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        write_listings(&path, &["Loft,A,42.6,-73.7,Private room,$80,2,3"]);
        set_mtime(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000));

        let cache = TableCache::default();
        let first = cache.load(&path).unwrap();
        assert_eq!(first.table.len(), 1);

        write_listings(
            &path,
            &[
                "Loft,A,42.6,-73.7,Private room,$80,2,3",
                "Flat,B,42.7,-73.8,Entire home/apt,$140,4,9",
            ],
        );
        set_mtime(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000_000));

        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.table.len(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        write_listings(&path, &["Loft,A,42.6,-73.7,Private room,free,2,3"]);

        let cache = TableCache::default();
        assert!(cache.load(&path).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TableCache::default();
        let err = cache.load(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        write_listings(&path, &["Loft,A,42.6,-73.7,Private room,$80,2,3"]);

        let cache = TableCache::default();
        let first = cache.load(&path).unwrap();
        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_applies_load_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        write_listings(
            &path,
            &[
                "Loft,A,42.6,-73.7,Private room,$5,2,3",
                "Flat,B,42.7,-73.8,Entire home/apt,$140,4,9",
            ],
        );

        let cache = TableCache::new(LoadOptions {
            min_price: Some(10.0),
            max_price: None,
        });
        let dataset = cache.load(&path).unwrap();
        assert_eq!(dataset.table.len(), 1);
        assert_eq!(dataset.report.out_of_range, 1);
    }
}
