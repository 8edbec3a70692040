#![no_main]

use libfuzzer_sys::fuzz_target;
use listing_dashboard::analysis::{sample, summarize};
use listing_dashboard::io::{read_csv_from_bytes, LoadOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(dataset) = read_csv_from_bytes(data, "fuzz", &LoadOptions::default()) {
        assert_eq!(dataset.report.rows_loaded, dataset.table.len());
        assert!(dataset.table.iter().all(|l| l.price.is_finite() && l.price >= 0.0));
        assert!(dataset.table.iter().all(|l| l.accommodates >= 1));
        let summary = summarize(&dataset.table);
        assert_eq!(summary.count, dataset.table.len());
        assert!(sample(&dataset.table, 10).len() <= 10);
    }
});
