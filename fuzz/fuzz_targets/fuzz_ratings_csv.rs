#![no_main]

use std::path::Path;

use assocrec::data::{build_catalog_transactions, read_ratings_from, Catalog};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Same bytes as both files: exercises header handling and the join
    let ratings = read_ratings_from(data, Path::new("fuzz.csv"));
    let catalog = Catalog::read_from(data, Path::new("fuzz.csv"));

    if let (Ok(ratings), Ok(catalog)) = (ratings, catalog) {
        let transactions = build_catalog_transactions(&ratings, &catalog);
        if !transactions.is_empty() {
            let _ = assocrec::mining::mine(&transactions, 0.5);
        }
    }
});
