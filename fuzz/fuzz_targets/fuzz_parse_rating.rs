#![no_main]

use assocrec::data::{parse_rating, UserProfile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(rating) = parse_rating(s) {
            assert!((0.0..=5.0).contains(&rating));
            let mut profile = UserProfile::new();
            profile.rate(1, rating).expect("parsed ratings are in range");
        }
    }
});
