#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Searches terminate and stay strictly increasing
        let from: jiff::Zoned = "2024-01-01T00:00:00+00:00[UTC]".parse().unwrap();
        let results = cronplan::next_occurrences_from(s, 3, &from);
        for pair in results.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
});
