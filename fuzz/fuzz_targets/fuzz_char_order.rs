#![no_main]

use libfuzzer_sys::fuzz_target;
use txi::CharSuffixIndex;

const MAX_COMPARE: usize = 64;

fuzz_target!(|data: &str| {
    // Keep pathological inputs (long runs of one char) affordable.
    let text: String = data.chars().take(512).collect();
    let index = CharSuffixIndex::bounded(text.clone(), MAX_COMPARE);

    // The order must be a permutation of every suffix start.
    let mut seen = vec![false; index.len()];
    for rank in 0..index.len() {
        let pos = index.suffix_at(rank).unwrap();
        assert!(!seen[pos]);
        seen[pos] = true;
    }
    assert!(seen.iter().all(|&s| s));

    // Lookups must agree with what the order claims.
    for pattern in text.split_whitespace().take(2) {
        if pattern.chars().count() > MAX_COMPARE {
            continue;
        }
        for pos in index.occurrences(pattern) {
            let found = index.substring(pos, pattern.chars().count()).unwrap();
            assert_eq!(found, pattern);
        }
    }
});
