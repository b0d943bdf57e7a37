#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use txi::{CorpusConfig, CorpusSuffixIndex, WhitespaceTokenizer};

fuzz_target!(|entries: Vec<(String, String)>| {
    let docs: HashMap<String, String> = entries.into_iter().collect();
    let config = CorpusConfig {
        max_compare_tokens: Some(16),
        ..CorpusConfig::default()
    };

    let index = match CorpusSuffixIndex::build(&docs, &WhitespaceTokenizer, config) {
        Ok(index) => index,
        Err(_) => return,
    };

    assert_eq!(index.doc_count(), docs.len());

    // Whatever went in must come back out byte for byte.
    for (id, text) in &docs {
        assert_eq!(index.doc_text(id).unwrap(), text.as_str());
    }

    // Token ranges tile the stream and positions attribute correctly.
    for id in index.doc_ids() {
        let first = index.first_token_of(id).unwrap();
        let last = index.last_token_of(id).unwrap();
        assert!(first <= last);

        let first_byte = index.token_index().tokens()[first].start;
        assert_eq!(index.doc_id_at(first_byte).unwrap(), id.as_str());
    }
});
