#![no_main]

use libfuzzer_sys::fuzz_target;
use txi::{Tokenizer, WhitespaceTokenizer};

fuzz_target!(|data: &str| {
    let tokens = WhitespaceTokenizer.tokenize(data);

    let mut prev_end = 0;
    for token in &tokens {
        // Spans index the source exactly and never overlap or go backwards.
        assert!(token.start >= prev_end);
        assert!(token.end > token.start);
        assert_eq!(&data[token.start..token.end], token.text);
        assert!(!token.text.chars().any(char::is_whitespace));
        prev_end = token.end;
    }
});
