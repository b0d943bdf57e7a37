//! Tokenization capability consumed by the token and corpus indexes.
//!
//! Tokenization is an external concern: implementors split text into tokens
//! and report, for every token, the byte span it occupies in the source text.
//! The indexes rely on that offset provenance to map token ranges back to
//! original substrings, so spans must index the source text exactly even when
//! the token text itself is normalized.

use serde::{Deserialize, Serialize};

/// A token with its UTF-8 byte offsets in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token text, possibly normalized by the tokenizer.
    pub text: String,
    /// Byte offset (inclusive) in the source text.
    pub start: usize,
    /// Byte offset (exclusive) in the source text.
    pub end: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Splits text into tokens with byte-offset provenance.
///
/// Implementations must emit tokens in source order with non-overlapping,
/// monotonically increasing spans. The corpus index additionally requires its
/// boundary token to survive tokenization unchanged; that contract is checked
/// at corpus construction, not here.
pub trait Tokenizer {
    /// Tokenize `text`, returning tokens in source order.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Short name used in error reports.
    fn name(&self) -> &str;
}

/// Reference tokenizer: every maximal run of non-whitespace chars is a token.
///
/// Splits on Unicode whitespace and never normalizes, so any non-whitespace
/// string works as a corpus boundary token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (idx, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if let Some(token_start) = start.take() {
                    tokens.push(Token::new(&text[token_start..idx], token_start, idx));
                }
            } else if start.is_none() {
                start = Some(idx);
            }
        }

        if let Some(token_start) = start {
            tokens.push(Token::new(&text[token_start..], token_start, text.len()));
        }

        tokens
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spans_index_source_text() {
        let text = "cat  dog\tbird\n";
        let tokens = WhitespaceTokenizer.tokenize(text);

        assert_eq!(tokens.len(), 3);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
        assert_eq!(tokens[0].text, "cat");
        assert_eq!(tokens[1].text, "dog");
        assert_eq!(tokens[2].text, "bird");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(WhitespaceTokenizer.tokenize("").is_empty());
        assert!(WhitespaceTokenizer.tokenize("   \t\n").is_empty());
    }

    #[test]
    fn test_trailing_token() {
        let tokens = WhitespaceTokenizer.tokenize("one two");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "two");
        assert_eq!(tokens[1].end, 7);
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = "héllo wörld";
        let tokens = WhitespaceTokenizer.tokenize(text);

        assert_eq!(tokens.len(), 2);
        assert_eq!(&text[tokens[0].start..tokens[0].end], "héllo");
        assert_eq!(&text[tokens[1].start..tokens[1].end], "wörld");
    }
}
