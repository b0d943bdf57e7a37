use serde::{Deserialize, Serialize};

/// Char offset into a character sequence
pub type CharPosition = usize;

/// Token offset into a token sequence
pub type TokenPosition = usize;

/// Byte offset into original source text
pub type BytePosition = usize;

/// Configuration for building a corpus index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Separator inserted between documents. Must survive the tokenizer as a
    /// single token so it can never take part in a match.
    pub boundary_token: String,
    /// Comparison depth for the suffix sort; `None` compares to the end.
    /// Lookups for patterns longer than this bound are unreliable.
    pub max_compare_tokens: Option<usize>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            boundary_token: "###".to_string(),
            max_compare_tokens: None,
        }
    }
}

/// Summary counters reported by a built corpus index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub doc_count: usize,
    pub token_count: usize,
    pub text_len: usize,
    pub boundary_token: String,
}

/// A phrase occurrence attributed to its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    pub doc_id: String,
    /// Token offset of the first matched token within the composite sequence
    pub token_pos: TokenPosition,
    /// Byte range of the matched tokens in the composite text
    pub text_start: BytePosition,
    pub text_end: BytePosition,
}
