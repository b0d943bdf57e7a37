//! Suffix index over a whole document collection.
//!
//! Documents are concatenated into one composite text, separated by a
//! boundary token that the suffix machinery treats as end-of-sequence, so a
//! single token-suffix index serves phrase lookups across every document
//! while matches never straddle two of them.

use std::collections::HashMap;

use roaring::RoaringBitmap;
use tracing::debug;

use crate::error::{IndexError, Result};
use crate::index::sort;
use crate::index::tokens::TokenSuffixIndex;
use crate::index::types::{BytePosition, CorpusConfig, CorpusStats, PhraseMatch, TokenPosition};
use crate::tokenize::Tokenizer;

/// Token-suffix index over a document collection.
///
/// Layout of the composite text, one segment per document in sorted-id
/// order: `text + " " + boundary + " "`. Start-offset tables (token space
/// and byte space) are strictly increasing, so position-to-document lookups
/// are a binary search.
#[derive(Debug, Clone)]
pub struct CorpusSuffixIndex {
    doc_ids: Vec<String>,
    doc_token_starts: Vec<TokenPosition>,
    doc_text_starts: Vec<BytePosition>,
    index: TokenSuffixIndex,
    config: CorpusConfig,
}

impl CorpusSuffixIndex {
    /// Build an index over `docs` (id -> text).
    ///
    /// Fails with `InvalidBoundary` when the tokenizer does not return the
    /// configured boundary as exactly one token from `" boundary "`; a
    /// boundary the tokenizer splits, merges, or rewrites could not act as a
    /// separator. The check runs before any document is touched.
    pub fn build(
        docs: &HashMap<String, String>,
        tokenizer: &dyn Tokenizer,
        config: CorpusConfig,
    ) -> Result<Self> {
        let probe = format!(" {} ", config.boundary_token);
        let probe_tokens = tokenizer.tokenize(&probe);
        if probe_tokens.len() != 1 || probe_tokens[0].text != config.boundary_token {
            return Err(IndexError::InvalidBoundary {
                tokenizer: tokenizer.name().to_string(),
                boundary: config.boundary_token.clone(),
                tokenized: probe_tokens.into_iter().map(|t| t.text).collect(),
            });
        }

        // Sorted-id order fixes concatenation and makes id lookups a binary
        // search; insertion order is never observable.
        let mut entries: Vec<(&String, &String)> = docs.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut doc_token_starts = Vec::with_capacity(entries.len());
        let mut running = 0;
        for (_, text) in &entries {
            doc_token_starts.push(running);
            // +1 for the trailing boundary token.
            running += tokenizer.tokenize(text).len() + 1;
        }

        let segment_overhead = config.boundary_token.len() + 2;
        let capacity = entries
            .iter()
            .map(|(_, text)| text.len() + segment_overhead)
            .sum();
        let mut composite = String::with_capacity(capacity);
        let mut doc_text_starts = Vec::with_capacity(entries.len());
        for (_, text) in &entries {
            doc_text_starts.push(composite.len());
            composite.push_str(text);
            composite.push(' ');
            composite.push_str(&config.boundary_token);
            composite.push(' ');
        }

        let doc_ids: Vec<String> = entries.into_iter().map(|(id, _)| id.clone()).collect();
        let composite_tokens = tokenizer.tokenize(&composite);
        debug!(
            "indexing corpus: {} documents, {} tokens, {} bytes",
            doc_ids.len(),
            composite_tokens.len(),
            composite.len()
        );

        let max_compare = config.max_compare_tokens.unwrap_or(usize::MAX);
        let index = TokenSuffixIndex::bounded(
            composite,
            composite_tokens,
            config.boundary_token.clone(),
            max_compare,
        );

        Ok(Self {
            doc_ids,
            doc_token_starts,
            doc_text_starts,
            index,
            config,
        })
    }

    pub fn doc_count(&self) -> usize {
        self.doc_ids.len()
    }

    /// Document ids in sorted order.
    pub fn doc_ids(&self) -> &[String] {
        &self.doc_ids
    }

    /// The composite text all byte positions refer to.
    pub fn text(&self) -> &str {
        self.index.source()
    }

    /// The underlying token-suffix index over the composite text.
    pub fn token_index(&self) -> &TokenSuffixIndex {
        &self.index
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Id of the document owning byte position `text_pos` in the composite
    /// text. `text_pos == text().len()` resolves to the last document.
    pub fn doc_id_at(&self, text_pos: BytePosition) -> Result<&str> {
        let out_of_bounds = IndexError::OutOfBounds {
            position: text_pos,
            len: self.text().len(),
        };
        if text_pos > self.text().len() {
            return Err(out_of_bounds);
        }
        let i = sort::largest_at_most(&self.doc_text_starts, text_pos).ok_or(out_of_bounds)?;
        Ok(&self.doc_ids[i])
    }

    /// The exact text `id` was registered with.
    pub fn doc_text(&self, id: &str) -> Result<&str> {
        let i = self.doc_index(id)?;
        let segment_end = match self.doc_text_starts.get(i + 1) {
            Some(&next) => next,
            None => self.text().len(),
        };
        // Strip the trailing ` boundary ` the segment layout appended.
        let text_end = segment_end - (self.config.boundary_token.len() + 2);
        Ok(&self.text()[self.doc_text_starts[i]..text_end])
    }

    /// Token offset of the first token of `id` in the composite sequence.
    pub fn first_token_of(&self, id: &str) -> Result<TokenPosition> {
        let i = self.doc_index(id)?;
        Ok(self.doc_token_starts[i])
    }

    /// Token offset of the last token of `id`, which is always its trailing
    /// boundary token.
    pub fn last_token_of(&self, id: &str) -> Result<TokenPosition> {
        let i = self.doc_index(id)?;
        match self.doc_token_starts.get(i + 1) {
            Some(&next) => Ok(next - 1),
            None => Ok(self.index.len() - 1),
        }
    }

    /// Occurrences of the phrase `words`, at most `limit` of them, each
    /// attributed to its document and carrying the matched byte span in the
    /// composite text. Phrases never match across a document boundary.
    pub fn phrase_occurrences(&self, words: &[&str], limit: usize) -> Vec<PhraseMatch> {
        let found = self.index.find(words);
        let range = found.start..found.end.min(found.start.saturating_add(limit));
        let mut matches = Vec::with_capacity(range.len());

        for &token_pos in &self.index.order()[range] {
            let Some(i) = sort::largest_at_most(&self.doc_token_starts, token_pos) else {
                continue;
            };
            let window = &self.index.tokens()[token_pos..token_pos + words.len()];
            matches.push(PhraseMatch {
                doc_id: self.doc_ids[i].clone(),
                token_pos,
                text_start: window[0].start,
                text_end: window[words.len() - 1].end,
            });
        }

        matches
    }

    /// Positions into `doc_ids()` of every document containing the phrase.
    pub fn matching_doc_indexes(&self, words: &[&str]) -> RoaringBitmap {
        let mut docs = RoaringBitmap::new();
        for &token_pos in &self.index.order()[self.index.find(words)] {
            if let Some(i) = sort::largest_at_most(&self.doc_token_starts, token_pos) {
                docs.insert(i as u32);
            }
        }
        docs
    }

    /// Summary counters for this index.
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            doc_count: self.doc_ids.len(),
            token_count: self.index.len(),
            text_len: self.text().len(),
            boundary_token: self.config.boundary_token.clone(),
        }
    }

    fn doc_index(&self, id: &str) -> Result<usize> {
        self.doc_ids
            .binary_search_by(|probe| probe.as_str().cmp(id))
            .map_err(|_| IndexError::UnknownDocument { id: id.to_string() })
    }
}
