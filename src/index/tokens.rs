//! Suffix index over a token sequence, with a boundary sentinel.

use std::ops::Range;

use crate::error::{IndexError, Result};
use crate::index::sort;
use crate::index::types::TokenPosition;
use crate::tokenize::Token;

/// Sorted suffix order over a token sequence.
///
/// Tokens compare by their text. The designated boundary token terminates
/// every comparison the way end-of-sequence does, so no match, group, or
/// lookup ever reads across it. Nothing is checked about the boundary here;
/// whatever text is passed acts as the sentinel.
///
/// Token spans point into the source text, so reported substrings come from
/// the original string rather than being rebuilt from token texts.
#[derive(Debug, Clone)]
pub struct TokenSuffixIndex {
    source: String,
    tokens: Vec<Token>,
    boundary: String,
    order: Vec<usize>,
    max_compare: usize,
}

impl TokenSuffixIndex {
    /// Build with unbounded comparisons.
    pub fn new(source: impl Into<String>, tokens: Vec<Token>, boundary: impl Into<String>) -> Self {
        Self::bounded(source, tokens, boundary, usize::MAX)
    }

    /// Build comparing at most `max_compare` tokens per suffix pair.
    pub fn bounded(
        source: impl Into<String>,
        tokens: Vec<Token>,
        boundary: impl Into<String>,
        max_compare: usize,
    ) -> Self {
        let source = source.into();
        let boundary = boundary.into();
        let order = sort::sort_suffix_positions(&tokens, Some(boundary.as_str()), max_compare);
        Self {
            source,
            tokens,
            boundary,
            order,
            max_compare,
        }
    }

    /// Number of suffixes (= number of tokens, boundary included).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The source text the token spans index into.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The sentinel token text.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Comparison bound this index was built with.
    pub fn max_compare(&self) -> usize {
        self.max_compare
    }

    /// Sorted suffix order, for rank-range walks within the crate.
    pub(crate) fn order(&self) -> &[usize] {
        &self.order
    }

    /// Start offset (token space) of the suffix at `rank` in sort order.
    pub fn suffix_at(&self, rank: usize) -> Result<TokenPosition> {
        self.order
            .get(rank)
            .copied()
            .ok_or(IndexError::OutOfBounds {
                position: rank,
                len: self.order.len(),
            })
    }

    /// Tokens of the suffix starting at `start`, truncated to `max_count`.
    pub fn tokens_from(&self, start: TokenPosition, max_count: usize) -> Result<&[Token]> {
        if start > self.tokens.len() {
            return Err(IndexError::OutOfBounds {
                position: start,
                len: self.tokens.len(),
            });
        }
        let end = start.saturating_add(max_count).min(self.tokens.len());
        Ok(&self.tokens[start..end])
    }

    /// Source text spanned by the first `max_count` tokens of the suffix at
    /// `start`: the slice from the first token's start byte to the last
    /// token's end byte, exactly as it appears in the source.
    pub fn substring(&self, start: TokenPosition, max_count: usize) -> Result<&str> {
        let window = self.tokens_from(start, max_count)?;
        match (window.first(), window.last()) {
            (Some(first), Some(last)) => Ok(&self.source[first.start..last.end]),
            _ => Ok(""),
        }
    }

    /// Maximal rank ranges whose suffixes all agree on their first
    /// `min_match_len` tokens. A window containing the boundary token never
    /// matches, even when token text coincidentally repeats.
    pub fn prefix_matches(&self, min_match_len: usize) -> Vec<Range<usize>> {
        sort::prefix_match_ranges(
            &self.tokens,
            &self.order,
            Some(self.boundary.as_str()),
            min_match_len,
        )
    }

    /// Rank range of suffixes whose leading tokens equal `words`. A pattern
    /// containing the boundary text matches nothing. Subject to the
    /// `max_compare` caveat on `bounded`.
    pub fn find(&self, words: &[&str]) -> Range<usize> {
        sort::pattern_bounds(&self.tokens, &self.order, Some(self.boundary.as_str()), words)
    }

    /// Sorted token offsets of every suffix starting with `words`.
    pub fn occurrences(&self, words: &[&str]) -> Vec<TokenPosition> {
        let mut positions: Vec<TokenPosition> =
            self.find(words).map(|rank| self.order[rank]).collect();
        positions.sort_unstable();
        positions
    }
}
