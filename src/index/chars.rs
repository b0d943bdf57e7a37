//! Suffix index over the characters of a single string.

use std::ops::Range;

use crate::error::{IndexError, Result};
use crate::index::sort;
use crate::index::types::CharPosition;

/// Sorted suffix order over the characters of one text.
///
/// Positions are char offsets, not byte offsets, so multi-byte text behaves
/// like any other sequence. The original string is kept for reporting.
#[derive(Debug, Clone)]
pub struct CharSuffixIndex {
    text: String,
    chars: Vec<char>,
    order: Vec<usize>,
    max_compare: usize,
}

impl CharSuffixIndex {
    /// Build with unbounded comparisons.
    pub fn new(text: impl Into<String>) -> Self {
        Self::bounded(text, usize::MAX)
    }

    /// Build comparing at most `max_compare` chars per suffix pair.
    ///
    /// Suffixes identical up to the bound sort as equal, so lookups for
    /// patterns longer than `max_compare` are unreliable.
    pub fn bounded(text: impl Into<String>, max_compare: usize) -> Self {
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();
        let order = sort::sort_suffix_positions(&chars, None, max_compare);
        Self {
            text,
            chars,
            order,
            max_compare,
        }
    }

    /// Number of suffixes (= number of chars).
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The indexed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Comparison bound this index was built with.
    pub fn max_compare(&self) -> usize {
        self.max_compare
    }

    /// Start offset (char space) of the suffix at `rank` in sort order.
    pub fn suffix_at(&self, rank: usize) -> Result<CharPosition> {
        self.order
            .get(rank)
            .copied()
            .ok_or(IndexError::OutOfBounds {
                position: rank,
                len: self.order.len(),
            })
    }

    /// Substring starting at char offset `start`, truncated to `max_len`
    /// chars or the end of the text, whichever comes first.
    ///
    /// `start == len` yields the empty string; `start + max_len` may exceed
    /// `usize::MAX` without overflowing.
    pub fn substring(&self, start: CharPosition, max_len: usize) -> Result<String> {
        if start > self.chars.len() {
            return Err(IndexError::OutOfBounds {
                position: start,
                len: self.chars.len(),
            });
        }
        let end = start.saturating_add(max_len).min(self.chars.len());
        Ok(self.chars[start..end].iter().collect())
    }

    /// Maximal rank ranges whose suffixes all share a prefix of at least
    /// `min_match_len` chars. Every range holds at least two suffixes.
    ///
    /// Only meaningful when `min_match_len <= max_compare`; beyond the bound
    /// the sort no longer keeps equal prefixes adjacent.
    pub fn prefix_matches(&self, min_match_len: usize) -> Vec<Range<usize>> {
        sort::prefix_match_ranges(&self.chars, &self.order, None, min_match_len)
    }

    /// Rank range of suffixes starting with `pattern`. Empty pattern matches
    /// nothing. Subject to the `max_compare` caveat on `bounded`.
    pub fn find(&self, pattern: &str) -> Range<usize> {
        let pattern: Vec<char> = pattern.chars().collect();
        sort::pattern_bounds(&self.chars, &self.order, None, &pattern)
    }

    /// Sorted char offsets of every occurrence of `pattern`.
    pub fn occurrences(&self, pattern: &str) -> Vec<CharPosition> {
        let mut positions: Vec<CharPosition> =
            self.find(pattern).map(|rank| self.order[rank]).collect();
        positions.sort_unstable();
        positions
    }
}
