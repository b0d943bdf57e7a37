//! Suffix ordering primitives shared by the char and token indexes.
//!
//! The comparator is a pure function of `(units, boundary, max_compare, a, b)`
//! so it can be tested in isolation; the index types only ever hold the
//! resulting position permutation. A boundary unit is treated exactly like
//! the end of the sequence, which makes it compare less than every other
//! unit and stops any comparison from reading across it.

use rayon::prelude::*;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::ops::Range;
use tracing::debug;

use crate::tokenize::Token;

/// Above this many units, suffix sorting runs on the rayon pool.
const PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// A unit of suffix comparison: a char, or a token compared by its text.
pub(crate) trait Unit {
    type Value: Ord + ?Sized;

    fn value(&self) -> &Self::Value;
}

impl Unit for char {
    type Value = char;

    fn value(&self) -> &char {
        self
    }
}

impl Unit for Token {
    type Value = str;

    fn value(&self) -> &str {
        self.text.as_str()
    }
}

/// Unit value at `pos`, or `None` when the suffix is exhausted there
/// (past the end of the sequence or sitting on the boundary marker).
#[inline]
fn unit_at<'a, U: Unit>(
    units: &'a [U],
    boundary: Option<&U::Value>,
    pos: usize,
) -> Option<&'a U::Value> {
    let value = units.get(pos)?.value();
    if boundary.is_some_and(|b| value == b) {
        return None;
    }
    Some(value)
}

/// Compare the suffixes starting at `a` and `b`, examining at most
/// `max_compare` units.
///
/// An exhausted suffix sorts before a longer one; two suffixes exhausted at
/// the same step are equal, as are suffixes that agree on all `max_compare`
/// units. Pass `usize::MAX` for an unbounded comparison.
pub(crate) fn compare_suffixes<U: Unit>(
    units: &[U],
    boundary: Option<&U::Value>,
    max_compare: usize,
    a: usize,
    b: usize,
) -> Ordering {
    for step in 0..max_compare {
        match (unit_at(units, boundary, a + step), unit_at(units, boundary, b + step)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match x.cmp(y) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
        }
    }
    Ordering::Equal
}

/// Build the suffix order: a permutation of `0..units.len()` sorted by the
/// bounded comparator. Large inputs sort on the rayon pool.
pub(crate) fn sort_suffix_positions<U>(
    units: &[U],
    boundary: Option<&U::Value>,
    max_compare: usize,
) -> Vec<usize>
where
    U: Unit + Sync,
    U::Value: Sync,
{
    let mut order: Vec<usize> = (0..units.len()).collect();
    let parallel = units.len() > PARALLEL_SORT_THRESHOLD;

    if parallel {
        order.par_sort_unstable_by(|&a, &b| compare_suffixes(units, boundary, max_compare, a, b));
    } else {
        order.sort_unstable_by(|&a, &b| compare_suffixes(units, boundary, max_compare, a, b));
    }

    debug!("sorted {} suffixes (parallel: {})", order.len(), parallel);
    order
}

/// Whether the suffixes at `a` and `b` agree on their first `len` units.
///
/// Fails when either suffix has fewer than `len` units before the end of the
/// sequence, or when the boundary marker appears inside either window.
pub(crate) fn shares_prefix<U: Unit>(
    units: &[U],
    boundary: Option<&U::Value>,
    a: usize,
    b: usize,
    len: usize,
) -> bool {
    if units.len().saturating_sub(a) < len || units.len().saturating_sub(b) < len {
        return false;
    }
    for step in 0..len {
        match (unit_at(units, boundary, a + step), unit_at(units, boundary, b + step)) {
            (Some(x), Some(y)) if x == y => {}
            _ => return false,
        }
    }
    true
}

/// Maximal rank ranges `[lo, hi)` whose member suffixes all share a prefix of
/// at least `min_match_len` units.
///
/// Scans the sorted order left to right, extending a range while adjacent
/// suffixes agree on their first `min_match_len` units. Members between two
/// agreeing endpoints necessarily agree too, because they sort between them
/// under the bounded comparator.
pub(crate) fn prefix_match_ranges<U: Unit>(
    units: &[U],
    order: &[usize],
    boundary: Option<&U::Value>,
    min_match_len: usize,
) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut lo = 0;

    while lo < order.len() {
        let mut hi = lo + 1;
        while hi < order.len()
            && shares_prefix(units, boundary, order[hi - 1], order[hi], min_match_len)
        {
            hi += 1;
        }
        if hi - lo >= 2 {
            ranges.push(lo..hi);
            lo = hi;
        } else {
            lo += 1;
        }
    }

    ranges
}

/// Compare the suffix at `pos` against `pattern`, looking at no more than
/// `pattern.len()` units. `Equal` means the suffix starts with the pattern.
fn cmp_suffix_to_pattern<U, P>(
    units: &[U],
    boundary: Option<&U::Value>,
    pos: usize,
    pattern: &[P],
) -> Ordering
where
    U: Unit,
    P: Borrow<U::Value>,
{
    for (step, expected) in pattern.iter().enumerate() {
        match unit_at(units, boundary, pos + step) {
            // Suffix exhausted before the pattern: sorts first.
            None => return Ordering::Less,
            Some(value) => match value.cmp(expected.borrow()) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
        }
    }
    Ordering::Equal
}

/// First rank whose suffix does not sort before `pattern`.
fn lower_bound<U, P>(
    units: &[U],
    order: &[usize],
    boundary: Option<&U::Value>,
    pattern: &[P],
) -> usize
where
    U: Unit,
    P: Borrow<U::Value>,
{
    let mut lo = 0;
    let mut hi = order.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp_suffix_to_pattern(units, boundary, order[mid], pattern) == Ordering::Less {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    lo
}

/// First rank at or after `start` whose suffix does not start with `pattern`.
fn upper_bound<U, P>(
    units: &[U],
    order: &[usize],
    boundary: Option<&U::Value>,
    pattern: &[P],
    start: usize,
) -> usize
where
    U: Unit,
    P: Borrow<U::Value>,
{
    let mut lo = start;
    let mut hi = order.len();

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp_suffix_to_pattern(units, boundary, order[mid], pattern) == Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}

/// Rank range `[lo, hi)` of suffixes starting with `pattern`.
///
/// Reliable only when the order was built with `max_compare >=
/// pattern.len()`; a pattern containing the boundary marker matches nothing,
/// since the boundary is never readable from a suffix.
pub(crate) fn pattern_bounds<U, P>(
    units: &[U],
    order: &[usize],
    boundary: Option<&U::Value>,
    pattern: &[P],
) -> Range<usize>
where
    U: Unit,
    P: Borrow<U::Value>,
{
    if pattern.is_empty() || order.is_empty() {
        return 0..0;
    }
    let lo = lower_bound(units, order, boundary, pattern);
    let hi = upper_bound(units, order, boundary, pattern, lo);
    lo..hi
}

/// Greatest index `i` with `values[i] <= query` over a strictly increasing
/// slice, or `None` when the slice is empty or every value exceeds `query`.
///
/// For `query >= values[last]` the answer is `last`; otherwise the search
/// maintains `values[lo] <= query < values[hi]` until the indexes are
/// adjacent and returns `lo`.
pub(crate) fn largest_at_most(values: &[usize], query: usize) -> Option<usize> {
    if values.is_empty() || query < values[0] {
        return None;
    }

    let last = values.len() - 1;
    if query >= values[last] {
        return Some(last);
    }

    let mut lo = 0;
    let mut hi = last;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if values[mid] <= query {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Some(lo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chars_of(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn tokens_of(texts: &[&str]) -> Vec<Token> {
        texts
            .iter()
            .map(|t| Token::new(*t, 0, t.len()))
            .collect()
    }

    #[test]
    fn test_compare_exhaustion_sorts_first() {
        let units = chars_of("aa");
        // Suffix "a" (pos 1) is a strict prefix of "aa" (pos 0).
        assert_eq!(
            compare_suffixes(&units, None, usize::MAX, 1, 0),
            Ordering::Less
        );
        assert_eq!(
            compare_suffixes(&units, None, usize::MAX, 0, 1),
            Ordering::Greater
        );
        assert_eq!(
            compare_suffixes(&units, None, usize::MAX, 0, 0),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_bounded_ties() {
        let units = chars_of("ababab");
        // Unbounded, these differ by length; bounded to 2 they tie on "ab".
        assert_eq!(
            compare_suffixes(&units, None, usize::MAX, 2, 0),
            Ordering::Less
        );
        assert_eq!(compare_suffixes(&units, None, 2, 2, 0), Ordering::Equal);
    }

    #[test]
    fn test_boundary_token_acts_as_end() {
        let units = tokens_of(&["cat", "#", "cat", "dog"]);
        let boundary = Some("#");
        // "cat #..." terminates after one token, so it sorts before "cat dog".
        assert_eq!(
            compare_suffixes(&units, boundary, usize::MAX, 0, 2),
            Ordering::Less
        );
        // The boundary position itself is an empty suffix, equal to the end.
        assert_eq!(
            compare_suffixes(&units, boundary, usize::MAX, 1, 4),
            Ordering::Equal
        );
        // And an empty suffix sorts before any non-empty one.
        assert_eq!(
            compare_suffixes(&units, boundary, usize::MAX, 1, 3),
            Ordering::Less
        );
    }

    #[test]
    fn test_sort_banana() {
        let units = chars_of("banana");
        let order = sort_suffix_positions(&units, None, usize::MAX);
        assert_eq!(order, vec![5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_shares_prefix_requires_full_window() {
        let units = chars_of("abracadabra");
        assert!(shares_prefix(&units, None, 0, 7, 4)); // "abra" both times
        // Position 7 has exactly 4 chars left, so a 5-char window fails.
        assert!(!shares_prefix(&units, None, 0, 7, 5));
    }

    #[test]
    fn test_shares_prefix_blocked_by_boundary() {
        let units = tokens_of(&["cat", "dog", "#", "cat", "dog"]);
        let boundary = Some("#");
        assert!(shares_prefix(&units, boundary, 0, 3, 2));
        // Windows of 3 read the boundary (or run off the end).
        assert!(!shares_prefix(&units, boundary, 0, 3, 3));
    }

    #[test]
    fn test_prefix_match_ranges_groups_and_maximality() {
        let units = chars_of("abracadabra");
        let order = sort_suffix_positions(&units, None, usize::MAX);
        assert_eq!(order, vec![10, 7, 0, 3, 5, 8, 1, 4, 6, 9, 2]);

        // "abra" (positions 0 and 7) is the only repeat of length 4.
        assert_eq!(prefix_match_ranges(&units, &order, None, 4), vec![1..3]);
        // Length 3 adds "bra"; "ra" at position 9 is too short to join.
        assert_eq!(
            prefix_match_ranges(&units, &order, None, 3),
            vec![1..3, 5..7]
        );
        // Single shared chars group the 'a', 'b', and 'r' suffixes.
        assert_eq!(
            prefix_match_ranges(&units, &order, None, 1),
            vec![0..5, 5..7, 9..11]
        );
    }

    #[test]
    fn test_pattern_bounds_banana() {
        let units = chars_of("banana");
        let order = sort_suffix_positions(&units, None, usize::MAX);

        let an: Vec<char> = "an".chars().collect();
        assert_eq!(pattern_bounds(&units, &order, None, &an), 1..3);

        let na: Vec<char> = "na".chars().collect();
        assert_eq!(pattern_bounds(&units, &order, None, &na), 4..6);

        let whole: Vec<char> = "banana".chars().collect();
        assert_eq!(pattern_bounds(&units, &order, None, &whole), 3..4);

        let missing: Vec<char> = "x".chars().collect();
        assert!(pattern_bounds(&units, &order, None, &missing).is_empty());

        let empty: Vec<char> = Vec::new();
        assert!(pattern_bounds(&units, &order, None, &empty).is_empty());
    }

    #[test]
    fn test_pattern_bounds_never_reads_boundary() {
        let units = tokens_of(&["cat", "dog", "#", "cat", "dog"]);
        let order = sort_suffix_positions(&units, Some("#"), usize::MAX);

        let range = pattern_bounds(&units, &order, Some("#"), &["cat", "dog"]);
        assert_eq!(range.len(), 2);

        // The boundary text itself is unreachable as a pattern unit.
        assert!(pattern_bounds(&units, &order, Some("#"), &["#"]).is_empty());
        assert!(pattern_bounds(&units, &order, Some("#"), &["dog", "#"]).is_empty());
    }

    #[test]
    fn test_largest_at_most_contract() {
        assert_eq!(largest_at_most(&[], 5), None);

        let values = [2, 5, 9, 14];
        assert_eq!(largest_at_most(&values, 1), None);
        assert_eq!(largest_at_most(&values, 2), Some(0));
        assert_eq!(largest_at_most(&values, 4), Some(0));
        assert_eq!(largest_at_most(&values, 5), Some(1));
        assert_eq!(largest_at_most(&values, 13), Some(2));
        assert_eq!(largest_at_most(&values, 14), Some(3));
        assert_eq!(largest_at_most(&values, 1_000), Some(3));
    }

    proptest! {
        #[test]
        fn prop_order_is_a_sorted_permutation(text in "[a-d]{0,48}") {
            let units = chars_of(&text);
            let order = sort_suffix_positions(&units, None, usize::MAX);

            let mut seen = order.clone();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..units.len()).collect::<Vec<_>>());

            for pair in order.windows(2) {
                let cmp = compare_suffixes(&units, None, usize::MAX, pair[0], pair[1]);
                prop_assert_ne!(cmp, Ordering::Greater);
            }
        }

        #[test]
        fn prop_comparator_is_antisymmetric(
            text in "[a-c]{1,32}",
            a in 0usize..32,
            b in 0usize..32,
            max in 0usize..8,
        ) {
            let units = chars_of(&text);
            let a = a % units.len();
            let b = b % units.len();
            let forward = compare_suffixes(&units, None, max, a, b);
            let backward = compare_suffixes(&units, None, max, b, a);
            prop_assert_eq!(forward, backward.reverse());
        }

        #[test]
        fn prop_largest_at_most_matches_linear_scan(
            mut values in proptest::collection::vec(0usize..1_000, 0..24),
            query in 0usize..1_100,
        ) {
            values.sort_unstable();
            values.dedup();

            let expected = values
                .iter()
                .rposition(|&v| v <= query);
            prop_assert_eq!(largest_at_most(&values, query), expected);
        }
    }
}
