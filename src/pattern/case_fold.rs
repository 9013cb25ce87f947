//! Simple case folding lookups
//!
//! Unicode-aware case-insensitive matching (`iu`) compares code points by
//! their simple case folding. Targets without the unicode flag only know the
//! legacy `toUpperCase`-based canonicalization, so the rewriter adds every
//! member of a code point's folding orbit to the sets it emits.
//!
//! The data comes from the simple case folding table shipped with
//! `regex-syntax`, which is immutable and safe to share across threads.

use regex_syntax::hir::{ClassUnicode, ClassUnicodeRange};

/// Upper bound on orbit size; real orbits have at most four members
const MAX_ORBIT: usize = 8;

/// All code points sharing `code_point`'s simple case folding, sorted
fn orbit(code_point: u32) -> Vec<u32> {
    let Some(ch) = char::from_u32(code_point) else {
        return Vec::new();
    };
    let mut class = ClassUnicode::new([ClassUnicodeRange::new(ch, ch)]);
    if class.try_case_fold_simple().is_err() {
        return Vec::new();
    }
    class
        .iter()
        .flat_map(|range| (range.start() as u32)..=(range.end() as u32))
        .collect()
}

/// Look up the case-folding target of a code point
///
/// Returns the next member of the code point's simple case folding orbit
/// (wrapping around), or `None` when the code point only folds to itself or
/// is not a Unicode scalar value. Repeatedly applying `case_fold` visits
/// every member of the orbit and comes back to the starting point.
///
/// # Example
///
/// ```rust
/// use es_regex_rewrite::pattern::case_fold::case_fold;
///
/// assert_eq!(case_fold('a' as u32), Some('A' as u32));
/// assert_eq!(case_fold('A' as u32), Some('a' as u32));
/// assert_eq!(case_fold('1' as u32), None);
/// ```
pub fn case_fold(code_point: u32) -> Option<u32> {
    let members = orbit(code_point);
    if members.len() < 2 {
        return None;
    }
    members
        .iter()
        .copied()
        .find(|&member| member > code_point)
        .or_else(|| members.first().copied())
}

/// Every other member of the code point's folding orbit
pub fn fold_orbit(code_point: u32) -> Vec<u32> {
    let mut result = Vec::new();
    let mut current = code_point;
    while let Some(next) = case_fold(current) {
        if next == code_point || result.len() >= MAX_ORBIT {
            break;
        }
        result.push(next);
        current = next;
    }
    result
}

/// Fold a whole range at once
///
/// Returns the ranges of every code point that case-folds to a member of
/// `[min, max]`, including the range itself. Surrogates are skipped since
/// they have no folding.
pub fn fold_range(min: u32, max: u32) -> Vec<(u32, u32)> {
    let mut ranges = Vec::with_capacity(2);
    for (start, end) in [(min, max.min(0xD7FF)), (min.max(0xE000), max)] {
        if start > end {
            continue;
        }
        if let (Some(start), Some(end)) = (char::from_u32(start), char::from_u32(end)) {
            ranges.push(ClassUnicodeRange::new(start, end));
        }
    }
    if ranges.is_empty() {
        return Vec::new();
    }

    let mut class = ClassUnicode::new(ranges);
    if class.try_case_fold_simple().is_err() {
        return Vec::new();
    }
    class
        .iter()
        .map(|range| (range.start() as u32, range.end() as u32))
        .collect()
}
