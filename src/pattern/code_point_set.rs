//! Code point set algebra
//!
//! [`CodePointSet`] is a set of Unicode code points stored as sorted,
//! disjoint, non-adjacent inclusive ranges. Every rewrite of a character
//! class, property escape or dot goes through a set: the members are
//! collected with the union/difference operations here and the result is
//! serialized back to pattern source with [`CodePointSet::to_pattern`].
//!
//! # Serialization
//!
//! | Set | `has_unicode_flag` | Output |
//! |-----|--------------------|--------|
//! | `{a}` | either | `a` |
//! | `{a, b}` | either | `[ab]` |
//! | `a..=z` | either | `[a-z]` |
//! | `{U+1F600}` | no | `😀` |
//! | `{U+1F600}` | yes | `\u{1F600}` |
//! | `{}` | either | `[]` |
//!
//! Without the unicode flag, astral code points become surrogate pairs and
//! lone surrogates are guarded so they never match half of a pair.

use std::sync::OnceLock;

use super::case_fold;

/// Largest Unicode code point
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Largest code point of the Basic Multilingual Plane
pub const MAX_BMP: u32 = 0xFFFF;

const HIGH_SURROGATE_MIN: u32 = 0xD800;
const HIGH_SURROGATE_MAX: u32 = 0xDBFF;
const LOW_SURROGATE_MIN: u32 = 0xDC00;
const LOW_SURROGATE_MAX: u32 = 0xDFFF;

/// Guard appended to lone high surrogates
const LONE_HIGH_GUARD: &str = "(?![\\uDC00-\\uDFFF])";

/// Guard prepended to lone low surrogates
const LONE_LOW_GUARD: &str = "(?:[^\\uD800-\\uDBFF]|^)";

static UNICODE_SET: OnceLock<CodePointSet> = OnceLock::new();
static BMP_SET: OnceLock<CodePointSet> = OnceLock::new();
static ASTRAL_SET: OnceLock<CodePointSet> = OnceLock::new();
static NEWLINE_SET: OnceLock<CodePointSet> = OnceLock::new();
static DOT_SET_UNICODE: OnceLock<CodePointSet> = OnceLock::new();

/// Every code point, `U+0000..=U+10FFFF`
pub fn unicode_set() -> &'static CodePointSet {
    UNICODE_SET.get_or_init(|| CodePointSet::from_range(0, MAX_CODE_POINT))
}

/// Every BMP code point, `U+0000..=U+FFFF`
pub fn bmp_set() -> &'static CodePointSet {
    BMP_SET.get_or_init(|| CodePointSet::from_range(0, MAX_BMP))
}

/// Every astral code point, `U+10000..=U+10FFFF`
pub fn astral_set() -> &'static CodePointSet {
    ASTRAL_SET.get_or_init(|| CodePointSet::from_range(0x10000, MAX_CODE_POINT))
}

/// The four ECMAScript line terminators
pub fn newline_set() -> &'static CodePointSet {
    NEWLINE_SET.get_or_init(|| [0x0A, 0x0D, 0x2028, 0x2029].into_iter().collect())
}

/// What `.` matches in unicode mode without the dot-all flag
pub fn dot_set_unicode() -> &'static CodePointSet {
    DOT_SET_UNICODE.get_or_init(|| {
        let mut set = unicode_set().clone();
        set.remove_set(newline_set());
        set
    })
}

/// Options controlling [`CodePointSet::to_pattern`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// The pattern operates on UTF-16 code units (no `u` flag in the input),
    /// so surrogates are ordinary characters and astral members are dropped
    pub bmp_only: bool,
    /// The output pattern keeps the `u` flag, so astral code points can be
    /// written directly with `\u{...}`
    pub has_unicode_flag: bool,
}

/// One alternative of a serialized set
struct Piece {
    text: String,
    /// Whether the piece is a single quantifiable atom
    atomic: bool,
}

/// A set of Unicode code points
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodePointSet {
    /// Sorted, disjoint, non-adjacent inclusive ranges
    ranges: Vec<(u32, u32)>,
}

impl CodePointSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Create a set holding a single code point
    pub fn from_code_point(code_point: u32) -> Self {
        Self::from_range(code_point, code_point)
    }

    /// Create a set holding one inclusive range
    pub fn from_range(min: u32, max: u32) -> Self {
        let mut set = Self::new();
        set.add_range(min, max);
        set
    }

    /// The ranges of the set, sorted and disjoint
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    /// Iterate over every code point in ascending order
    pub fn code_points(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|&(start, end)| start..=end)
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of code points in the set
    pub fn len(&self) -> usize {
        self.ranges
            .iter()
            .map(|&(start, end)| (end - start + 1) as usize)
            .sum()
    }

    /// Whether the set contains a code point
    pub fn contains(&self, code_point: u32) -> bool {
        self.ranges
            .binary_search_by(|&(start, end)| {
                if end < code_point {
                    std::cmp::Ordering::Less
                } else if start > code_point {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Whether any member lies outside the BMP
    pub fn has_astral(&self) -> bool {
        self.ranges.last().is_some_and(|&(_, end)| end > MAX_BMP)
    }

    /// Add a single code point
    pub fn add(&mut self, code_point: u32) -> &mut Self {
        self.add_range(code_point, code_point)
    }

    /// Add an inclusive range, merging with overlapping or adjacent ranges
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or `max` is beyond `U+10FFFF`.
    pub fn add_range(&mut self, min: u32, max: u32) -> &mut Self {
        assert!(
            min <= max && max <= MAX_CODE_POINT,
            "invalid code point range {:#X}-{:#X}",
            min,
            max
        );

        let mut low = min;
        let mut high = max;
        let mut merged = Vec::with_capacity(self.ranges.len() + 1);
        let mut inserted = false;

        for &(start, end) in &self.ranges {
            if end.saturating_add(1) < low {
                merged.push((start, end));
            } else if start > high.saturating_add(1) {
                if !inserted {
                    merged.push((low, high));
                    inserted = true;
                }
                merged.push((start, end));
            } else {
                low = low.min(start);
                high = high.max(end);
            }
        }
        if !inserted {
            merged.push((low, high));
        }

        self.ranges = merged;
        self
    }

    /// Add every member of another set
    pub fn add_set(&mut self, other: &CodePointSet) -> &mut Self {
        for &(start, end) in &other.ranges {
            self.add_range(start, end);
        }
        self
    }

    /// Add the simple case folding equivalents of every code point in a range
    ///
    /// Used to emulate `iu` matching for targets that lack the unicode flag.
    pub fn iu_add_range(&mut self, min: u32, max: u32) -> &mut Self {
        for (start, end) in case_fold::fold_range(min, max) {
            self.add_range(start, end);
        }
        self
    }

    /// Add the other case of every ASCII letter in a range
    ///
    /// Used for case-insensitive groups without the unicode flag, where only
    /// ASCII letters are folded.
    pub fn ascii_add_range(&mut self, min: u32, max: u32) -> &mut Self {
        let (upper_min, upper_max) = (min.max(0x41), max.min(0x5A));
        if upper_min <= upper_max {
            self.add_range(upper_min + 0x20, upper_max + 0x20);
        }
        let (lower_min, lower_max) = (min.max(0x61), max.min(0x7A));
        if lower_min <= lower_max {
            self.add_range(lower_min - 0x20, lower_max - 0x20);
        }
        self
    }

    /// Add a code point together with its whole case folding orbit
    pub fn add_folded(&mut self, code_point: u32) -> &mut Self {
        self.add(code_point);
        for folded in case_fold::fold_orbit(code_point) {
            self.add(folded);
        }
        self
    }

    /// Remove a single code point
    pub fn remove(&mut self, code_point: u32) -> &mut Self {
        self.remove_range(code_point, code_point)
    }

    /// Remove an inclusive range
    pub fn remove_range(&mut self, min: u32, max: u32) -> &mut Self {
        if min > max {
            return self;
        }
        let mut kept = Vec::with_capacity(self.ranges.len() + 1);
        for &(start, end) in &self.ranges {
            if end < min || start > max {
                kept.push((start, end));
                continue;
            }
            if start < min {
                kept.push((start, min - 1));
            }
            if end > max {
                kept.push((max + 1, end));
            }
        }
        self.ranges = kept;
        self
    }

    /// Remove every member of another set
    pub fn remove_set(&mut self, other: &CodePointSet) -> &mut Self {
        for &(start, end) in &other.ranges {
            self.remove_range(start, end);
        }
        self
    }

    /// Code points present in both sets
    pub fn intersection(&self, other: &CodePointSet) -> CodePointSet {
        let mut ranges = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let (a_start, a_end) = self.ranges[i];
            let (b_start, b_end) = other.ranges[j];
            let start = a_start.max(b_start);
            let end = a_end.min(b_end);
            if start <= end {
                ranges.push((start, end));
            }
            if a_end < b_end {
                i += 1;
            } else {
                j += 1;
            }
        }
        CodePointSet { ranges }
    }

    /// Every code point not in this set
    pub fn complement(&self) -> CodePointSet {
        let mut result = unicode_set().clone();
        result.remove_set(self);
        result
    }

    /// The members restricted to `[min, max]`
    fn clipped(&self, min: u32, max: u32) -> CodePointSet {
        self.intersection(&CodePointSet::from_range(min, max))
    }

    /// Serialize the set as pattern source
    ///
    /// The result may be an alternation (surrogate pairs, guarded lone
    /// surrogates); use [`to_atom`](Self::to_atom) when the text has to
    /// stand in for a single term.
    pub fn to_pattern(&self, options: SerializeOptions) -> String {
        let joined = self
            .pieces(options)
            .into_iter()
            .map(|piece| piece.text)
            .collect::<Vec<_>>()
            .join("|");
        shorten_nul_escapes(&joined)
    }

    /// Serialize the set as a single quantifiable term
    pub fn to_atom(&self, options: SerializeOptions) -> String {
        let pieces = self.pieces(options);
        let text = match pieces.as_slice() {
            [piece] if piece.atomic => piece.text.clone(),
            _ => {
                let body = pieces
                    .into_iter()
                    .map(|piece| piece.text)
                    .collect::<Vec<_>>()
                    .join("|");
                format!("(?:{})", body)
            }
        };
        shorten_nul_escapes(&text)
    }

    fn pieces(&self, options: SerializeOptions) -> Vec<Piece> {
        if self.is_empty() {
            return vec![Piece {
                text: "[]".to_string(),
                atomic: true,
            }];
        }
        if options.has_unicode_flag {
            return vec![class_piece(&self.ranges, true)];
        }

        let mut bmp = self.clipped(0, MAX_BMP);
        let mut high = CodePointSet::new();
        let mut low = CodePointSet::new();
        if !options.bmp_only {
            high = bmp.clipped(HIGH_SURROGATE_MIN, HIGH_SURROGATE_MAX);
            low = bmp.clipped(LOW_SURROGATE_MIN, LOW_SURROGATE_MAX);
            bmp.remove_range(HIGH_SURROGATE_MIN, LOW_SURROGATE_MAX);
        }
        // Code unit patterns have no astral members
        let astral = if options.bmp_only {
            CodePointSet::new()
        } else {
            self.clipped(MAX_BMP + 1, MAX_CODE_POINT)
        };

        let mut pieces = Vec::new();
        if !bmp.is_empty() {
            pieces.push(class_piece(&bmp.ranges, false));
        }
        for (high_range, lows) in surrogate_mappings(&astral.ranges) {
            let mut text = class_piece(&[high_range], false).text;
            text.push_str(&class_piece(&lows.ranges, false).text);
            pieces.push(Piece {
                text,
                atomic: false,
            });
        }
        if !high.is_empty() {
            let mut text = class_piece(&high.ranges, false).text;
            text.push_str(LONE_HIGH_GUARD);
            pieces.push(Piece {
                text,
                atomic: false,
            });
        }
        if !low.is_empty() {
            let mut text = LONE_LOW_GUARD.to_string();
            text.push_str(&class_piece(&low.ranges, false).text);
            pieces.push(Piece {
                text,
                atomic: false,
            });
        }
        pieces
    }
}

impl FromIterator<u32> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = CodePointSet::new();
        for code_point in iter {
            set.add(code_point);
        }
        set
    }
}

/// Split an astral code point into its UTF-16 surrogate pair
#[inline]
fn to_surrogates(code_point: u32) -> (u32, u32) {
    let offset = code_point - 0x10000;
    (
        HIGH_SURROGATE_MIN + (offset >> 10),
        LOW_SURROGATE_MIN + (offset & 0x3FF),
    )
}

/// Group astral ranges by high surrogate
///
/// Consecutive high surrogates sharing the same low surrogate set are
/// merged into one high surrogate range.
fn surrogate_mappings(astral: &[(u32, u32)]) -> Vec<((u32, u32), CodePointSet)> {
    let mut mappings: Vec<((u32, u32), CodePointSet)> = Vec::new();

    for &(start, end) in astral {
        let (mut high_start, low_start) = to_surrogates(start);
        let (mut high_end, low_end) = to_surrogates(end);
        let mut parts = Vec::with_capacity(3);

        if high_start == high_end {
            parts.push((high_start, high_start, low_start, low_end));
        } else {
            if low_start != LOW_SURROGATE_MIN {
                parts.push((high_start, high_start, low_start, LOW_SURROGATE_MAX));
                high_start += 1;
            }
            let tail = if low_end != LOW_SURROGATE_MAX {
                let tail = (high_end, high_end, LOW_SURROGATE_MIN, low_end);
                high_end -= 1;
                Some(tail)
            } else {
                None
            };
            if high_start <= high_end {
                parts.push((high_start, high_end, LOW_SURROGATE_MIN, LOW_SURROGATE_MAX));
            }
            parts.extend(tail);
        }

        for (high_min, high_max, low_min, low_max) in parts {
            push_mapping(&mut mappings, (high_min, high_max), low_min, low_max);
        }
    }

    mappings
}

fn push_mapping(
    mappings: &mut Vec<((u32, u32), CodePointSet)>,
    high: (u32, u32),
    low_min: u32,
    low_max: u32,
) {
    if let Some((last_high, last_low)) = mappings.last_mut() {
        let single = last_high.0 == last_high.1 && high.0 == high.1;
        if single && last_high.0 == high.0 {
            last_low.add_range(low_min, low_max);
            return;
        }
        if last_high.1 + 1 == high.0 && last_low.ranges == [(low_min, low_max)] {
            last_high.1 = high.1;
            return;
        }
    }
    mappings.push((high, CodePointSet::from_range(low_min, low_max)));
}

/// Serialize ranges as a bracket expression, or a bare character for a
/// singleton
fn class_piece(ranges: &[(u32, u32)], unicode_escapes: bool) -> Piece {
    if let [(start, end)] = ranges {
        if start == end {
            return Piece {
                text: code_point_to_string(*start, unicode_escapes),
                atomic: true,
            };
        }
    }

    let mut text = String::from("[");
    for &(start, end) in ranges {
        text.push_str(&code_point_to_string(start, unicode_escapes));
        if end == start + 1 {
            text.push_str(&code_point_to_string(end, unicode_escapes));
        } else if end > start {
            text.push('-');
            text.push_str(&code_point_to_string(end, unicode_escapes));
        }
    }
    text.push(']');
    Piece { text, atomic: true }
}

/// Escape a code point for use inside or outside a bracket expression
fn code_point_to_string(code_point: u32, unicode_escapes: bool) -> String {
    match code_point {
        0x09 => "\\t".to_string(),
        0x0A => "\\n".to_string(),
        0x0C => "\\f".to_string(),
        0x0D => "\\r".to_string(),
        0x2D => "\\x2D".to_string(),
        0x5C => "\\\\".to_string(),
        0x24 | 0x28..=0x2B | 0x2E | 0x2F | 0x3F | 0x5B..=0x5E | 0x7B..=0x7D => {
            // Printable ASCII, checked by the match arm
            format!("\\{}", code_point as u8 as char)
        }
        0x20..=0x7E => (code_point as u8 as char).to_string(),
        0..=0xFF => format!("\\x{:02X}", code_point),
        0x100..=0xFFFF => format!("\\u{:04X}", code_point),
        _ if unicode_escapes => format!("\\u{{{:X}}}", code_point),
        _ => {
            let (high, low) = to_surrogates(code_point);
            format!("\\u{:04X}\\u{:04X}", high, low)
        }
    }
}

/// Rewrite `\x00` as `\0` wherever no decimal digit follows
fn shorten_nul_escapes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(index) = rest.find('\\') {
        out.push_str(&rest[..index]);
        let escape = &rest[index..];
        if let Some(after) = escape.strip_prefix("\\x00") {
            if !after.starts_with(|c: char| c.is_ascii_digit()) {
                out.push_str("\\0");
                rest = after;
                continue;
            }
        }
        // Copy the backslash and the escaped character as a unit
        let escaped_len = escape[1..].chars().next().map_or(0, char::len_utf8);
        out.push_str(&escape[..1 + escaped_len]);
        rest = &escape[1 + escaped_len..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: SerializeOptions = SerializeOptions {
        bmp_only: false,
        has_unicode_flag: false,
    };

    const UNICODE_FLAG: SerializeOptions = SerializeOptions {
        bmp_only: false,
        has_unicode_flag: true,
    };

    const BMP_ONLY: SerializeOptions = SerializeOptions {
        bmp_only: true,
        has_unicode_flag: false,
    };

    #[test]
    fn test_add_range_merges_overlaps_and_neighbours() {
        let mut set = CodePointSet::new();
        set.add_range(10, 20).add_range(30, 40).add_range(21, 29);
        assert_eq!(set.ranges(), &[(10, 40)]);

        set.add_range(5, 12);
        assert_eq!(set.ranges(), &[(5, 40)]);
    }

    #[test]
    fn test_add_range_keeps_sorted() {
        let mut set = CodePointSet::new();
        set.add_range(50, 60).add_range(1, 2).add_range(20, 30);
        assert_eq!(set.ranges(), &[(1, 2), (20, 30), (50, 60)]);
    }

    #[test]
    fn test_add_covered_range_is_noop() {
        let mut set = CodePointSet::from_range(0, 100);
        set.add_range(10, 20);
        assert_eq!(set.ranges(), &[(0, 100)]);
    }

    #[test]
    #[should_panic]
    fn test_add_range_rejects_inverted() {
        CodePointSet::new().add_range(5, 4);
    }

    #[test]
    fn test_remove_range_splits() {
        let mut set = CodePointSet::from_range(0, 100);
        set.remove_range(10, 20);
        assert_eq!(set.ranges(), &[(0, 9), (21, 100)]);
        set.remove(0);
        assert_eq!(set.ranges(), &[(1, 9), (21, 100)]);
    }

    #[test]
    fn test_intersection() {
        let a = CodePointSet::from_range(0, 50);
        let mut b = CodePointSet::from_range(40, 60);
        b.add_range(0, 5);
        assert_eq!(a.intersection(&b).ranges(), &[(0, 5), (40, 50)]);
    }

    #[test]
    fn test_complement() {
        let set: CodePointSet = [0x61].into_iter().collect();
        let complement = set.complement();
        assert_eq!(complement.ranges(), &[(0, 0x60), (0x62, MAX_CODE_POINT)]);
        assert_eq!(complement.len(), 0x110000 - 1);
    }

    #[test]
    fn test_contains() {
        let mut set = CodePointSet::from_range(10, 20);
        set.add(30);
        assert!(set.contains(10));
        assert!(set.contains(20));
        assert!(set.contains(30));
        assert!(!set.contains(21));
        assert!(!set.contains(0));
    }

    #[test]
    fn test_iu_add_range() {
        let mut set = CodePointSet::from_range('a' as u32, 'z' as u32);
        set.iu_add_range('a' as u32, 'z' as u32);
        assert!(set.contains('A' as u32));
        assert!(set.contains(0x17F)); // LATIN SMALL LETTER LONG S
        assert!(set.contains(0x212A)); // KELVIN SIGN
    }

    #[test]
    fn test_serialize_singletons_and_ranges() {
        assert_eq!(CodePointSet::from_code_point('a' as u32).to_pattern(PLAIN), "a");
        let pair: CodePointSet = ['a' as u32, 'b' as u32].into_iter().collect();
        assert_eq!(pair.to_pattern(PLAIN), "[ab]");
        let range = CodePointSet::from_range('a' as u32, 'z' as u32);
        assert_eq!(range.to_pattern(PLAIN), "[a-z]");
    }

    #[test]
    fn test_serialize_escapes() {
        let set: CodePointSet = [0x2D, 0x5C, 0x5D, 0x09, 0xE9, 0x2028].into_iter().collect();
        assert_eq!(set.to_pattern(PLAIN), "[\\t\\x2D\\\\\\]\\xE9\\u2028]");
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(CodePointSet::new().to_pattern(PLAIN), "[]");
        assert_eq!(CodePointSet::new().to_atom(PLAIN), "[]");
    }

    #[test]
    fn test_serialize_nul() {
        let set: CodePointSet = [0, 0x61].into_iter().collect();
        assert_eq!(set.to_pattern(PLAIN), "[\\0a]");

        let before_digit: CodePointSet = [0, 0x31].into_iter().collect();
        assert_eq!(before_digit.to_pattern(PLAIN), "[\\x001]");
    }

    #[test]
    fn test_serialize_astral_as_surrogates() {
        let set = CodePointSet::from_code_point(0x1F600);
        assert_eq!(set.to_pattern(PLAIN), "\\uD83D\\uDE00");
        assert_eq!(set.to_atom(PLAIN), "(?:\\uD83D\\uDE00)");
    }

    #[test]
    fn test_serialize_astral_with_unicode_flag() {
        let set = CodePointSet::from_range(0x1F600, 0x1F64F);
        assert_eq!(set.to_pattern(UNICODE_FLAG), "[\\u{1F600}-\\u{1F64F}]");
        assert_eq!(set.to_atom(UNICODE_FLAG), "[\\u{1F600}-\\u{1F64F}]");
    }

    #[test]
    fn test_serialize_merges_same_high_surrogate() {
        let set: CodePointSet = [0x1F600, 0x1F602].into_iter().collect();
        assert_eq!(set.to_pattern(PLAIN), "\\uD83D[\\uDE00\\uDE02]");
    }

    #[test]
    fn test_serialize_full_astral_range() {
        assert_eq!(
            astral_set().to_pattern(PLAIN),
            "[\\uD800-\\uDBFF][\\uDC00-\\uDFFF]"
        );
    }

    #[test]
    fn test_serialize_partial_high_ranges() {
        // Both ends fall on high surrogate boundaries
        let aligned = CodePointSet::from_range(0x10400, 0x10FFF);
        assert_eq!(aligned.to_pattern(PLAIN), "[\\uD801-\\uD803][\\uDC00-\\uDFFF]");

        let ragged = CodePointSet::from_range(0x10401, 0x10800);
        assert_eq!(
            ragged.to_pattern(PLAIN),
            "\\uD801[\\uDC01-\\uDFFF]|\\uD802\\uDC00"
        );
    }

    #[test]
    fn test_serialize_lone_surrogates() {
        let high = CodePointSet::from_code_point(0xD800);
        assert_eq!(high.to_pattern(PLAIN), "\\uD800(?![\\uDC00-\\uDFFF])");

        let low = CodePointSet::from_code_point(0xDC00);
        assert_eq!(low.to_pattern(PLAIN), "(?:[^\\uD800-\\uDBFF]|^)\\uDC00");

        // Code-unit patterns treat surrogates as plain characters
        assert_eq!(high.to_pattern(BMP_ONLY), "\\uD800");
    }

    #[test]
    fn test_ascii_add_range() {
        let mut set = CodePointSet::from_range(0x58, 0x62); // X-b
        set.ascii_add_range(0x58, 0x62);
        assert_eq!(set.ranges(), &[(0x41, 0x42), (0x58, 0x62), (0x78, 0x7A)]);

        let mut digits = CodePointSet::from_range(0x30, 0x39);
        digits.ascii_add_range(0x30, 0x39);
        assert_eq!(digits.ranges(), &[(0x30, 0x39)]);
    }

    #[test]
    fn test_bmp_only_drops_astral() {
        let mut set = CodePointSet::from_range(0x61, 0x62);
        set.add_range(0xD83D, 0xD83D).add(0x1F600);
        assert_eq!(set.to_atom(BMP_ONLY), "[ab\\uD83D]");
    }

    #[test]
    fn test_serialize_unicode_dot() {
        assert_eq!(
            dot_set_unicode().to_atom(PLAIN),
            "(?:[\\0-\\t\\x0B\\f\\x0E-\\u2027\\u202A-\\uD7FF\\uE000-\\uFFFF]|[\\uD800-\\uDBFF][\\uDC00-\\uDFFF]|[\\uD800-\\uDBFF](?![\\uDC00-\\uDFFF])|(?:[^\\uD800-\\uDBFF]|^)[\\uDC00-\\uDFFF])"
        );
    }

    #[test]
    fn test_has_astral() {
        assert!(!CodePointSet::from_range(0, 0xFFFF).has_astral());
        assert!(CodePointSet::from_code_point(0x10000).has_astral());
    }
}
