//! Character class escapes (`\d`, `\w`, `\s` and their negations)
//!
//! Each escape resolves to a fixed [`CodePointSet`]. The set depends on the
//! mode the pattern is compiled in:
//!
//! | Mode | Negated escapes are relative to | `\w` |
//! |------|--------------------------------|------|
//! | regular | the BMP | `[0-9A-Z_a-z]` |
//! | unicode | every code point | `[0-9A-Z_a-z]` |
//! | unicode + ignore case | every code point | adds U+017F and U+212A |
//!
//! The tables are built once on first use and shared read-only.

use std::sync::OnceLock;

use super::code_point_set::{CodePointSet, MAX_BMP, MAX_CODE_POINT};

static REGULAR: OnceLock<EscapeTable> = OnceLock::new();
static UNICODE: OnceLock<EscapeTable> = OnceLock::new();
static UNICODE_IGNORE_CASE: OnceLock<EscapeTable> = OnceLock::new();

/// A character class escape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassEscape {
    /// Digit: `\d`
    Digit,
    /// Non-digit: `\D`
    NotDigit,
    /// Word character: `\w`
    Word,
    /// Non-word character: `\W`
    NotWord,
    /// Whitespace or line terminator: `\s`
    Space,
    /// Anything else: `\S`
    NotSpace,
}

impl ClassEscape {
    /// Map the letter after a backslash to an escape
    ///
    /// # Example
    ///
    /// ```rust
    /// use es_regex_rewrite::pattern::char_class::ClassEscape;
    ///
    /// assert_eq!(ClassEscape::from_char('d'), Some(ClassEscape::Digit));
    /// assert_eq!(ClassEscape::from_char('W'), Some(ClassEscape::NotWord));
    /// assert_eq!(ClassEscape::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Digit),
            'D' => Some(Self::NotDigit),
            'w' => Some(Self::Word),
            'W' => Some(Self::NotWord),
            's' => Some(Self::Space),
            'S' => Some(Self::NotSpace),
            _ => None,
        }
    }

    /// The letter written after the backslash
    pub fn as_char(self) -> char {
        match self {
            Self::Digit => 'd',
            Self::NotDigit => 'D',
            Self::Word => 'w',
            Self::NotWord => 'W',
            Self::Space => 's',
            Self::NotSpace => 'S',
        }
    }
}

/// Pre-computed escape sets for one mode
struct EscapeTable {
    digit: CodePointSet,
    not_digit: CodePointSet,
    word: CodePointSet,
    not_word: CodePointSet,
    space: CodePointSet,
    not_space: CodePointSet,
}

impl EscapeTable {
    fn build(universe_max: u32, extra_word: &[u32]) -> Self {
        let universe = CodePointSet::from_range(0, universe_max);
        let digit = CodePointSet::from_range('0' as u32, '9' as u32);

        let mut word = digit.clone();
        word.add_range('A' as u32, 'Z' as u32)
            .add('_' as u32)
            .add_range('a' as u32, 'z' as u32);
        for &code_point in extra_word {
            word.add(code_point);
        }

        let mut space = CodePointSet::from_range(0x09, 0x0D);
        for code_point in [0x20, 0xA0, 0x1680, 0x2028, 0x2029, 0x202F, 0x205F, 0x3000, 0xFEFF] {
            space.add(code_point);
        }
        space.add_range(0x2000, 0x200A);

        let negate = |set: &CodePointSet| {
            let mut negated = universe.clone();
            negated.remove_set(set);
            negated
        };

        Self {
            not_digit: negate(&digit),
            not_word: negate(&word),
            not_space: negate(&space),
            digit,
            word,
            space,
        }
    }

    fn get(&self, escape: ClassEscape) -> &CodePointSet {
        match escape {
            ClassEscape::Digit => &self.digit,
            ClassEscape::NotDigit => &self.not_digit,
            ClassEscape::Word => &self.word,
            ClassEscape::NotWord => &self.not_word,
            ClassEscape::Space => &self.space,
            ClassEscape::NotSpace => &self.not_space,
        }
    }
}

/// Resolve a class escape to its code points
///
/// The returned set is shared; clone it before modifying.
pub fn escape_set(escape: ClassEscape, unicode: bool, ignore_case: bool) -> &'static CodePointSet {
    let table = match (unicode, ignore_case) {
        (true, true) => UNICODE_IGNORE_CASE
            .get_or_init(|| EscapeTable::build(MAX_CODE_POINT, &[0x017F, 0x212A])),
        (true, false) => UNICODE.get_or_init(|| EscapeTable::build(MAX_CODE_POINT, &[])),
        (false, _) => REGULAR.get_or_init(|| EscapeTable::build(MAX_BMP, &[])),
    };
    table.get(escape)
}
