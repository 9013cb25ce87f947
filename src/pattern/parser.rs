//! ECMAScript pattern parser
//!
//! A recursive descent parser for the pattern grammar of ECMAScript 2018+
//! regular expressions. Unicode mode (`u` flag) follows the strict grammar;
//! otherwise the web-compatibility grammar applies (legacy octal escapes,
//! literal braces, identity escapes, quantified lookaheads).
//!
//! The parser works on `char`s, so a pattern without the `u` flag is read
//! one code point at a time as well, except inside character classes where
//! an astral character is split into its two UTF-16 code units. Leaves keep
//! their source text, which makes [`generate`](super::generator::generate)
//! lossless.

use super::ast::{
    AnchorKind, CharacterClass, ClassItem, Group, GroupBehavior, GroupName, Modifiers,
    PropertyEscape, Quantifier, Reference, Term, Value,
};
use super::char_class::ClassEscape;
use super::error::SyntaxError;

/// Default maximum group nesting depth
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

type ParseResult<T> = std::result::Result<T, SyntaxError>;

/// Optional syntax accepted by the parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserFeatures {
    /// `\p{...}` and `\P{...}` in unicode mode
    pub unicode_property_escape: bool,
    /// `(?<name>...)` and `\k<name>`
    pub named_groups: bool,
    /// `(?<=...)` and `(?<!...)`
    pub lookbehind: bool,
    /// `(?ims-ims:...)`
    pub modifiers: bool,
}

impl ParserFeatures {
    /// Every optional feature enabled
    pub fn all() -> Self {
        Self {
            unicode_property_escape: true,
            named_groups: true,
            lookbehind: true,
            modifiers: true,
        }
    }
}

/// Parse a pattern (the text between the slashes of a regex literal)
///
/// # Example
///
/// ```rust
/// use es_regex_rewrite::pattern::ast::Term;
/// use es_regex_rewrite::pattern::parser::{parse, ParserFeatures};
///
/// let term = parse("a|b", false, ParserFeatures::all()).unwrap();
/// assert!(matches!(term, Term::Disjunction(_)));
///
/// assert!(parse("(a", false, ParserFeatures::all()).is_err());
/// ```
pub fn parse(pattern: &str, unicode: bool, features: ParserFeatures) -> ParseResult<Term> {
    log_debug!("parsing pattern of {} bytes, unicode: {}", pattern.len(), unicode);
    Parser::new(pattern, unicode, features).parse_pattern()
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    unicode: bool,
    features: ParserFeatures,
    /// Capturing groups in the whole pattern, from the pre-scan
    capture_count: u32,
    /// Whether the pattern defines any named group, from the pre-scan
    has_named_groups: bool,
    /// Low surrogate still owed by an astral class member without `u`
    pending_low: Option<u32>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, unicode: bool, features: ParserFeatures) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let (capture_count, has_named_groups) = scan_groups(&chars);
        Self {
            source,
            chars,
            pos: 0,
            unicode,
            features,
            capture_count,
            has_named_groups: has_named_groups && features.named_groups,
            pending_low: None,
            depth: 0,
        }
    }

    fn parse_pattern(mut self) -> ParseResult<Term> {
        let term = self.parse_disjunction()?;
        match self.peek() {
            None => Ok(term),
            Some(')') => Err(self.error("Unmatched ')'")),
            Some(_) => Err(self.error("Unexpected character")),
        }
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    #[inline]
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    #[inline]
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn looking_at(&self, text: &str) -> bool {
        let mut index = self.pos;
        for expected in text.chars() {
            if self.chars.get(index) != Some(&expected) {
                return false;
            }
            index += 1;
        }
        true
    }

    fn eat_str(&mut self, text: &str) -> bool {
        if self.looking_at(text) {
            self.pos += text.chars().count();
            true
        } else {
            false
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Value whose source text runs from `start` to the cursor
    fn value(&self, code_point: u32, start: usize) -> Value {
        Value {
            code_point,
            raw: self.slice(start, self.pos),
        }
    }

    fn byte_offset(&self, pos: usize) -> usize {
        self.chars[..pos.min(self.chars.len())]
            .iter()
            .map(|c| c.len_utf8())
            .sum()
    }

    fn error(&self, message: &str) -> SyntaxError {
        self.error_at(message, self.pos)
    }

    fn error_at(&self, message: &str, pos: usize) -> SyntaxError {
        SyntaxError::at(message, self.source, self.byte_offset(pos))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    fn parse_disjunction(&mut self) -> ParseResult<Term> {
        let mut alternatives = vec![self.parse_alternative()?];
        while self.eat('|') {
            alternatives.push(self.parse_alternative()?);
        }
        Ok(if alternatives.len() == 1 {
            alternatives.swap_remove(0)
        } else {
            Term::Disjunction(alternatives)
        })
    }

    fn parse_alternative(&mut self) -> ParseResult<Term> {
        let mut terms = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            terms.push(self.parse_term()?);
        }
        Ok(if terms.is_empty() {
            Term::Empty
        } else {
            Term::Alternative(terms)
        })
    }

    fn parse_term(&mut self) -> ParseResult<Term> {
        let (atom, quantifiable) = match self.peek() {
            Some('^') => {
                self.pos += 1;
                (Term::Anchor(AnchorKind::Start), false)
            }
            Some('$') => {
                self.pos += 1;
                (Term::Anchor(AnchorKind::End), false)
            }
            Some('\\') if self.peek_at(1) == Some('b') => {
                self.pos += 2;
                (Term::Anchor(AnchorKind::Boundary), false)
            }
            Some('\\') if self.peek_at(1) == Some('B') => {
                self.pos += 2;
                (Term::Anchor(AnchorKind::NotBoundary), false)
            }
            // Lookaheads are quantifiable outside unicode mode
            Some('(') if self.looking_at("(?=") || self.looking_at("(?!") => {
                (self.parse_group()?, !self.unicode)
            }
            Some('(') if self.looking_at("(?<=") || self.looking_at("(?<!") => {
                (self.parse_group()?, false)
            }
            _ => (self.parse_atom()?, true),
        };
        self.parse_quantifier(atom, quantifiable)
    }

    fn parse_quantifier(&mut self, atom: Term, quantifiable: bool) -> ParseResult<Term> {
        let start = self.pos;
        let bounds = match self.peek() {
            Some('*') => {
                self.pos += 1;
                Some((0, None))
            }
            Some('+') => {
                self.pos += 1;
                Some((1, None))
            }
            Some('?') => {
                self.pos += 1;
                Some((0, Some(1)))
            }
            Some('{') => self.scan_braces(self.pos).map(|(min, max, end)| {
                self.pos = end;
                (min, max)
            }),
            _ => None,
        };

        let Some((min, max)) = bounds else {
            return Ok(atom);
        };
        if !quantifiable {
            return Err(self.error_at("Nothing to repeat", start));
        }
        if max.is_some_and(|max| min > max) {
            return Err(self.error_at("numbers out of order in {} quantifier", start));
        }
        let greedy = !self.eat('?');

        Ok(Term::Quantifier(Quantifier {
            min,
            max,
            greedy,
            raw: self.slice(start, self.pos),
            body: Box::new(atom),
        }))
    }

    /// Scan `{n}`, `{n,}` or `{n,m}` starting at `pos` without consuming
    fn scan_braces(&self, pos: usize) -> Option<(u32, Option<u32>, usize)> {
        if self.chars.get(pos) != Some(&'{') {
            return None;
        }
        let (min, mut index) = self.scan_decimal(pos + 1)?;
        let max = if self.chars.get(index) == Some(&',') {
            index += 1;
            match self.scan_decimal(index) {
                Some((max, next)) => {
                    index = next;
                    Some(max)
                }
                None => None,
            }
        } else {
            Some(min)
        };
        if self.chars.get(index) != Some(&'}') {
            return None;
        }
        Some((min, max, index + 1))
    }

    /// Scan decimal digits starting at `pos`, saturating on overflow
    fn scan_decimal(&self, pos: usize) -> Option<(u32, usize)> {
        let mut index = pos;
        let mut value: u32 = 0;
        while let Some(digit) = self.chars.get(index).and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(digit);
            index += 1;
        }
        (index > pos).then_some((value, index))
    }

    fn parse_atom(&mut self) -> ParseResult<Term> {
        let Some(c) = self.peek() else {
            return Err(self.error("Unexpected end of pattern"));
        };
        match c {
            '.' => {
                self.pos += 1;
                Ok(Term::Dot)
            }
            '(' => self.parse_group(),
            '[' => self.parse_class(),
            '\\' => self.parse_atom_escape(),
            '*' | '+' | '?' => Err(self.error("Nothing to repeat")),
            '{' if self.unicode => Err(self.error("Lone quantifier brackets")),
            '{' if self.scan_braces(self.pos).is_some() => Err(self.error("Nothing to repeat")),
            '}' | ']' if self.unicode => Err(self.error("Lone quantifier brackets")),
            _ => {
                self.pos += 1;
                Ok(Term::Value(Value::symbol(c)))
            }
        }
    }

    fn parse_group(&mut self) -> ParseResult<Term> {
        let start = self.pos;
        self.pos += 1;

        let (behavior, name, modifiers) = if self.eat_str("?:") {
            (GroupBehavior::Ignore, None, None)
        } else if self.eat_str("?=") {
            (GroupBehavior::Lookahead, None, None)
        } else if self.eat_str("?!") {
            (GroupBehavior::NegativeLookahead, None, None)
        } else if self.looking_at("?<=") || self.looking_at("?<!") {
            if !self.features.lookbehind {
                return Err(self.error_at("Invalid group", start));
            }
            let negative = self.peek_at(2) == Some('!');
            self.pos += 3;
            let behavior = if negative {
                GroupBehavior::NegativeLookbehind
            } else {
                GroupBehavior::Lookbehind
            };
            (behavior, None, None)
        } else if self.looking_at("?<") {
            if !self.features.named_groups {
                return Err(self.error_at("Invalid group", start));
            }
            self.pos += 2;
            (GroupBehavior::Normal, Some(self.parse_group_name()?), None)
        } else if self.features.modifiers
            && self.peek() == Some('?')
            && matches!(self.peek_at(1), Some('i' | 'm' | 's' | '-'))
        {
            self.pos += 1;
            let modifiers = self.parse_modifiers(start)?;
            (GroupBehavior::Ignore, None, Some(modifiers))
        } else if self.peek() == Some('?') {
            return Err(self.error_at("Invalid group", start));
        } else {
            (GroupBehavior::Normal, None, None)
        };

        self.depth += 1;
        if self.depth > DEFAULT_MAX_NESTING_DEPTH {
            return Err(self.error_at("Pattern nested too deeply", start));
        }
        let body = self.parse_disjunction()?;
        self.depth -= 1;

        if !self.eat(')') {
            return Err(self.error("Unterminated group"));
        }
        Ok(Term::Group(Group {
            behavior,
            name,
            modifiers,
            body: Box::new(body),
        }))
    }

    /// Parse `ims-ims:` after `(?`
    fn parse_modifiers(&mut self, start: usize) -> ParseResult<Modifiers> {
        let flags_start = self.pos;
        let enabling = self.scan_modifier_flags();
        let dash = self.eat('-');
        let disabling = if dash {
            self.scan_modifier_flags()
        } else {
            String::new()
        };
        if !self.eat(':') {
            return Err(self.error_at("Invalid group", start));
        }
        if dash && enabling.is_empty() && disabling.is_empty() {
            return Err(self.error_at("Invalid modifiers", start));
        }

        let mut seen = String::new();
        for flag in enabling.chars().chain(disabling.chars()) {
            if seen.contains(flag) {
                return Err(self.error_at("Repeated flag in modifiers", start));
            }
            seen.push(flag);
        }

        Ok(Modifiers {
            enabling,
            disabling,
            raw: self.slice(flags_start, self.pos - 1),
        })
    }

    fn scan_modifier_flags(&mut self) -> String {
        let mut flags = String::new();
        while let Some(flag @ ('i' | 'm' | 's')) = self.peek() {
            flags.push(flag);
            self.pos += 1;
        }
        flags
    }

    /// Parse `name>` after the opening `<`
    fn parse_group_name(&mut self) -> ParseResult<GroupName> {
        let start = self.pos;
        let mut value = String::new();

        loop {
            let Some(c) = self.peek() else {
                return Err(self.error_at("Invalid capture group name", start));
            };
            if c == '>' {
                break;
            }
            self.pos += 1;
            let ch = if c == '\\' {
                if !self.eat('u') {
                    return Err(self.error_at("Invalid capture group name", start));
                }
                match self.scan_unicode_escape(true).and_then(char::from_u32) {
                    Some(ch) => ch,
                    None => return Err(self.error_at("Invalid Unicode escape", start)),
                }
            } else {
                c
            };

            let valid = if value.is_empty() {
                is_identifier_start(ch)
            } else {
                is_identifier_part(ch)
            };
            if !valid {
                return Err(self.error_at("Invalid capture group name", start));
            }
            value.push(ch);
        }

        if value.is_empty() {
            return Err(self.error_at("Invalid capture group name", start));
        }
        let raw = self.slice(start, self.pos);
        self.pos += 1;
        Ok(GroupName { value, raw })
    }

    // ------------------------------------------------------------------
    // Escapes
    // ------------------------------------------------------------------

    fn parse_atom_escape(&mut self) -> ParseResult<Term> {
        let start = self.pos;
        self.pos += 1;
        let Some(c) = self.peek() else {
            return Err(self.error_at("\\ at end of pattern", start));
        };

        if let Some(escape) = ClassEscape::from_char(c) {
            self.pos += 1;
            return Ok(Term::ClassEscape(escape));
        }
        match c {
            '1'..='9' => self.parse_decimal_escape(start),
            'p' | 'P' if self.unicode => {
                Ok(Term::PropertyEscape(self.parse_property_escape(start)?))
            }
            'k' if self.unicode || self.has_named_groups => self.parse_named_reference(start),
            _ => Ok(Term::Value(self.parse_character_escape(start, false)?)),
        }
    }

    /// `\N` outside a class: a backreference when the group exists
    fn parse_decimal_escape(&mut self, start: usize) -> ParseResult<Term> {
        let (index, end) = self.scan_decimal(self.pos).unwrap_or((0, self.pos));
        if index >= 1 && index <= self.capture_count {
            self.pos = end;
            return Ok(Term::Reference(Reference::Index(index)));
        }
        if self.unicode {
            return Err(self.error_at("Invalid escape", start));
        }
        Ok(Term::Value(self.parse_legacy_digit_escape(start)))
    }

    /// `\8`, `\9` or a legacy octal escape; the cursor is on the first digit
    fn parse_legacy_digit_escape(&mut self, start: usize) -> Value {
        let Some(mut value) = self.peek().and_then(|c| c.to_digit(8)) else {
            // \8 and \9 are identity escapes
            let code_point = self.peek().map_or(0, |c| c as u32);
            self.pos += 1;
            return self.value(code_point, start);
        };
        self.pos += 1;

        let max_digits = if value <= 3 { 3 } else { 2 };
        for _ in 1..max_digits {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(digit) => {
                    value = value * 8 + digit;
                    self.pos += 1;
                }
                None => break,
            }
        }
        self.value(value, start)
    }

    /// The cursor is on `p` or `P`
    fn parse_property_escape(&mut self, start: usize) -> ParseResult<PropertyEscape> {
        if !self.features.unicode_property_escape {
            return Err(self.error_at("Invalid escape", start));
        }
        let negative = self.peek() == Some('P');
        self.pos += 1;
        if !self.eat('{') {
            return Err(self.error_at("Invalid property name", start));
        }

        let payload_start = self.pos;
        while let Some(c) = self.peek() {
            if c == '}' {
                break;
            }
            if !(c.is_ascii_alphanumeric() || c == '_' || c == '=') {
                return Err(self.error_at("Invalid property name", start));
            }
            self.pos += 1;
        }
        let payload = self.slice(payload_start, self.pos);
        if !self.eat('}') || payload.is_empty() {
            return Err(self.error_at("Invalid property name", start));
        }

        Ok(PropertyEscape { payload, negative })
    }

    /// The cursor is on `k`
    fn parse_named_reference(&mut self, start: usize) -> ParseResult<Term> {
        self.pos += 1;
        if !self.eat('<') {
            return Err(self.error_at("Invalid named reference", start));
        }
        let name = self
            .parse_group_name()
            .map_err(|_| self.error_at("Invalid named reference", start))?;
        Ok(Term::Reference(Reference::Named(name)))
    }

    /// Escapes that denote a single character; the cursor is after the
    /// backslash
    fn parse_character_escape(&mut self, start: usize, in_class: bool) -> ParseResult<Value> {
        let Some(c) = self.peek() else {
            return Err(self.error_at("\\ at end of pattern", start));
        };

        let control = match c {
            't' => Some(0x09),
            'n' => Some(0x0A),
            'v' => Some(0x0B),
            'f' => Some(0x0C),
            'r' => Some(0x0D),
            _ => None,
        };
        if let Some(code_point) = control {
            self.pos += 1;
            return Ok(self.value(code_point, start));
        }

        match c {
            'c' => {
                let letter = self.peek_at(1).filter(|&l| {
                    l.is_ascii_alphabetic()
                        || (in_class && !self.unicode && (l.is_ascii_digit() || l == '_'))
                });
                if let Some(letter) = letter {
                    self.pos += 2;
                    return Ok(self.value(letter as u32 % 32, start));
                }
                if self.unicode {
                    return Err(self.error_at("Invalid unicode escape", start));
                }
                // The backslash stands for itself and `c` is read next
                Ok(Value {
                    code_point: 0x5C,
                    raw: "\\".to_string(),
                })
            }
            '0' if !self.peek_at(1).is_some_and(|d| d.is_ascii_digit()) => {
                self.pos += 1;
                Ok(self.value(0, start))
            }
            '0'..='9' => {
                if self.unicode {
                    let message = if in_class {
                        "Invalid class escape"
                    } else {
                        "Invalid decimal escape"
                    };
                    return Err(self.error_at(message, start));
                }
                Ok(self.parse_legacy_digit_escape(start))
            }
            'x' => {
                self.pos += 1;
                if let Some(code_point) = self.scan_hex(self.pos, 2) {
                    self.pos += 2;
                    return Ok(self.value(code_point, start));
                }
                if self.unicode {
                    return Err(self.error_at("Invalid escape", start));
                }
                Ok(self.value('x' as u32, start))
            }
            'u' => {
                self.pos += 1;
                match self.scan_unicode_escape(self.unicode) {
                    Some(code_point) => Ok(self.value(code_point, start)),
                    None if self.unicode => Err(self.error_at("Invalid Unicode escape", start)),
                    None => Ok(self.value('u' as u32, start)),
                }
            }
            _ => {
                let allowed =
                    !self.unicode || is_syntax_character(c) || c == '/' || (in_class && c == '-');
                if !allowed {
                    return Err(self.error_at("Invalid escape", start));
                }
                self.pos += 1;
                Ok(self.value(c as u32, start))
            }
        }
    }

    /// Scan the part of a `\u` escape after the `u`
    ///
    /// In unicode mode `\u{...}` is accepted and a surrogate pair written as
    /// two escapes is combined. Returns `None` without consuming anything
    /// when the escape is malformed.
    fn scan_unicode_escape(&mut self, unicode: bool) -> Option<u32> {
        let start = self.pos;

        if unicode && self.peek() == Some('{') {
            let mut index = start + 1;
            let mut value: u32 = 0;
            while let Some(digit) = self.chars.get(index).and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(digit);
                index += 1;
            }
            if index == start + 1 || self.chars.get(index) != Some(&'}') || value > 0x10FFFF {
                return None;
            }
            self.pos = index + 1;
            return Some(value);
        }

        let lead = self.scan_hex(start, 4)?;
        self.pos = start + 4;

        if unicode && (0xD800..=0xDBFF).contains(&lead) && self.looking_at("\\u") {
            if let Some(trail) = self.scan_hex(self.pos + 2, 4) {
                if (0xDC00..=0xDFFF).contains(&trail) {
                    self.pos += 6;
                    return Some(0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00));
                }
            }
        }
        Some(lead)
    }

    /// Exactly `count` hex digits at `pos`
    fn scan_hex(&self, pos: usize, count: usize) -> Option<u32> {
        let digits = self.chars.get(pos..pos + count)?;
        digits
            .iter()
            .try_fold(0u32, |value, c| Some(value * 16 + c.to_digit(16)?))
    }

    // ------------------------------------------------------------------
    // Character classes
    // ------------------------------------------------------------------

    fn parse_class(&mut self) -> ParseResult<Term> {
        let start = self.pos;
        self.pos += 1;
        let negative = self.eat('^');
        let mut body = Vec::new();

        loop {
            if self.pending_low.is_none() {
                match self.peek() {
                    None => return Err(self.error_at("Unterminated character class", start)),
                    Some(']') => {
                        self.pos += 1;
                        break;
                    }
                    Some(_) => {}
                }
            }

            let first = self.parse_class_atom()?;
            if self.pending_low.is_some()
                || self.peek() != Some('-')
                || matches!(self.peek_at(1), None | Some(']'))
            {
                body.push(first);
                continue;
            }

            let dash = self.pos;
            self.pos += 1;
            let second = self.parse_class_atom()?;
            match (first, second) {
                (ClassItem::Value(min), ClassItem::Value(max)) => {
                    if min.code_point > max.code_point {
                        return Err(
                            self.error_at("Range out of order in character class", dash)
                        );
                    }
                    body.push(ClassItem::Range { min, max });
                }
                (first, second) => {
                    if self.unicode {
                        return Err(self.error_at("Invalid character class", dash));
                    }
                    // Web compatibility: `[\d-z]` is three members
                    body.push(first);
                    body.push(ClassItem::Value(Value::symbol('-')));
                    body.push(second);
                }
            }
        }

        Ok(Term::CharacterClass(CharacterClass { negative, body }))
    }

    fn parse_class_atom(&mut self) -> ParseResult<ClassItem> {
        if let Some(low) = self.pending_low.take() {
            // The high surrogate carried the source text
            return Ok(ClassItem::Value(Value {
                code_point: low,
                raw: String::new(),
            }));
        }

        let start = self.pos;
        let Some(c) = self.peek() else {
            return Err(self.error("Unterminated character class"));
        };
        if c != '\\' {
            self.pos += 1;
            if !self.unicode && c.len_utf16() == 2 {
                let mut units = [0u16; 2];
                c.encode_utf16(&mut units);
                self.pending_low = Some(u32::from(units[1]));
                return Ok(ClassItem::Value(Value {
                    code_point: u32::from(units[0]),
                    raw: c.to_string(),
                }));
            }
            return Ok(ClassItem::Value(Value::symbol(c)));
        }

        self.pos += 1;
        let Some(escaped) = self.peek() else {
            return Err(self.error_at("\\ at end of pattern", start));
        };
        if let Some(escape) = ClassEscape::from_char(escaped) {
            self.pos += 1;
            return Ok(ClassItem::Escape(escape));
        }
        match escaped {
            'b' => {
                self.pos += 1;
                Ok(ClassItem::Value(self.value(0x08, start)))
            }
            'p' | 'P' if self.unicode => {
                Ok(ClassItem::Property(self.parse_property_escape(start)?))
            }
            _ => Ok(ClassItem::Value(self.parse_character_escape(start, true)?)),
        }
    }
}

/// Count capturing groups and detect named groups ahead of parsing
fn scan_groups(chars: &[char]) -> (u32, bool) {
    let mut count = 0u32;
    let mut named = false;
    let mut in_class = false;
    let mut index = 0;

    while index < chars.len() {
        match chars[index] {
            '\\' => index += 1,
            '[' => in_class = true,
            ']' => in_class = false,
            '(' if !in_class => {
                if chars.get(index + 1) != Some(&'?') {
                    count += 1;
                } else if chars.get(index + 2) == Some(&'<')
                    && !matches!(chars.get(index + 3), Some('=') | Some('!'))
                {
                    count += 1;
                    named = true;
                }
            }
            _ => {}
        }
        index += 1;
    }

    (count, named)
}

fn is_syntax_character(c: char) -> bool {
    matches!(
        c,
        '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|'
    )
}

fn is_identifier_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_identifier_part(c: char) -> bool {
    c == '$' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_u(pattern: &str) -> ParseResult<Term> {
        parse(pattern, true, ParserFeatures::all())
    }

    fn parse_legacy(pattern: &str) -> ParseResult<Term> {
        parse(pattern, false, ParserFeatures::all())
    }

    fn value(code_point: u32, raw: &str) -> Term {
        Term::Value(Value {
            code_point,
            raw: raw.to_string(),
        })
    }

    #[test]
    fn test_simple_sequence() {
        let term = parse_legacy("ab").unwrap();
        assert_eq!(
            term,
            Term::Alternative(vec![value(0x61, "a"), value(0x62, "b")])
        );
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(parse_legacy("").unwrap(), Term::Empty);
        assert_eq!(
            parse_legacy("|").unwrap(),
            Term::Disjunction(vec![Term::Empty, Term::Empty])
        );
    }

    #[test]
    fn test_quantifiers() {
        let Term::Alternative(terms) = parse_legacy("a{2,3}?").unwrap() else {
            panic!("expected alternative");
        };
        let Term::Quantifier(quantifier) = &terms[0] else {
            panic!("expected quantifier");
        };
        assert_eq!(quantifier.min, 2);
        assert_eq!(quantifier.max, Some(3));
        assert!(!quantifier.greedy);
        assert_eq!(quantifier.raw, "{2,3}?");
    }

    #[test]
    fn test_quantifier_errors() {
        assert!(parse_legacy("*a").is_err());
        assert!(parse_legacy("a{3,2}").is_err());
        assert!(parse_legacy("^*").is_err());
        assert!(parse_u("(?=a)*").is_err());
        assert!(parse_legacy("(?=a)*").is_ok());
        assert!(parse_legacy("(?<=a)*").is_err());
    }

    #[test]
    fn test_braces_outside_unicode_mode() {
        assert!(parse_legacy("a{").is_ok());
        assert!(parse_legacy("}").is_ok());
        assert!(parse_legacy("]").is_ok());
        assert!(parse_legacy("{1}").is_err());
        assert!(parse_u("a{").is_err());
        assert!(parse_u("}").is_err());
    }

    #[test]
    fn test_groups() {
        let Term::Alternative(terms) = parse_legacy("(?<year>a)(?:b)(?<!c)").unwrap() else {
            panic!("expected alternative");
        };
        let behaviors: Vec<_> = terms
            .iter()
            .map(|term| match term {
                Term::Group(group) => group.behavior,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(
            behaviors,
            vec![
                GroupBehavior::Normal,
                GroupBehavior::Ignore,
                GroupBehavior::NegativeLookbehind
            ]
        );
        let Term::Group(named) = &terms[0] else {
            panic!("expected group");
        };
        assert_eq!(named.name.as_ref().map(|name| name.value.as_str()), Some("year"));
    }

    #[test]
    fn test_group_errors() {
        assert!(parse_legacy("(a").is_err());
        assert!(parse_legacy("a)").is_err());
        assert!(parse_legacy("(?a)").is_err());
        assert!(parse_legacy("(?<1a>x)").is_err());
        assert!(parse_legacy("(?<>x)").is_err());
    }

    #[test]
    fn test_modifier_groups() {
        let Term::Group(group) = parse_legacy("(?i-s:a)").unwrap() else {
            panic!("expected group");
        };
        assert_eq!(group.behavior, GroupBehavior::Ignore);
        let modifiers = group.modifiers.unwrap();
        assert_eq!(modifiers.enabling, "i");
        assert_eq!(modifiers.disabling, "s");
        assert_eq!(modifiers.raw, "i-s");

        assert!(parse_u("(?ms:a)").is_ok());
        assert!(parse_legacy("(?i-:a)").is_ok());
    }

    #[test]
    fn test_modifier_errors() {
        for pattern in ["(?-:a)", "(?ii:a)", "(?i-i:a)", "(?x:a)", "(?i)", "(?i-s)"] {
            assert!(parse_legacy(pattern).is_err(), "{:?} should be rejected", pattern);
        }
        let features = ParserFeatures {
            modifiers: false,
            ..ParserFeatures::all()
        };
        assert!(parse("(?i:a)", false, features).is_err());
    }

    #[test]
    fn test_astral_class_member_without_unicode() {
        let Term::CharacterClass(class) = parse_legacy("[😀]").unwrap() else {
            panic!("expected class");
        };
        let units: Vec<u32> = class
            .body
            .iter()
            .map(|item| match item {
                ClassItem::Value(value) => value.code_point,
                other => panic!("unexpected {:?}", other),
            })
            .collect();
        assert_eq!(units, vec![0xD83D, 0xDE00]);

        // Reads as \uD83D \uDE00-\uD83D \uDE02
        assert!(parse_legacy("[😀-😂]").is_err());
        assert!(parse_u("[😀-😂]").is_ok());
        assert!(parse_legacy("[a-😀]").is_ok());
    }

    #[test]
    fn test_lookbehind_feature() {
        let features = ParserFeatures {
            lookbehind: false,
            ..ParserFeatures::all()
        };
        assert!(parse("(?<=a)b", false, features).is_err());
        assert!(parse("(?<a>b)", false, features).is_ok());
    }

    #[test]
    fn test_escaped_group_name() {
        let Term::Group(group) = parse_legacy("(?<\\u0061b>x)").unwrap() else {
            panic!("expected group");
        };
        let name = group.name.unwrap();
        assert_eq!(name.value, "ab");
        assert_eq!(name.raw, "\\u0061b");
    }

    #[test]
    fn test_references() {
        let Term::Alternative(terms) = parse_legacy("(a)\\1\\k<x>(?<x>b)").unwrap() else {
            panic!("expected alternative");
        };
        assert_eq!(terms[1], Term::Reference(Reference::Index(1)));
        assert!(matches!(&terms[2], Term::Reference(Reference::Named(name)) if name.value == "x"));
    }

    #[test]
    fn test_legacy_escapes() {
        // No groups: \1 is an octal escape and \8 an identity escape
        assert_eq!(parse_legacy("\\1").unwrap(), value(1, "\\1"));
        assert_eq!(parse_legacy("\\8").unwrap(), value(0x38, "\\8"));
        assert_eq!(parse_legacy("\\377").unwrap(), value(0xFF, "\\377"));
        assert_eq!(
            parse_legacy("\\477").unwrap(),
            Term::Alternative(vec![value(0o47, "\\47"), value(0x37, "7")])
        );
        assert_eq!(parse_legacy("\\k").unwrap(), value(0x6B, "\\k"));
        assert_eq!(parse_legacy("\\p").unwrap(), value(0x70, "\\p"));
    }

    #[test]
    fn test_control_escape_fallback() {
        assert_eq!(parse_legacy("\\cJ").unwrap(), value(0x0A, "\\cJ"));
        assert_eq!(
            parse_legacy("\\c1").unwrap(),
            Term::Alternative(vec![value(0x5C, "\\"), value(0x63, "c"), value(0x31, "1")])
        );
        assert!(parse_u("\\c1").is_err());
    }

    #[test]
    fn test_unicode_mode_escapes() {
        assert_eq!(parse_u("\\u{1F600}").unwrap(), value(0x1F600, "\\u{1F600}"));
        assert_eq!(
            parse_u("\\uD83D\\uDE00").unwrap(),
            value(0x1F600, "\\uD83D\\uDE00")
        );
        assert!(parse_u("\\u{110000}").is_err());
        assert!(parse_u("\\a").is_err());
        assert!(parse_u("\\1").is_err());
        assert!(parse_u("\\k").is_err());
        assert_eq!(parse_u("\\/").unwrap(), value(0x2F, "\\/"));
    }

    #[test]
    fn test_surrogate_escapes_stay_separate_without_unicode() {
        assert_eq!(
            parse_legacy("\\uD83D\\uDE00").unwrap(),
            Term::Alternative(vec![value(0xD83D, "\\uD83D"), value(0xDE00, "\\uDE00")])
        );
    }

    #[test]
    fn test_property_escapes() {
        assert_eq!(
            parse_u("\\P{Script=Greek}").unwrap(),
            Term::PropertyEscape(PropertyEscape {
                payload: "Script=Greek".to_string(),
                negative: true,
            })
        );
        assert!(parse_u("\\p{}").is_err());
        assert!(parse_u("\\p{L").is_err());
        assert!(parse_u("\\pL").is_err());

        let features = ParserFeatures {
            unicode_property_escape: false,
            ..ParserFeatures::all()
        };
        assert!(parse("\\p{L}", true, features).is_err());
    }

    #[test]
    fn test_character_class() {
        let Term::CharacterClass(class) = parse_legacy("[^a-z\\d_]").unwrap() else {
            panic!("expected class");
        };
        assert!(class.negative);
        assert_eq!(class.body.len(), 3);
        assert!(matches!(class.body[0], ClassItem::Range { .. }));
        assert_eq!(class.body[1], ClassItem::Escape(ClassEscape::Digit));
    }

    #[test]
    fn test_class_edge_cases() {
        assert!(parse_legacy("[z-a]").is_err());
        assert!(parse_legacy("[a").is_err());
        assert!(parse_legacy("[a-]").is_ok());
        assert!(parse_legacy("[\\d-z]").is_ok());
        assert!(parse_u("[\\d-z]").is_err());

        let Term::CharacterClass(class) = parse_legacy("[\\b]").unwrap() else {
            panic!("expected class");
        };
        assert_eq!(class.body, vec![ClassItem::Value(Value {
            code_point: 0x08,
            raw: "\\b".to_string(),
        })]);
    }

    #[test]
    fn test_error_position() {
        let err = parse_legacy("ab(c").unwrap_err();
        assert_eq!(err.message, "Unterminated group");
        assert_eq!(err.position.offset, 4);
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!(
            "{}a{}",
            "(".repeat(DEFAULT_MAX_NESTING_DEPTH + 1),
            ")".repeat(DEFAULT_MAX_NESTING_DEPTH + 1)
        );
        let err = parse_legacy(&deep).unwrap_err();
        assert_eq!(err.message, "Pattern nested too deeply");
    }
}
