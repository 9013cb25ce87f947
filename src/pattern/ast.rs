//! Pattern AST types
//!
//! The tree produced by [`parse`](super::parser::parse) and consumed by the
//! rewriter and [`generate`](super::generator::generate). Leaves keep the
//! source text they were parsed from so that untouched parts of a pattern
//! are reproduced exactly.
//!
//! Rewriting never mutates a tree in place: the rewriter builds a new tree
//! and uses [`Term::Raw`] for replacement source text.

use super::char_class::ClassEscape;

/// A node of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Two or more alternatives: `a|b|c`
    Disjunction(Vec<Term>),

    /// A sequence of terms
    Alternative(Vec<Term>),

    /// A single literal character
    Value(Value),

    /// `.`
    Dot,

    /// `^`, `$`, `\b` or `\B`
    Anchor(AnchorKind),

    /// `\d`, `\w`, `\s` and their negations outside a class
    ClassEscape(ClassEscape),

    /// `\p{...}` or `\P{...}`
    PropertyEscape(PropertyEscape),

    /// `[...]` or `[^...]`
    CharacterClass(CharacterClass),

    /// Any parenthesized construct
    Group(Group),

    /// A quantified atom
    Quantifier(Quantifier),

    /// A backreference
    Reference(Reference),

    /// An empty alternative
    Empty,

    /// Source text produced by the rewriter, emitted verbatim
    Raw(String),
}

/// A literal character and how it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    /// The code point the literal denotes
    pub code_point: u32,
    /// Source text, e.g. `a`, `\n`, `\u{1F600}`
    pub raw: String,
}

impl Value {
    /// A value written as itself
    pub fn symbol(c: char) -> Self {
        Self {
            code_point: c as u32,
            raw: c.to_string(),
        }
    }
}

/// Kinds of assertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// `^`
    Start,
    /// `$`
    End,
    /// `\b`
    Boundary,
    /// `\B`
    NotBoundary,
}

impl AnchorKind {
    /// Source text of the anchor
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "^",
            Self::End => "$",
            Self::Boundary => "\\b",
            Self::NotBoundary => "\\B",
        }
    }
}

/// A Unicode property escape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEscape {
    /// Text between the braces, e.g. `Script=Greek`
    pub payload: String,
    /// `\P` rather than `\p`
    pub negative: bool,
}

impl PropertyEscape {
    /// Source text of the escape
    pub fn raw(&self) -> String {
        let letter = if self.negative { 'P' } else { 'p' };
        format!("\\{}{{{}}}", letter, self.payload)
    }
}

/// A bracketed character class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterClass {
    /// `[^...]`
    pub negative: bool,
    /// Class members in source order
    pub body: Vec<ClassItem>,
}

impl CharacterClass {
    /// Whether any member is a property escape
    pub fn has_property_escape(&self) -> bool {
        self.body
            .iter()
            .any(|item| matches!(item, ClassItem::Property(_)))
    }
}

/// A member of a character class
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassItem {
    /// A single character
    Value(Value),
    /// `min-max`
    Range {
        /// Lower endpoint
        min: Value,
        /// Upper endpoint
        max: Value,
    },
    /// `\d`, `\w`, `\s` and their negations
    Escape(ClassEscape),
    /// `\p{...}` or `\P{...}`
    Property(PropertyEscape),
}

/// How a group participates in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBehavior {
    /// Capturing group: `(...)` or `(?<name>...)`
    Normal,
    /// Non-capturing group: `(?:...)`
    Ignore,
    /// `(?=...)`
    Lookahead,
    /// `(?!...)`
    NegativeLookahead,
    /// `(?<=...)`
    Lookbehind,
    /// `(?<!...)`
    NegativeLookbehind,
}

impl GroupBehavior {
    /// Text between `(` and the group body, excluding any name
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Ignore => "?:",
            Self::Lookahead => "?=",
            Self::NegativeLookahead => "?!",
            Self::Lookbehind => "?<=",
            Self::NegativeLookbehind => "?<!",
        }
    }

    /// Whether the group is an assertion
    pub fn is_lookaround(self) -> bool {
        matches!(
            self,
            Self::Lookahead | Self::NegativeLookahead | Self::Lookbehind | Self::NegativeLookbehind
        )
    }
}

/// A group name and how it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupName {
    /// The name with escapes decoded
    pub value: String,
    /// Source text between `<` and `>`
    pub raw: String,
}

/// Flags switched on or off by a modifier group such as `(?i-s:...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifiers {
    /// Flags before the `-`, in source order
    pub enabling: String,
    /// Flags after the `-`, in source order
    pub disabling: String,
    /// Source text between `?` and `:`
    pub raw: String,
}

impl Modifiers {
    /// `Some(true)` if `flag` is enabled, `Some(false)` if disabled
    pub fn state(&self, flag: char) -> Option<bool> {
        if self.enabling.contains(flag) {
            Some(true)
        } else if self.disabling.contains(flag) {
            Some(false)
        } else {
            None
        }
    }
}

/// A parenthesized construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Capturing, non-capturing or lookaround
    pub behavior: GroupBehavior,
    /// Name of a named capturing group
    pub name: Option<GroupName>,
    /// Flag modifiers of a non-capturing group
    pub modifiers: Option<Modifiers>,
    /// Contents of the group
    pub body: Box<Term>,
}

/// A quantified atom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantifier {
    /// Minimum repetitions
    pub min: u32,
    /// Maximum repetitions, `None` for unbounded
    pub max: Option<u32>,
    /// `false` for the lazy `?` suffix
    pub greedy: bool,
    /// Source text of the quantifier, e.g. `{2,3}?`
    pub raw: String,
    /// The quantified atom
    pub body: Box<Term>,
}

/// A backreference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `\N`
    Index(u32),
    /// `\k<name>`
    Named(GroupName),
}
