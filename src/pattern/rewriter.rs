//! Pattern rewriting
//!
//! [`rewrite_pattern`] turns a pattern written for a modern engine into an
//! equivalent one for an engine that lacks some features:
//!
//! | Feature | Option | Rewritten as |
//! |---------|--------|--------------|
//! | `u` flag | default | surrogate pair alternations |
//! | `s` flag | `dot_all_flag` | `[\s\S]` for `.` |
//! | `\p{...}` | `unicode_property_escape` | explicit sets |
//! | `(?<name>...)` | `named_group` | numbered groups and `\N` |
//! | `(?i:...)` | `modifiers` | non-capturing groups with the flag emulated |
//!
//! A rewrite runs in stages: parse the flags and the pattern, resolve group
//! names over the whole tree, rebuild the tree bottom-up, generate the
//! source. Any error aborts the call; there is no partial output.

use super::ast::{
    AnchorKind, CharacterClass, ClassItem, Group, Quantifier, Reference, Term, Value,
};
use super::char_class::{escape_set, ClassEscape};
use super::code_point_set::{
    astral_set, bmp_set, dot_set_unicode, newline_set, unicode_set, CodePointSet,
    SerializeOptions,
};
use super::error::Result;
use super::generator::generate;
use super::groups::{mentions_group_names, GroupRegistry};
use super::options::{ModifiersMode, PatternFlags, RewriteContext, RewriteOptions};
use super::parser::{self, ParserFeatures};
use super::unicode_property::resolve_property_escape;

/// Rewrite a pattern for a target without the enabled features
///
/// `flags` is the flags string of the regular expression (e.g. `"gu"`).
///
/// # Example
///
/// ```rust
/// use es_regex_rewrite::pattern::options::RewriteOptions;
/// use es_regex_rewrite::pattern::rewriter::rewrite_pattern;
///
/// let options = RewriteOptions::new().with_named_group(true);
/// let rewritten = rewrite_pattern("(?<year>\\d{4})-\\k<year>", "", &options).unwrap();
/// assert_eq!(rewritten, "(\\d{4})-\\1");
/// ```
pub fn rewrite_pattern(pattern: &str, flags: &str, options: &RewriteOptions) -> Result<String> {
    PatternRewriter::new(*options).rewrite(pattern, flags)
}

/// Named group callback: receives the name and the 1-based capture index
type NamedGroupCallback<'a> = Box<dyn FnMut(&str, u32) + 'a>;

/// New flags callback: receives the flags of the rewritten pattern
type NewFlagsCallback<'a> = Box<dyn FnMut(&str) + 'a>;

/// A configured rewriter with optional observers
///
/// # Example
///
/// ```rust
/// use es_regex_rewrite::pattern::options::RewriteOptions;
/// use es_regex_rewrite::pattern::rewriter::PatternRewriter;
///
/// let mut groups = Vec::new();
/// let mut new_flags = String::new();
/// {
///     let mut rewriter = PatternRewriter::new(RewriteOptions::new().with_named_group(true))
///         .on_named_group(|name, index| groups.push((name.to_string(), index)))
///         .on_new_flags(|flags| new_flags = flags.to_string());
///     rewriter.rewrite("(?<a>x)(?<b>y)", "gu").unwrap();
/// }
/// assert_eq!(groups, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
/// assert_eq!(new_flags, "g");
/// ```
pub struct PatternRewriter<'a> {
    options: RewriteOptions,
    on_named_group: Option<NamedGroupCallback<'a>>,
    on_new_flags: Option<NewFlagsCallback<'a>>,
}

impl<'a> PatternRewriter<'a> {
    /// Create a rewriter without observers
    pub fn new(options: RewriteOptions) -> Self {
        Self {
            options,
            on_named_group: None,
            on_new_flags: None,
        }
    }

    /// Observe every named group, in source order
    pub fn on_named_group(mut self, callback: impl FnMut(&str, u32) + 'a) -> Self {
        self.on_named_group = Some(Box::new(callback));
        self
    }

    /// Observe the flags of each rewritten pattern
    pub fn on_new_flags(mut self, callback: impl FnMut(&str) + 'a) -> Self {
        self.on_new_flags = Some(Box::new(callback));
        self
    }

    /// Rewrite one pattern
    ///
    /// `on_new_flags` is only called when the rewrite succeeds.
    pub fn rewrite(&mut self, pattern: &str, flags: &str) -> Result<String> {
        self.options.validate()?;
        let parsed_flags = PatternFlags::parse(flags)?;
        let mut context = RewriteContext::new(&parsed_flags, &self.options);

        let features = ParserFeatures {
            unicode_property_escape: true,
            named_groups: true,
            lookbehind: self.options.lookbehind,
            modifiers: self.options.modifiers != ModifiersMode::Off,
        };
        let tree = parser::parse(pattern, parsed_flags.unicode, features)?;

        if context.transform_modifiers {
            let mut disabled = String::new();
            collect_disabled_flags(&tree, &mut disabled);
            if !disabled.is_empty() {
                context = context.lift(&disabled);
            }
        }

        let registry = if !mentions_group_names(pattern) {
            GroupRegistry::default()
        } else if let Some(callback) = self.on_named_group.as_mut() {
            GroupRegistry::collect(&tree, |name, index| callback(name, index))?
        } else {
            GroupRegistry::collect(&tree, |_, _| {})?
        };

        let rewriter = TreeRewriter {
            context,
            registry: &registry,
        };
        let output = generate(&rewriter.rewrite(tree)?);
        log_debug!("rewrote {} bytes into {} bytes", pattern.len(), output.len());

        if let Some(callback) = self.on_new_flags.as_mut() {
            callback(&rewriter.context.output_flags(flags));
        }
        Ok(output)
    }
}

/// Rebuilds a tree according to a context
struct TreeRewriter<'r> {
    context: RewriteContext,
    registry: &'r GroupRegistry,
}

impl TreeRewriter<'_> {
    fn serialize(&self) -> SerializeOptions {
        self.context.serialize
    }

    fn rewrite(&self, term: Term) -> Result<Term> {
        match term {
            Term::Disjunction(alternatives) => Ok(Term::Disjunction(
                alternatives
                    .into_iter()
                    .map(|alternative| self.rewrite(alternative))
                    .collect::<Result<_>>()?,
            )),
            Term::Alternative(terms) => self.rewrite_alternative(terms),
            Term::Value(value) => Ok(self.rewrite_value(value)),
            Term::Dot => Ok(self.rewrite_dot()),
            Term::ClassEscape(escape) => Ok(self.rewrite_class_escape(escape)),
            Term::PropertyEscape(escape) if self.context.emulate_properties => {
                let set = resolve_property_escape(&escape.payload, escape.negative)?;
                Ok(Term::Raw(set.to_atom(self.serialize())))
            }
            Term::CharacterClass(class) => self.rewrite_class(class),
            Term::Group(Group {
                behavior,
                name,
                modifiers: Some(modifiers),
                body,
            }) if self.context.transform_modifiers => {
                let scoped = TreeRewriter {
                    context: self.context.with_modifiers(&modifiers),
                    registry: self.registry,
                };
                Ok(Term::Group(Group {
                    behavior,
                    name,
                    modifiers: None,
                    body: Box::new(scoped.rewrite(*body)?),
                }))
            }
            Term::Group(Group {
                behavior,
                name,
                modifiers,
                body,
            }) => Ok(Term::Group(Group {
                behavior,
                name: if self.context.named_group { None } else { name },
                modifiers,
                body: Box::new(self.rewrite(*body)?),
            })),
            Term::Quantifier(Quantifier {
                min,
                max,
                greedy,
                raw,
                body,
            }) => Ok(Term::Quantifier(Quantifier {
                min,
                max,
                greedy,
                raw,
                body: Box::new(self.rewrite(*body)?),
            })),
            Term::Reference(Reference::Named(name)) if self.context.named_group => {
                Ok(self.numbered_reference(&name.value))
            }
            Term::Anchor(kind) if self.context.multiline => Ok(self.rewrite_anchor(kind)),
            other => Ok(other),
        }
    }

    fn rewrite_alternative(&self, terms: Vec<Term>) -> Result<Term> {
        let mut rewritten = terms
            .into_iter()
            .map(|term| self.rewrite(term))
            .collect::<Result<Vec<_>>>()?;

        // `\1` followed by `1` would read as `\11`, `\0` followed by `1` as `\01`
        for index in 1..rewritten.len() {
            let guarded = match &rewritten[index - 1] {
                Term::Reference(Reference::Index(_)) => true,
                Term::Raw(text) => ends_with_nul_escape(text),
                Term::Value(value) => ends_with_nul_escape(&value.raw),
                _ => false,
            };
            if guarded && generate(&rewritten[index]).starts_with(|c: char| c.is_ascii_digit()) {
                let term = std::mem::replace(&mut rewritten[index - 1], Term::Empty);
                rewritten[index - 1] = separate_from_digit(term);
            }
        }
        Ok(Term::Alternative(rewritten))
    }

    fn rewrite_value(&self, value: Value) -> Term {
        let context = &self.context;
        if !context.transform_unicode && !context.fold && !context.ascii_fold {
            return Term::Value(value);
        }

        let mut set = CodePointSet::from_code_point(value.code_point);
        if context.fold {
            set.add_folded(value.code_point);
        }
        if context.ascii_fold {
            set.ascii_add_range(value.code_point, value.code_point);
        }

        let plain = set.len() == 1
            && (!context.transform_unicode
                || (value.code_point <= 0xFFFF
                    && !(0xD800..=0xDFFF).contains(&value.code_point)
                    && !value.raw.contains("\\u{")));
        if plain {
            Term::Value(value)
        } else {
            Term::Raw(set.to_atom(self.serialize()))
        }
    }

    fn rewrite_dot(&self) -> Term {
        if self.context.transform_unicode {
            let set = if self.context.dot_matches_all {
                unicode_set()
            } else {
                dot_set_unicode()
            };
            Term::Raw(set.to_atom(self.serialize()))
        } else if self.context.dot_all {
            Term::Raw("[\\s\\S]".to_string())
        } else {
            Term::Dot
        }
    }

    fn rewrite_anchor(&self, kind: AnchorKind) -> Term {
        let newline = newline_set().to_atom(self.serialize());
        match kind {
            AnchorKind::Start => Term::Raw(format!("(?:^|(?<={}))", newline)),
            AnchorKind::End => Term::Raw(format!("(?:$|(?={}))", newline)),
            other => Term::Anchor(other),
        }
    }

    fn rewrite_class_escape(&self, escape: ClassEscape) -> Term {
        if !self.context.transform_unicode && !self.context.fold {
            return Term::ClassEscape(escape);
        }
        let set = escape_set(escape, true, self.context.ignore_case);
        Term::Raw(set.to_atom(self.serialize()))
    }

    fn rewrite_class(&self, class: CharacterClass) -> Result<Term> {
        let context = &self.context;
        let rebuild = context.transform_unicode
            || context.fold
            || context.ascii_fold
            || (context.emulate_properties && class.has_property_escape());
        if !rebuild {
            return Ok(Term::CharacterClass(class));
        }

        let set = self.class_set(&class)?;
        if !class.negative {
            return Ok(Term::Raw(set.to_atom(self.serialize())));
        }
        Ok(Term::Raw(self.negated_class(&set)))
    }

    /// Union of every member of a class
    fn class_set(&self, class: &CharacterClass) -> Result<CodePointSet> {
        let context = &self.context;
        let mut set = CodePointSet::new();

        for item in &class.body {
            match item {
                ClassItem::Value(value) => {
                    set.add(value.code_point);
                    if context.fold {
                        set.add_folded(value.code_point);
                    }
                    if context.ascii_fold {
                        set.ascii_add_range(value.code_point, value.code_point);
                    }
                }
                ClassItem::Range { min, max } => {
                    set.add_range(min.code_point, max.code_point);
                    if context.fold {
                        set.iu_add_range(min.code_point, max.code_point);
                    }
                    if context.ascii_fold {
                        set.ascii_add_range(min.code_point, max.code_point);
                    }
                }
                ClassItem::Escape(escape) => {
                    set.add_set(escape_set(*escape, context.unicode, context.ignore_case));
                }
                ClassItem::Property(escape) => {
                    set.add_set(&resolve_property_escape(&escape.payload, escape.negative)?);
                }
            }
        }

        Ok(set)
    }

    /// Source for a negated class whose members are `set`
    fn negated_class(&self, set: &CodePointSet) -> String {
        let context = &self.context;
        let options = self.serialize();

        // Bracket negation is exact over code points with the `u` flag and
        // over code units without it
        if options.has_unicode_flag || !context.unicode {
            let body = set.to_pattern(options);
            let body = body
                .strip_prefix('[')
                .and_then(|inner| inner.strip_suffix(']'))
                .unwrap_or(&body);
            return format!("[^{}]", body);
        }

        if context.native_ignore_case {
            // Case-insensitive matching of the BMP part is left to the
            // engine; astral code points are listed explicitly
            let mut bmp_or_surrogate = set.intersection(bmp_set());
            bmp_or_surrogate.add_range(0xD800, 0xDFFF);
            let mut astral_complement = astral_set().clone();
            astral_complement.remove_set(set);

            let bmp_options = SerializeOptions {
                bmp_only: true,
                has_unicode_flag: false,
            };
            return format!(
                "(?:(?!{})[\\s\\S]|{})",
                bmp_or_surrogate.to_pattern(bmp_options),
                astral_complement.to_pattern(options)
            );
        }

        set.complement().to_atom(options)
    }

    fn numbered_reference(&self, name: &str) -> Term {
        match self.registry.indices(name) {
            Some(&[index]) => Term::Reference(Reference::Index(index)),
            Some(indices) => {
                let references: String = indices
                    .iter()
                    .map(|index| format!("\\{}", index))
                    .collect();
                Term::Raw(format!("(?:{})", references))
            }
            None => Term::Raw("(?:)".to_string()),
        }
    }
}

/// Append every flag a modifier group disables
fn collect_disabled_flags(term: &Term, disabled: &mut String) {
    match term {
        Term::Disjunction(terms) | Term::Alternative(terms) => {
            for term in terms {
                collect_disabled_flags(term, disabled);
            }
        }
        Term::Group(group) => {
            if let Some(modifiers) = &group.modifiers {
                disabled.push_str(&modifiers.disabling);
            }
            collect_disabled_flags(&group.body, disabled);
        }
        Term::Quantifier(quantifier) => collect_disabled_flags(&quantifier.body, disabled),
        _ => {}
    }
}

/// Whether `text` ends with a `\0` escape rather than an escaped backslash
/// followed by `0`
fn ends_with_nul_escape(text: &str) -> bool {
    text.strip_suffix("\\0")
        .is_some_and(|head| head.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 0)
}

/// Rewrite the end of a term so that a following digit cannot extend it
fn separate_from_digit(term: Term) -> Term {
    match term {
        Term::Reference(Reference::Index(group)) => Term::Raw(format!("(?:\\{})", group)),
        Term::Raw(text) => Term::Raw(widen_nul_escape(&text)),
        Term::Value(value) => Term::Value(Value {
            raw: widen_nul_escape(&value.raw),
            ..value
        }),
        other => other,
    }
}

fn widen_nul_escape(text: &str) -> String {
    let head = text.strip_suffix("\\0").unwrap_or(text);
    format!("{}\\x00", head)
}
