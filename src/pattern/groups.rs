//! Named capturing group registry
//!
//! Named references may point forward (`\k<a>(?<a>x)`), so group names are
//! resolved in a pass of their own before anything is rewritten:
//!
//! 1. [`GroupRegistry::collect`] numbers every capturing group in source
//!    order, records which indices each name was given and which names are
//!    referenced.
//! 2. The rewriter looks names up with [`GroupRegistry::indices`].
//!
//! A name may only be reused by groups in different alternatives of the same
//! disjunction, e.g. `(?:(?<a>x)|(?<a>y))`.

use hashbrown::{HashMap, HashSet};
use memchr::memmem;

use super::ast::{GroupBehavior, Reference, Term};
use super::error::{Result, RewriteError};

/// Group names and their capture indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    names: HashMap<String, Vec<u32>>,
}

impl GroupRegistry {
    /// Number the capturing groups of a tree and resolve its group names
    ///
    /// `on_named_group` is called once per named group, in source order,
    /// with the name and its 1-based capture index.
    ///
    /// # Errors
    ///
    /// - [`RewriteError::DuplicateGroupName`] when a name is reused in the
    ///   same alternative
    /// - [`RewriteError::UnknownGroupNames`] listing every referenced name
    ///   that no group defines
    pub fn collect<F>(term: &Term, on_named_group: F) -> Result<Self>
    where
        F: FnMut(&str, u32),
    {
        let mut collector = Collector {
            names: HashMap::new(),
            referenced: Vec::new(),
            last_index: 0,
            on_named_group,
        };
        let mut scope = HashSet::new();
        collector.visit(term, &mut scope)?;

        let unresolved: Vec<String> = collector
            .referenced
            .into_iter()
            .filter(|name| !collector.names.contains_key(name))
            .collect();
        if !unresolved.is_empty() {
            return Err(RewriteError::UnknownGroupNames { names: unresolved });
        }

        Ok(Self {
            names: collector.names,
        })
    }

    /// Capture indices of a name, in source order
    pub fn indices(&self, name: &str) -> Option<&[u32]> {
        self.names.get(name).map(Vec::as_slice)
    }
}

/// Quick check for syntax that can define or reference a group name
///
/// Patterns without `(?<` or `\k<` skip [`GroupRegistry::collect`].
pub fn mentions_group_names(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    memmem::find(bytes, b"(?<").is_some() || memmem::find(bytes, b"\\k<").is_some()
}

struct Collector<F> {
    names: HashMap<String, Vec<u32>>,
    referenced: Vec<String>,
    last_index: u32,
    on_named_group: F,
}

impl<F: FnMut(&str, u32)> Collector<F> {
    /// `scope` holds the names already defined in the current alternative
    fn visit(&mut self, term: &Term, scope: &mut HashSet<String>) -> Result<()> {
        match term {
            Term::Disjunction(alternatives) => {
                let outer = scope.clone();
                for alternative in alternatives {
                    let mut branch = outer.clone();
                    self.visit(alternative, &mut branch)?;
                    // Names from every branch stay defined after the disjunction
                    scope.extend(branch);
                }
            }
            Term::Alternative(terms) => {
                for term in terms {
                    self.visit(term, scope)?;
                }
            }
            Term::Group(group) => {
                if group.behavior == GroupBehavior::Normal {
                    self.last_index += 1;
                }
                if let Some(name) = &group.name {
                    let name = &name.value;
                    if !scope.insert(name.clone()) {
                        return Err(RewriteError::DuplicateGroupName { name: name.clone() });
                    }
                    let index = self.last_index;
                    self.names.entry(name.clone()).or_default().push(index);
                    log_debug!("named group {} -> {}", name, index);
                    (self.on_named_group)(name, index);
                }
                self.visit(&group.body, scope)?;
            }
            Term::Quantifier(quantifier) => self.visit(&quantifier.body, scope)?,
            Term::Reference(Reference::Named(name)) => {
                if !self.referenced.contains(&name.value) {
                    self.referenced.push(name.value.clone());
                }
            }
            Term::Value(_)
            | Term::Dot
            | Term::Anchor(_)
            | Term::ClassEscape(_)
            | Term::PropertyEscape(_)
            | Term::CharacterClass(_)
            | Term::Reference(Reference::Index(_))
            | Term::Empty
            | Term::Raw(_) => {}
        }
        Ok(())
    }
}
