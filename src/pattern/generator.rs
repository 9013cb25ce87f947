//! AST to pattern source
//!
//! Structural nodes are rebuilt from their children and leaves emit the
//! source text they were parsed from, so `generate(parse(p)) == p` for every
//! pattern the parser accepts.

use std::fmt;

use super::ast::{ClassItem, Reference, Term};

/// Render a term as pattern source
pub fn generate(term: &Term) -> String {
    let mut out = String::new();
    write_term(term, &mut out);
    out
}

fn write_term(term: &Term, out: &mut String) {
    match term {
        Term::Disjunction(alternatives) => {
            for (index, alternative) in alternatives.iter().enumerate() {
                if index > 0 {
                    out.push('|');
                }
                write_term(alternative, out);
            }
        }
        Term::Alternative(terms) => {
            for term in terms {
                write_term(term, out);
            }
        }
        Term::Value(value) => out.push_str(&value.raw),
        Term::Dot => out.push('.'),
        Term::Anchor(kind) => out.push_str(kind.as_str()),
        Term::ClassEscape(escape) => {
            out.push('\\');
            out.push(escape.as_char());
        }
        Term::PropertyEscape(escape) => out.push_str(&escape.raw()),
        Term::CharacterClass(class) => {
            out.push('[');
            if class.negative {
                out.push('^');
            }
            for item in &class.body {
                write_class_item(item, out);
            }
            out.push(']');
        }
        Term::Group(group) => {
            out.push('(');
            match &group.modifiers {
                Some(modifiers) => {
                    out.push('?');
                    out.push_str(&modifiers.raw);
                    out.push(':');
                }
                None => out.push_str(group.behavior.prefix()),
            }
            if let Some(name) = &group.name {
                out.push_str("?<");
                out.push_str(&name.raw);
                out.push('>');
            }
            write_term(&group.body, out);
            out.push(')');
        }
        Term::Quantifier(quantifier) => {
            write_term(&quantifier.body, out);
            out.push_str(&quantifier.raw);
        }
        Term::Reference(Reference::Index(index)) => {
            out.push('\\');
            out.push_str(&index.to_string());
        }
        Term::Reference(Reference::Named(name)) => {
            out.push_str("\\k<");
            out.push_str(&name.raw);
            out.push('>');
        }
        Term::Empty => {}
        Term::Raw(text) => out.push_str(text),
    }
}

fn write_class_item(item: &ClassItem, out: &mut String) {
    match item {
        ClassItem::Value(value) => out.push_str(&value.raw),
        ClassItem::Range { min, max } => {
            out.push_str(&min.raw);
            out.push('-');
            out.push_str(&max.raw);
        }
        ClassItem::Escape(escape) => {
            out.push('\\');
            out.push(escape.as_char());
        }
        ClassItem::Property(escape) => out.push_str(&escape.raw()),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&generate(self))
    }
}
