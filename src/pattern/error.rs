//! Error types for pattern rewriting
//!
//! Every error is fatal for the rewrite call that produced it: no partial
//! output is ever returned. Callers are expected to treat an error as "this
//! pattern cannot be rewritten for this target".
//!
//! # Example Output
//!
//! ```text
//! Invalid regular expression: Unterminated group at line 1, column 4
//! Failed to recognize value `Foo` for property `Script`.
//! Unknown group names: year,month
//! ```

use std::fmt;

use super::source_location::SourcePosition;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, RewriteError>;

/// A malformed pattern reported by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// What went wrong
    pub message: String,
    /// Where in the pattern it went wrong
    pub position: SourcePosition,
}

impl SyntaxError {
    /// Create a syntax error at a byte offset of `source`
    pub fn at(message: impl Into<String>, source: &str, offset: usize) -> Self {
        Self {
            message: message.into(),
            position: SourcePosition::from_offset(source, offset),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid regular expression: {} at {}",
            self.message, self.position
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Error type for rewrite operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// Conflicting or malformed options (caller bug)
    InvalidOptions {
        /// Why the options were rejected
        reason: String,
    },

    /// The flags string contains an unknown or repeated flag
    InvalidFlags {
        /// The offending flags string
        flags: String,
    },

    /// A flag this rewriter does not implement
    UnsupportedFlag {
        /// The flag character
        flag: char,
    },

    /// The pattern could not be parsed
    Syntax(SyntaxError),

    /// A `\p{..}` escape names an unknown property or value
    UnknownProperty {
        /// The property name as written (or the bare token)
        property: String,
        /// The value as written, if the escape had one
        value: Option<String>,
    },

    /// Two groups share a name in the same alternative
    DuplicateGroupName {
        /// The duplicated name
        name: String,
    },

    /// Named references to groups that are never defined
    UnknownGroupNames {
        /// Every unresolved name, in order of first reference
        names: Vec<String>,
    },
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::InvalidOptions { reason } => write!(f, "Invalid options: {}", reason),
            RewriteError::InvalidFlags { flags } => {
                write!(f, "Invalid flags supplied to RegExp: '{}'", flags)
            }
            RewriteError::UnsupportedFlag { flag } => {
                write!(f, "The '{}' flag is not supported", flag)
            }
            RewriteError::Syntax(err) => err.fmt(f),
            RewriteError::UnknownProperty {
                property,
                value: Some(value),
            } => write!(
                f,
                "Failed to recognize value `{}` for property `{}`.",
                value, property
            ),
            RewriteError::UnknownProperty {
                property,
                value: None,
            } => write!(f, "Failed to recognize property `{}`.", property),
            RewriteError::DuplicateGroupName { name } => {
                write!(f, "Group '{}' already defined in this context.", name)
            }
            RewriteError::UnknownGroupNames { names } => {
                write!(f, "Unknown group names: {}", names.join(","))
            }
        }
    }
}

impl std::error::Error for RewriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RewriteError::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SyntaxError> for RewriteError {
    fn from(err: SyntaxError) -> Self {
        RewriteError::Syntax(err)
    }
}
