//! es-regex-rewrite - ECMAScript regular expression pattern rewriting
//!
//! Rewrites the source of an ECMAScript regular expression so that it
//! behaves identically on engines lacking newer features. It provides:
//! - Emulation of the `u` flag with surrogate pair alternations
//! - Emulation of the `s` (dot-all) flag
//! - Replacement of `\p{...}` property escapes with explicit sets
//! - Replacement of named groups with numbered ones
//! - Case-insensitive (`iu`) matching emulated with case folding orbits
//!
//! ## Quick Start
//!
//! ```rust
//! use es_regex_rewrite::{rewrite_pattern, RewriteOptions};
//!
//! let options = RewriteOptions::new();
//! let rewritten = rewrite_pattern("\\u{1F600}", "u", &options).unwrap();
//! assert_eq!(rewritten, "(?:\\uD83D\\uDE00)");
//! ```
//!
//! ## Loading Options from JSON
//!
//! ```rust
//! use es_regex_rewrite::{rewrite_pattern, RewriteOptions};
//!
//! let options = RewriteOptions::from_json(r#"{ "namedGroup": true }"#).unwrap();
//! let rewritten = rewrite_pattern("(?<x>a)\\k<x>", "", &options).unwrap();
//! assert_eq!(rewritten, "(a)\\1");
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]
#![allow(clippy::module_inception)]
#![allow(clippy::redundant_closure)]

// Prelude module for convenient imports
pub mod prelude;

// Rewriting core
pub mod pattern;

/// Re-export commonly used types for convenience
pub use pattern::{
    // Code point data
    code_point_set::{CodePointSet, SerializeOptions},
    // Errors
    error::{RewriteError, SyntaxError},
    // Options
    options::{ModifiersMode, PatternFlags, RewriteOptions},
    // Entry points
    rewriter::{rewrite_pattern, PatternRewriter},
    Result,
};
