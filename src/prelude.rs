//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from es-regex-rewrite.
//! Importing this module with a wildcard import brings the core types into
//! scope:
//!
//! ```
//! use es_regex_rewrite::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Entry Points
//! - [`rewrite_pattern()`] - One-shot rewrite
//! - [`PatternRewriter`] - Rewriter with observers
//! - [`RewriteOptions`] - Rewrite configuration
//! - [`ModifiersMode`] - Handling of `(?i:...)` groups
//! - [`PatternFlags`] - Parsed flags string
//!
//! ## Syntax
//! - [`parse()`] - Parse a pattern
//! - [`generate()`] - Render a pattern
//! - [`Term`] - Pattern tree node
//! - [`ParserFeatures`] - Optional syntax
//!
//! ## Code Points
//! - [`CodePointSet`] - Set of code points
//! - [`SerializeOptions`] - How sets are written
//! - [`ClassEscape`] - `\d`, `\w`, `\s` and negations
//!
//! ## Error Handling
//! - [`RewriteError`] - Rewrite error type
//! - [`SyntaxError`] - Malformed pattern
//! - [`SourcePosition`] - Line/column of a syntax error

// ============================================================================
// Entry Points
// ============================================================================

pub use crate::pattern::{
    rewrite_pattern, ModifiersMode, PatternFlags, PatternRewriter, RewriteOptions,
};

// ============================================================================
// Syntax
// ============================================================================

pub use crate::pattern::{generate, parse, ParserFeatures, Term};

// ============================================================================
// Code Points
// ============================================================================

pub use crate::pattern::{ClassEscape, CodePointSet, SerializeOptions};

// ============================================================================
// Error Handling
// ============================================================================

pub use crate::pattern::{RewriteError, SourcePosition, SyntaxError};
