//! Pattern rewriting core
//!
//! Everything needed to rewrite an ECMAScript regular expression pattern for
//! engines that lack some of its features.
//!
//! # Module Organization
//!
//! ## Entry Points
//! - [`rewrite_pattern`] - One-shot rewrite
//! - [`PatternRewriter`] - Rewriter with named group and flags observers
//! - [`RewriteOptions`] - Which features to compile away
//!
//! ## Syntax
//! - [`ast`] - Pattern tree
//! - [`parser`] - ECMAScript pattern parser
//! - [`generator`] - Tree to source
//! - [`source_location`] - Line/column tracking for syntax errors
//!
//! ## Code Point Data
//! - [`code_point_set`] - Set algebra and serialization
//! - [`case_fold`] - Simple case folding
//! - [`char_class`] - `\d`, `\w`, `\s` sets
//! - [`unicode_property`] - `\p{...}` resolution
//! - [`property_cache`] - Cache of resolved properties
//!
//! ## Rewriting
//! - [`options`] - Options, flags and the derived context
//! - [`groups`] - Named group resolution
//! - [`rewriter`] - The rewrite itself

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod ast;
pub mod case_fold;
pub mod char_class;
pub mod code_point_set;
pub mod error;
pub mod generator;
pub mod groups;
pub mod options;
pub mod parser;
pub mod property_cache;
pub mod rewriter;
pub mod source_location;
pub mod unicode_property;

// ============================================================================
// Entry Points
// ============================================================================

pub use options::{ModifiersMode, PatternFlags, RewriteContext, RewriteOptions};
pub use rewriter::{rewrite_pattern, PatternRewriter};

// ============================================================================
// Syntax
// ============================================================================

pub use ast::{ClassItem, Term};
pub use generator::generate;
pub use parser::{parse, ParserFeatures};
pub use source_location::SourcePosition;

// ============================================================================
// Code Point Data
// ============================================================================

pub use char_class::{escape_set, ClassEscape};
pub use code_point_set::{CodePointSet, SerializeOptions, MAX_BMP, MAX_CODE_POINT};
pub use unicode_property::resolve_property_escape;

// ============================================================================
// Errors
// ============================================================================

pub use error::{Result, RewriteError, SyntaxError};
