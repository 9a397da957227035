//! Boolean query parsing for the thresh retrieval pipeline.
//!
//! Turns one line of query syntax into a tree of query components for a
//! downstream term-matching engine:
//!
//! - **Terms**: `cat` - single words, AND-ed within a group
//! - **Phrases**: `"cat dog"` - quoted sequences matched contiguously
//! - **Negation**: `-cat` - literals excluded from matches
//! - **Wildcards**: `ca*` - literals matched by pattern expansion
//! - **OR groups**: `cat + dog` - `+` separates alternative groups
//!
//! The grammar has no formal tokenizer: literal boundaries are discovered
//! by scanning for quote, space, and `+` characters together, and malformed
//! quoting degrades to a best-effort parse instead of failing. Parsing is a
//! pure single forward pass; the parser never normalizes text itself: each
//! leaf carries a [`thresh_text::TermNormalizer`] reference for the
//! evaluation engine to apply later.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use thresh_query::QueryParser;
//! use thresh_text::BasicNormalizer;
//!
//! let parser = QueryParser::new(Arc::new(BasicNormalizer));
//! let tree = parser.parse("shakespeare + \"comedy of errors\" -folio");
//! assert!(tree.is_some());
//! ```

#![warn(missing_docs)]

mod ast;
mod parser;
mod scan;

pub use ast::QueryNode;
pub use parser::QueryParser;
