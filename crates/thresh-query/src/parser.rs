//! Top-level boolean query parser.
//!
//! Orchestrates the group and literal scanners into a complete query tree:
//! an outer loop walks the `+`-separated groups, an inner loop walks each
//! group's literals, and the results fold into a conjunction per group and
//! a disjunction across groups. The scan is a single forward pass with
//! bounded lookahead; nothing is ever re-read.

use std::sync::Arc;

use thresh_text::TermNormalizer;

use crate::{
    ast::QueryNode,
    scan::{self, LiteralKind, ScannedLiteral},
};

/// Parses boolean query strings into [`QueryNode`] trees.
///
/// The parser owns nothing but the normalizer reference it hands to every
/// leaf it produces. All scanning state lives in locals, so one parser may
/// serve any number of callers concurrently.
pub struct QueryParser {
    /// Normalizer attached to every leaf literal.
    normalizer: Arc<dyn TermNormalizer>,
}

impl QueryParser {
    /// Creates a parser that attaches `normalizer` to every literal it
    /// produces.
    pub fn new(normalizer: Arc<dyn TermNormalizer>) -> Self {
        Self { normalizer }
    }

    /// Parses a query into a tree of query components.
    ///
    /// Returns `None` when the input holds nothing but spaces and `+`
    /// separators (the empty string included). Malformed quoting never
    /// fails; it degrades per the literal scanner's policies.
    pub fn parse(&self, query: &str) -> Option<QueryNode> {
        let mut groups: Vec<QueryNode> = Vec::new();
        let mut group_start = 0;

        // Each iteration consumes one whole group, so `group_start`
        // strictly increases until only separators remain.
        while has_group_ahead(query, group_start) {
            let group_bounds = scan::find_next_group(query, group_start);
            let group = &query[group_bounds.start..group_bounds.end()];

            let mut literals: Vec<QueryNode> = Vec::new();
            let mut literal_start = 0;
            while has_literal_ahead(group, literal_start) {
                let scanned = scan::find_next_literal(group, literal_start);
                literals.push(self.build_literal(group, scanned));
                literal_start = scanned.bounds.end();
            }

            if let Some(node) = QueryNode::and(literals) {
                groups.push(node);
            }
            group_start = group_bounds.end();
        }

        QueryNode::or(groups)
    }

    /// Builds the leaf node for a scanned literal, attaching the shared
    /// normalizer reference.
    fn build_literal(&self, group: &str, scanned: ScannedLiteral) -> QueryNode {
        let text = group[scanned.bounds.start..scanned.bounds.end()].to_string();
        let negated = scanned.negated;
        let normalizer = Arc::clone(&self.normalizer);

        match scanned.kind {
            LiteralKind::Term => QueryNode::Term {
                text,
                negated,
                normalizer,
            },
            LiteralKind::Phrase => QueryNode::Phrase {
                text,
                negated,
                normalizer,
            },
            LiteralKind::Wildcard => QueryNode::Wildcard {
                text,
                negated,
                normalizer,
            },
        }
    }
}

/// True when a character that is neither a space nor a `+` remains at or
/// after `start`. Guards the group scanner against separator-only tails.
fn has_group_ahead(query: &str, start: usize) -> bool {
    query.as_bytes()[start..]
        .iter()
        .any(|&byte| byte != b' ' && byte != b'+')
}

/// True when a non-space character remains at or after `start`. Guards the
/// literal scanner against trailing spaces in the final group.
fn has_literal_ahead(group: &str, start: usize) -> bool {
    group.as_bytes()[start..].iter().any(|&byte| byte != b' ')
}
