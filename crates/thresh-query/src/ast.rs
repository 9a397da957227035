//! Boolean query tree.
//!
//! Represents a parsed query as a tree of components the evaluation engine
//! walks later: conjunctions intersect postings, disjunctions union them,
//! and each leaf literal is looked up (or excluded, when negated) directly.

use std::{fmt, sync::Arc};

use thresh_text::TermNormalizer;

/// A node in a parsed boolean query tree.
///
/// The tree is immutable once built. Leaf variants own their raw literal
/// text, a negation flag fixed at construction, and a shared reference to
/// the [`TermNormalizer`] the evaluation engine applies at match time
/// (parsing itself never normalizes).
#[derive(Clone)]
pub enum QueryNode {
    /// Conjunction: every child must match. Never fewer than two children
    /// in a parsed tree.
    And(Vec<Self>),

    /// Disjunction: at least one child must match. Never fewer than two
    /// children in a parsed tree.
    Or(Vec<Self>),

    /// A single-word literal.
    Term {
        /// Raw literal text, exactly as scanned (any `-` prefix removed).
        text: String,
        /// True when the literal was prefixed with `-`.
        negated: bool,
        /// Normalizer applied to the text at evaluation time.
        normalizer: Arc<dyn TermNormalizer>,
    },

    /// A quoted phrase literal, matched as a contiguous sequence.
    Phrase {
        /// Raw phrase text INCLUDING the surrounding quote characters,
        /// kept for re-tokenization during evaluation.
        text: String,
        /// Negation flag. The scanner never sets it for phrases; it exists
        /// for hand-built trees.
        negated: bool,
        /// Normalizer used when re-tokenizing the phrase.
        normalizer: Arc<dyn TermNormalizer>,
    },

    /// A pattern literal containing at least one `*`, matched by expansion.
    Wildcard {
        /// Raw pattern text (any `-` prefix removed).
        text: String,
        /// True when the literal was prefixed with `-`.
        negated: bool,
        /// Normalizer applied to expanded candidates at evaluation time.
        normalizer: Arc<dyn TermNormalizer>,
    },
}

impl QueryNode {
    /// Folds a conjunctive list of nodes: an empty list is `None`, a single
    /// node passes through unwrapped, two or more wrap in [`Self::And`].
    /// Nested `And`s are flattened.
    pub fn and(nodes: Vec<Self>) -> Option<Self> {
        let flattened: Vec<Self> = nodes
            .into_iter()
            .flat_map(|node| match node {
                Self::And(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => None,
            1 => flattened.into_iter().next(),
            _ => Some(Self::And(flattened)),
        }
    }

    /// Folds a disjunctive list of nodes: an empty list is `None`, a single
    /// node passes through unwrapped, two or more wrap in [`Self::Or`].
    /// Nested `Or`s are flattened.
    pub fn or(nodes: Vec<Self>) -> Option<Self> {
        let flattened: Vec<Self> = nodes
            .into_iter()
            .flat_map(|node| match node {
                Self::Or(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            0 => None,
            1 => flattened.into_iter().next(),
            _ => Some(Self::Or(flattened)),
        }
    }

    /// Formats the node as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::And(children) => {
                writeln!(f, "{prefix}And")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Or(children) => {
                writeln!(f, "{prefix}Or")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Term { text, negated, .. } => {
                writeln!(f, "{prefix}Term({text:?}{})", negated_suffix(*negated))
            }
            Self::Phrase { text, negated, .. } => {
                writeln!(f, "{prefix}Phrase({text:?}{})", negated_suffix(*negated))
            }
            Self::Wildcard { text, negated, .. } => {
                writeln!(f, "{prefix}Wildcard({text:?}{})", negated_suffix(*negated))
            }
        }
    }

    /// Renders the node back in surface query syntax.
    ///
    /// AND children join with spaces, OR children with ` + `, negated
    /// leaves regain their `-` prefix, and phrase text is emitted raw (it
    /// still carries its quotes).
    pub fn to_query_string(&self) -> String {
        match self {
            Self::And(children) => {
                let parts: Vec<String> = children.iter().map(Self::to_query_string).collect();
                parts.join(" ")
            }
            Self::Or(children) => {
                let parts: Vec<String> = children.iter().map(Self::to_query_string).collect();
                parts.join(" + ")
            }
            Self::Term { text, negated, .. }
            | Self::Phrase { text, negated, .. }
            | Self::Wildcard { text, negated, .. } => {
                if *negated {
                    format!("-{text}")
                } else {
                    text.clone()
                }
            }
        }
    }
}

/// Suffix marking negated leaves in tree output.
fn negated_suffix(negated: bool) -> &'static str {
    if negated { ", negated" } else { "" }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

impl fmt::Debug for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(children) => f.debug_tuple("And").field(children).finish(),
            Self::Or(children) => f.debug_tuple("Or").field(children).finish(),
            Self::Term { text, negated, .. } => f
                .debug_struct("Term")
                .field("text", text)
                .field("negated", negated)
                .finish_non_exhaustive(),
            Self::Phrase { text, negated, .. } => f
                .debug_struct("Phrase")
                .field("text", text)
                .field("negated", negated)
                .finish_non_exhaustive(),
            Self::Wildcard { text, negated, .. } => f
                .debug_struct("Wildcard")
                .field("text", text)
                .field("negated", negated)
                .finish_non_exhaustive(),
        }
    }
}

/// Structural equality over kind, literal text, and negation. Normalizer
/// references are ignored: trait objects carry no meaningful identity, and
/// two trees that scan the same are equal regardless of which normalizer
/// their leaves point at.
impl PartialEq for QueryNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::And(a), Self::And(b)) | (Self::Or(a), Self::Or(b)) => a == b,
            (
                Self::Term {
                    text: a,
                    negated: a_neg,
                    ..
                },
                Self::Term {
                    text: b,
                    negated: b_neg,
                    ..
                },
            )
            | (
                Self::Phrase {
                    text: a,
                    negated: a_neg,
                    ..
                },
                Self::Phrase {
                    text: b,
                    negated: b_neg,
                    ..
                },
            )
            | (
                Self::Wildcard {
                    text: a,
                    negated: a_neg,
                    ..
                },
                Self::Wildcard {
                    text: b,
                    negated: b_neg,
                    ..
                },
            ) => a == b && a_neg == b_neg,
            _ => false,
        }
    }
}
