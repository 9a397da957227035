//! Token normalization for the thresh retrieval pipeline.
//!
//! Query literals are parsed as raw text; turning that text into matchable
//! index terms is the job of a [`TermNormalizer`]. Parsing never invokes
//! normalization: each leaf of a parsed query tree carries a shared
//! normalizer reference so the evaluation engine can normalize at match
//! time, when it knows how each literal kind wants its text handled
//! (wildcard expansion, for instance, needs the raw pattern intact).

#![warn(missing_docs)]

use std::collections::HashSet;

use stop_words::LANGUAGE;

/// Turns raw tokens into normalized index terms.
///
/// Implementations must be shareable across threads: one normalizer
/// instance is typically referenced by every leaf of every parsed query.
pub trait TermNormalizer: Send + Sync {
    /// Produces zero or more normalized terms from a raw token.
    fn process_token(&self, token: &str) -> Vec<String>;

    /// Applies any type-specific normalization to an already-processed term.
    ///
    /// Returns `None` when no such normalization applies.
    fn normalize(&self, term: &str) -> Option<String>;
}

/// The default normalizer: strips non-word characters and lowercases.
///
/// A word character is ASCII alphanumeric or underscore. The produced term
/// may be empty when the token held no word characters at all; callers
/// decide whether an empty term is meaningful.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicNormalizer;

impl TermNormalizer for BasicNormalizer {
    fn process_token(&self, token: &str) -> Vec<String> {
        let term: String = token
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        vec![term.to_ascii_lowercase()]
    }

    fn normalize(&self, _term: &str) -> Option<String> {
        None
    }
}

/// An English stopword set with case-insensitive membership.
///
/// Uses a `HashSet` for O(1) lookup. All words are stored lowercase.
#[derive(Clone)]
pub struct Stopwords {
    /// Lowercased stopwords.
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Creates a stopword set from the standard English list.
    pub fn new() -> Self {
        let words = stop_words::get(LANGUAGE::English)
            .iter()
            .map(|word| word.to_ascii_lowercase())
            .collect();

        Self { words }
    }

    /// Checks if a term is a stopword.
    ///
    /// The check is case-insensitive for ASCII characters.
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(&term.to_ascii_lowercase())
    }
}

/// Wraps another normalizer and drops stopword terms from its output.
///
/// Useful when the evaluation engine should ignore query words like "the"
/// or "of" rather than intersect on them.
#[derive(Clone)]
pub struct StopwordNormalizer<N> {
    /// Normalizer producing the candidate terms.
    inner: N,
    /// Terms dropped from the inner normalizer's output.
    stopwords: Stopwords,
}

impl<N: TermNormalizer> StopwordNormalizer<N> {
    /// Creates a filtering normalizer around `inner` with the default
    /// English stopword set.
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            stopwords: Stopwords::new(),
        }
    }
}

impl<N: TermNormalizer> TermNormalizer for StopwordNormalizer<N> {
    fn process_token(&self, token: &str) -> Vec<String> {
        self.inner
            .process_token(token)
            .into_iter()
            .filter(|term| !self.stopwords.contains(term))
            .collect()
    }

    fn normalize(&self, term: &str) -> Option<String> {
        self.inner.normalize(term)
    }
}
