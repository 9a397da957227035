//! Scanners that discover group and literal boundaries.
//!
//! The query grammar has no formal tokenizer: the boundary of each literal
//! is found by scanning for quote, space, and `+` characters at the same
//! time. Both scanners report positions through [`ScanBounds`], a transient
//! value returned per step (never shared, never stored in the final tree),
//! so each scan step is independently testable.
//!
//! Offsets are byte offsets. Every delimiter scanned for is ASCII, so the
//! bounds produced always fall on UTF-8 character boundaries and slicing
//! with them cannot panic.

/// Byte-offset bounds of a scanned region within the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBounds {
    /// Offset of the region's first byte.
    pub start: usize,
    /// Length of the region in bytes.
    pub len: usize,
}

impl ScanBounds {
    /// Offset one past the region's last byte.
    pub fn end(self) -> usize {
        self.start + self.len
    }
}

/// Classification of a scanned literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// Single-word literal.
    Term,
    /// Quoted phrase literal; its bounds include both quote characters.
    Phrase,
    /// Literal containing at least one `*`.
    Wildcard,
}

/// One literal extracted by [`find_next_literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLiteral {
    /// Bounds of the literal text within the group. Any consumed `-`
    /// prefix or discarded quote sits just before `bounds.start`, so the
    /// caller resumes scanning at `bounds.end()`.
    pub bounds: ScanBounds,
    /// How the literal classified.
    pub kind: LiteralKind,
    /// True when a `-` prefix was consumed.
    pub negated: bool,
}

/// Locates the bounds of the next `+`-delimited group at or after `start`.
///
/// Skips any run of spaces and `+` signs to the group's first meaningful
/// character, then extends the group to the last meaningful character
/// before the next `+` (or to the end of the query when no `+` follows),
/// so that empty groups between consecutive `+` signs collapse away.
///
/// Callers must ensure a character that is neither a space nor a `+`
/// remains at or after `start`.
pub fn find_next_group(query: &str, start: usize) -> ScanBounds {
    let bytes = query.as_bytes();

    // Skip separators to the group's first meaningful character.
    let mut start = start;
    while bytes[start] == b' ' || bytes[start] == b'+' {
        start += 1;
    }

    match find_byte(bytes, start + 1, b'+') {
        // No other `+`: the final group runs to the end of the query.
        None => ScanBounds {
            start,
            len: bytes.len() - start,
        },
        Some(next_plus) => {
            // Walk backward from the `+` to the last meaningful character.
            let mut end = next_plus;
            while bytes[end] == b' ' || bytes[end] == b'+' {
                end -= 1;
            }

            ScanBounds {
                start,
                len: 1 + end - start,
            }
        }
    }
}

/// Locates and classifies the next literal in a group at or after `start`.
///
/// The literal's end is found by jointly considering the next space and the
/// next `"` character; whichever is nearer governs. Quote handling covers
/// malformed input by degrading rather than failing: an unterminated phrase
/// whose opening quote we sit on loses that quote and becomes a bare term
/// (its closing quote was lost to an earlier `+` split), while a quote
/// lying ahead mid-literal truncates the literal so the quoted segment is
/// scanned whole on the next call.
///
/// Callers must ensure a non-space character remains at or after `start`.
pub fn find_next_literal(group: &str, start: usize) -> ScannedLiteral {
    let bytes = group.as_bytes();

    // Skip past white space.
    let mut start = start;
    while bytes[start] == b' ' {
        start += 1;
    }

    let next_space = find_byte(bytes, start, b' ');
    let quote_open = find_byte(bytes, start, b'"');

    let mut is_phrase = false;
    let mut len = match (next_space, quote_open) {
        // No more delimiters: the rest of the group is the literal.
        (None, None) => bytes.len() - start,

        // Space only: ordinary literal ending at the space.
        (Some(space), None) => space - start,

        // Quote only: phrase logic, with the literal running to the end of
        // the group if no quote pair resolves.
        (None, Some(quote)) => match find_byte(bytes, quote + 1, b'"') {
            None if bytes[start] == b'"' => {
                // Unterminated phrase starting here: discard the opening
                // quote and take the remainder as a single term.
                start += 1;
                bytes.len() - start
            }
            None => quote - start,
            Some(close) if bytes[start] == b'"' => {
                is_phrase = true;
                close - start
            }
            Some(_) => quote - start,
        },

        // Both found: whichever is nearer to `start` governs.
        (Some(space), Some(quote)) => {
            if quote < space {
                match find_byte(bytes, quote + 1, b'"') {
                    None if bytes[start] == b'"' => {
                        // Unterminated phrase starting here, with a space
                        // ahead: degrade to a term ending at that space.
                        start += 1;
                        space - start
                    }
                    None => quote - start,
                    Some(close) if bytes[start] == b'"' => {
                        is_phrase = true;
                        close - start
                    }
                    Some(_) => quote - start,
                }
            } else {
                space - start
            }
        }
    };

    if is_phrase {
        // Phrase bounds run from opening to closing quote inclusive; the
        // raw text keeps both quotes for downstream re-tokenization.
        return ScannedLiteral {
            bounds: ScanBounds {
                start,
                len: len + 1,
            },
            kind: LiteralKind::Phrase,
            negated: false,
        };
    }

    let mut negated = false;
    if start < bytes.len() && bytes[start] == b'-' {
        negated = true;
        start += 1;
        len -= 1;
    }

    let kind = if group[start..start + len].contains('*') {
        LiteralKind::Wildcard
    } else {
        LiteralKind::Term
    };

    ScannedLiteral {
        bounds: ScanBounds { start, len },
        kind,
        negated,
    }
}

/// Finds the next occurrence of an ASCII byte at or after `from`.
fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&byte| byte == needle)
        .map(|offset| offset + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(start: usize, len: usize) -> ScanBounds {
        ScanBounds { start, len }
    }

    fn literal_text(group: &str, scanned: ScannedLiteral) -> String {
        group[scanned.bounds.start..scanned.bounds.end()].to_string()
    }

    #[test]
    fn group_without_plus_runs_to_end() {
        assert_eq!(find_next_group("cat dog", 0), bounds(0, 7));
    }

    #[test]
    fn group_stops_before_plus() {
        assert_eq!(find_next_group("cat + dog", 0), bounds(0, 3));
    }

    #[test]
    fn group_skips_leading_separators() {
        assert_eq!(find_next_group("  ++ cat", 0), bounds(5, 3));
    }

    #[test]
    fn group_trims_trailing_separators_before_plus() {
        // The end walks back past the space run in front of the `+`.
        assert_eq!(find_next_group("cat   + dog", 0), bounds(0, 3));
    }

    #[test]
    fn group_collapses_separator_runs() {
        let query = "cat ++ + dog";
        let first = find_next_group(query, 0);
        assert_eq!(first, bounds(0, 3));
        let second = find_next_group(query, first.end());
        assert_eq!(&query[second.start..second.end()], "dog");
    }

    #[test]
    fn final_group_keeps_trailing_spaces() {
        // Only a later `+` triggers the backward trim; the caller's guard
        // handles the trailing run.
        assert_eq!(find_next_group("cat + dog  ", 6), bounds(6, 5));
    }

    #[test]
    fn literal_runs_to_group_end() {
        let scanned = find_next_literal("cat", 0);
        assert_eq!(scanned.bounds, bounds(0, 3));
        assert_eq!(scanned.kind, LiteralKind::Term);
        assert!(!scanned.negated);
    }

    #[test]
    fn literal_ends_at_space() {
        let scanned = find_next_literal("cat dog", 0);
        assert_eq!(literal_text("cat dog", scanned), "cat");
        assert_eq!(scanned.bounds.end(), 3);
    }

    #[test]
    fn literal_skips_leading_spaces() {
        let scanned = find_next_literal("cat dog", 3);
        assert_eq!(literal_text("cat dog", scanned), "dog");
    }

    #[test]
    fn negation_prefix_consumed() {
        let scanned = find_next_literal("-cat dog", 0);
        assert_eq!(literal_text("-cat dog", scanned), "cat");
        assert!(scanned.negated);
        assert_eq!(scanned.kind, LiteralKind::Term);
        // Resume point lands on the space after the literal.
        assert_eq!(scanned.bounds.end(), 4);
    }

    #[test]
    fn star_classifies_wildcard() {
        let scanned = find_next_literal("ca*t", 0);
        assert_eq!(scanned.kind, LiteralKind::Wildcard);
    }

    #[test]
    fn negated_wildcard_keeps_both_markers() {
        let scanned = find_next_literal("-ca*", 0);
        assert_eq!(scanned.kind, LiteralKind::Wildcard);
        assert!(scanned.negated);
        assert_eq!(literal_text("-ca*", scanned), "ca*");
    }

    #[test]
    fn complete_phrase_spans_both_quotes() {
        let group = "\"cat dog\" bird";
        let scanned = find_next_literal(group, 0);
        assert_eq!(scanned.kind, LiteralKind::Phrase);
        assert_eq!(literal_text(group, scanned), "\"cat dog\"");
        assert!(!scanned.negated);
    }

    #[test]
    fn phrase_at_group_end() {
        let group = "\"cat dog\"";
        let scanned = find_next_literal(group, 0);
        assert_eq!(scanned.kind, LiteralKind::Phrase);
        assert_eq!(literal_text(group, scanned), "\"cat dog\"");
    }

    #[test]
    fn quote_ahead_truncates_literal() {
        // The quoted segment is deferred to the next call, whole.
        let group = "xy\"cc cs\"";
        let first = find_next_literal(group, 0);
        assert_eq!(literal_text(group, first), "xy");
        assert_eq!(first.kind, LiteralKind::Term);

        let second = find_next_literal(group, first.bounds.end());
        assert_eq!(second.kind, LiteralKind::Phrase);
        assert_eq!(literal_text(group, second), "\"cc cs\"");
    }

    #[test]
    fn unterminated_quote_degrades_to_term() {
        // The closing quote fell into a later group; the opening quote is
        // discarded and the tail parses as a bare term.
        let group = "\"1";
        let scanned = find_next_literal(group, 0);
        assert_eq!(scanned.kind, LiteralKind::Term);
        assert_eq!(literal_text(group, scanned), "1");
    }

    #[test]
    fn unterminated_quote_with_space_degrades_to_term() {
        let group = "\"ab cd";
        let first = find_next_literal(group, 0);
        assert_eq!(first.kind, LiteralKind::Term);
        assert_eq!(literal_text(group, first), "ab");

        let second = find_next_literal(group, first.bounds.end());
        assert_eq!(literal_text(group, second), "cd");
    }

    #[test]
    fn unterminated_quote_ahead_truncates() {
        let group = "xy\"cc";
        let first = find_next_literal(group, 0);
        assert_eq!(literal_text(group, first), "xy");

        // The next call sits on the unterminated quote and degrades.
        let second = find_next_literal(group, first.bounds.end());
        assert_eq!(second.kind, LiteralKind::Term);
        assert_eq!(literal_text(group, second), "cc");
    }

    #[test]
    fn lone_quote_degrades_to_empty_term() {
        let scanned = find_next_literal("\"", 0);
        assert_eq!(scanned.kind, LiteralKind::Term);
        assert_eq!(literal_text("\"", scanned), "");
        assert_eq!(scanned.bounds.end(), 1);
    }

    #[test]
    fn lone_dash_degrades_to_empty_negated_term() {
        let scanned = find_next_literal("-", 0);
        assert_eq!(scanned.kind, LiteralKind::Term);
        assert!(scanned.negated);
        assert_eq!(literal_text("-", scanned), "");
    }

    #[test]
    fn multibyte_text_scans_on_byte_offsets() {
        let group = "caf\u{e9} na\u{ef}ve";
        let first = find_next_literal(group, 0);
        assert_eq!(literal_text(group, first), "caf\u{e9}");

        let second = find_next_literal(group, first.bounds.end());
        assert_eq!(literal_text(group, second), "na\u{ef}ve");
    }
}
