//! Pattern lexing: splits a raw pattern string into typed segments.
//!
//! Supported syntax (with the default separator `.` and wildcard `*`):
//! - `a.b.c`   literal keys
//! - `a.*.c`   single-level wildcard: every direct child at that level
//! - `a.**`    multi-level wildcard: zero or more levels of descent
//! - `[a|b].c` alternation: any one of the listed keys at that level
//!
//! Both the separator and the wildcard character are configurable per call.
//! The separator splits segments outside of brackets; inside an alternation
//! group it is ordinary key text. Segments are enumerated once here as a
//! tagged enum; the matcher dispatches on the variant and never re-parses
//! pattern text mid-traversal.

use crate::FilterError;
use rustc_hash::FxHashSet;

/// One unit of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Matches exactly one key.
    Literal(String),
    /// Matches every key at exactly one level.
    SingleWildcard,
    /// Matches zero or more levels of descent.
    DoubleWildcard,
    /// Matches any one of the listed keys at one level, in listed order.
    KeySet(Vec<String>),
}

/// A lexed pattern: the segment sequence plus two flags derived from it.
#[derive(Debug, Clone)]
pub(crate) struct Pattern {
    pub(crate) segments: Vec<Segment>,
    /// Pattern contains a single wildcard but no double wildcard: a match is
    /// kept only if its path length equals the segment count.
    pub(crate) exact_depth: bool,
    /// Every segment is a literal; combined with "no range token in the raw
    /// string" this selects the strict fast path.
    pub(crate) all_literal: bool,
}

pub(crate) fn lex(pattern: &str, separator: char, wildcard: char) -> Result<Pattern, FilterError> {
    let mut segments = Vec::new();
    let mut token = String::new();
    let mut group = String::new();
    let mut in_group = false;
    // A token (possibly empty) is open and not yet emitted. False only right
    // after a closed alternation group.
    let mut pending = true;

    for c in pattern.chars() {
        if in_group {
            match c {
                '[' => {
                    return Err(FilterError::MalformedPattern(format!(
                        "nested '[' in pattern '{}'",
                        pattern
                    )))
                }
                ']' => {
                    segments.push(key_set(&group, pattern)?);
                    group.clear();
                    in_group = false;
                    pending = false;
                }
                _ => group.push(c),
            }
            continue;
        }
        if c == '[' {
            if !token.is_empty() || !pending {
                return Err(FilterError::MalformedPattern(format!(
                    "alternation group must span a whole segment in '{}'",
                    pattern
                )));
            }
            in_group = true;
            continue;
        }
        if c == ']' {
            return Err(FilterError::MalformedPattern(format!(
                "unmatched ']' in pattern '{}'",
                pattern
            )));
        }
        if c == separator {
            if pending {
                segments.push(classify(std::mem::take(&mut token), wildcard));
            }
            pending = true;
            continue;
        }
        if !pending {
            return Err(FilterError::MalformedPattern(format!(
                "alternation group must span a whole segment in '{}'",
                pattern
            )));
        }
        token.push(c);
    }

    if in_group {
        return Err(FilterError::MalformedPattern(format!(
            "unterminated '[' in pattern '{}'",
            pattern
        )));
    }
    if pending {
        segments.push(classify(token, wildcard));
    }

    let has_single = segments
        .iter()
        .any(|s| matches!(s, Segment::SingleWildcard));
    let has_double = segments
        .iter()
        .any(|s| matches!(s, Segment::DoubleWildcard));
    let all_literal = segments.iter().all(|s| matches!(s, Segment::Literal(_)));

    Ok(Pattern {
        segments,
        exact_depth: has_single && !has_double,
        all_literal,
    })
}

/// A token equal to the wildcard char is a single wildcard, the wildcard char
/// twice is a double wildcard, anything else (including the empty token) is a
/// literal key.
fn classify(token: String, wildcard: char) -> Segment {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(w), None, None) if w == wildcard => Segment::SingleWildcard,
        (Some(a), Some(b), None) if a == wildcard && b == wildcard => Segment::DoubleWildcard,
        _ => Segment::Literal(token),
    }
}

fn key_set(contents: &str, pattern: &str) -> Result<Segment, FilterError> {
    let keys: Vec<String> = contents.split('|').map(str::to_string).collect();
    if keys.len() < 2 {
        return Err(FilterError::MalformedPattern(format!(
            "alternation group in '{}' needs at least 2 keys",
            pattern
        )));
    }
    let mut seen = FxHashSet::default();
    for key in &keys {
        if !seen.insert(key.as_str()) {
            return Err(FilterError::MalformedPattern(format!(
                "duplicate key '{}' in alternation group of '{}'",
                key, pattern
            )));
        }
    }
    Ok(Segment::KeySet(keys))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_default(pattern: &str) -> Result<Pattern, FilterError> {
        lex(pattern, '.', '*')
    }

    #[test]
    fn test_literal_segments() {
        let p = lex_default("a.b.c").unwrap();
        assert_eq!(
            p.segments,
            vec![
                Segment::Literal("a".into()),
                Segment::Literal("b".into()),
                Segment::Literal("c".into()),
            ]
        );
        assert!(p.all_literal);
        assert!(!p.exact_depth);
    }

    #[test]
    fn test_wildcard_segments() {
        let p = lex_default("a.*.c").unwrap();
        assert_eq!(p.segments[1], Segment::SingleWildcard);
        assert!(p.exact_depth);
        assert!(!p.all_literal);

        let p = lex_default("a.**").unwrap();
        assert_eq!(p.segments[1], Segment::DoubleWildcard);
        // Double wildcard disengages exact-depth filtering
        assert!(!p.exact_depth);

        // Three wildcard chars are just a literal key
        let p = lex_default("a.***").unwrap();
        assert_eq!(p.segments[1], Segment::Literal("***".into()));
    }

    #[test]
    fn test_custom_separator_and_wildcard() {
        let p = lex("a/@/c", '/', '@').unwrap();
        assert_eq!(p.segments[1], Segment::SingleWildcard);
        // With '@' as the wildcard, '*' is an ordinary key
        let p = lex("a/*", '/', '@').unwrap();
        assert_eq!(p.segments[1], Segment::Literal("*".into()));
    }

    #[test]
    fn test_alternation() {
        let p = lex_default("[amber|blue].dark").unwrap();
        assert_eq!(
            p.segments,
            vec![
                Segment::KeySet(vec!["amber".into(), "blue".into()]),
                Segment::Literal("dark".into()),
            ]
        );
        assert!(!p.all_literal);
    }

    #[test]
    fn test_separator_inside_group_is_key_text() {
        let p = lex_default("[a.b|c].z").unwrap();
        assert_eq!(
            p.segments[0],
            Segment::KeySet(vec!["a.b".into(), "c".into()])
        );
    }

    #[test]
    fn test_unterminated_group() {
        assert!(matches!(
            lex_default("[a|b.c"),
            Err(FilterError::MalformedPattern(_))
        ));
    }

    #[test]
    fn test_unmatched_close() {
        assert!(matches!(
            lex_default("a|b].c"),
            Err(FilterError::MalformedPattern(_))
        ));
    }

    #[test]
    fn test_nested_group() {
        assert!(matches!(
            lex_default("[a|[b|c]].z"),
            Err(FilterError::MalformedPattern(_))
        ));
    }

    #[test]
    fn test_group_with_one_key() {
        assert!(matches!(
            lex_default("[only].z"),
            Err(FilterError::MalformedPattern(_))
        ));
    }

    #[test]
    fn test_duplicate_keys_in_group() {
        assert!(matches!(
            lex_default("[a|b|a].z"),
            Err(FilterError::MalformedPattern(_))
        ));
    }

    #[test]
    fn test_group_must_span_segment() {
        assert!(matches!(
            lex_default("a[x|y].z"),
            Err(FilterError::MalformedPattern(_))
        ));
        assert!(matches!(
            lex_default("[x|y]b.z"),
            Err(FilterError::MalformedPattern(_))
        ));
    }

    #[test]
    fn test_empty_segments_are_literals() {
        let p = lex_default("a..b").unwrap();
        assert_eq!(p.segments[1], Segment::Literal(String::new()));
        let p = lex_default("").unwrap();
        assert_eq!(p.segments, vec![Segment::Literal(String::new())]);
    }
}
