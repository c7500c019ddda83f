//! Numeric range expansion: `a.1..3.c` becomes `a.1.c`, `a.2.c`, `a.3.c`.
//!
//! A range token is `<int>..<int>` with non-negative decimal bounds. It is
//! located in the raw pattern string before separator splitting, since the
//! token itself contains the default separator. Expansion substitutes each
//! integer in `[start, end]` inclusive for the token, producing concrete
//! pattern strings that are lexed and matched independently; their result
//! trees merge in range order, exactly as a caller-supplied pattern array.
//!
//! A pattern may contain at most one range token, and the token may not sit
//! inside an alternation group.

use crate::FilterError;

/// A parsed `start..end` token and its byte span in the pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RangeToken {
    start: i64,
    end: i64,
    span: (usize, usize),
}

/// Expands the range token in `pattern`, if any.
///
/// Returns `Ok(None)` when the pattern has no range token; a bare `..`
/// between non-numeric text is not a range and falls through to the lexer.
pub(crate) fn expand(pattern: &str) -> Result<Option<Vec<String>>, FilterError> {
    let Some(token) = find_range(pattern, 0)? else {
        return Ok(None);
    };
    if find_range(pattern, token.span.1)?.is_some() {
        return Err(FilterError::MalformedPattern(format!(
            "more than one range token in '{}'",
            pattern
        )));
    }
    if inside_group(pattern, token.span.0) {
        return Err(FilterError::MalformedPattern(format!(
            "range token inside alternation group in '{}'",
            pattern
        )));
    }
    if token.start >= token.end {
        return Err(FilterError::InvalidRange(format!(
            "range {}..{} in '{}' must be strictly increasing",
            token.start, token.end, pattern
        )));
    }

    let (lo, hi) = token.span;
    let mut expanded = Vec::with_capacity((token.end - token.start + 1) as usize);
    for i in token.start..=token.end {
        expanded.push(format!("{}{}{}", &pattern[..lo], i, &pattern[hi..]));
    }
    Ok(Some(expanded))
}

/// Finds the first range token at or after byte offset `from`.
///
/// A `..` with digits adjacent on both sides is a range token; digits on only
/// one side is a malformed range; digits on neither side is ordinary pattern
/// text.
fn find_range(pattern: &str, from: usize) -> Result<Option<RangeToken>, FilterError> {
    let bytes = pattern.as_bytes();
    let mut i = from;
    while i + 1 < bytes.len() {
        if bytes[i] != b'.' || bytes[i + 1] != b'.' {
            i += 1;
            continue;
        }
        match (digits_left(bytes, i), digits_right(bytes, i + 2)) {
            (Some(lo), Some(hi)) => {
                let start = parse_bound(&pattern[lo..i], pattern)?;
                let end = parse_bound(&pattern[i + 2..hi], pattern)?;
                return Ok(Some(RangeToken {
                    start,
                    end,
                    span: (lo, hi),
                }));
            }
            (None, None) => i += 2,
            _ => {
                return Err(FilterError::InvalidRange(format!(
                    "non-numeric range bound at '..' in '{}'",
                    pattern
                )))
            }
        }
    }
    Ok(None)
}

/// Start of the maximal digit run ending just before `dot`, if non-empty.
fn digits_left(bytes: &[u8], dot: usize) -> Option<usize> {
    let mut j = dot;
    while j > 0 && bytes[j - 1].is_ascii_digit() {
        j -= 1;
    }
    (j < dot).then_some(j)
}

/// End of the maximal digit run starting at `after`, if non-empty.
fn digits_right(bytes: &[u8], after: usize) -> Option<usize> {
    let mut j = after;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    (j > after).then_some(j)
}

fn parse_bound(digits: &str, pattern: &str) -> Result<i64, FilterError> {
    digits.parse().map_err(|_| {
        FilterError::InvalidRange(format!(
            "range bound '{}' in '{}' is out of range",
            digits, pattern
        ))
    })
}

/// True when byte offset `pos` sits inside an unclosed alternation group.
fn inside_group(pattern: &str, pos: usize) -> bool {
    let mut depth = 0i32;
    for b in &pattern.as_bytes()[..pos] {
        match b {
            b'[' => depth += 1,
            b']' => depth = (depth - 1).max(0),
            _ => {}
        }
    }
    depth > 0
}
