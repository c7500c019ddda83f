//! Traversal matching: walks the source tree guided by a segment sequence.
//!
//! The walk uses an explicit worklist stack instead of native recursion, so
//! call-stack depth stays constant regardless of source tree depth. Frames
//! are pushed in reverse, making pop order equal to recursive depth-first
//! order: for a double wildcard the zero-level branch comes first, then each
//! child in source insertion order, advance branch before continue branch.
//!
//! Only objects are traversable containers. Arrays are opaque leaf values:
//! a segment never descends into one, and a match landing on one copies it
//! whole. Match counts for `**` patterns over trees that are both wide and
//! deep grow with the number of overlapping match paths; `max_depth` bounds
//! the projected result but not the match list itself.

use crate::pattern::{Pattern, Segment};
use crate::FilterError;
use serde_json::Value;
use smallvec::SmallVec;

/// Concrete keys walked to reach a match, borrowed from the source tree.
pub(crate) type MatchPath<'a> = SmallVec<[&'a str; 8]>;

/// One concrete match: the keys actually walked and the value found there.
#[derive(Debug, Clone)]
pub(crate) struct Match<'a> {
    pub(crate) path: MatchPath<'a>,
    pub(crate) value: &'a Value,
    /// Wildcard-terminated match that landed on an object: projected as an
    /// empty stub rather than the full subtree.
    pub(crate) stubbed: bool,
}

struct Frame<'a> {
    node: &'a Value,
    seg: usize,
    path: MatchPath<'a>,
}

/// Collects every match of `pattern` in `source`, in depth-first order.
///
/// Missing keys and non-object nodes silently end a branch; speculative
/// segments matching zero times is valid.
pub(crate) fn match_pattern<'a>(source: &'a Value, pattern: &Pattern) -> Vec<Match<'a>> {
    let segments = &pattern.segments;
    let mut matches = Vec::new();
    let mut stack = vec![Frame {
        node: source,
        seg: 0,
        path: MatchPath::new(),
    }];

    while let Some(Frame { node, seg, path }) = stack.pop() {
        if seg == segments.len() {
            // Filters out matches that terminated at the wrong depth when the
            // pattern pins the depth exactly (contains `*` but not `**`).
            if pattern.exact_depth && path.len() != segments.len() {
                continue;
            }
            let stubbed = matches!(
                segments.last(),
                Some(Segment::SingleWildcard | Segment::DoubleWildcard)
            ) && node.is_object();
            matches.push(Match {
                path,
                value: node,
                stubbed,
            });
            continue;
        }
        match &segments[seg] {
            Segment::Literal(key) => {
                if let Some((found, child)) =
                    node.as_object().and_then(|obj| obj.get_key_value(key))
                {
                    let mut child_path = path;
                    child_path.push(found.as_str());
                    stack.push(Frame {
                        node: child,
                        seg: seg + 1,
                        path: child_path,
                    });
                }
            }
            Segment::SingleWildcard => {
                if let Some(obj) = node.as_object() {
                    for (key, child) in obj.iter().rev() {
                        let mut child_path = path.clone();
                        child_path.push(key.as_str());
                        stack.push(Frame {
                            node: child,
                            seg: seg + 1,
                            path: child_path,
                        });
                    }
                }
            }
            Segment::DoubleWildcard => {
                if let Some(obj) = node.as_object() {
                    for (key, child) in obj.iter().rev() {
                        let mut child_path = path.clone();
                        child_path.push(key.as_str());
                        // Continue branch: the child keeps absorbing levels
                        stack.push(Frame {
                            node: child,
                            seg,
                            path: child_path.clone(),
                        });
                        // Advance branch: the child terminates the descent
                        stack.push(Frame {
                            node: child,
                            seg: seg + 1,
                            path: child_path,
                        });
                    }
                }
                // Zero-level branch: the wildcard is satisfied without moving
                stack.push(Frame {
                    node,
                    seg: seg + 1,
                    path,
                });
            }
            Segment::KeySet(keys) => {
                if let Some(obj) = node.as_object() {
                    for key in keys.iter().rev() {
                        if let Some((found, child)) = obj.get_key_value(key) {
                            let mut child_path = path.clone();
                            child_path.push(found.as_str());
                            stack.push(Frame {
                                node: child,
                                seg: seg + 1,
                                path: child_path,
                            });
                        }
                    }
                }
            }
        }
    }
    matches
}

/// Strict literal walk for patterns with no wildcard, alternation or range.
///
/// Literal paths are assumed to be programmer-specified, so a typo'd path
/// surfaces loudly: the first missing key fails with `PathNotFound`, and
/// descending into a non-object fails with `NotTraversable`.
pub(crate) fn match_strict<'a>(
    source: &'a Value,
    pattern: &Pattern,
    raw: &str,
) -> Result<Match<'a>, FilterError> {
    let mut node = source;
    let mut path = MatchPath::new();
    for segment in &pattern.segments {
        let Segment::Literal(key) = segment else {
            unreachable!("strict walk requires an all-literal pattern");
        };
        let Some(obj) = node.as_object() else {
            return Err(FilterError::NotTraversable {
                pattern: raw.to_string(),
                key: key.clone(),
            });
        };
        let Some((found, child)) = obj.get_key_value(key) else {
            return Err(FilterError::PathNotFound {
                pattern: raw.to_string(),
                key: key.clone(),
            });
        };
        path.push(found.as_str());
        node = child;
    }
    Ok(Match {
        path,
        value: node,
        stubbed: false,
    })
}
