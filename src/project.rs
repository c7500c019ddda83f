//! Result projection: folds a flat match list into one sparse tree.
//!
//! Each match contributes its full key path, with intermediate empty objects
//! created on demand and the leaf set to the materialized value. Matches past
//! the depth limit contribute nothing, not even a truncated stub. Later
//! writes to the same leaf path silently win; overlapping matches of a single
//! pattern always carry the same value, so nothing is lost.

use crate::matcher::Match;
use serde_json::{Map, Value};

pub(crate) fn project(matches: &[Match<'_>], shallow: bool, max_depth: Option<usize>) -> Value {
    let mut result = Value::Object(Map::new());
    for m in matches {
        if max_depth.is_some_and(|depth| m.path.len() > depth) {
            continue;
        }
        insert(&mut result, m, shallow);
    }
    result
}

fn insert(result: &mut Value, m: &Match<'_>, shallow: bool) {
    let leaf = materialize(m, shallow);
    let Some((last, parents)) = m.path.split_last() else {
        // Only a `**` rooted at the top of the tree matches with an empty
        // path; it replaces the whole result
        *result = leaf;
        return;
    };
    let mut node = result;
    for key in parents {
        node = ensure_object(node)
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    ensure_object(node).insert(last.to_string(), leaf);
}

/// Stub decision: wildcard-terminated object matches and shallow-mode object
/// leaves project as empty objects; everything else is a deep clone. Arrays
/// are opaque leaf values and are always copied whole.
fn materialize(m: &Match<'_>, shallow: bool) -> Value {
    if m.stubbed || (shallow && m.value.is_object()) {
        return Value::Object(Map::new());
    }
    m.value.clone()
}

/// Replaces a non-object slot with an empty object so the path can descend
/// through it (last write wins on scalar/container collisions mid-path).
fn ensure_object(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
