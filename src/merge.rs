//! Deep merge of projected trees.
//!
//! When a multi-pattern call (or an expanded range) produces several sparse
//! trees, they fold into one left-to-right: keys present in both sides with
//! object values on both sides merge recursively, anything else is replaced
//! by the later tree's value. Arrays are atomic during merge, never merged
//! element-wise. Deep cloning itself is `serde_json::Value::clone`, which
//! copies objects and arrays recursively, so merged trees never alias source
//! storage.

use serde_json::Value;

pub(crate) fn deep_merge(acc: &mut Value, next: Value) {
    match (acc, next) {
        (Value::Object(left), Value::Object(right)) => {
            for (key, value) in right {
                match left.get_mut(&key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        left.insert(key, value);
                    }
                }
            }
        }
        (slot, next) => *slot = next,
    }
}
