//! Override-wins recursive merge of configuration mappings.

use serde_yaml::Value;

use crate::Mapping;

/// Merge `overlay` on top of `base`.
///
/// For each key in `overlay`: if both sides hold a mapping the two are merged
/// recursively, otherwise the overlay value replaces the base value outright.
/// Sequences are therefore replaced whole, never concatenated. Keys only in
/// `base` keep their value and their position; new keys are appended in
/// overlay order.
pub fn merge(mut base: Mapping, overlay: Mapping) -> Mapping {
    for (key, value) in overlay {
        match value {
            Value::Mapping(incoming) => {
                if let Some(Value::Mapping(existing)) = base.get_mut(&key) {
                    let current = std::mem::take(existing);
                    *existing = merge(current, incoming);
                    continue;
                }
                base.insert(key, Value::Mapping(incoming));
            },
            other => {
                base.insert(key, other);
            },
        }
    }
    base
}
