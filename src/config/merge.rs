//! Configuration merge logic
//!
//! - Mappings: deep-merge by key
//! - Sequences: REPLACE (last wins)
//! - Scalars: override (last wins)

use serde_yaml::Value;

/// Deep merge two YAML values, `overlay` taking precedence.
///
/// Keys keep the position they first appeared at.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(slot) => {
                        let base_value = std::mem::replace(slot, Value::Null);
                        *slot = deep_merge(base_value, overlay_value);
                    }
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
            Value::Mapping(base_map)
        }

        // Sequences are replaced wholesale, never concatenated
        (Value::Sequence(_), overlay @ Value::Sequence(_)) => overlay,

        (_, overlay) => overlay,
    }
}

/// Merge layers in order (first is base, last has highest precedence)
pub fn merge_layers(layers: impl IntoIterator<Item = Value>) -> Value {
    layers
        .into_iter()
        .fold(Value::Mapping(Default::default()), deep_merge)
}
