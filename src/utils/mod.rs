//! Small shared helpers.

use serde_json::Value;

/// Perform a deep merge of two JSON values.
///
/// Recursively merges `overrides` into `base`. For objects, fields from `overrides`
/// are added or replace fields in `base`. For arrays and primitives, `overrides`
/// completely replaces `base`. A `null` override leaves the base value in place,
/// so optional arguments that were not supplied never clobber a default.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use dustpress_helper::utils::deep_merge_json;
///
/// let base = json!({ "meta_type": "post", "single": false });
/// let overrides = json!({ "single": true, "meta_keys": null });
///
/// let result = deep_merge_json(base, &overrides);
/// assert_eq!(result, json!({ "meta_type": "post", "single": true }));
/// ```
pub fn deep_merge_json(mut base: Value, overrides: &Value) -> Value {
    match (base.as_object_mut(), overrides.as_object()) {
        (Some(base_obj), Some(override_obj)) => {
            for (key, override_value) in override_obj {
                if override_value.is_null() {
                    continue;
                }
                match base_obj.get_mut(key) {
                    Some(base_value) if base_value.is_object() && override_value.is_object() => {
                        let merged = deep_merge_json(base_value.take(), override_value);
                        *base_value = merged;
                    }
                    _ => {
                        base_obj.insert(key.clone(), override_value.clone());
                    }
                }
            }
            base
        }
        (_, _) if overrides.is_null() => base,
        (_, _) => overrides.clone(),
    }
}
