//! Structured field diff for audit entries
//!
//! Compares the JSON form of an entity before and after a mutation and emits
//! one [`FieldChange`] per changed field. Nested objects are compared
//! recursively; floats use a tolerance to absorb serialization round-trips.

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;

/// Float comparison tolerance (serialize/deserialize precision loss)
const FLOAT_EPSILON: f64 = 1e-9;

/// One changed field: `from` → `to`. Inserts carry `from: null`, deletes
/// carry `to: null`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub from: Value,
    pub to: Value,
}

/// Fields excluded from diffs for a given entity type.
///
/// Identity and bookkeeping timestamps never show up as audit noise.
pub fn excluded_fields(entity_type: &str) -> &'static [&'static str] {
    match entity_type {
        "employee" => &["id", "created_at", "modified_at"],
        "department" | "project" => &["id", "created_at", "modified_at"],
        _ => &["id"],
    }
}

/// Recursively compare two JSON values (floats with tolerance).
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(fa), Some(fb)) => (fa - fb).abs() < FLOAT_EPSILON,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(va, vb)| values_equal(va, vb))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, va)| b.get(key).is_some_and(|vb| values_equal(va, vb)))
        }
        _ => false,
    }
}

fn diff_json_recursive(from: &Value, to: &Value, path: &str, changes: &mut Vec<FieldChange>) {
    match (from, to) {
        (Value::Object(from_obj), Value::Object(to_obj)) => {
            let mut all_keys: HashSet<&String> = from_obj.keys().collect();
            all_keys.extend(to_obj.keys());

            let mut keys: Vec<&String> = all_keys.into_iter().collect();
            keys.sort();

            for key in keys {
                let field_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };

                match (from_obj.get(key), to_obj.get(key)) {
                    (Some(f), Some(t)) => diff_json_recursive(f, t, &field_path, changes),
                    (Some(f), None) => changes.push(FieldChange {
                        field: field_path,
                        from: f.clone(),
                        to: Value::Null,
                    }),
                    (None, Some(t)) => changes.push(FieldChange {
                        field: field_path,
                        from: Value::Null,
                        to: t.clone(),
                    }),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if !values_equal(from, to) {
                changes.push(FieldChange {
                    field: path.to_string(),
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
    }
}

/// Diff two serializable snapshots of the same entity.
///
/// Fields listed in [`excluded_fields`] for `entity_type` are stripped from
/// both sides before comparison.
pub fn diff_entities<T: Serialize>(
    entity_type: &str,
    from: Option<&T>,
    to: Option<&T>,
) -> Vec<FieldChange> {
    let excluded = excluded_fields(entity_type);
    let from_value = strip(serialize(from), excluded);
    let to_value = strip(serialize(to), excluded);

    let mut changes = Vec::new();
    diff_json_recursive(&from_value, &to_value, "", &mut changes);
    changes
}

fn serialize<T: Serialize>(value: Option<&T>) -> Value {
    match value {
        Some(v) => serde_json::to_value(v).unwrap_or(Value::Null),
        None => json!({}),
    }
}

fn strip(mut value: Value, excluded: &[&str]) -> Value {
    if let Value::Object(map) = &mut value {
        for field in excluded {
            map.remove(*field);
        }
    }
    value
}
