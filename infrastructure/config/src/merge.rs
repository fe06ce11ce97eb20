use serde_json::{Map, Value};

pub type MergeResult<T> = Result<T, MergeException>;

#[derive(Debug, thiserror::Error)]
pub enum MergeException {
    #[error("An overlay must be an object, found {found}.")]
    NotAnObject { found: &'static str },
}

/// Merge `overlay` onto `base` in place and return `base`.
///
/// Object values are merged key by key, `null` keeps the base value, anything
/// else (arrays included) replaces the base value outright. Keys only present
/// in `base` are left untouched.
pub fn merge(base: &mut Value, overlay: Value) -> MergeResult<&mut Value> {
    match overlay {
        Value::Object(overlay) => {
            merge_object(base, overlay);
            Ok(base)
        }
        other => Err(MergeException::NotAnObject {
            found: kind_name(&other),
        }),
    }
}

fn merge_object(base: &mut Value, overlay: Map<String, Value>) {
    if !base.is_object() {
        *base = Value::Object(Map::new());
    }
    let Value::Object(out) = base else {
        return;
    };
    for (key, value) in overlay {
        match value {
            Value::Object(nested) => {
                merge_object(out.entry(key).or_insert(Value::Null), nested);
            }
            Value::Null => {}
            value => {
                out.insert(key, value);
            }
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
