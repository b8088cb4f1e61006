//! Helpers over API declarations

use crate::value::{Object, Value};

/// True for objects, the shape of an API hash. Arrays and functions are not.
pub fn is_api(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

/// Name positional `values` after `properties`.
///
/// Missing values read as `undefined`; values beyond the last property are
/// kept under their index.
pub fn array_to_obj(values: &[Value], properties: &[&str]) -> Object {
    let mut object: Object = properties
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), values.get(i).cloned().unwrap_or_default()))
        .collect();

    for (i, value) in values.iter().enumerate().skip(properties.len()) {
        object.insert(i.to_string(), value.clone());
    }
    object
}
