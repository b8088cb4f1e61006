//! Host value model
//!
//! APIs, groups and service options arrive as loosely-typed values. A
//! [`Value`] mirrors the JavaScript data model far enough for the helpers in
//! this crate: functions are carried by their source text plus the
//! properties attached to them, and objects keep their key order.

use crate::schema::Schema;
use indexmap::IndexMap;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// Ordered property map of an object value
pub type Object = IndexMap<String, Value>;

pub(crate) static UNDEFINED: Value = Value::Undefined;

// ============================================================================
// Value
// ============================================================================

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Missing value
    #[default]
    Undefined,
    /// `null`
    Null,
    /// Boolean
    Bool(bool),
    /// Number (always a double)
    Number(f64),
    /// String
    String(String),
    /// Array
    Array(Vec<Value>),
    /// Object with ordered keys
    Object(Object),
    /// Function, known by its source
    Function(Function),
    /// Validation schema attached to an API or options object
    Schema(Arc<Schema>),
}

impl Value {
    /// Build an object value from key/value pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_schema(&self) -> Option<&Arc<Schema>> {
        match self {
            Value::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    /// Property lookup on objects and function properties.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            Value::Function(function) => function.property(key),
            _ => None,
        }
    }

    /// Name of the value's type, as used in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) | Value::Schema(_) => "object",
            Value::Function(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Schema(a), Value::Schema(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// String coercion as JavaScript performs it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    if !matches!(item, Value::Undefined | Value::Null) {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Object(_) | Value::Schema(_) => write!(f, "[object Object]"),
            Value::Function(function) => write!(f, "{}", function.source()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    /// Missing properties read as `undefined`.
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&UNDEFINED)
    }
}

// ============================================================================
// Function
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct FunctionData {
    source: String,
    properties: Object,
}

/// A function value: its source text and attached properties.
///
/// Clones share the same function; equality is identity.
#[derive(Debug, Clone)]
pub struct Function(Arc<FunctionData>);

impl Function {
    pub fn new(source: impl Into<String>) -> Self {
        Function(Arc::new(FunctionData {
            source: source.into(),
            properties: Object::new(),
        }))
    }

    /// Source text, as `Function.prototype.toString` would give it
    pub fn source(&self) -> &str {
        &self.0.source
    }

    /// Attach a property, as in `fn.validate = schema`
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        Arc::make_mut(&mut self.0)
            .properties
            .insert(key.into(), value.into());
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.0.properties.get(key)
    }

    pub fn properties(&self) -> &Object {
        &self.0.properties
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Schema> for Value {
    fn from(schema: Schema) -> Self {
        Value::Schema(Arc::new(schema))
    }
}

impl From<Arc<Schema>> for Value {
    fn from(schema: Arc<Schema>) -> Self {
        Value::Schema(schema)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_coercion() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::object([("a", Value::from(1))]).to_string(), "[object Object]");
        assert_eq!(
            Value::from(vec![Value::from(1), Value::Null, Value::from("x")]).to_string(),
            "1,,x"
        );
        assert_eq!(Value::from(Function::new("(a) => a")).to_string(), "(a) => a");
    }

    #[test]
    fn test_function_identity() {
        let f = Function::new("function () {}");
        let g = Function::new("function () {}");
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
    }

    #[test]
    fn test_function_properties() {
        let f = Function::new("function (a) {}").with_property("validate", true);
        assert_eq!(f.property("validate"), Some(&Value::Bool(true)));
        assert_eq!(Value::from(f)["validate"], Value::Bool(true));
    }

    #[test]
    fn test_index_missing_is_undefined() {
        let value = Value::object([("name", Value::from("x"))]);
        assert_eq!(value["name"].as_str(), Some("x"));
        assert!(value["missing"].is_undefined());
        assert!(Value::from(1)["any"].is_undefined());
    }

    #[test]
    fn test_from_json_keeps_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z": 1, "a": [true, null], "m": "s"}"#).expect("json");
        let value = Value::from(json);
        let keys: Vec<_> = value.as_object().expect("object").keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(value["a"], Value::from(vec![Value::Bool(true), Value::Null]));
    }
}
