//! Schema validation
//!
//! A small Joi-like schema builder. Validation stops at the first failure and
//! reports it with Joi's wording, so messages such as
//! `child "name" fails because ["name" is required]` read the same as the
//! ones service clients already match on.
//!
//! ```ignore
//! let schema = Schema::object()
//!     .key("name", Schema::string().required())
//!     .key("init", Schema::function().required())
//!     .unknown(true);
//! schema.validate(&value)?;
//! ```

use crate::value::{Value, UNDEFINED};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Label of the validated value itself
const ROOT_LABEL: &str = "value";

// ============================================================================
// Errors
// ============================================================================

/// Validation failure: the full message plus the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub details: Vec<ValidationDetail>,
}

/// One offending field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationDetail {
    /// Message for this field alone
    pub message: String,
    /// Keys and indices leading to the field
    pub path: Vec<String>,
    /// Rule that failed, such as `any.required`
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationError {
    /// A validation error without field details
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
        }
    }
}

/// Anything able to validate a value.
pub trait Validator<T: ?Sized = Value> {
    fn validate(&self, value: &T) -> Result<(), ValidationError>;
}

// ============================================================================
// Schema
// ============================================================================

/// A value description to validate against.
#[derive(Debug, Clone)]
pub struct Schema {
    kind: SchemaKind,
    required: bool,
}

#[derive(Debug, Clone)]
enum SchemaKind {
    Any,
    String(StringRules),
    Number,
    Boolean,
    Function,
    Object(ObjectRules),
    Array(Option<Box<Schema>>),
}

#[derive(Debug, Clone, Default)]
struct StringRules {
    lowercase: bool,
    pattern: Option<Regex>,
}

#[derive(Debug, Clone, Default)]
struct ObjectRules {
    /// `None` accepts any keys
    keys: Option<IndexMap<String, Schema>>,
    unknown: bool,
}

impl Schema {
    fn of(kind: SchemaKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    pub fn any() -> Self {
        Self::of(SchemaKind::Any)
    }

    pub fn string() -> Self {
        Self::of(SchemaKind::String(StringRules::default()))
    }

    pub fn number() -> Self {
        Self::of(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaKind::Boolean)
    }

    pub fn function() -> Self {
        Self::of(SchemaKind::Function)
    }

    pub fn object() -> Self {
        Self::of(SchemaKind::Object(ObjectRules::default()))
    }

    pub fn array() -> Self {
        Self::of(SchemaKind::Array(None))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Strings must not contain uppercase characters
    pub fn lowercase(mut self) -> Self {
        if let SchemaKind::String(rules) = &mut self.kind {
            rules.lowercase = true;
        }
        self
    }

    /// Strings must match `pattern`
    pub fn pattern(mut self, pattern: Regex) -> Self {
        if let SchemaKind::String(rules) = &mut self.kind {
            rules.pattern = Some(pattern);
        }
        self
    }

    /// Declare an object key. Once keys are declared, undeclared keys are
    /// rejected unless [`Schema::unknown`] allows them.
    pub fn key(mut self, name: impl Into<String>, schema: Schema) -> Self {
        if let SchemaKind::Object(rules) = &mut self.kind {
            rules
                .keys
                .get_or_insert_with(IndexMap::new)
                .insert(name.into(), schema);
        }
        self
    }

    /// Allow keys that were not declared
    pub fn unknown(mut self, allow: bool) -> Self {
        if let SchemaKind::Object(rules) = &mut self.kind {
            rules.unknown = allow;
        }
        self
    }

    /// Schema every array item must match
    pub fn items(mut self, schema: Schema) -> Self {
        if let SchemaKind::Array(items) = &mut self.kind {
            *items = Some(Box::new(schema));
        }
        self
    }

    /// Validate `value`, labelled `"value"` in messages.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.check(value, ROOT_LABEL, &[]).map_err(|failure| ValidationError {
            message: failure.message,
            details: vec![failure.detail],
        })
    }

    fn check(&self, value: &Value, label: &str, path: &[String]) -> Result<(), Failure> {
        if value.is_undefined() {
            return if self.required {
                Err(Failure::leaf(label, path, "any.required", "is required"))
            } else {
                Ok(())
            };
        }

        match &self.kind {
            SchemaKind::Any => Ok(()),
            SchemaKind::String(rules) => {
                let Some(text) = value.as_str() else {
                    return Err(Failure::leaf(label, path, "string.base", "must be a string"));
                };
                if text.is_empty() {
                    return Err(Failure::leaf(label, path, "any.empty", "is not allowed to be empty"));
                }
                if rules.lowercase && text.chars().any(char::is_uppercase) {
                    return Err(Failure::leaf(
                        label,
                        path,
                        "string.lowercase",
                        "must only contain lowercase characters",
                    ));
                }
                match &rules.pattern {
                    Some(pattern) if !pattern.is_match(text) => Err(Failure::leaf(
                        label,
                        path,
                        "string.regex.base",
                        &format!(
                            "with value \"{}\" fails to match the required pattern: /{}/",
                            text,
                            pattern.as_str()
                        ),
                    )),
                    _ => Ok(()),
                }
            }
            SchemaKind::Number => match value {
                Value::Number(_) => Ok(()),
                _ => Err(Failure::leaf(label, path, "number.base", "must be a number")),
            },
            SchemaKind::Boolean => match value {
                Value::Bool(_) => Ok(()),
                _ => Err(Failure::leaf(label, path, "boolean.base", "must be a boolean")),
            },
            SchemaKind::Function => match value {
                Value::Function(_) => Ok(()),
                _ => Err(Failure::leaf(label, path, "function.base", "must be a Function")),
            },
            SchemaKind::Object(rules) => {
                let Some(map) = value.as_object() else {
                    return Err(Failure::leaf(label, path, "object.base", "must be an object"));
                };
                let Some(keys) = &rules.keys else {
                    return Ok(());
                };

                for (key, schema) in keys {
                    let child = map.get(key).unwrap_or(&UNDEFINED);
                    schema
                        .check(child, key, &extend(path, key))
                        .map_err(|failure| {
                            let message =
                                format!("child \"{}\" fails because [{}]", key, failure.message);
                            failure.wrap(message)
                        })?;
                }

                if !rules.unknown {
                    if let Some(key) = map.keys().find(|key| !keys.contains_key(*key)) {
                        return Err(Failure::leaf(
                            key,
                            &extend(path, key),
                            "object.allowUnknown",
                            "is not allowed",
                        ));
                    }
                }
                Ok(())
            }
            SchemaKind::Array(items) => {
                let Some(values) = value.as_array() else {
                    return Err(Failure::leaf(label, path, "array.base", "must be an array"));
                };
                let Some(schema) = items else {
                    return Ok(());
                };

                for (index, item) in values.iter().enumerate() {
                    let position = index.to_string();
                    schema
                        .check(item, &position, &extend(path, &position))
                        .map_err(|failure| {
                            let message = format!(
                                "\"{}\" at position {} fails because [{}]",
                                label, index, failure.message
                            );
                            failure.wrap(message)
                        })?;
                }
                Ok(())
            }
        }
    }
}

impl Validator for Schema {
    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        Schema::validate(self, value)
    }
}

fn extend(path: &[String], key: &str) -> Vec<String> {
    let mut path = path.to_vec();
    path.push(key.to_string());
    path
}

/// First failure met while checking, bubbling up through parents.
struct Failure {
    message: String,
    detail: ValidationDetail,
}

impl Failure {
    fn leaf(label: &str, path: &[String], kind: &str, text: &str) -> Self {
        let message = format!("\"{}\" {}", label, text);
        Self {
            detail: ValidationDetail {
                message: message.clone(),
                path: path.to_vec(),
                kind: kind.to_string(),
            },
            message,
        }
    }

    fn wrap(self, message: String) -> Self {
        Self {
            message,
            detail: self.detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Function;

    fn message(schema: &Schema, value: &Value) -> String {
        schema.validate(value).expect_err("should fail").message
    }

    #[test]
    fn test_required_and_types() {
        assert_eq!(message(&Schema::string().required(), &Value::Undefined), "\"value\" is required");
        assert!(Schema::string().validate(&Value::Undefined).is_ok());
        assert_eq!(message(&Schema::string(), &Value::from(1)), "\"value\" must be a string");
        assert_eq!(message(&Schema::function(), &Value::Null), "\"value\" must be a Function");
        assert_eq!(message(&Schema::object(), &Value::from("x")), "\"value\" must be an object");
        assert!(Schema::any().validate(&Value::Null).is_ok());
    }

    #[test]
    fn test_string_rules() {
        let schema = Schema::string()
            .lowercase()
            .pattern(Regex::new(r"^[\w-]+$").expect("regex"));
        assert!(schema.validate(&Value::from("my-transport_2")).is_ok());
        assert_eq!(
            message(&schema, &Value::from("Http")),
            "\"value\" must only contain lowercase characters"
        );
        assert_eq!(
            message(&schema, &Value::from("a b")),
            "\"value\" with value \"a b\" fails to match the required pattern: /^[\\w-]+$/"
        );
        assert_eq!(message(&schema, &Value::from("")), "\"value\" is not allowed to be empty");
    }

    #[test]
    fn test_object_children() {
        let schema = Schema::object()
            .key("name", Schema::string().required())
            .key("init", Schema::function().required());

        let err = schema
            .validate(&Value::object([("name", Value::from("x"))]))
            .expect_err("missing init");
        assert_eq!(err.message, "child \"init\" fails because [\"init\" is required]");
        assert_eq!(err.details[0].path, vec!["init"]);
        assert_eq!(err.details[0].kind, "any.required");
        assert_eq!(err.details[0].message, "\"init\" is required");

        let group = Value::object([
            ("name", Value::from("x")),
            ("init", Value::from(Function::new("() => {}"))),
            ("extra", Value::from(true)),
        ]);
        assert_eq!(message(&schema, &group), "\"extra\" is not allowed");
        assert!(schema.clone().unknown(true).validate(&group).is_ok());
        assert!(Schema::object().validate(&group).is_ok());
    }

    #[test]
    fn test_array_items() {
        let schema = Schema::array().items(Schema::object().key("name", Schema::string().required()));
        assert_eq!(
            message(&schema, &Value::from(vec![Value::from("not a group")])),
            "\"value\" at position 0 fails because [\"0\" must be an object]"
        );
        let err = schema
            .validate(&Value::from(vec![
                Value::object([("name", Value::from("a"))]),
                Value::object([("name", Value::from(""))]),
            ]))
            .expect_err("empty name");
        assert_eq!(
            err.message,
            "\"value\" at position 1 fails because [child \"name\" fails because [\"name\" is not allowed to be empty]]"
        );
        assert_eq!(err.details[0].path, vec!["1", "name"]);
    }

    #[test]
    fn test_builders_ignore_other_kinds() {
        let schema = Schema::number().lowercase().key("a", Schema::any()).required();
        assert!(schema.is_required());
        assert!(schema.validate(&Value::from(4)).is_ok());
        assert_eq!(message(&schema, &Value::from("4")), "\"value\" must be a number");
    }
}
