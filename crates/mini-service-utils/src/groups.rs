//! API group extraction
//!
//! Services declare their APIs either as one group (`{name, init}`) or as a
//! `groups` array with per-group options in `groupOpts`. Both forms are
//! normalized to [`ExtractedGroups`].

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::value::{Function, Object, Value};
use std::sync::{Arc, OnceLock};

static GROUP_SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();

/// Schema of a single group: a non-empty `name` and an `init` function.
/// Other keys are allowed.
pub fn group_schema() -> Arc<Schema> {
    GROUP_SCHEMA
        .get_or_init(|| {
            Arc::new(
                Schema::object()
                    .key("name", Schema::string().required())
                    .key("init", Schema::function().required())
                    .unknown(true),
            )
        })
        .clone()
}

/// A named bundle of APIs and its initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiGroup {
    pub name: String,
    pub init: Function,
    /// The group as declared, extra fields included
    pub fields: Object,
}

impl ApiGroup {
    /// Read a group from a value that passed [`group_schema`].
    fn from_value(value: &Value) -> Option<Self> {
        let fields = value.as_object()?;
        Some(Self {
            name: fields.get("name")?.as_str()?.to_string(),
            init: fields.get("init")?.as_function()?.clone(),
            fields: fields.clone(),
        })
    }

    /// The group as a value, as it was declared
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Canonical form of a service's group declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedGroups {
    pub groups: Vec<ApiGroup>,
    /// Options per group name
    pub group_opts: Object,
}

/// Normalize a service's group declaration.
///
/// - a valid group is the only group, and its own options
/// - otherwise `groups` must be an array of valid groups, with options taken
///   from `groupOpts` when it is an object
///
/// Anything else fails with [`Error::NoGroupsDefined`].
pub fn extract_groups(opts: &Value) -> Result<ExtractedGroups> {
    let schema = group_schema();

    if schema.validate(opts).is_ok() {
        if let Some(group) = ApiGroup::from_value(opts) {
            let mut group_opts = Object::new();
            group_opts.insert(group.name.clone(), opts.clone());
            return Ok(ExtractedGroups {
                groups: vec![group],
                group_opts,
            });
        }
    }

    let groups = &opts["groups"];
    if groups.as_array().is_none() {
        return Err(Error::NoGroupsDefined);
    }

    Schema::array()
        .items(schema.as_ref().clone())
        .validate(groups)
        .map_err(|err| {
            let reason = err.message.strip_prefix("\"value\" ").unwrap_or(&err.message);
            Error::GroupDefinitionInvalid(reason.to_string())
        })?;

    let groups = groups
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(ApiGroup::from_value)
        .collect();

    let group_opts = opts["groupOpts"].as_object().cloned().unwrap_or_default();

    Ok(ExtractedGroups { groups, group_opts })
}
