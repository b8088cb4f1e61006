//! Transport loading
//!
//! Transports are looked up by name in a [`Resolver`]. The usual resolver is a
//! [`TransportRegistry`] filled with factories at startup:
//!
//! ```ignore
//! let mut registry = TransportRegistry::new();
//! registry.register("http", |options| Ok(HttpTransport::new(options)));
//! let transport = load_transport(&options, &registry)?;
//! ```

use crate::config::ServiceOptions;
use crate::error::{BoxError, Error, Result};
use crate::schema::Schema;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Location transports are resolved under
pub const TRANSPORT_ROOT: &str = "./transports/";

/// Transport types: word characters and hyphens
pub const TRANSPORT_TYPE_PATTERN: &str = r"^[\w-]+$";

static OPTIONS_SCHEMA: OnceLock<Schema> = OnceLock::new();

/// Schema of the options a transport is loaded with
fn options_schema() -> Result<&'static Schema> {
    if let Some(schema) = OPTIONS_SCHEMA.get() {
        return Ok(schema);
    }
    let kind = Schema::string()
        .lowercase()
        .pattern(Regex::new(TRANSPORT_TYPE_PATTERN)?)
        .required();
    Ok(OPTIONS_SCHEMA.get_or_init(|| {
        Schema::object()
            .key(
                "transport",
                Schema::object().key("type", kind).unknown(true).required(),
            )
            .key("logger", Schema::any().required())
            .unknown(true)
    }))
}

/// Finds transport implementations by path.
pub trait Resolver<T> {
    /// Resolve `path`, such as `./transports/http`
    fn resolve(&self, path: &str, options: &ServiceOptions) -> std::result::Result<T, BoxError>;
}

/// Transport factory
pub type TransportFactory<T> =
    Arc<dyn Fn(&ServiceOptions) -> std::result::Result<T, BoxError> + Send + Sync>;

/// Registry of transport factories, keyed by transport name.
pub struct TransportRegistry<T> {
    factories: HashMap<String, TransportFactory<T>>,
}

impl<T> TransportRegistry<T> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory under `name`
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ServiceOptions) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Get a factory by name
    pub fn get(&self, name: &str) -> Option<&TransportFactory<T>> {
        self.factories.get(name)
    }

    /// Check if a factory is registered
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<T> Default for TransportRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Resolver<T> for TransportRegistry<T> {
    fn resolve(&self, path: &str, options: &ServiceOptions) -> std::result::Result<T, BoxError> {
        let name = path.strip_prefix(TRANSPORT_ROOT).unwrap_or(path);
        match self.get(name) {
            Some(factory) => factory(options),
            None => Err(format!("Cannot find module '{}'", path).into()),
        }
    }
}

/// Validate `options` and resolve their transport.
///
/// Options need a `transport.type` made of lowercase word characters and
/// hyphens, and a logger. The load is logged at debug level.
pub fn load_transport<T, R>(options: &ServiceOptions, resolver: &R) -> Result<T>
where
    R: Resolver<T> + ?Sized,
{
    options_schema()?
        .validate(&options.to_value())
        .map_err(Error::OptionsInvalid)?;

    // Both are present once the schema passed
    let kind = options.transport_kind().unwrap_or_default();
    if let Some(logger) = &options.logger {
        logger.debug(&format!("Load transport {}", kind));
    }

    resolver
        .resolve(&format!("{}{}", TRANSPORT_ROOT, kind), options)
        .map_err(|cause| Error::TransportLoadFailed {
            kind: kind.to_string(),
            cause,
        })
}
