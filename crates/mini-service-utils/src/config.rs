//! Service options
//!
//! Options are read from JSON or TOML with serde, keeping every key the
//! service utilities do not know about. The logger is never read from a
//! file: it is injected with [`ServiceOptions::with_logger`].
//!
//! ```toml
//! [transport]
//! type = "http"
//! port = 3000
//! ```

use crate::logger::Log;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while reading service options
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the options file
    #[error("Failed to read options file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse options: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Failed to parse JSON
    #[error("Failed to parse options: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File extension is neither `.json` nor `.toml`
    #[error("Unsupported options format: {0}")]
    UnsupportedFormat(String),
}

/// Transport section of the options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransportOptions {
    /// Transport name, such as `http`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Transport-specific settings
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Global options of a service
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ServiceOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportOptions>,

    /// Logger used by the service, injected in code
    #[serde(skip)]
    pub logger: Option<Arc<dyn Log>>,

    /// Any other option
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl fmt::Debug for ServiceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceOptions")
            .field("transport", &self.transport)
            .field("logger", &self.logger.as_ref().map(|_| "Log"))
            .field("extra", &self.extra)
            .finish()
    }
}

impl ServiceOptions {
    /// Options using the transport `kind`
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            transport: Some(TransportOptions {
                kind: Some(kind.into()),
                extra: BTreeMap::new(),
            }),
            ..Self::default()
        }
    }

    /// Parse options from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read options from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Transport name, if set
    pub fn transport_kind(&self) -> Option<&str> {
        self.transport.as_ref()?.kind.as_deref()
    }

    /// The options as a host value, with `logger` present when one is set
    pub fn to_value(&self) -> Value {
        let mut object: crate::value::Object = self
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value.clone())))
            .collect();

        if let Some(transport) = &self.transport {
            let mut fields: crate::value::Object = transport
                .extra
                .iter()
                .map(|(key, value)| (key.clone(), Value::from(value.clone())))
                .collect();
            if let Some(kind) = &transport.kind {
                fields.insert("type".to_string(), Value::from(kind.as_str()));
            }
            object.insert("transport".to_string(), Value::Object(fields));
        }

        if self.logger.is_some() {
            object.insert("logger".to_string(), Value::Object(Default::default()));
        }
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let options = ServiceOptions::from_toml_str(
            r#"
name = "calc"

[transport]
type = "http"
port = 3000
"#,
        )
        .expect("toml");
        assert_eq!(options.transport_kind(), Some("http"));
        let transport = options.transport.as_ref().expect("transport");
        assert_eq!(transport.extra.get("port"), Some(&serde_json::json!(3000)));
        assert_eq!(options.extra.get("name"), Some(&serde_json::json!("calc")));
        assert!(options.logger.is_none());
    }

    #[test]
    fn test_from_json() {
        let options =
            ServiceOptions::from_json_str(r#"{"transport": {"type": "local"}, "timeout": 10}"#)
                .expect("json");
        assert_eq!(options.transport_kind(), Some("local"));
        assert_eq!(options.extra.get("timeout"), Some(&serde_json::json!(10)));
    }

    #[test]
    fn test_invalid_text() {
        assert!(matches!(
            ServiceOptions::from_json_str("{"),
            Err(ConfigError::JsonError(_))
        ));
        assert!(matches!(
            ServiceOptions::from_toml_str("transport = ["),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_to_value() {
        let options = ServiceOptions::new("http");
        let value = options.to_value();
        assert_eq!(value["transport"]["type"].as_str(), Some("http"));
        assert!(value["logger"].is_undefined());
    }
}
