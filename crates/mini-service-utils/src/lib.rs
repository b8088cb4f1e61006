//! Mini-service utilities
//!
//! Helpers shared by mini-service servers and clients:
//!
//! - [`extract_params`]: parameter names of an API function, read from its
//!   source text
//! - [`extract_groups`]: normalized API group declarations
//! - [`enrich_error`], [`validate_params`]: validation failures as protocol
//!   errors
//! - [`load_transport`]: transport lookup by name
//! - [`get_logger`]: the shared service logger

pub mod apis;
pub mod config;
pub mod error;
pub mod groups;
pub mod logger;
pub mod parser;
pub mod protocol;
pub mod schema;
pub mod signature;
pub mod transport;
pub mod validation;
pub mod value;

pub use apis::{array_to_obj, is_api};
pub use config::{ConfigError, ServiceOptions, TransportOptions};
pub use error::{BoxError, Error, Result};
pub use groups::{extract_groups, group_schema, ApiGroup, ExtractedGroups};
pub use logger::{get_logger, reset_logger, Log, Logger, LoggerOptions};
pub use protocol::{Output, Payload, ProtocolError};
pub use schema::{Schema, ValidationDetail, ValidationError, Validator};
#[allow(deprecated)]
pub use signature::extract_params_strict;
pub use signature::{extract_params, extract_params_from_source, parse_signature, Parameter};
pub use transport::{load_transport, Resolver, TransportRegistry};
pub use validation::{enrich_error, extract_validate, validate_params};
pub use value::{Function, Object, Value};

/// Response header carrying the checksum of a service's exposed APIs
pub const CHECKSUM_HEADER: &str = "x-service-crc";
