//! Crate error type

use crate::config::ConfigError;
use crate::schema::ValidationError;
use thiserror::Error;

/// Boxed error returned by transport resolvers
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the service utilities.
///
/// Validation failures of API parameters and responses are not part of this
/// enum: they surface as [`ProtocolError`](crate::ProtocolError) values.
#[derive(Debug, Error)]
pub enum Error {
    /// Parameter extraction could not read the function's source
    #[error("unsupported function {source_text}")]
    UnsupportedFunction {
        /// Textual form of the value that was analyzed
        source_text: String,
        /// What the parser rejected
        reason: String,
    },

    /// A `groups` entry is not a valid group
    #[error("Group definition {0}")]
    GroupDefinitionInvalid(String),

    /// Neither a group nor a `groups` array was given
    #[error("No APIs nor APIs groups defined")]
    NoGroupsDefined,

    /// Service options failed validation
    #[error("{0}")]
    OptionsInvalid(ValidationError),

    /// The transport resolver failed
    #[error("Cannot load transport {kind}: {cause}")]
    TransportLoadFailed {
        /// Requested transport type
        kind: String,
        /// Resolver failure
        #[source]
        cause: BoxError,
    },

    /// A validation pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration could not be read
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias using the crate [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Internal reason of an [`Error::UnsupportedFunction`]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Error::UnsupportedFunction { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
