//! Protocol errors
//!
//! Errors sent back to service clients carry an HTTP-like status code and a
//! payload `{statusCode, error, message}` that transports serialize as is.

use crate::schema::{ValidationDetail, ValidationError};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Payload message of server-side errors, which never leak their details
const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// An error with a status code and a client-facing payload.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ProtocolError {
    /// Full message, kept even when the payload hides it
    pub message: String,
    pub output: Output,
    /// Offending fields, when the error comes from validation
    pub details: Vec<ValidationDetail>,
    /// Set once the error has been given a status code
    pub is_boom: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub status_code: u16,
    pub payload: Payload,
}

/// What clients receive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub status_code: u16,
    /// Short label, the status reason phrase by default
    pub error: String,
    pub message: String,
}

impl ProtocolError {
    /// Create an error with the given status code.
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        let mut error = Self {
            message: message.into(),
            output: Output {
                status_code,
                payload: Payload {
                    status_code,
                    error: String::new(),
                    message: String::new(),
                },
            },
            details: Vec::new(),
            is_boom: true,
        };
        error.reformat();
        error
    }

    /// Give `error` a status code.
    ///
    /// An error that already has one is reset: its status and payload are
    /// rebuilt from the new code, so earlier labels do not survive.
    pub fn wrap(error: impl Into<ProtocolError>, status_code: u16) -> Self {
        let mut error = error.into();
        error.output.status_code = status_code;
        error.output.payload.status_code = status_code;
        error.is_boom = true;
        error.reformat();
        error
    }

    pub fn status_code(&self) -> u16 {
        self.output.status_code
    }

    pub fn payload(&self) -> &Payload {
        &self.output.payload
    }

    /// Rebuild the payload from the status code and message.
    pub fn reformat(&mut self) {
        let status = self.output.status_code;
        self.output.payload.error = reason_phrase(status).to_string();
        self.output.payload.message = if status >= 500 {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.message.clone()
        };
    }
}

impl From<ValidationError> for ProtocolError {
    fn from(error: ValidationError) -> Self {
        let mut wrapped = ProtocolError::new(error.message, 500);
        wrapped.details = error.details;
        wrapped
    }
}

fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown")
}
