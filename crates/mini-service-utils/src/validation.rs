//! Validation helpers for API parameters and responses

use crate::protocol::ProtocolError;
use crate::schema::{Schema, Validator};
use crate::value::Value;
use std::sync::Arc;

/// Property holding an API's parameter schema
pub const DEFAULT_CLAUSE: &str = "validate";

/// Status of rejected parameters
const INPUT_STATUS: u16 = 400;

/// Status of rejected responses
const OUTPUT_STATUS: u16 = 512;

/// Turn a validation failure into the error sent to the client.
///
/// The message is prefixed with `Incorrect parameters for API <id>: ` (or
/// `Incorrect response` when checking output) and the error gets status 400,
/// or 512 with a `Bad Response` label for output. Previous protocol
/// metadata is replaced. `None` passes through.
pub fn enrich_error<E>(error: Option<E>, id: &str, for_input: bool) -> Option<ProtocolError>
where
    E: Into<ProtocolError>,
{
    let mut error = error?.into();
    let role = if for_input { "parameters" } else { "response" };
    error.message = format!("Incorrect {} for API {}: {}", role, id, error.message);

    let status = if for_input { INPUT_STATUS } else { OUTPUT_STATUS };
    let mut error = ProtocolError::wrap(error, status);
    if !for_input {
        error.output.payload.error = "Bad Response".to_string();
    }
    Some(error)
}

/// Check the parameters of a call to API `id`.
///
/// More than `max` parameters is a 400 error; otherwise `values` is checked
/// against `schema`, when one is given, and failures are enriched as input
/// errors.
pub fn validate_params(
    values: &Value,
    schema: Option<&dyn Validator>,
    id: &str,
    max: usize,
) -> Option<ProtocolError> {
    let count = values.as_object().map_or(0, |map| map.len());
    if count > max {
        return Some(ProtocolError::new(
            format!("API {} must contain at most {} parameters", id, max),
            INPUT_STATUS,
        ));
    }

    let schema = schema?;
    enrich_error(schema.validate(values).err(), id, true)
}

/// Schema attached to API `id` under `clause` (`validate` by default),
/// falling back to the same key of the service options.
pub fn extract_validate(
    id: &str,
    apis: &Value,
    opts: &Value,
    clause: Option<&str>,
) -> Option<Arc<Schema>> {
    let clause = clause.unwrap_or(DEFAULT_CLAUSE);
    apis[id][clause]
        .as_schema()
        .or_else(|| opts[clause].as_schema())
        .cloned()
}
