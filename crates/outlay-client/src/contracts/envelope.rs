use serde::Serialize;

use crate::contracts::types::PredictionOutput;
use crate::error::{ClientError, ClientResult};

/// The only failure shape callers see: `{"error": "<message>"}`. Error codes
/// are not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureEnvelope {
    pub error: String,
}

pub fn render_output_json(output: &PredictionOutput) -> ClientResult<String> {
    serde_json::to_string(output).map_err(|err| ClientError::internal_serialization(&err.to_string()))
}

pub fn failure_from_error(error: &ClientError) -> FailureEnvelope {
    FailureEnvelope {
        error: error.message.clone(),
    }
}

pub fn render_failure_json(error: &ClientError) -> ClientResult<String> {
    serde_json::to_string(&failure_from_error(error))
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))
}
