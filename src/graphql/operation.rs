//! Operation types and the GraphQL wire envelope

use crate::types::JsonValue;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::executor::{ExecuteError, GraphqlOutcome};

/// Typed GraphQL operation definition.
///
/// Implement this trait for each fixed query.
pub trait GraphqlOperation {
    /// Variables type
    type Variables: Serialize + Send + Sync;
    /// Shape of the `data` member of a successful response
    type ResponseData: DeserializeOwned + Send;

    /// GraphQL query text
    const QUERY: &'static str;
    /// Operation name (sent on the wire and used in diagnostics)
    const OPERATION_NAME: &'static str;
}

/// GraphQL request payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    /// Query text
    pub query: String,
    /// Variables, already serialized
    pub variables: JsonValue,
    /// Operation name
    pub operation_name: String,
}

impl GraphqlRequest {
    /// Build the request for a typed operation
    pub fn for_operation<O: GraphqlOperation>(
        variables: &O::Variables,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            query: O::QUERY.to_string(),
            variables: serde_json::to_value(variables)?,
            operation_name: O::OPERATION_NAME.to_string(),
        })
    }
}

/// A single entry of a response's `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    /// Human-readable message
    pub message: String,
    /// GitHub's error classification (e.g. `RATE_LIMITED`, `NOT_FOUND`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<JsonValue>,
}

/// GraphQL response envelope as received from the server
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    /// Classify the envelope into a single outcome.
    ///
    /// A non-empty `errors` array wins over any partial `data`. A response
    /// with neither is malformed and reported as a deserialization failure.
    pub fn into_outcome(self) -> Result<GraphqlOutcome<JsonValue>, ExecuteError> {
        match (self.errors, self.data) {
            (Some(errors), _) if !errors.is_empty() => Ok(GraphqlOutcome::Errors(
                errors.into_iter().map(|e| e.message).collect(),
            )),
            (_, Some(data)) if !data.is_null() => Ok(GraphqlOutcome::Data(data)),
            _ => Err(ExecuteError::deserialize(
                "response carried neither data nor errors",
            )),
        }
    }
}
