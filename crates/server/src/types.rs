use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters shared by every endpoint: `?debug=true` attaches a
/// diagnostic block to the response envelope.
#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

/// The standard response envelope for successful API calls.
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}
