use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered claims plus whatever else the payload carries. Every field is
/// optional; the dictionary check must accept tokens with arbitrary payloads.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<usize>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
