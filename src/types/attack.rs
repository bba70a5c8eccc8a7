use serde::Serialize;

/// Result of the unverified-signature tamper attack.
///
/// `success` is only set when the replayed response carried a parseable
/// status below 400.
#[derive(Debug, Clone, Serialize)]
pub struct TamperOutcome {
    pub success: bool,
    pub modified_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub details: String,
}

/// One probe of the none-signature attack.
#[derive(Debug, Clone, Serialize)]
pub struct NoneAttempt {
    pub variation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of the none-signature attack, with the per-variation attempt log
/// kept even when every variation failed.
#[derive(Debug, Clone, Serialize)]
pub struct NoneBypassOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_variation: Option<String>,
    pub all_results: Vec<NoneAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub details: String,
}

/// One probe of the kid-traversal attack.
#[derive(Debug, Clone, Serialize)]
pub struct KidAttempt {
    pub path: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of the kid-traversal attack.
#[derive(Debug, Clone, Serialize)]
pub struct KidTraversalOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_path: Option<String>,
    pub all_results: Vec<KidAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub details: String,
}

/// Result of an attack that forges a token without replaying it
/// (JWK injection, algorithm confusion).
#[derive(Debug, Clone, Serialize)]
pub struct ForgeOutcome {
    pub success: bool,
    pub modified_token: String,
    pub details: String,
}

/// Result of the external brute-force run.
#[derive(Debug, Clone, Serialize)]
pub struct CrackOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub details: String,
    /// Captured tool output, kept for diagnostics when nothing was found.
    pub output: Vec<String>,
}
