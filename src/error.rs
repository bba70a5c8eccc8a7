use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Empty request")]
    EmptyRequest,
    #[error("Invalid request format")]
    InvalidRequestLine,
    #[error("No host specified in headers and path is not absolute URL")]
    MissingHost,
    #[error("Invalid JWT format")]
    InvalidToken,
    #[error("Token decoding failed: {0}")]
    Codec(String),
    #[error("Invalid JSON in {section} section: {reason}")]
    MalformedSection { section: &'static str, reason: String },
    #[error("Missing Header or Payload section")]
    MissingSection,
    #[error("No JWK found in token header")]
    MissingJwk,
    #[error("Only RSA keys are supported for this attack")]
    UnsupportedKeyType,
    #[error("Please enter a proxy address")]
    MissingProxyAddress,
    #[error("Wordlist file not found at {0}")]
    WordlistNotFound(String),
    #[error("The wordlist file is empty: {0}")]
    WordlistEmpty(String),
    #[error("Cracking tool unavailable: {0}")]
    CrackerUnavailable(String),
    #[error("Cracking tool failed: {0}")]
    CrackerFailed(String),
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Signing failed: {0}")]
    Signing(String),
    #[error("Key format error: {0}")]
    KeyFormat(String),
    #[error("Request failed: {0}")]
    Network(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
