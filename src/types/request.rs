/// A raw HTTP request pulled apart for replay: request line, ordered header
/// list and optional body. The URL is already resolved to an absolute
/// https target.
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RawRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Knobs forwarded to every outbound request.
#[derive(Debug, Clone)]
pub struct ReplayOptions {
    pub use_proxy: bool,
    pub proxy_address: Option<String>,
    /// Verify TLS certificates. Off lets self-signed lab targets through.
    pub verify: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        ReplayOptions {
            use_proxy: false,
            proxy_address: None,
            verify: true,
        }
    }
}
