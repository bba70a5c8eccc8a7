use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderKind {
    Request,
    Response,
}

/// One analyzed header line.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderEntry {
    pub header: String,
    pub value: String,
    pub description: String,
    pub is_standard: bool,
    #[serde(rename = "type")]
    pub kind: HeaderKind,
}

/// Full header analysis: request entries first, then response entries.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderReport {
    pub total_headers: usize,
    pub request_headers: usize,
    pub response_headers: usize,
    pub standard_headers: usize,
    pub custom_headers: usize,
    pub headers: Vec<HeaderEntry>,
}
