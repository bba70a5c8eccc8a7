use serde::Serialize;

/// Record of one probed path.
#[derive(Debug, Clone, Serialize)]
pub struct CheckedFile {
    pub file_path: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A path that answered 200.
#[derive(Debug, Clone, Serialize)]
pub struct FoundFile {
    pub file_path: String,
    pub url: String,
    pub response_length: usize,
}

/// Cumulative snapshot emitted after every probed path. Insertion order of
/// `checked_files`/`found_files` matches probe order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommonFilesProgress {
    pub total_files: usize,
    pub total_files_checked: usize,
    pub files_found: usize,
    pub checked_files: Vec<CheckedFile>,
    pub found_files: Vec<FoundFile>,
}

/// One event from the wayback search stream. `Failed` and `Finished` are
/// terminal; the producer closes the channel after sending either.
#[derive(Debug, Clone)]
pub enum WaybackEvent {
    Progress(String),
    Failed(String),
    Finished(String),
}
