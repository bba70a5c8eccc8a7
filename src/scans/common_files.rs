//! Probes a target for well-known sensitive paths, streaming a cumulative
//! progress snapshot after every checked file.

use tokio::sync::mpsc;

use crate::error::ReplayError;
use crate::replay;
use crate::types::{CheckedFile, CommonFilesProgress, FoundFile, ReplayOptions};

/// Base URL for probing, derived from the request line: absolute targets
/// keep scheme and authority (query stripped), relative targets resolve to
/// `https://<Host>`.
pub fn base_url_of(request_text: &str) -> Result<String, ReplayError> {
    let first_line = request_text
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or(ReplayError::EmptyRequest)?;

    let mut parts = first_line.split_whitespace();
    let _method = parts.next().ok_or(ReplayError::InvalidRequestLine)?;
    let target = parts.next().ok_or(ReplayError::InvalidRequestLine)?;

    if target.starts_with("http") {
        Ok(target.split('?').next().unwrap_or(target).to_string())
    } else {
        let host = request_text
            .lines()
            .skip(1)
            .find(|line| line.to_ascii_lowercase().starts_with("host:"))
            .and_then(|line| line.splitn(2, ':').nth(1))
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .ok_or(ReplayError::MissingHost)?
            .to_string();
        Ok(format!("https://{}", host))
    }
}

/// Start the scan and return the snapshot stream. Setup problems (bad
/// request text, missing host, missing proxy address) fail here, before any
/// event is produced; per-path network errors are recorded inside the
/// snapshots and never terminate the scan. Dropping the receiver stops the
/// producer at the next file boundary.
pub fn scan(
    request_text: &str,
    options: &ReplayOptions,
    files: Vec<String>,
) -> Result<mpsc::Receiver<CommonFilesProgress>, ReplayError> {
    let base_url = base_url_of(request_text)?;
    let client = replay::build_client(options)?;
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut progress = CommonFilesProgress {
            total_files: files.len(),
            ..Default::default()
        };
        if tx.send(progress.clone()).await.is_err() {
            return;
        }

        for file_path in files {
            let url = format!(
                "{}/{}",
                base_url.trim_end_matches('/'),
                file_path.trim_start_matches('/')
            );

            match client.head(&url).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let success = status == 200;
                    let mut response_length = None;
                    if success {
                        // HEAD carries no body; fetch it to measure
                        if let Ok(full) = client.get(&url).send().await {
                            if let Ok(body) = full.bytes().await {
                                response_length = Some(body.len());
                            }
                        }
                        progress.found_files.push(FoundFile {
                            file_path: file_path.clone(),
                            url: url.clone(),
                            response_length: response_length.unwrap_or(0),
                        });
                    }
                    progress.checked_files.push(CheckedFile {
                        file_path,
                        url,
                        status_code: Some(status),
                        success,
                        response_length,
                        error: None,
                    });
                }
                Err(err) => progress.checked_files.push(CheckedFile {
                    file_path,
                    url,
                    status_code: None,
                    success: false,
                    response_length: None,
                    error: Some(err.to_string()),
                }),
            }

            progress.total_files_checked = progress.checked_files.len();
            progress.files_found = progress.found_files.len();
            if tx.send(progress.clone()).await.is_err() {
                return;
            }
        }
    });

    Ok(rx)
}
