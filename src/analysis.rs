//! Annotates request/response headers with descriptions from the embedded
//! header database.

use std::collections::HashMap;

use serde::Deserialize;

use crate::constants;
use crate::error::ReplayError;
use crate::types::{HeaderEntry, HeaderKind, HeaderReport};

#[derive(Deserialize)]
struct HeaderDatabase {
    request_headers: HashMap<String, String>,
    response_headers: HashMap<String, String>,
}

pub struct HeaderAnalyzer {
    request_headers: HashMap<String, String>,
    response_headers: HashMap<String, String>,
}

impl HeaderAnalyzer {
    /// Parse the embedded database once; lookups are case-insensitive.
    pub fn new() -> Result<Self, ReplayError> {
        let database: HeaderDatabase = serde_json::from_str(constants::HTTP_HEADERS_JSON)
            .map_err(|err| ReplayError::Codec(format!("header database: {}", err)))?;
        Ok(HeaderAnalyzer {
            request_headers: lowercase_keys(database.request_headers),
            response_headers: lowercase_keys(database.response_headers),
        })
    }

    /// Analyze pasted request text. Request headers run up to the first
    /// blank line; a pasted response section is recognized by a line
    /// starting with `HTTP/`.
    pub fn analyze(&self, request_text: &str) -> Result<HeaderReport, ReplayError> {
        let lines: Vec<&str> = request_text.lines().collect();
        if lines.is_empty() {
            return Err(ReplayError::EmptyRequest);
        }

        let mut headers: Vec<HeaderEntry> = Vec::new();

        for line in lines.iter().skip(1) {
            if line.trim().is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push(self.entry(name, value, HeaderKind::Request));
            }
        }

        let mut in_response = false;
        for line in &lines {
            if line.trim().starts_with("HTTP/") {
                in_response = true;
                continue;
            }
            if in_response {
                if line.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    headers.push(self.entry(name, value, HeaderKind::Response));
                }
            }
        }

        let request_count = headers
            .iter()
            .filter(|entry| entry.kind == HeaderKind::Request)
            .count();
        let response_count = headers.len() - request_count;
        let standard_count = headers.iter().filter(|entry| entry.is_standard).count();

        Ok(HeaderReport {
            total_headers: headers.len(),
            request_headers: request_count,
            response_headers: response_count,
            standard_headers: standard_count,
            custom_headers: headers.len() - standard_count,
            headers,
        })
    }

    fn entry(&self, name: &str, value: &str, kind: HeaderKind) -> HeaderEntry {
        let database = match kind {
            HeaderKind::Request => &self.request_headers,
            HeaderKind::Response => &self.response_headers,
        };
        let description = database.get(&name.trim().to_ascii_lowercase());
        HeaderEntry {
            header: name.trim().to_string(),
            value: value.trim().to_string(),
            description: description
                .cloned()
                .unwrap_or_else(|| "Custom Header".to_string()),
            is_standard: description.is_some(),
            kind,
        }
    }
}

fn lowercase_keys(map: HashMap<String, String>) -> HashMap<String, String> {
    map.into_iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_and_custom_headers_are_classified() {
        let analyzer = HeaderAnalyzer::new().unwrap();
        let text = "GET / HTTP/1.1\nHost: example.com\nX-Internal-Debug: on\n\n";
        let report = analyzer.analyze(text).unwrap();

        assert_eq!(report.total_headers, 2);
        assert_eq!(report.request_headers, 2);
        assert_eq!(report.standard_headers, 1);
        assert_eq!(report.custom_headers, 1);

        assert!(report.headers[0].is_standard);
        assert_eq!(report.headers[1].description, "Custom Header");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let analyzer = HeaderAnalyzer::new().unwrap();
        let report = analyzer
            .analyze("GET / HTTP/1.1\nUSER-AGENT: curl\n\n")
            .unwrap();
        assert!(report.headers[0].is_standard);
    }

    #[test]
    fn pasted_response_section_is_analyzed_separately() {
        let analyzer = HeaderAnalyzer::new().unwrap();
        let text = "GET / HTTP/1.1\nHost: example.com\n\nHTTP/1.1 200 OK\nServer: nginx\nX-Custom: 1\n\nbody";
        let report = analyzer.analyze(text).unwrap();

        assert_eq!(report.request_headers, 1);
        assert_eq!(report.response_headers, 2);
        let server = report
            .headers
            .iter()
            .find(|entry| entry.header == "Server")
            .unwrap();
        assert_eq!(server.kind, HeaderKind::Response);
        assert!(server.is_standard);
    }
}
