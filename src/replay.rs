//! Raw-request replay against the live target.
//!
//! The attack strategies only ever see the [`Replay`] trait, so tests can
//! substitute a canned transport.

use std::str::FromStr;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::redirect::Policy;

use crate::constants;
use crate::error::ReplayError;
use crate::types::{RawRequest, ReplayOptions};

/// External collaborator contract: send a raw request, get back the full
/// response rendered as text.
pub trait Replay {
    async fn replay(
        &self,
        request_text: &str,
        options: &ReplayOptions,
    ) -> Result<String, ReplayError>;
}

/// Split raw request text into request line, headers and body, resolving
/// the target to an absolute https URL.
pub fn parse_raw_request(request_text: &str) -> Result<RawRequest, ReplayError> {
    let mut lines = request_text.lines();
    let request_line = lines
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .ok_or(ReplayError::EmptyRequest)?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().ok_or(ReplayError::InvalidRequestLine)?.to_string();
    let target = parts.next().ok_or(ReplayError::InvalidRequestLine)?.to_string();

    let mut headers: Vec<(String, String)> = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;
    for line in lines {
        if in_body {
            body_lines.push(line);
        } else if line.trim().is_empty() {
            in_body = true;
        } else if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    let body = {
        let joined = body_lines.join("\n").trim().to_string();
        (!joined.is_empty()).then_some(joined)
    };

    let url = resolve_target(&target, &headers)?;

    Ok(RawRequest {
        method,
        url,
        headers,
        body,
    })
}

/// Relative targets resolve against the `Host` header; plain-http targets
/// are upgraded. Everything leaves here as https.
fn resolve_target(target: &str, headers: &[(String, String)]) -> Result<String, ReplayError> {
    if !target.starts_with("http") {
        let host = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("host"))
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
            .ok_or(ReplayError::MissingHost)?;
        Ok(format!("https://{}{}", host, target))
    } else if let Some(rest) = target.strip_prefix("http://") {
        Ok(format!("https://{}", rest))
    } else {
        Ok(target.to_string())
    }
}

/// Shared client builder for replays and short probes: redirects off so 3xx
/// stays observable, optional proxy, optional TLS bypass, 5s timeout.
pub(crate) fn build_client(options: &ReplayOptions) -> Result<reqwest::Client, ReplayError> {
    let mut builder = reqwest::Client::builder()
        .redirect(Policy::none())
        .danger_accept_invalid_certs(!options.verify)
        .timeout(Duration::from_secs(constants::REPLAY_TIMEOUT_SECS));

    if options.use_proxy {
        let address = options
            .proxy_address
            .as_deref()
            .filter(|address| !address.is_empty())
            .ok_or(ReplayError::MissingProxyAddress)?;
        let address = if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{}", address)
        };
        let proxy =
            reqwest::Proxy::all(&address).map_err(|err| ReplayError::Network(err.to_string()))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|err| ReplayError::Network(err.to_string()))
}

/// Status code from the first line of a rendered response.
pub fn status_of(response_text: &str) -> Option<u16> {
    response_text
        .lines()
        .next()?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}

/// reqwest-backed replayer.
pub struct HttpReplayer;

impl Replay for HttpReplayer {
    async fn replay(
        &self,
        request_text: &str,
        options: &ReplayOptions,
    ) -> Result<String, ReplayError> {
        let request = parse_raw_request(request_text)?;
        let client = build_client(options)?;

        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| ReplayError::InvalidRequestLine)?;
        let mut builder = client.request(method, &request.url);
        for (name, value) in &request.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_str(name),
                HeaderValue::from_str(value),
            ) {
                builder = builder.header(name, value);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ReplayError::Network(err.to_string()))?;
        render_response(response).await
    }
}

/// Rebuild an HTTP/1.x-style text blob from a reqwest response.
async fn render_response(response: reqwest::Response) -> Result<String, ReplayError> {
    let mut text = format!(
        "{:?} {} {}\r\n",
        response.version(),
        response.status().as_u16(),
        response.status().canonical_reason().unwrap_or("")
    );
    for (name, value) in response.headers() {
        text.push_str(name.as_str());
        text.push_str(": ");
        text.push_str(value.to_str().unwrap_or(""));
        text.push_str("\r\n");
    }
    text.push_str("\r\n");

    let body = response
        .text()
        .await
        .map_err(|err| ReplayError::Network(err.to_string()))?;
    text.push_str(&body);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_request_line_headers_and_body() {
        let text = "POST /api/login HTTP/1.1\nHost: example.com\nContent-Type: application/json\n\n{\"user\":\"a\"}";
        let request = parse_raw_request(text).unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "https://example.com/api/login");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some("{\"user\":\"a\"}"));
    }

    #[test]
    fn parse_rejects_empty_request() {
        assert!(matches!(parse_raw_request(""), Err(ReplayError::EmptyRequest)));
        assert!(matches!(parse_raw_request("\n\n"), Err(ReplayError::EmptyRequest)));
    }

    #[test]
    fn parse_rejects_bare_method() {
        assert!(matches!(
            parse_raw_request("GET\nHost: example.com\n"),
            Err(ReplayError::InvalidRequestLine)
        ));
    }

    #[test]
    fn relative_target_without_host_is_an_error() {
        let text = "GET /index HTTP/1.1\nAccept: */*\n";
        assert!(matches!(parse_raw_request(text), Err(ReplayError::MissingHost)));
    }

    #[test]
    fn insecure_absolute_target_is_upgraded() {
        let text = "GET http://example.com/page HTTP/1.1\nHost: example.com\n";
        let request = parse_raw_request(text).unwrap();
        assert_eq!(request.url, "https://example.com/page");
    }

    #[test]
    fn secure_absolute_target_is_untouched() {
        let text = "GET https://example.com/page?q=1 HTTP/1.1\nHost: example.com\n";
        let request = parse_raw_request(text).unwrap();
        assert_eq!(request.url, "https://example.com/page?q=1");
    }

    #[test]
    fn status_of_reads_first_line() {
        assert_eq!(status_of("HTTP/1.1 403 Forbidden\r\nServer: x\r\n\r\n"), Some(403));
        assert_eq!(status_of("HTTP/1.1 200 OK\r\n\r\nbody"), Some(200));
        assert_eq!(status_of("garbage"), None);
    }

    #[test]
    fn proxy_without_address_is_an_error() {
        let options = ReplayOptions {
            use_proxy: true,
            proxy_address: None,
            verify: true,
        };
        assert!(matches!(
            build_client(&options),
            Err(ReplayError::MissingProxyAddress)
        ));
    }
}
