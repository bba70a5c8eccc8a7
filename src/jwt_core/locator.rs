//! Scans raw request text for JWT-shaped substrings.

use std::collections::HashSet;

use regex::Regex;
use serde_json::Value;

use crate::jwt_core::codec;

/// Possibly `Bearer `-prefixed run of base64url-safe characters with two or
/// three dot-separated segments.
const TOKEN_PATTERN: &str =
    r"(?:Bearer\s+)?([A-Za-z0-9\-_=]+\.[A-Za-z0-9\-_=]+(?:\.[A-Za-z0-9\-_=]+)?)";

/// True when `token` has at least two segments and both header and payload
/// segments base64url-decode (after restoring padding) to valid JSON. The
/// signature segment is never checked.
pub fn is_jwt(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() < 2 {
        return false;
    }

    for segment in &parts[..2] {
        if segment.is_empty() {
            continue;
        }
        let decoded = match codec::decode_segment(segment) {
            Ok(decoded) => decoded,
            Err(_) => return false,
        };
        if serde_json::from_slice::<Value>(&decoded).is_err() {
            return false;
        }
    }

    true
}

/// Extract every distinct token candidate from free-form request text.
///
/// Authorization lines, cookie values, remaining header lines and finally
/// the whole text are scanned in that order; candidates failing [`is_jwt`]
/// are discarded silently, and duplicates keep their first position.
pub fn locate_tokens(text: &str) -> Vec<String> {
    let pattern = Regex::new(TOKEN_PATTERN).unwrap();
    let mut tokens: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for line in text.lines() {
        if line.contains("Authorization:") {
            collect_matches(&pattern, line, &mut tokens, &mut seen);
        }

        if line.contains("Cookie:") {
            if let Some(cookies) = line.splitn(2, ':').nth(1) {
                for pair in cookies.trim().split(';') {
                    // a cookie value, or a bare fragment that may itself be a token
                    let candidate = match pair.split_once('=') {
                        Some((_, value)) => value,
                        None => pair.trim(),
                    };
                    collect_matches(&pattern, candidate, &mut tokens, &mut seen);
                }
            }
        }

        if line.contains(':') {
            if let Some(value) = line.splitn(2, ':').nth(1) {
                collect_matches(&pattern, value.trim(), &mut tokens, &mut seen);
            }
        }
    }

    // catch-all pass over the whole text for tokens outside header lines
    collect_matches(&pattern, text, &mut tokens, &mut seen);

    tokens
}

fn collect_matches(
    pattern: &Regex,
    haystack: &str,
    tokens: &mut Vec<String>,
    seen: &mut HashSet<String>,
) {
    for captures in pattern.captures_iter(haystack) {
        let candidate = &captures[1];
        if !seen.contains(candidate) && is_jwt(candidate) {
            tokens.push(candidate.to_string());
            seen.insert(candidate.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"alg":"HS256"} . {"sub":"a"}
    const TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhIn0.sig";

    #[test]
    fn is_jwt_accepts_valid_header_and_payload() {
        assert!(is_jwt(TOKEN));
    }

    #[test]
    fn is_jwt_accepts_two_segment_token() {
        assert!(is_jwt("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhIn0"));
    }

    #[test]
    fn is_jwt_rejects_undotted_string() {
        assert!(!is_jwt("notatoken"));
    }

    #[test]
    fn is_jwt_rejects_non_json_segments() {
        // "hello" / "world" decode but are not JSON
        assert!(!is_jwt("aGVsbG8.d29ybGQ"));
    }

    #[test]
    fn locate_finds_bearer_token() {
        let text = format!("GET /api HTTP/1.1\nHost: example.com\nAuthorization: Bearer {}\n", TOKEN);
        assert_eq!(locate_tokens(&text), vec![TOKEN.to_string()]);
    }

    #[test]
    fn locate_deduplicates_across_headers() {
        let text = format!(
            "GET / HTTP/1.1\nHost: example.com\nAuthorization: Bearer {}\nCookie: session={}; theme=dark\n",
            TOKEN, TOKEN
        );
        let tokens = locate_tokens(&text);
        assert_eq!(tokens, vec![TOKEN.to_string()]);
    }

    #[test]
    fn locate_is_deterministic() {
        let other = "eyJhbGciOiJub25lIn0.eyJzdWIiOiJiIn0.";
        let text = format!(
            "POST /login HTTP/1.1\nHost: example.com\nAuthorization: Bearer {}\nX-Debug-Token: {}\n",
            TOKEN, other
        );
        let first = locate_tokens(&text);
        let second = locate_tokens(&text);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0], TOKEN);
    }

    #[test]
    fn locate_ignores_non_token_cookies() {
        let text = "GET / HTTP/1.1\nHost: example.com\nCookie: theme=dark; lang=en\n";
        assert!(locate_tokens(text).is_empty());
    }
}
