//! Base64url segment codec: decode a token to an editable two-block text
//! form, re-encode edited blocks, build unsigned tokens.

use serde_json::{Map, Value};

use crate::error::ReplayError;
use crate::jwt_core::signing;

/// Decode one base64url segment, restoring stripped padding first.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, ReplayError> {
    let padding = (4 - segment.len() % 4) % 4;
    let mut padded = String::with_capacity(segment.len() + padding);
    padded.push_str(segment);
    for _ in 0..padding {
        padded.push('=');
    }
    base64::decode_config(&padded, base64::URL_SAFE)
        .map_err(|err| ReplayError::Codec(format!("invalid base64 in token segment: {}", err)))
}

/// Decode a segment into a JSON object.
pub fn decode_object_segment(segment: &str) -> Result<Map<String, Value>, ReplayError> {
    let decoded = decode_segment(segment)?;
    serde_json::from_slice(&decoded)
        .map_err(|err| ReplayError::Codec(format!("token segment is not a JSON object: {}", err)))
}

/// Decode header and payload into the editable text form:
///
/// ```text
/// Header:
/// { ... pretty JSON ... }
///
/// Payload:
/// { ... pretty JSON ... }
/// ```
///
/// The signature segment is ignored. A segment that decodes but does not
/// parse as JSON is shown as its raw decoded text.
pub fn decode_token(token: &str) -> Result<String, ReplayError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() < 2 {
        return Err(ReplayError::InvalidToken);
    }

    let mut sections = Vec::with_capacity(2);
    for (label, segment) in [("Header", parts[0]), ("Payload", parts[1])] {
        let decoded = decode_segment(segment)?;
        let text = match serde_json::from_slice::<Value>(&decoded) {
            Ok(value) => serde_json::to_string_pretty(&value)
                .map_err(|err| ReplayError::Codec(err.to_string()))?,
            Err(_) => String::from_utf8(decoded).map_err(|_| {
                ReplayError::Codec(format!("{} segment is not valid UTF-8", label))
            })?,
        };
        sections.push(format!("{}:\n{}", label, text));
    }

    Ok(sections.join("\n\n"))
}

/// Serialize header and payload to compact JSON, base64url-encode without
/// padding, and join with the signature segment. `None` produces the empty
/// third segment of an unsigned (`alg: none`) token.
pub fn encode_token(
    header: &Map<String, Value>,
    payload: &Map<String, Value>,
    signature: Option<&[u8]>,
) -> Result<String, ReplayError> {
    let signing_input = signing_input(header, payload)?;
    let encoded_signature = signature
        .map(|raw| base64::encode_config(raw, base64::URL_SAFE_NO_PAD))
        .unwrap_or_default();
    Ok(format!("{}.{}", signing_input, encoded_signature))
}

/// The `<header>.<payload>` prefix that signatures are computed over.
pub fn signing_input(
    header: &Map<String, Value>,
    payload: &Map<String, Value>,
) -> Result<String, ReplayError> {
    let header_json = serde_json::to_string(header)
        .map_err(|err| ReplayError::Codec(format!("failed to serialize header: {}", err)))?;
    let payload_json = serde_json::to_string(payload)
        .map_err(|err| ReplayError::Codec(format!("failed to serialize payload: {}", err)))?;
    Ok(format!(
        "{}.{}",
        base64::encode_config(header_json, base64::URL_SAFE_NO_PAD),
        base64::encode_config(payload_json, base64::URL_SAFE_NO_PAD)
    ))
}

/// Reverse of [`decode_token`]: re-parse the (possibly hand-edited) two-block
/// text and re-encode it. With `use_secret` the token is signed using the
/// algorithm named in the header (HS256 when absent); otherwise the unsigned
/// encode path is used.
pub fn edit_token(
    decoded_text: &str,
    use_secret: bool,
    secret: &str,
) -> Result<String, ReplayError> {
    let mut header: Option<Map<String, Value>> = None;
    let mut payload: Option<Map<String, Value>> = None;

    for section in decoded_text.split("\n\n") {
        if let Some(body) = section_body(section, "Header:") {
            header = Some(parse_section(body, "Header")?);
        } else if let Some(body) = section_body(section, "Payload:") {
            payload = Some(parse_section(body, "Payload")?);
        }
    }

    let (header, payload) = match (header, payload) {
        (Some(header), Some(payload)) => (header, payload),
        _ => return Err(ReplayError::MissingSection),
    };

    if use_secret && !secret.is_empty() {
        let algorithm = header
            .get("alg")
            .and_then(Value::as_str)
            .unwrap_or("HS256")
            .to_string();
        signing::sign_token(&header, &payload, &algorithm, secret)
    } else {
        encode_token(&header, &payload, None)
    }
}

fn section_body<'a>(section: &'a str, marker: &str) -> Option<&'a str> {
    section
        .find(marker)
        .map(|index| section[index + marker.len()..].trim())
}

fn parse_section(body: &str, section: &'static str) -> Result<Map<String, Value>, ReplayError> {
    serde_json::from_str(body).map_err(|err| ReplayError::MalformedSection {
        section,
        reason: err.to_string(),
    })
}
