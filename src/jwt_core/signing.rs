//! HS*/RS* signing over arbitrary header/payload maps.
//!
//! The attack strategies need full control over header contents (including
//! `alg` values no JWT library will emit), so tokens are assembled from
//! compact JSON by the codec and only the raw signature bytes are computed
//! here.

use hmac::{Hmac, Mac};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;
use serde_json::{Map, Value};
use sha2::{Sha256, Sha384, Sha512};
use signature::{SignatureEncoding, Signer};

use crate::error::ReplayError;
use crate::jwt_core::codec;

pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Vec<u8>, ReplayError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|err| ReplayError::Signing(err.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn hmac_sha384(key: &[u8], message: &[u8]) -> Result<Vec<u8>, ReplayError> {
    let mut mac = Hmac::<Sha384>::new_from_slice(key)
        .map_err(|err| ReplayError::Signing(err.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn hmac_sha512(key: &[u8], message: &[u8]) -> Result<Vec<u8>, ReplayError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(key)
        .map_err(|err| ReplayError::Signing(err.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Sign with the algorithm named in a JOSE header. HS* take the secret as
/// the HMAC key; RS* expect a PEM-encoded RSA private key (PKCS#8 or
/// PKCS#1) in `secret`.
pub fn sign_with_algorithm(
    algorithm: &str,
    message: &[u8],
    secret: &str,
) -> Result<Vec<u8>, ReplayError> {
    match algorithm {
        "HS256" => hmac_sha256(secret.as_bytes(), message),
        "HS384" => hmac_sha384(secret.as_bytes(), message),
        "HS512" => hmac_sha512(secret.as_bytes(), message),
        "RS256" | "RS384" | "RS512" => {
            let key = RsaPrivateKey::from_pkcs8_pem(secret)
                .or_else(|_| RsaPrivateKey::from_pkcs1_pem(secret))
                .map_err(|err| ReplayError::KeyFormat(err.to_string()))?;
            rsa_sign(algorithm, &key, message)
        }
        other => Err(ReplayError::UnsupportedAlgorithm(other.to_string())),
    }
}

fn rsa_sign(
    algorithm: &str,
    key: &RsaPrivateKey,
    message: &[u8],
) -> Result<Vec<u8>, ReplayError> {
    let signature = match algorithm {
        "RS256" => SigningKey::<Sha256>::new(key.clone()).sign(message).to_vec(),
        "RS384" => SigningKey::<Sha384>::new(key.clone()).sign(message).to_vec(),
        "RS512" => SigningKey::<Sha512>::new(key.clone()).sign(message).to_vec(),
        other => return Err(ReplayError::UnsupportedAlgorithm(other.to_string())),
    };
    Ok(signature)
}

/// Assemble a complete signed token from header/payload maps, signing with
/// the given algorithm and textual secret.
pub fn sign_token(
    header: &Map<String, Value>,
    payload: &Map<String, Value>,
    algorithm: &str,
    secret: &str,
) -> Result<String, ReplayError> {
    let signing_input = codec::signing_input(header, payload)?;
    let signature = sign_with_algorithm(algorithm, signing_input.as_bytes(), secret)?;
    Ok(join(signing_input, &signature))
}

/// Assemble a token HMAC-SHA256-signed with a raw byte key (the kid
/// traversal attack signs with a single zero byte).
pub fn sign_token_with_hmac_key(
    header: &Map<String, Value>,
    payload: &Map<String, Value>,
    key: &[u8],
) -> Result<String, ReplayError> {
    let signing_input = codec::signing_input(header, payload)?;
    let signature = hmac_sha256(key, signing_input.as_bytes())?;
    Ok(join(signing_input, &signature))
}

/// Assemble an RS256-signed token from an in-memory private key.
pub fn sign_token_rs256(
    header: &Map<String, Value>,
    payload: &Map<String, Value>,
    key: &RsaPrivateKey,
) -> Result<String, ReplayError> {
    let signing_input = codec::signing_input(header, payload)?;
    let signature = rsa_sign("RS256", key, signing_input.as_bytes())?;
    Ok(join(signing_input, &signature))
}

fn join(signing_input: String, signature: &[u8]) -> String {
    format!(
        "{}.{}",
        signing_input,
        base64::encode_config(signature, base64::URL_SAFE_NO_PAD)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn hs256_matches_known_vector() {
        // jwt.io example token, signed with "your-256-bit-secret"
        let signing_input = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ";
        let signature = hmac_sha256(b"your-256-bit-secret", signing_input.as_bytes()).unwrap();
        assert_eq!(
            base64::encode_config(signature, base64::URL_SAFE_NO_PAD),
            "SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c"
        );
    }

    #[test]
    fn sign_token_uses_named_algorithm() {
        let header = object(&[("alg", json!("HS256")), ("typ", json!("JWT"))]);
        let payload = object(&[("sub", json!("a"))]);
        let token = sign_token(&header, &payload, "HS256", "secret").unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);
        let expected =
            hmac_sha256(b"secret", format!("{}.{}", parts[0], parts[1]).as_bytes()).unwrap();
        assert_eq!(
            parts[2],
            base64::encode_config(expected, base64::URL_SAFE_NO_PAD)
        );
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let header = object(&[("alg", json!("ES256"))]);
        let payload = object(&[]);
        assert!(matches!(
            sign_token(&header, &payload, "ES256", "secret"),
            Err(ReplayError::UnsupportedAlgorithm(_))
        ));
    }
}
