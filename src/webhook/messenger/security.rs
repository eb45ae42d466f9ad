//! Security utilities for Messenger webhook verification
//!
//! Meta signs every webhook payload with HMAC-SHA256 keyed by the app secret.
//! The signature travels in the `X-Hub-Signature-256` header (older apps also
//! send the legacy `X-Hub-Signature` header) with the format
//! `sha256=<hex_signature>`.
//!
//! To verify authenticity:
//! 1. Pick the signature header, preferring `X-Hub-Signature-256`
//! 2. Compute HMAC-SHA256 of the raw request body using the app secret
//! 3. Compare the computed signature with the received one in constant time
//! 4. Only parse the body if signatures match
//!
//! # Important Notes
//!
//! - The signature MUST be computed on the raw request body bytes, not parsed JSON
//! - The comparison must be constant-time to prevent timing attacks

use crate::{consts, errors::WebhookError};
use hmac::{Hmac, Mac};
use ntex::http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Returns the signature header value to check the request against.
///
/// `X-Hub-Signature-256` wins over the legacy `X-Hub-Signature` header when
/// both are sent. Empty values count as absent.
///
/// # Errors
///
/// * [`WebhookError::MissingSignature`] if neither header carries a value
/// * [`WebhookError::InvalidSignature`] if the chosen value is not valid UTF-8
pub fn signature_from_headers(headers: &HeaderMap) -> Result<&str, WebhookError> {
    let header_value = [consts::SIGNATURE_HEADER, consts::LEGACY_SIGNATURE_HEADER]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .find(|value| !value.as_bytes().is_empty())
        .ok_or(WebhookError::MissingSignature)?;

    header_value.to_str().map_err(|_| {
        logfire::warn!("Invalid signature header: not valid UTF-8");
        WebhookError::InvalidSignature
    })
}

/// Computes the lowercase hex HMAC-SHA256 of `payload` keyed by `app_secret`.
pub fn sign_payload(payload: &[u8], app_secret: &str) -> anyhow::Result<String> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to create HMAC instance: {}", e))?;
    mac.update(payload);

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a signature header value against the request payload
///
/// # Arguments
///
/// * `signature_header` - The header value (e.g., "sha256=abc123...")
/// * `payload` - The raw request body bytes
/// * `app_secret` - The Facebook app secret
///
/// # Returns
///
/// * `true` if the signature is valid
/// * `false` if the signature is invalid or the header format is incorrect
pub fn verify_signature(signature_header: &str, payload: &[u8], app_secret: &str) -> bool {
    // Everything after the first '=' is the digest, the algorithm tag is not checked
    let Some((_, signature_hex)) = signature_header.split_once('=') else {
        logfire::warn!("Invalid signature header format: expected '<algo>=<hex>'");
        return false;
    };

    let expected_signature = match hex::decode(signature_hex) {
        Ok(sig) => sig,
        Err(e) => {
            logfire::warn!(
                "Failed to decode signature hex: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            logfire::error!(
                "Failed to create HMAC instance: {error}",
                error = e.to_string()
            );
            return false;
        }
    };

    mac.update(payload);
    let computed_signature = mac.finalize().into_bytes();

    // ct_eq needs equal-length buffers
    if computed_signature.len() != expected_signature.len() {
        logfire::warn!("Signature mismatch: unexpected digest length");
        return false;
    }

    let is_valid: bool = computed_signature.ct_eq(&expected_signature[..]).into();

    if !is_valid {
        logfire::warn!("Signature mismatch");
    }

    is_valid
}
