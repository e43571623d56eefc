//! Compact signed tokens for magic-link authentication.
//!
//! A token is `{header_base64}.{claims_base64}.{signature_base64}` with all
//! segments base64 URL-safe no-pad encoded and the signature an HMAC-SHA256
//! over `{header_base64}.{claims_base64}` under a server-held secret. The
//! token is self-contained: the expiry travels in the claims, so a verifier
//! only needs the signing secret.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use once_cell::sync::Lazy;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a magic-link token, in seconds.
pub const MAGIC_LINK_TTL_SECONDS: i64 = 900;

static HEADER: Lazy<Header> = Lazy::new(|| Header {
    header_type: "JWT".to_string(),
    alg: "HS256".to_string(),
});

static HEADER_BASE64: Lazy<String> =
    Lazy::new(|| base64_encode(&*HEADER).expect("header should be serializable"));

/// Serializes the value into JSON and encodes the result with
/// base64 URL-safe no-pad.
fn base64_encode<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_string(value)?))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
struct Header {
    #[serde(rename = "typ")]
    header_type: String,
    alg: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// The user the link authenticates.
    pub sub: String,
    pub username: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub created_by: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Random nonce; keeps two tokens minted within the same second distinct
    /// and doubles as the stored link id.
    pub jti: String,
}

impl Claims {
    pub fn magic_link(user_id: &str, username: &str, issued_at: DateTime<Utc>) -> Self {
        let mut nonce = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut nonce);

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            token_type: "magic_link".to_string(),
            created_by: "bot".to_string(),
            iat: issued_at.timestamp(),
            exp: issued_at.timestamp() + MAGIC_LINK_TTL_SECONDS,
            jti: hex::encode(nonce),
        }
    }

    /// Decodes the claims from a base64 encoded JSON string.
    pub fn base64_decode(encoded_json: &str) -> Result<Self, TokenError> {
        let decoded = URL_SAFE_NO_PAD
            .decode(encoded_json)
            .map_err(TokenError::ClaimsDecoding)?;

        let json = std::str::from_utf8(&decoded).map_err(TokenError::ClaimsUtf8)?;

        serde_json::from_str(json).map_err(TokenError::ClaimsDeserialization)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing claims serialization: {0}")]
    ClaimsSerialization(#[source] serde_json::Error),
    #[error("Token is not in the `header.claims.signature` format")]
    InvalidFormat,
    #[error("Unexpected token header")]
    InvalidHeader,
    #[error("Claims decoding: {0}")]
    ClaimsDecoding(#[source] base64::DecodeError),
    #[error("Claims are not valid UTF-8: {0}")]
    ClaimsUtf8(#[source] std::str::Utf8Error),
    #[error("Claims deserialization: {0}")]
    ClaimsDeserialization(#[source] serde_json::Error),
    #[error("Signature decoding: {0}")]
    SignatureDecoding(#[source] base64::DecodeError),
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
}

/// Signs the claims with the server secret, producing the full token string.
pub fn sign(secret: &[u8], claims: &Claims) -> Result<String, TokenError> {
    let claims_encoded = base64_encode(claims).map_err(TokenError::ClaimsSerialization)?;
    let message = format!("{}.{}", &*HEADER_BASE64, claims_encoded);

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any size");
    mac.update(message.as_bytes());
    let signature_encoded = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{message}.{signature_encoded}"))
}

/// Verifies the signature and expiry of a token, returning its claims.
///
/// The signature check is constant-time. Expiry is checked against the
/// caller-supplied clock so verification stays deterministic under test.
pub fn verify(secret: &[u8], token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
    let mut parts = token.splitn(3, '.');
    let (header_encoded, claims_encoded, signature_encoded) =
        match (parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(claims), Some(signature)) => (header, claims, signature),
            _ => return Err(TokenError::InvalidFormat),
        };

    if header_encoded != *HEADER_BASE64 {
        return Err(TokenError::InvalidHeader);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature_encoded)
        .map_err(TokenError::SignatureDecoding)?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any size");
    mac.update(format!("{header_encoded}.{claims_encoded}").as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let claims = Claims::base64_decode(claims_encoded)?;
    if claims.exp <= now.timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

/// SHA-256 hex digest of the full token string.
///
/// This is what a link record stores; the raw token is never persisted.
pub fn token_hash(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
