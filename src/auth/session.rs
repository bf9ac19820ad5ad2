//! HMAC-signed session tokens.
//!
//! A token is `base64url(subject).expiry.signature` where the signature is
//! HMAC-SHA256 over `"{subject}\n{expiry}"` with the configured secret.
//! Verification checks expiry first, then compares signatures in constant
//! time.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::Identity;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "gallery_session";

/// Session verification errors.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Missing session token")]
    MissingToken,

    #[error("Malformed session token")]
    MalformedToken,

    #[error("Session expired at {expired_at} (current time: {current_time})")]
    Expired { expired_at: u64, current_time: u64 },

    #[error("Invalid session signature")]
    InvalidSignature,
}

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct SessionAuth {
    secret_key: Vec<u8>,
    ttl: Duration,
}

impl SessionAuth {
    /// Create an authenticator with the given secret key and session TTL.
    ///
    /// The key should be at least 32 bytes.
    pub fn new(secret_key: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret_key: secret_key.as_ref().to_vec(),
            ttl,
        }
    }

    /// Issue a token for the given subject, valid for the configured TTL.
    pub fn issue(&self, subject: &str) -> String {
        let expiry = unix_now() + self.ttl.as_secs();
        let signature = self.compute_signature(subject, expiry);
        format!(
            "{}.{}.{}",
            general_purpose::URL_SAFE_NO_PAD.encode(subject),
            expiry,
            signature
        )
    }

    /// Verify a token and return the identity it carries.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut parts = token.split('.');
        let (subject_b64, expiry_str, signature) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(s), Some(e), Some(sig), None) => (s, e, sig),
            _ => return Err(AuthError::MalformedToken),
        };

        let subject_bytes = general_purpose::URL_SAFE_NO_PAD
            .decode(subject_b64)
            .map_err(|_| AuthError::MalformedToken)?;
        let subject =
            String::from_utf8(subject_bytes).map_err(|_| AuthError::MalformedToken)?;
        let expiry: u64 = expiry_str.parse().map_err(|_| AuthError::MalformedToken)?;

        let current_time = unix_now();
        if current_time > expiry {
            return Err(AuthError::Expired {
                expired_at: expiry,
                current_time,
            });
        }

        let provided = hex::decode(signature).map_err(|_| AuthError::MalformedToken)?;
        let expected =
            hex::decode(self.compute_signature(&subject, expiry)).expect("hex round trip");

        if provided.ct_eq(&expected).into() {
            Ok(Identity { subject })
        } else {
            Err(AuthError::InvalidSignature)
        }
    }

    fn compute_signature(&self, subject: &str, expiry: u64) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret_key)
            .expect("HMAC can take key of any size");
        mac.update(subject.as_bytes());
        mac.update(b"\n");
        mac.update(expiry.to_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs()
}
