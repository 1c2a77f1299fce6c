//! Identity collaborator: opaque bearer token in, user id out.
//!
//! Tokens are HMAC-SHA256 signed and time-limited.
//! Format: `<user_id>.<expires_at_unix>.<hmac_hex>`, MAC over `<user_id>:<expires_at>`.

pub mod extractor;

pub use extractor::AuthUser;

use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Tokens are valid for one hour unless issued otherwise.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token format: {0}")]
    InvalidFormat(String),

    #[error("token signature verification failed")]
    SignatureMismatch,

    #[error("token expired")]
    Expired,

    #[error("invalid token secret: {0}")]
    InvalidSecret(String),
}

/// Signing key for identity tokens.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig").finish_non_exhaustive()
    }
}

impl TokenConfig {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Parses a hex-encoded secret, as stored in `TOKEN_SECRET`.
    pub fn from_hex(secret_hex: &str) -> Result<Self, TokenError> {
        let secret = hex::decode(secret_hex.trim())
            .map_err(|e| TokenError::InvalidSecret(format!("not valid hex: {e}")))?;
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret("secret is empty".to_string()));
        }
        Ok(Self::new(secret))
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }
}

/// Issues a token for `user_id` valid for `ttl_secs` from now.
pub fn issue_token(config: &TokenConfig, user_id: Uuid, ttl_secs: i64) -> String {
    let expires_at = (Utc::now() + Duration::seconds(ttl_secs)).timestamp();
    let mut mac = config.mac();
    mac.update(signed_message(user_id, expires_at).as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("{user_id}.{expires_at}.{signature}")
}

/// Resolves a token to the user it was issued for.
pub fn get_identity(config: &TokenConfig, token: &str) -> Result<Uuid, TokenError> {
    get_identity_at(config, token, Utc::now().timestamp())
}

fn get_identity_at(config: &TokenConfig, token: &str, now: i64) -> Result<Uuid, TokenError> {
    let mut parts = token.split('.');
    let (Some(user_part), Some(expiry_part), Some(signature_part), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::InvalidFormat(
            "expected <user_id>.<expires_at>.<signature>".to_string(),
        ));
    };

    let user_id = Uuid::parse_str(user_part)
        .map_err(|e| TokenError::InvalidFormat(format!("invalid user id: {e}")))?;
    let expires_at: i64 = expiry_part
        .parse()
        .map_err(|e| TokenError::InvalidFormat(format!("invalid expiry: {e}")))?;
    let signature = hex::decode(signature_part)
        .map_err(|e| TokenError::InvalidFormat(format!("invalid hex in signature: {e}")))?;

    let mut mac = config.mac();
    mac.update(signed_message(user_id, expires_at).as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::SignatureMismatch)?;

    if now >= expires_at {
        return Err(TokenError::Expired);
    }
    Ok(user_id)
}

fn signed_message(user_id: Uuid, expires_at: i64) -> String {
    format!("{user_id}:{expires_at}")
}
