//! JWT issuing and validation.

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;
use uuid::Uuid;

const SECONDS_PER_DAY: i64 = 86_400;

/// Why a token was rejected. Expired tokens are kept distinct from
/// tampered or malformed ones so clients can prompt a re-login instead of
/// treating the failure as corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

/// Issues and validates bearer tokens signed with a server-held secret.
pub struct JwtHandler {
    secret: String,
    expiry_secs: i64,
}

impl JwtHandler {
    /// Create a handler from the signing secret and a configured expiry
    /// string such as `"1d"`, `"12h"`, `"30m"` or plain seconds.
    pub fn new(secret: String, expire: &str) -> Self {
        Self {
            secret,
            expiry_secs: parse_expiry(expire),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_expiry_secs(secret: String, expiry_secs: i64) -> Self {
        Self {
            secret,
            expiry_secs,
        }
    }

    /// Issue a token carrying `admin_id` as the subject claim. Pure
    /// computation, no store access.
    pub fn issue(&self, admin_id: &Uuid) -> Result<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::seconds(self.expiry_secs))
            .context("Invalid expiry timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: admin_id.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration,
        };

        debug!(
            "Issuing JWT for admin {}, expires in {}s",
            admin_id, self.expiry_secs
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to sign JWT")
    }

    /// Validate signature and expiry, returning the claims on success.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }
}

/// Parse a configured expiry like `"1d"`, `"12h"`, `"30m"`, `"45s"` or a
/// bare number of seconds. Incidental whitespace is trimmed first;
/// unparseable or non-positive values fall back to one day.
fn parse_expiry(raw: &str) -> i64 {
    let s = raw.trim();
    if s.is_empty() {
        return SECONDS_PER_DAY;
    }

    let (number, unit) = match s.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&s[..idx], Some(c.to_ascii_lowercase())),
        _ => (s, None),
    };

    let Ok(n) = number.trim().parse::<i64>() else {
        return SECONDS_PER_DAY;
    };
    if n <= 0 {
        return SECONDS_PER_DAY;
    }

    match unit {
        Some('d') => n * SECONDS_PER_DAY,
        Some('h') => n * 3600,
        Some('m') => n * 60,
        Some('s') | None => n,
        Some(_) => SECONDS_PER_DAY,
    }
}
