//! Signed identity cookie.
//!
//! The identity session has no server-side record. The `session` cookie holds
//! `base64url(json) "." base64url(hmac_sha256(json))`, keyed by the configured
//! session secret. Anything that fails to verify reads as signed out.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use crate::models::SessionData;

/// Identity cookie name.
pub const IDENTITY_COOKIE: &str = "session";

/// Identity cookie lifetime in days.
const IDENTITY_MAX_AGE_DAYS: i64 = 7;

type HmacSha256 = Hmac<Sha256>;

/// Errors decoding or encoding an identity cookie value.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("malformed identity cookie")]
    Malformed,
    #[error("identity cookie signature mismatch")]
    BadSignature,
    #[error("invalid identity payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid signing key")]
    Key,
}

/// Signs and verifies identity cookie values.
#[derive(Clone)]
pub struct IdentityCodec {
    key: SecretString,
}

impl IdentityCodec {
    #[must_use]
    pub const fn new(key: SecretString) -> Self {
        Self { key }
    }

    fn mac(&self) -> Result<HmacSha256, IdentityError> {
        HmacSha256::new_from_slice(self.key.expose_secret().as_bytes())
            .map_err(|_| IdentityError::Key)
    }

    /// Serialize and sign an identity payload.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Payload` if the payload cannot be serialized.
    pub fn encode(&self, data: &SessionData) -> Result<String, IdentityError> {
        let json = serde_json::to_vec(data)?;
        let mut mac = self.mac()?;
        mac.update(&json);
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&json),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    /// Verify and deserialize a cookie value.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Malformed` if the value isn't two base64url parts,
    /// `IdentityError::BadSignature` if the signature doesn't match, and
    /// `IdentityError::Payload` if the signed JSON isn't an identity payload.
    pub fn decode(&self, value: &str) -> Result<SessionData, IdentityError> {
        let (payload, signature) = value.split_once('.').ok_or(IdentityError::Malformed)?;
        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| IdentityError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| IdentityError::Malformed)?;

        let mut mac = self.mac()?;
        mac.update(&json);
        mac.verify_slice(&signature)
            .map_err(|_| IdentityError::BadSignature)?;

        Ok(serde_json::from_slice(&json)?)
    }

    /// Read the identity from request headers, if a valid cookie is present.
    #[must_use]
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<SessionData> {
        let value = cookie_value(headers, IDENTITY_COOKIE)?;
        match self.decode(&value) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring identity cookie");
                None
            }
        }
    }
}

/// Value of the first cookie named `name` in the request's `Cookie` headers.
#[must_use]
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
}

/// `Set-Cookie` value that establishes the identity session.
#[must_use]
pub fn login_cookie(value: String, secure: bool) -> String {
    Cookie::build((IDENTITY_COOKIE, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(Duration::days(IDENTITY_MAX_AGE_DAYS))
        .build()
        .to_string()
}

/// `Set-Cookie` value that deletes the identity cookie.
#[must_use]
pub fn logout_cookie(secure: bool) -> String {
    Cookie::build((IDENTITY_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
        .to_string()
}
