// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lookup for incoming requests.
//!
//! Sessions are issued by the login layer as HS256 JWTs and carried either in
//! the [`SESSION_COOKIE`] cookie or an `Authorization: Bearer` header.

use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Name of the cookie that carries the session token.
pub const SESSION_COOKIE: &str = "dashboard_session";

/// Session lifetime for tokens created by [`issue_session_token`].
const SESSION_TTL_SECS: usize = 24 * 60 * 60;

/// The signed-in user behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Identity provider user id, e.g. `auth0|65a1b2`
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Resolves the authenticated user for a request, if any.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self, headers: &HeaderMap) -> Option<Identity>;
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity provider user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// [`SessionProvider`] backed by HS256 session tokens.
pub struct JwtSessionProvider {
    key: DecodingKey,
    validation: Validation,
}

impl JwtSessionProvider {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(signing_key),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    fn token_from_headers(headers: &HeaderMap) -> Option<String> {
        // Try cookie first, then header
        let jar = CookieJar::from_headers(headers);
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            return Some(cookie.value().to_string());
        }

        headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
    }
}

impl SessionProvider for JwtSessionProvider {
    fn current_user(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = Self::token_from_headers(headers)?;

        let claims = match decode::<Claims>(&token, &self.key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return None;
            }
        };

        if claims.sub.is_empty() {
            return None;
        }

        Some(Identity {
            sub: claims.sub,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// Create a session token for `identity`.
pub fn issue_session_token(identity: &Identity, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: identity.sub.clone(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
        email: identity.email.clone(),
        name: identity.name.clone(),
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
