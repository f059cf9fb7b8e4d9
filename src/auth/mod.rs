pub mod roles;

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use roles::{has_role, Role};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token signing secret is not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    Encode(String),

    #[error("Invalid JWT token: {0}")]
    Invalid(String),
}

/// Signing and verification keys for HS256 bearer tokens.
///
/// Tokens carry only the caller's email plus `iat`/`exp`. There is no refresh,
/// revocation list or key rotation: a token stays valid until it expires.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    configured: bool,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            configured: !secret.is_empty(),
            ttl,
        }
    }

    /// Signs a token for `email` expiring `ttl` from now.
    pub fn issue(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        self.sign(&Claims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        if !self.configured {
            return Err(TokenError::MissingSecret);
        }

        encode(&Header::default(), claims, &self.encoding).map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Checks signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if !self.configured {
            return Err(TokenError::MissingSecret);
        }

        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

/// Authenticated caller identity extracted from a verified token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { email: claims.email }
    }
}

/// Why a request was refused by [`authenticate`].
#[derive(Debug, Error, PartialEq)]
pub enum AuthRejection {
    /// No `Authorization` header at all.
    #[error("Missing Authorization header")]
    MissingCredentials,

    /// A header was sent but did not carry a valid, unexpired bearer token.
    #[error("{0}")]
    InvalidCredentials(String),
}

/// Maps the request's bearer credential to an identity or a rejection reason.
pub fn authenticate(headers: &HeaderMap, keys: &TokenKeys) -> Result<AuthUser, AuthRejection> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingCredentials)?;

    let value = header
        .to_str()
        .map_err(|_| AuthRejection::InvalidCredentials("Invalid Authorization header format".to_string()))?;

    let mut parts = value.split_whitespace();
    let token = match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => token,
        _ => {
            return Err(AuthRejection::InvalidCredentials(
                "Authorization header must use Bearer token format".to_string(),
            ))
        }
    };

    keys.verify(token)
        .map(AuthUser::from)
        .map_err(|e| AuthRejection::InvalidCredentials(e.to_string()))
}
