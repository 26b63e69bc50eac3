// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::claims::SessionClaims;
use crate::auth::error::AuthError;

/// A validator for session tokens
pub struct JwtValidator {
    verification_key: DecodingKey,
    algorithm: Algorithm,
    expected_issuer: Option<String>,
}

impl JwtValidator {
    /// Create a new JwtValidator with the given secret
    pub fn new(secret: &[u8]) -> Self {
        JwtValidator {
            verification_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expected_issuer: None,
        }
    }

    /// Set the expected issuer name
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected_issuer = Some(issuer.into());
        self
    }

    /// Validate a JWT token and return the decoded claims
    ///
    /// Expiry is checked without leeway: a token is rejected from the second
    /// its `exp` is reached.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        if let Some(ref issuer) = self.expected_issuer {
            validation.set_issuer(&[issuer]);
        }

        let token_data = decode::<SessionClaims>(token, &self.verification_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Invalid("token has expired".to_string()),
                _ => AuthError::Invalid(format!("JWT validation failed: {}", e)),
            })?;

        // jsonwebtoken accepts exp == now, a session ends at its exp second
        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Invalid("token has expired".to_string()));
        }

        Ok(token_data.claims)
    }
}
