// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT session token management and validation
//!
//! This submodule handles session token creation and validation.

mod claims;
mod issuer;
mod validator;

pub use claims::SessionClaims;
pub use issuer::{JwtIssuer, SessionToken};
pub use validator::JwtValidator;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::error::AuthError;
    use crate::auth::identity::{IdentityAssertion, DEFAULT_AVATAR_URL};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::{Duration, Utc};

    const SECRET: &[u8] = b"test-secret-for-session-tokens";

    fn identity() -> IdentityAssertion {
        IdentityAssertion {
            id: "1".to_string(),
            username: "nego".to_string(),
            discriminator: "0".to_string(),
            global_name: Some("Nego".to_string()),
            avatar: None,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }

    fn issuer() -> JwtIssuer {
        JwtIssuer::new(SECRET, Duration::hours(24)).with_issuer("nego-dashboard")
    }

    fn validator() -> JwtValidator {
        JwtValidator::new(SECRET).with_issuer("nego-dashboard")
    }

    #[test]
    fn fresh_token_validates() {
        let token = issuer().issue(&identity()).unwrap();
        let claims = validator().validate(token.as_str()).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
        assert_eq!(IdentityAssertion::from(claims), identity());
    }

    #[test]
    fn expired_token_is_invalid() {
        let issued_at = Utc::now() - Duration::hours(25);
        let token = issuer().issue_at(&identity(), issued_at).unwrap();
        assert!(matches!(
            validator().validate(token.as_str()),
            Err(AuthError::Invalid(_))
        ));
    }

    #[test]
    fn token_from_other_issuer_is_invalid() {
        let token = JwtIssuer::new(SECRET, Duration::hours(24))
            .with_issuer("someone-else")
            .issue(&identity())
            .unwrap();
        assert!(validator().validate(token.as_str()).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = JwtIssuer::new(b"another-secret-of-some-length", Duration::hours(24))
            .with_issuer("nego-dashboard")
            .issue(&identity())
            .unwrap();
        assert!(validator().validate(token.as_str()).is_err());
    }

    #[test]
    fn any_signature_bit_flip_is_rejected() {
        let token = issuer().issue(&identity()).unwrap().into_string();
        let (signed_part, signature) = token.rsplit_once('.').unwrap();
        let signature = URL_SAFE_NO_PAD.decode(signature).unwrap();

        for bit in 0..signature.len() * 8 {
            let mut tampered = signature.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);
            let forged = format!("{}.{}", signed_part, URL_SAFE_NO_PAD.encode(&tampered));
            assert!(
                validator().validate(&forged).is_err(),
                "bit {} flip was accepted",
                bit
            );
        }
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            validator().validate("not-a-jwt"),
            Err(AuthError::Invalid(_))
        ));
    }
}
