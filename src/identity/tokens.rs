//! Credential minting and verification.
//! Stateless HS256 tokens: the only server-side material is the signing
//! secret, so an issued credential stays valid until its expiry instant.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use super::claims::Claims;
use crate::tprintln;

/// Fixed credential lifetime.
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Signs and verifies credentials with a shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Sign a credential for `email`, carrying any extra caller claims.
    pub fn issue(
        &self,
        email: String,
        mut extra: Map<String, Value>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        // exp/iat/email are issuer-owned; drop caller copies so the payload
        // holds exactly one of each
        extra.remove("exp");
        extra.remove("iat");
        extra.remove("email");
        let iat = Utc::now().timestamp();
        let claims = Claims { email, extra, iat, exp: iat + self.ttl.as_secs() as i64 };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        tprintln!("token.issue email={} ttl_secs={}", claims.email, self.ttl.as_secs());
        Ok(token)
    }

    /// Verify signature and expiry; returns the embedded claims on success.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry must still be in the future at the verification instant
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use jsonwebtoken::errors::ErrorKind;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-secret", TOKEN_TTL)
    }

    #[test]
    fn issue_then_verify_returns_identity_claims() {
        let iss = issuer();
        let mut extra = Map::new();
        extra.insert("role".into(), Value::String("guest".into()));
        let token = iss.issue("a@x.com".into(), extra).expect("sign");
        let claims = iss.verify(&token).expect("fresh token verifies");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.extra.get("role").and_then(|v| v.as_str()), Some("guest"));
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL.as_secs() as i64);
    }

    #[test]
    fn expired_token_is_rejected() {
        let iss = issuer();
        let iat = Utc::now().timestamp() - 7200;
        let stale = Claims { email: "a@x.com".into(), extra: Map::new(), iat, exp: iat + 60 };
        let token = encode(&Header::default(), &stale, &EncodingKey::from_secret(b"test-secret"))
            .expect("sign");
        let err = iss.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let iss = issuer();
        let token = iss.issue("a@x.com".into(), Map::new()).expect("sign");
        let (rest, sig) = token.rsplit_once('.').expect("three segments");
        let mut bytes = URL_SAFE_NO_PAD.decode(sig).expect("base64url signature");
        bytes[0] ^= 0x01;
        let forged = format!("{}.{}", rest, URL_SAFE_NO_PAD.encode(bytes));
        assert!(iss.verify(&forged).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issuer().issue("a@x.com".into(), Map::new()).expect("sign");
        let other = TokenIssuer::new(b"other-secret", TOKEN_TTL);
        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(issuer().verify("not-a-token").is_err());
    }

    #[test]
    fn caller_supplied_reserved_claims_are_dropped() {
        let iss = issuer();
        let mut extra = Map::new();
        extra.insert("exp".into(), Value::from(1));
        extra.insert("email".into(), Value::String("evil@x.com".into()));
        let token = iss.issue("a@x.com".into(), extra).expect("sign");
        let claims = iss.verify(&token).expect("verifies");
        assert_eq!(claims.email, "a@x.com");
        assert!(claims.exp > Utc::now().timestamp());
        assert!(claims.extra.is_empty());
    }
}
