//! Claims carried inside a signed credential.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity data embedded in a credential.
///
/// `email` is the claim the ownership check compares against; anything else
/// the caller put in the login payload rides along in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Issue instant, seconds since the epoch.
    pub iat: i64,
    /// Expiry instant, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// Does this credential's identity own resources keyed by `email`?
    pub fn is_owner(&self, email: &str) -> bool {
        self.email == email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_is_exact_email_equality() {
        let claims = Claims { email: "a@x.com".into(), extra: Map::new(), iat: 0, exp: 0 };
        assert!(claims.is_owner("a@x.com"));
        assert!(!claims.is_owner("A@x.com"));
        assert!(!claims.is_owner("b@x.com"));
    }
}
