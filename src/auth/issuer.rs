use chrono::Duration;
use std::sync::Arc;

use super::{Clock, TokenCodec};
use crate::models::{AuthError, Role, TokenClaims};

/// Value of the `iss` claim
pub const ISSUER: &str = "products-api";
pub const TOKEN_TTL_MINUTES: i64 = 5;

pub struct TokenIssuer {
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(codec: Arc<TokenCodec>, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec,
            clock,
            ttl: Duration::minutes(TOKEN_TTL_MINUTES),
        }
    }

    pub fn claims_for(&self, username: &str, role: Role) -> TokenClaims {
        TokenClaims {
            exp: (self.clock.now() + self.ttl).timestamp(),
            iss: ISSUER.to_string(),
            sub: role,
            username: username.to_string(),
        }
    }

    pub fn issue(&self, username: &str, role: Role) -> Result<String, AuthError> {
        self.codec.sign(&self.claims_for(username, role))
    }
}
