use serde::{Deserialize, Serialize};

use super::Role;

/// Payload of a signed token. Decoding rejects unknown and missing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenClaims {
    pub exp: i64,
    pub iss: String,
    pub sub: Role,
    pub username: String,
}
