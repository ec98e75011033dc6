use std::sync::Arc;

use crate::auth::{Clock, CredentialCheck, TokenCodec, TokenIssuer};
use crate::system::ProductRepository;

mod credentials;
mod error;
mod product;
mod response;
mod role;
mod token_claims;

pub use credentials::Credentials;
pub use error::{AppError, AuthError};
pub use product::{Product, ProductPayload};
pub use response::CustomResponse;
#[cfg(test)]
pub use response::ErrorBody;
pub use role::Role;
pub use token_claims::TokenClaims;

/// Immutable state shared by every request
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub credentials: Arc<dyn CredentialCheck>,
    pub codec: Arc<TokenCodec>,
    pub clock: Arc<dyn Clock>,
    pub issuer: TokenIssuer,
}

impl AppState {
    pub fn new(
        secret: &str,
        products: Arc<dyn ProductRepository>,
        credentials: Arc<dyn CredentialCheck>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(secret));
        let issuer = TokenIssuer::new(codec.clone(), clock.clone());
        Self {
            products,
            credentials,
            codec,
            clock,
            issuer,
        }
    }
}
