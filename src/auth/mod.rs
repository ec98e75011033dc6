mod clock;
mod credentials;
mod issuer;
mod token;

#[cfg(test)]
pub use clock::FixedClock;
pub use clock::{Clock, SystemClock};
pub use credentials::{CredentialCheck, StaticCredentials};
pub use issuer::TokenIssuer;
pub use token::TokenCodec;
