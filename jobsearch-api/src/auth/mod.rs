mod extractor;
mod token;

pub use extractor::{AdminUser, AuthUser, NormalUser};
pub use token::{AccountType, AuthError, Claims, JwtVerifier};

use std::sync::Arc;

/// Authentication settings shared by the extractors.
#[derive(Clone)]
pub struct AuthConfig {
    pub verifier: Arc<JwtVerifier>,
    /// When set, requests without a token are let through anonymously.
    pub disabled: bool,
}
