use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{domain::models::UserId, routes::ApiError};

use super::{AccountType, AuthConfig, AuthError};

/// The caller identified by a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub account_type: AccountType,
}

impl AuthUser {
    fn require(self, account_type: AccountType) -> Result<Self, AuthError> {
        if self.account_type == account_type {
            Ok(self)
        } else {
            Err(AuthError::AccountTypeNotAllowed(self.account_type))
        }
    }
}

/// A job seeker account. `None` only when auth is disabled and no token was
/// sent.
#[derive(Debug, Clone)]
pub struct NormalUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for NormalUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = authorize(parts, state, AccountType::Normal).await?;
        Ok(Self(user))
    }
}

/// An operator account. `None` only when auth is disabled and no token was
/// sent.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = authorize(parts, state, AccountType::Admin).await?;
        Ok(Self(user))
    }
}

async fn authorize<S>(
    parts: &mut Parts,
    state: &S,
    account_type: AccountType,
) -> Result<Option<AuthUser>, ApiError>
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    let config = AuthConfig::from_ref(state);
    match authenticate(parts, state, &config).await? {
        Some(user) => Ok(Some(user.require(account_type)?)),
        None if config.disabled => Ok(None),
        None => Err(AuthError::MissingToken.into()),
    }
}

/// Verifies the bearer token if one was sent.
async fn authenticate<S>(
    parts: &mut Parts,
    state: &S,
    config: &AuthConfig,
) -> Result<Option<AuthUser>, AuthError>
where
    S: Send + Sync,
{
    let Ok(TypedHeader(Authorization(bearer))) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await
    else {
        return Ok(None);
    };

    let claims = config.verifier.verify(bearer.token())?;
    Ok(Some(AuthUser {
        id: UserId::from(claims.sub),
        account_type: claims.join_type,
    }))
}
