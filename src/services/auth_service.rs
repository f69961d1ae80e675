//! Authentication service - exchanges credentials for bearer tokens.
//!
//! Login always runs one argon2 verification, against a dummy credential
//! when the account does not exist, so response time does not reveal
//! which emails are registered.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{normalize_email, Authenticatable, Identity, Password, PermissionBearing};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

static DUMMY_PASSWORD: Lazy<Password> = Lazy::new(|| {
    Password::new("timing-equalizer").unwrap_or_else(|_| Password::unusable())
});

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    /// Staff flag at issue time; the middleware re-reads the identity.
    pub staff: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials, record the login and return a signed token.
    ///
    /// Unknown email, inactive account and wrong password all fail with
    /// the same `InvalidCredentials`.
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn generate_token(identity: &Identity, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: identity.id,
        email: identity.email.clone(),
        staff: identity.is_staff(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let email = normalize_email(&email);
        let found = self.uow.identities().find_by_email(&email).await?;

        // Unknown accounts and unusable credentials still pay for one argon2 run
        let password_valid = match found.as_ref().map(|identity| identity.password()) {
            Some(credential) if credential.is_usable() => credential.verify(&password),
            _ => {
                DUMMY_PASSWORD.verify(&password);
                false
            }
        };

        let mut identity = match found {
            Some(identity) if password_valid && identity.is_active() => identity,
            Some(identity) if password_valid => {
                tracing::warn!(identity_id = %identity.id, "Login attempt on inactive account");
                return Err(AppError::InvalidCredentials);
            }
            _ => return Err(AppError::InvalidCredentials),
        };

        identity.touch_login();
        let identity = self.uow.identities().update(identity).await?;

        tracing::debug!(identity_id = %identity.id, "Login succeeded");
        generate_token(&identity, &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewIdentity;
    use crate::infra::MockIdentityRepository;
    use crate::services::testing::{test_config, TestUnitOfWork};

    fn authenticator(repo: MockIdentityRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(
            Arc::new(TestUnitOfWork::default().with_identities(repo)),
            test_config(),
        )
    }

    fn cook(active: bool) -> Identity {
        Identity::new(
            "cook@example.com".to_string(),
            Password::new("test123").unwrap(),
            NewIdentity {
                is_active: active,
                ..NewIdentity::default()
            },
        )
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let identity = cook(true);
        let id = identity.id;

        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "cook@example.com")
            .returning(move |_| Ok(Some(identity.clone())));
        repo.expect_update()
            .times(1)
            .withf(|identity| identity.last_login.is_some())
            .returning(Ok);

        let service = authenticator(repo);
        let token = service
            .login("cook@EXAMPLE.com".to_string(), "test123".to_string())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        let claims = service.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, id);
        assert!(!claims.staff);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let identity = cook(true);
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(identity.clone())));
        repo.expect_update().never();

        let err = authenticator(repo)
            .login("cook@example.com".to_string(), "wrong".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email_rejected() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let err = authenticator(repo)
            .login("nobody@example.com".to_string(), "test123".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_inactive_account_rejected() {
        let identity = cook(false);
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(identity.clone())));
        repo.expect_update().never();

        let err = authenticator(repo)
            .login("cook@example.com".to_string(), "test123".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unusable_credential_rejected() {
        let identity = Identity::new(
            "cook@example.com".to_string(),
            Password::unusable(),
            NewIdentity::default(),
        );
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(identity.clone())));
        repo.expect_update().never();

        let service = authenticator(repo);
        for attempt in ["", "timing-equalizer"] {
            let err = service
                .login("cook@example.com".to_string(), attempt.to_string())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidCredentials));
        }
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = authenticator(MockIdentityRepository::new());
        assert!(matches!(
            service.verify_token("not-a-token"),
            Err(AppError::Jwt(_))
        ));
    }
}
