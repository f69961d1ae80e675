//! Identity service - account creation and management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{normalize_email, validation, Identity, NewIdentity, Password};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Identity service trait for dependency injection.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create an identity with a canonical email and a hashed credential.
    ///
    /// A missing or blank email is rejected before anything is stored;
    /// a missing password yields an unusable credential.
    async fn create_user(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        extra: NewIdentity,
    ) -> AppResult<Identity>;

    /// Same as `create_user`, then grants staff and superuser.
    async fn create_superuser(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        extra: NewIdentity,
    ) -> AppResult<Identity>;

    async fn get(&self, id: Uuid) -> AppResult<Identity>;

    /// Change display name and/or password; absent fields stay as they are.
    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        password: Option<String>,
    ) -> AppResult<Identity>;

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Identity>;
}

/// Concrete implementation of IdentityService using Unit of Work.
pub struct IdentityManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> IdentityManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> IdentityService for IdentityManager<U> {
    async fn create_user(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        extra: NewIdentity,
    ) -> AppResult<Identity> {
        let email = email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AppError::validation("Users must have an email address"))?;
        let email = normalize_email(email);

        if self.uow.identities().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let identity = Identity::new(email, Password::from_optional(password)?, extra);
        let identity = self.uow.identities().insert(identity).await?;

        tracing::info!(identity_id = %identity.id, "Identity created");
        Ok(identity)
    }

    async fn create_superuser(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        extra: NewIdentity,
    ) -> AppResult<Identity> {
        let mut identity = self.create_user(email, password, extra).await?;
        identity.elevate();
        let identity = self.uow.identities().update(identity).await?;

        tracing::info!(identity_id = %identity.id, "Superuser created");
        Ok(identity)
    }

    async fn get(&self, id: Uuid) -> AppResult<Identity> {
        self.uow.identities().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        password: Option<String>,
    ) -> AppResult<Identity> {
        let mut identity = self.get(id).await?;

        if let Some(name) = name {
            identity.update_name(validation::optional_text("Name", &name)?);
        }
        if let Some(password) = password {
            identity.update_password(Password::new(&password)?);
        }

        self.uow.identities().update(identity).await
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<Identity> {
        let mut identity = self.get(id).await?;
        identity.set_active(active);
        let identity = self.uow.identities().update(identity).await?;

        tracing::info!(identity_id = %identity.id, active, "Identity activation changed");
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::{Authenticatable, PermissionBearing};
    use crate::infra::MockIdentityRepository;
    use crate::services::testing::TestUnitOfWork;

    fn manager(repo: MockIdentityRepository) -> IdentityManager<TestUnitOfWork> {
        IdentityManager::new(Arc::new(TestUnitOfWork::default().with_identities(repo)))
    }

    #[tokio::test]
    async fn test_create_user_with_email_successful() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "test@example.com")
            .returning(|_| Ok(None));
        repo.expect_insert().times(1).returning(Ok);

        let identity = manager(repo)
            .create_user(Some("test@example.com"), Some("test123"), NewIdentity::default())
            .await
            .unwrap();

        assert_eq!(identity.email, "test@example.com");
        assert!(identity.check_password("test123"));
    }

    #[tokio::test]
    async fn test_new_user_email_normalized() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "test@example.com")
            .returning(|_| Ok(None));
        repo.expect_insert().returning(Ok);

        let identity = manager(repo)
            .create_user(Some("test@EXAMPLE.COM"), Some("test123"), NewIdentity::default())
            .await
            .unwrap();

        assert_eq!(identity.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_new_user_invalid_email() {
        // No expectations: touching the store would panic
        let service = manager(MockIdentityRepository::new());

        for email in [None, Some(""), Some("   ")] {
            let err = service
                .create_user(email, Some("test123"), NewIdentity::default())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email().returning(|email| {
            Ok(Some(Identity::new(
                email.to_string(),
                Password::unusable(),
                NewIdentity::default(),
            )))
        });
        repo.expect_insert().never();

        let err = manager(repo)
            .create_user(Some("cook@Example.com"), None, NewIdentity::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_new_superuser() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert().times(1).returning(Ok);
        repo.expect_update()
            .times(1)
            .withf(|identity| identity.is_staff() && identity.is_superuser())
            .returning(Ok);

        let identity = manager(repo)
            .create_superuser(Some("test@example.com"), Some("test123"), NewIdentity::default())
            .await
            .unwrap();

        assert!(identity.is_staff());
        assert!(identity.is_superuser());
    }

    #[tokio::test]
    async fn test_missing_password_is_unusable() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert().returning(Ok);

        let identity = manager(repo)
            .create_user(Some("cook@example.com"), None, NewIdentity::default())
            .await
            .unwrap();

        assert!(!identity.password().is_usable());
        assert!(!identity.check_password(""));
    }

    #[tokio::test]
    async fn test_get_missing_identity() {
        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = manager(repo).get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_update_profile_rehashes_password() {
        let existing = Identity::new(
            "cook@example.com".to_string(),
            Password::new("old-password").unwrap(),
            NewIdentity::named("Cook"),
        );
        let id = existing.id;

        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update().returning(Ok);

        let updated = manager(repo)
            .update_profile(id, Some(" Head cook ".to_string()), Some("new-password".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.name, "Head cook");
        assert!(updated.check_password("new-password"));
        assert!(!updated.check_password("old-password"));
    }

    #[tokio::test]
    async fn test_set_active() {
        let existing = Identity::new(
            "cook@example.com".to_string(),
            Password::unusable(),
            NewIdentity::default(),
        );
        let id = existing.id;

        let mut repo = MockIdentityRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(|identity| !identity.is_active)
            .returning(Ok);

        let identity = manager(repo).set_active(id, false).await.unwrap();
        assert!(!identity.is_active());
    }
}
