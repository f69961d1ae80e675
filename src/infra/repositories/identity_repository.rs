//! Identity repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::unique_violation;
use crate::domain::Identity;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity repository trait for dependency injection.
///
/// Emails are stored and looked up in canonical form; callers normalize.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>>;

    /// Exact match on the canonical email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Persist a new identity; `Conflict("Email")` when the email is taken.
    async fn insert(&self, identity: Identity) -> AppResult<Identity>;

    /// Overwrite every stored field of an existing identity.
    async fn update(&self, identity: Identity) -> AppResult<Identity>;
}

/// SeaORM implementation of IdentityRepository
pub struct IdentityStore {
    db: DatabaseConnection,
}

impl IdentityStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityRepository for IdentityStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Identity>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Identity::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Identity::from))
    }

    async fn insert(&self, identity: Identity) -> AppResult<Identity> {
        let model = ActiveModel::from(identity)
            .insert(&self.db)
            .await
            .map_err(|e| unique_violation(e, "Email"))?;

        Ok(Identity::from(model))
    }

    async fn update(&self, identity: Identity) -> AppResult<Identity> {
        let model = ActiveModel::from(identity)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::NotFound,
                other => unique_violation(other, "Email"),
            })?;

        Ok(Identity::from(model))
    }
}
