//! Tag repository, scoped by owner.

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::recipe_tag;
use super::entities::tag::{self, ActiveModel, Entity as TagEntity};
use crate::domain::Tag;
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Tag repository trait for dependency injection.
///
/// A tag owned by someone else behaves exactly like a missing one.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Owner's tags by name descending; with `assigned_only`, only tags
    /// attached to at least one recipe.
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Tag>>;

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Tag>>;

    /// Owner's tags among `ids` by name ascending; foreign or unknown ids
    /// are skipped.
    async fn find_many(&self, owner: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Tag>>;

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Tag>;

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Tag>;

    /// Delete the tag and detach it from every recipe.
    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of TagRepository
pub struct TagStore {
    db: DatabaseConnection,
}

impl TagStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for TagStore {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Tag>> {
        let mut query = TagEntity::find().filter(tag::Column::OwnerId.eq(owner));

        if assigned_only {
            query = query.filter(
                tag::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_tag::Column::TagId)
                        .from(recipe_tag::Entity)
                        .to_owned(),
                ),
            );
        }

        let models = query
            .order_by_desc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Tag>> {
        let result = TagEntity::find_by_id(id)
            .filter(tag::Column::OwnerId.eq(owner))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Tag::from))
    }

    async fn find_many(&self, owner: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Tag>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = TagEntity::find()
            .filter(tag::Column::OwnerId.eq(owner))
            .filter(tag::Column::Id.is_in(ids))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Tag::from).collect())
    }

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Tag> {
        let tag = Tag::new(owner, name);
        let active_model = ActiveModel {
            id: Set(tag.id),
            owner_id: Set(tag.owner_id),
            name: Set(tag.name),
            created_at: Set(tag.created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Tag::from(model))
    }

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Tag> {
        let model = TagEntity::find_by_id(id)
            .filter(tag::Column::OwnerId.eq(owner))
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = model.into();
        active.name = Set(name);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Tag::from(model))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        // Link rows go with the tag (ON DELETE CASCADE)
        let result = TagEntity::delete_many()
            .filter(tag::Column::Id.eq(id))
            .filter(tag::Column::OwnerId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
