//! Ingredient repository, scoped by owner.

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::ingredient::{self, ActiveModel, Entity as IngredientEntity};
use super::entities::recipe_ingredient;
use crate::domain::Ingredient;
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Ingredient repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Owner's ingredients by name descending; with `assigned_only`, only
    /// ingredients used by at least one recipe.
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Ingredient>>;

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Ingredient>>;

    /// Owner's ingredients among `ids` by name ascending.
    async fn find_many(&self, owner: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Ingredient>>;

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Ingredient>;

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Ingredient>;

    /// Delete the ingredient and detach it from every recipe.
    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of IngredientRepository
pub struct IngredientStore {
    db: DatabaseConnection,
}

impl IngredientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IngredientRepository for IngredientStore {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Ingredient>> {
        let mut query = IngredientEntity::find().filter(ingredient::Column::OwnerId.eq(owner));

        if assigned_only {
            query = query.filter(
                ingredient::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_ingredient::Column::IngredientId)
                        .from(recipe_ingredient::Entity)
                        .to_owned(),
                ),
            );
        }

        let models = query
            .order_by_desc(ingredient::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Ingredient>> {
        let result = IngredientEntity::find_by_id(id)
            .filter(ingredient::Column::OwnerId.eq(owner))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Ingredient::from))
    }

    async fn find_many(&self, owner: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Ingredient>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = IngredientEntity::find()
            .filter(ingredient::Column::OwnerId.eq(owner))
            .filter(ingredient::Column::Id.is_in(ids))
            .order_by_asc(ingredient::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Ingredient> {
        let ingredient = Ingredient::new(owner, name);
        let active_model = ActiveModel {
            id: Set(ingredient.id),
            owner_id: Set(ingredient.owner_id),
            name: Set(ingredient.name),
            created_at: Set(ingredient.created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Ingredient::from(model))
    }

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Ingredient> {
        let model = IngredientEntity::find_by_id(id)
            .filter(ingredient::Column::OwnerId.eq(owner))
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = model.into();
        active.name = Set(name);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Ingredient::from(model))
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        // Link rows go with the ingredient (ON DELETE CASCADE)
        let result = IngredientEntity::delete_many()
            .filter(ingredient::Column::Id.eq(id))
            .filter(ingredient::Column::OwnerId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
