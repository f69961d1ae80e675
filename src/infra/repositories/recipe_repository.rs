//! Recipe repository, scoped by owner.
//!
//! A recipe row and its link rows are always written in one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::recipe::{self, ActiveModel, Entity as RecipeEntity};
use super::entities::{recipe_ingredient, recipe_tag};
use crate::domain::{NewRecipe, Recipe, RecipeChanges, RecipeFilter};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Recipe repository trait for dependency injection.
///
/// Tag and ingredient ids are stored as given; checking that they belong
/// to the owner is the caller's job.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Owner's recipes, newest first, narrowed by `filter`.
    async fn list(&self, owner: Uuid, filter: RecipeFilter) -> AppResult<Vec<Recipe>>;

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Recipe>>;

    async fn create(&self, owner: Uuid, draft: NewRecipe) -> AppResult<Recipe>;

    /// Apply `changes` to an owned recipe; `NotFound` otherwise.
    async fn update(&self, owner: Uuid, id: Uuid, changes: RecipeChanges) -> AppResult<Recipe>;

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()>;
}

/// SeaORM implementation of RecipeRepository
pub struct RecipeStore {
    db: DatabaseConnection,
}

impl RecipeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeRepository for RecipeStore {
    async fn list(&self, owner: Uuid, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        let mut query = RecipeEntity::find().filter(recipe::Column::OwnerId.eq(owner));

        if !filter.tags.is_empty() {
            query = query.filter(
                recipe::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_tag::Column::RecipeId)
                        .from(recipe_tag::Entity)
                        .and_where(recipe_tag::Column::TagId.is_in(filter.tags))
                        .to_owned(),
                ),
            );
        }
        if !filter.ingredients.is_empty() {
            query = query.filter(
                recipe::Column::Id.in_subquery(
                    Query::select()
                        .column(recipe_ingredient::Column::RecipeId)
                        .from(recipe_ingredient::Entity)
                        .and_where(recipe_ingredient::Column::IngredientId.is_in(filter.ingredients))
                        .to_owned(),
                ),
            );
        }

        let models = query
            .order_by_desc(recipe::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut links = Links::load(&self.db, &ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let (tags, ingredients) = links.take(model.id);
                model.into_recipe(tags, ingredients)
            })
            .collect())
    }

    async fn find(&self, owner: Uuid, id: Uuid) -> AppResult<Option<Recipe>> {
        let Some(model) = RecipeEntity::find_by_id(id)
            .filter(recipe::Column::OwnerId.eq(owner))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let (tags, ingredients) = Links::load(&self.db, &[id]).await?.take(id);
        Ok(Some(model.into_recipe(tags, ingredients)))
    }

    async fn create(&self, owner: Uuid, draft: NewRecipe) -> AppResult<Recipe> {
        let recipe = Recipe::new(owner, draft);

        self.db
            .transaction::<_, Recipe, AppError>(|txn| {
                Box::pin(async move {
                    active_model(&recipe).insert(txn).await?;
                    write_tags(txn, recipe.id, &recipe.tags).await?;
                    write_ingredients(txn, recipe.id, &recipe.ingredients).await?;
                    Ok(recipe)
                })
            })
            .await
            .map_err(AppError::from)
    }

    async fn update(&self, owner: Uuid, id: Uuid, changes: RecipeChanges) -> AppResult<Recipe> {
        self.db
            .transaction::<_, Recipe, AppError>(|txn| {
                Box::pin(async move {
                    let model = RecipeEntity::find_by_id(id)
                        .filter(recipe::Column::OwnerId.eq(owner))
                        .one(txn)
                        .await?
                        .ok_or_not_found()?;

                    let (tags, ingredients) = Links::load(txn, &[id]).await?.take(id);
                    let mut recipe = model.into_recipe(tags, ingredients);

                    let relink_tags = changes.tags.is_some();
                    let relink_ingredients = changes.ingredients.is_some();
                    recipe.apply(changes);

                    active_model(&recipe).update(txn).await?;
                    if relink_tags {
                        write_tags(txn, id, &recipe.tags).await?;
                    }
                    if relink_ingredients {
                        write_ingredients(txn, id, &recipe.ingredients).await?;
                    }
                    Ok(recipe)
                })
            })
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        // Link rows go with the recipe (ON DELETE CASCADE)
        let result = RecipeEntity::delete_many()
            .filter(recipe::Column::Id.eq(id))
            .filter(recipe::Column::OwnerId.eq(owner))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

fn active_model(recipe: &Recipe) -> ActiveModel {
    ActiveModel {
        id: Set(recipe.id),
        owner_id: Set(recipe.owner_id),
        title: Set(recipe.title.clone()),
        time_minutes: Set(recipe.time_minutes),
        price: Set(recipe.price),
        link: Set(recipe.link.clone()),
        created_at: Set(recipe.created_at),
        updated_at: Set(recipe.updated_at),
    }
}

/// Tag and ingredient ids of a batch of recipes.
#[derive(Default)]
struct Links {
    tags: HashMap<Uuid, Vec<Uuid>>,
    ingredients: HashMap<Uuid, Vec<Uuid>>,
}

impl Links {
    async fn load<C: ConnectionTrait>(conn: &C, recipe_ids: &[Uuid]) -> Result<Self, DbErr> {
        let mut links = Self::default();
        if recipe_ids.is_empty() {
            return Ok(links);
        }

        let tag_rows = recipe_tag::Entity::find()
            .filter(recipe_tag::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(conn)
            .await?;
        for row in tag_rows {
            links.tags.entry(row.recipe_id).or_default().push(row.tag_id);
        }

        let ingredient_rows = recipe_ingredient::Entity::find()
            .filter(recipe_ingredient::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .all(conn)
            .await?;
        for row in ingredient_rows {
            links
                .ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(row.ingredient_id);
        }

        Ok(links)
    }

    fn take(&mut self, recipe_id: Uuid) -> (Vec<Uuid>, Vec<Uuid>) {
        (
            self.tags.remove(&recipe_id).unwrap_or_default(),
            self.ingredients.remove(&recipe_id).unwrap_or_default(),
        )
    }
}

async fn write_tags<C: ConnectionTrait>(
    conn: &C,
    recipe_id: Uuid,
    tags: &[Uuid],
) -> Result<(), DbErr> {
    recipe_tag::Entity::delete_many()
        .filter(recipe_tag::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;

    if tags.is_empty() {
        return Ok(());
    }

    recipe_tag::Entity::insert_many(tags.iter().map(|tag_id| recipe_tag::ActiveModel {
        recipe_id: Set(recipe_id),
        tag_id: Set(*tag_id),
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}

async fn write_ingredients<C: ConnectionTrait>(
    conn: &C,
    recipe_id: Uuid,
    ingredients: &[Uuid],
) -> Result<(), DbErr> {
    recipe_ingredient::Entity::delete_many()
        .filter(recipe_ingredient::Column::RecipeId.eq(recipe_id))
        .exec(conn)
        .await?;

    if ingredients.is_empty() {
        return Ok(());
    }

    recipe_ingredient::Entity::insert_many(ingredients.iter().map(|ingredient_id| {
        recipe_ingredient::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(*ingredient_id),
        }
    }))
    .exec_without_returning(conn)
    .await?;
    Ok(())
}
