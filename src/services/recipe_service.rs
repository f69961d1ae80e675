//! Recipe service.
//!
//! Field rules are checked here, and every tag or ingredient id attached
//! to a recipe must belong to the same owner. An id owned by someone else
//! is reported exactly like an id that does not exist.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::recipe::dedup;
use crate::domain::{validation, NewRecipe, Recipe, RecipeChanges, RecipeDetail, RecipeFilter};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Owner's recipes, newest first.
    async fn list(&self, owner: Uuid, filter: RecipeFilter) -> AppResult<Vec<Recipe>>;

    /// Recipe with tags and ingredients resolved.
    async fn get(&self, owner: Uuid, id: Uuid) -> AppResult<RecipeDetail>;

    async fn create(&self, owner: Uuid, draft: NewRecipe) -> AppResult<Recipe>;

    async fn update(&self, owner: Uuid, id: Uuid, changes: RecipeChanges) -> AppResult<Recipe>;

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()>;
}

pub struct RecipeBook<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RecipeBook<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn check_tags(&self, owner: Uuid, ids: &[Uuid]) -> AppResult<()> {
        let wanted = dedup(ids.to_vec());
        if wanted.is_empty() {
            return Ok(());
        }
        let found = self.uow.tags().find_many(owner, wanted.clone()).await?;
        match wanted.iter().find(|id| !found.iter().any(|tag| tag.id == **id)) {
            Some(missing) => Err(AppError::validation(format!("Unknown tag id {}", missing))),
            None => Ok(()),
        }
    }

    async fn check_ingredients(&self, owner: Uuid, ids: &[Uuid]) -> AppResult<()> {
        let wanted = dedup(ids.to_vec());
        if wanted.is_empty() {
            return Ok(());
        }
        let found = self.uow.ingredients().find_many(owner, wanted.clone()).await?;
        match wanted
            .iter()
            .find(|id| !found.iter().any(|ingredient| ingredient.id == **id))
        {
            Some(missing) => Err(AppError::validation(format!(
                "Unknown ingredient id {}",
                missing
            ))),
            None => Ok(()),
        }
    }
}

fn validate_draft(draft: NewRecipe) -> AppResult<NewRecipe> {
    Ok(NewRecipe {
        title: validation::required_text("Title", &draft.title)?,
        time_minutes: validation::time_minutes(draft.time_minutes)?,
        price: validation::price(draft.price)?,
        link: validation::optional_text("Link", &draft.link)?,
        tags: draft.tags,
        ingredients: draft.ingredients,
    })
}

fn validate_changes(changes: RecipeChanges) -> AppResult<RecipeChanges> {
    Ok(RecipeChanges {
        title: changes
            .title
            .map(|title| validation::required_text("Title", &title))
            .transpose()?,
        time_minutes: changes
            .time_minutes
            .map(validation::time_minutes)
            .transpose()?,
        price: changes.price.map(validation::price).transpose()?,
        link: changes
            .link
            .map(|link| validation::optional_text("Link", &link))
            .transpose()?,
        tags: changes.tags,
        ingredients: changes.ingredients,
    })
}

#[async_trait]
impl<U: UnitOfWork> RecipeService for RecipeBook<U> {
    async fn list(&self, owner: Uuid, filter: RecipeFilter) -> AppResult<Vec<Recipe>> {
        self.uow.recipes().list(owner, filter).await
    }

    async fn get(&self, owner: Uuid, id: Uuid) -> AppResult<RecipeDetail> {
        let recipe = self.uow.recipes().find(owner, id).await?.ok_or_not_found()?;
        let tags = self.uow.tags().find_many(owner, recipe.tags.clone()).await?;
        let ingredients = self
            .uow
            .ingredients()
            .find_many(owner, recipe.ingredients.clone())
            .await?;

        Ok(RecipeDetail {
            recipe,
            tags,
            ingredients,
        })
    }

    async fn create(&self, owner: Uuid, draft: NewRecipe) -> AppResult<Recipe> {
        let draft = validate_draft(draft)?;
        self.check_tags(owner, &draft.tags).await?;
        self.check_ingredients(owner, &draft.ingredients).await?;

        let recipe = self.uow.recipes().create(owner, draft).await?;
        tracing::debug!(recipe_id = %recipe.id, "Recipe created");
        Ok(recipe)
    }

    async fn update(&self, owner: Uuid, id: Uuid, changes: RecipeChanges) -> AppResult<Recipe> {
        let changes = validate_changes(changes)?;
        if let Some(tags) = &changes.tags {
            self.check_tags(owner, tags).await?;
        }
        if let Some(ingredients) = &changes.ingredients {
            self.check_ingredients(owner, ingredients).await?;
        }

        self.uow.recipes().update(owner, id, changes).await
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.recipes().delete(owner, id).await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::Tag;
    use crate::infra::{MockRecipeRepository, MockTagRepository};
    use crate::services::testing::TestUnitOfWork;

    fn draft() -> NewRecipe {
        NewRecipe {
            title: "Sample recipe".to_string(),
            time_minutes: 10,
            price: Decimal::new(5, 0),
            link: String::new(),
            tags: vec![],
            ingredients: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_recipe_rescales_price() {
        let owner = Uuid::new_v4();
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_create()
            .withf(|_, draft| draft.price.to_string() == "5.00")
            .returning(|owner, draft| Ok(Recipe::new(owner, draft)));

        let book = RecipeBook::new(Arc::new(TestUnitOfWork::default().with_recipes(recipes)));
        let recipe = book.create(owner, draft()).await.unwrap();
        assert_eq!(recipe.price.to_string(), "5.00");
        assert_eq!(recipe.owner_id, owner);
    }

    #[tokio::test]
    async fn test_invalid_fields_rejected_before_store() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_create().never();
        let book = RecipeBook::new(Arc::new(TestUnitOfWork::default().with_recipes(recipes)));
        let owner = Uuid::new_v4();

        let invalid = [
            NewRecipe {
                title: " ".to_string(),
                ..draft()
            },
            NewRecipe {
                time_minutes: -1,
                ..draft()
            },
            NewRecipe {
                price: Decimal::new(-100, 2),
                ..draft()
            },
            NewRecipe {
                price: Decimal::new(1001, 3),
                ..draft()
            },
        ];
        for draft in invalid {
            let err = book.create(owner, draft).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_foreign_tag_rejected() {
        let owner = Uuid::new_v4();
        let own = Tag::new(owner, "Vegan".to_string());
        let own_id = own.id;
        let foreign_id = Uuid::new_v4();

        let mut tags = MockTagRepository::new();
        tags.expect_find_many()
            .returning(move |_, _| Ok(vec![own.clone()]));
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_create().never();

        let book = RecipeBook::new(Arc::new(
            TestUnitOfWork::default()
                .with_tags(tags)
                .with_recipes(recipes),
        ));
        let err = book
            .create(
                owner,
                NewRecipe {
                    tags: vec![own_id, foreign_id],
                    ..draft()
                },
            )
            .await
            .unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.contains(&foreign_id.to_string())),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_partial_update_skips_reference_checks() {
        let owner = Uuid::new_v4();
        let id = Uuid::new_v4();
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_update()
            .withf(|_, _, changes| changes.tags.is_none() && changes.title.is_some())
            .returning(|owner, _, changes| {
                let mut recipe = Recipe::new(owner, draft());
                recipe.apply(changes);
                Ok(recipe)
            });

        // Tag repository has no expectations and would panic if queried
        let book = RecipeBook::new(Arc::new(TestUnitOfWork::default().with_recipes(recipes)));
        let recipe = book
            .update(
                owner,
                id,
                RecipeChanges {
                    title: Some("New title".to_string()),
                    ..RecipeChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(recipe.title, "New title");
    }

    #[tokio::test]
    async fn test_get_missing_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find().returning(|_, _| Ok(None));

        let book = RecipeBook::new(Arc::new(TestUnitOfWork::default().with_recipes(recipes)));
        let err = book.get(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
