//! Ingredient service - validates input, then delegates to the owner-scoped store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validation, Ingredient};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait IngredientService: Send + Sync {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Ingredient>>;

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Ingredient>;

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Ingredient>;

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()>;
}

pub struct IngredientCatalog<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> IngredientCatalog<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> IngredientService for IngredientCatalog<U> {
    async fn list(&self, owner: Uuid, assigned_only: bool) -> AppResult<Vec<Ingredient>> {
        self.uow.ingredients().list(owner, assigned_only).await
    }

    async fn create(&self, owner: Uuid, name: String) -> AppResult<Ingredient> {
        let name = validation::required_text("Name", &name)?;
        self.uow.ingredients().create(owner, name).await
    }

    async fn rename(&self, owner: Uuid, id: Uuid, name: String) -> AppResult<Ingredient> {
        let name = validation::required_text("Name", &name)?;
        self.uow.ingredients().rename(owner, id, name).await
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> AppResult<()> {
        self.uow.ingredients().delete(owner, id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockIngredientRepository;
    use crate::services::testing::TestUnitOfWork;

    fn catalog(repo: MockIngredientRepository) -> IngredientCatalog<TestUnitOfWork> {
        IngredientCatalog::new(Arc::new(TestUnitOfWork::default().with_ingredients(repo)))
    }

    #[tokio::test]
    async fn test_create_ingredient_trims_name() {
        let owner = Uuid::new_v4();
        let mut repo = MockIngredientRepository::new();
        repo.expect_create()
            .with(eq(owner), eq("Olive oil".to_string()))
            .times(1)
            .returning(|owner, name| Ok(Ingredient::new(owner, name)));

        let ingredient = catalog(repo)
            .create(owner, "  Olive oil ".to_string())
            .await
            .unwrap();
        assert_eq!(ingredient.name, "Olive oil");
        assert_eq!(ingredient.owner_id, owner);
    }

    #[tokio::test]
    async fn test_create_ingredient_invalid() {
        let mut repo = MockIngredientRepository::new();
        repo.expect_create().never();

        let err = catalog(repo)
            .create(Uuid::new_v4(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_passes_owner_through() {
        let owner = Uuid::new_v4();
        let mut repo = MockIngredientRepository::new();
        repo.expect_list()
            .with(eq(owner), eq(true))
            .returning(|owner, _| Ok(vec![Ingredient::new(owner, "Salt".to_string())]));

        let ingredients = catalog(repo).list(owner, true).await.unwrap();
        assert_eq!(ingredients.len(), 1);
    }
}
