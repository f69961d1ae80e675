//! Unit of Work pattern implementation.
//!
//! Centralizes access to every repository so services depend on one
//! abstraction. Multi-row writes that must be atomic (a recipe and its
//! link rows) run inside a database transaction owned by the repository.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{
    IdentityRepository, IdentityStore, IngredientRepository, IngredientStore, MemoryStore,
    RecipeRepository, RecipeStore, TagRepository, TagStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync + 'static {
    fn identities(&self) -> Arc<dyn IdentityRepository>;

    fn tags(&self) -> Arc<dyn TagRepository>;

    fn ingredients(&self) -> Arc<dyn IngredientRepository>;

    fn recipes(&self) -> Arc<dyn RecipeRepository>;
}

/// PostgreSQL-backed UnitOfWork
pub struct Persistence {
    identities: Arc<IdentityStore>,
    tags: Arc<TagStore>,
    ingredients: Arc<IngredientStore>,
    recipes: Arc<RecipeStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            identities: Arc::new(IdentityStore::new(db.clone())),
            tags: Arc::new(TagStore::new(db.clone())),
            ingredients: Arc::new(IngredientStore::new(db.clone())),
            recipes: Arc::new(RecipeStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn identities(&self) -> Arc<dyn IdentityRepository> {
        self.identities.clone()
    }

    fn tags(&self) -> Arc<dyn TagRepository> {
        self.tags.clone()
    }

    fn ingredients(&self) -> Arc<dyn IngredientRepository> {
        self.ingredients.clone()
    }

    fn recipes(&self) -> Arc<dyn RecipeRepository> {
        self.recipes.clone()
    }
}

impl UnitOfWork for MemoryStore {
    fn identities(&self) -> Arc<dyn IdentityRepository> {
        Arc::new(self.clone())
    }

    fn tags(&self) -> Arc<dyn TagRepository> {
        Arc::new(self.clone())
    }

    fn ingredients(&self) -> Arc<dyn IngredientRepository> {
        Arc::new(self.clone())
    }

    fn recipes(&self) -> Arc<dyn RecipeRepository> {
        Arc::new(self.clone())
    }
}
