//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach storage through the Unit of Work.

mod auth_service;
pub mod container;
mod identity_service;
mod ingredient_service;
mod recipe_service;
mod tag_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use identity_service::{IdentityManager, IdentityService};
pub use ingredient_service::{IngredientCatalog, IngredientService};
pub use recipe_service::{RecipeBook, RecipeService};
pub use tag_service::{TagCatalog, TagService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::config::Config;
    use crate::infra::{
        IdentityRepository, IngredientRepository, MockIdentityRepository,
        MockIngredientRepository, MockRecipeRepository, MockTagRepository, RecipeRepository,
        TagRepository, UnitOfWork,
    };

    pub fn test_config() -> Config {
        Config::new(
            "postgres://localhost/test",
            "test-secret-that-is-at-least-32-characters",
        )
        .expect("valid test config")
    }

    /// Unit of Work over mocks. Repositories left at their default have no
    /// expectations, so any call to them fails the test.
    pub struct TestUnitOfWork {
        identities: Arc<dyn IdentityRepository>,
        tags: Arc<dyn TagRepository>,
        ingredients: Arc<dyn IngredientRepository>,
        recipes: Arc<dyn RecipeRepository>,
    }

    impl Default for TestUnitOfWork {
        fn default() -> Self {
            Self {
                identities: Arc::new(MockIdentityRepository::new()),
                tags: Arc::new(MockTagRepository::new()),
                ingredients: Arc::new(MockIngredientRepository::new()),
                recipes: Arc::new(MockRecipeRepository::new()),
            }
        }
    }

    impl TestUnitOfWork {
        pub fn with_identities(mut self, repo: MockIdentityRepository) -> Self {
            self.identities = Arc::new(repo);
            self
        }

        pub fn with_tags(mut self, repo: MockTagRepository) -> Self {
            self.tags = Arc::new(repo);
            self
        }

        pub fn with_ingredients(mut self, repo: MockIngredientRepository) -> Self {
            self.ingredients = Arc::new(repo);
            self
        }

        pub fn with_recipes(mut self, repo: MockRecipeRepository) -> Self {
            self.recipes = Arc::new(repo);
            self
        }
    }

    impl UnitOfWork for TestUnitOfWork {
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
}
