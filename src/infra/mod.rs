//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the Unit of Work
//! that hands them to services.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    IdentityRepository, IdentityStore, IngredientRepository, IngredientStore, MemoryStore,
    RecipeRepository, RecipeStore, TagRepository, TagStore,
};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockIdentityRepository, MockIngredientRepository, MockRecipeRepository, MockTagRepository,
};
