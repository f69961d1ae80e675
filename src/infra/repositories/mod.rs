//! Repository layer - Data access abstraction
//!
//! One trait per aggregate. Tag, ingredient and recipe repositories take
//! the owning identity on every call and never touch another owner's rows.
//! Each trait has a SeaORM store and an in-process implementation in
//! [`memory`].

pub(crate) mod entities;
mod identity_repository;
mod ingredient_repository;
pub mod memory;
mod recipe_repository;
mod tag_repository;

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

pub use identity_repository::{IdentityRepository, IdentityStore};
pub use ingredient_repository::{IngredientRepository, IngredientStore};
pub use memory::MemoryStore;
pub use recipe_repository::{RecipeRepository, RecipeStore};
pub use tag_repository::{TagRepository, TagStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use identity_repository::MockIdentityRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use ingredient_repository::MockIngredientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use recipe_repository::MockRecipeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use tag_repository::MockTagRepository;

/// Turn a unique-key violation into `Conflict(entity)`.
pub(crate) fn unique_violation(err: DbErr, entity: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(entity),
        _ => AppError::from(err),
    }
}
