//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and field rules, independent of storage and
//! HTTP concerns (except the shared error type).

pub mod identity;
pub mod ingredient;
pub mod password;
pub mod recipe;
pub mod tag;
pub mod validation;

pub use identity::{
    normalize_email, Authenticatable, Identity, IdentityResponse, NewIdentity, PermissionBearing,
    Permissions,
};
pub use ingredient::{Ingredient, IngredientResponse};
pub use password::Password;
pub use recipe::{
    NewRecipe, Recipe, RecipeChanges, RecipeDetail, RecipeDetailResponse, RecipeFilter,
    RecipeResponse,
};
pub use tag::{Tag, TagResponse};
