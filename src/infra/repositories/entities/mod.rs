//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod ingredient;
pub mod recipe;
pub mod recipe_ingredient;
pub mod recipe_tag;
pub mod tag;
pub mod user;
