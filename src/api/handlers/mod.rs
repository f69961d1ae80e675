//! HTTP request handlers.

pub mod admin_handler;
pub mod ingredient_handler;
pub mod recipe_handler;
pub mod tag_handler;
pub mod user_handler;

pub use admin_handler::admin_routes;
pub use ingredient_handler::ingredient_routes;
pub use recipe_handler::recipe_routes;
pub use tag_handler::tag_routes;
pub use user_handler::{profile_routes, user_routes};
