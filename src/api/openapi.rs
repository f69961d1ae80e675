//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, ingredient_handler, recipe_handler, tag_handler, user_handler,
};
use crate::domain::{
    IdentityResponse, IngredientResponse, RecipeDetailResponse, RecipeResponse, TagResponse,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Recipe API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe API",
        version = "0.1.0",
        description = "Recipe management backend: accounts, tags, ingredients and recipes",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Account endpoints
        user_handler::create_user,
        user_handler::create_token,
        user_handler::get_me,
        user_handler::update_me,
        // Administration
        admin_handler::deactivate_user,
        admin_handler::activate_user,
        // Tags
        tag_handler::list_tags,
        tag_handler::create_tag,
        tag_handler::update_tag,
        tag_handler::delete_tag,
        // Ingredients
        ingredient_handler::list_ingredients,
        ingredient_handler::create_ingredient,
        ingredient_handler::update_ingredient,
        ingredient_handler::delete_ingredient,
        // Recipes
        recipe_handler::list_recipes,
        recipe_handler::create_recipe,
        recipe_handler::get_recipe,
        recipe_handler::update_recipe,
        recipe_handler::replace_recipe,
        recipe_handler::delete_recipe,
    ),
    components(
        schemas(
            IdentityResponse,
            TokenResponse,
            TagResponse,
            IngredientResponse,
            RecipeResponse,
            RecipeDetailResponse,
            user_handler::CreateUserRequest,
            user_handler::TokenRequest,
            user_handler::UpdateProfileRequest,
            tag_handler::TagRequest,
            ingredient_handler::IngredientRequest,
            recipe_handler::RecipeRequest,
            recipe_handler::UpdateRecipeRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "User", description = "Sign-up, tokens and own profile"),
        (name = "Admin", description = "Staff-only account administration"),
        (name = "Tags", description = "The caller's recipe tags"),
        (name = "Ingredients", description = "The caller's ingredients"),
        (name = "Recipes", description = "The caller's recipes")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/user/token"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/user/create",
            "/api/user/token",
            "/api/user/me",
            "/api/admin/users/{id}/deactivate",
            "/api/recipe/tags",
            "/api/recipe/ingredients/{id}",
            "/api/recipe/recipes/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
