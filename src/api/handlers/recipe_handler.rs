//! Recipe handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::QUERY_LIST_SEPARATOR;
use crate::domain::{NewRecipe, RecipeChanges, RecipeDetailResponse, RecipeFilter, RecipeResponse};
use crate::errors::{AppError, AppResult};

/// Full recipe payload, used by create and replace
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecipeRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    #[schema(example = "Chocolate cheesecake")]
    pub title: String,
    #[validate(range(min = 0, message = "Time must not be negative"))]
    #[schema(example = 30)]
    pub time_minutes: i32,
    /// Decimal string or number, at most two decimal places
    #[schema(value_type = String, example = "5.00")]
    pub price: Decimal,
    #[validate(length(max = 255, message = "Link must be at most 255 characters"))]
    #[schema(example = "https://example.com/cheesecake")]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<Uuid>,
    #[serde(default)]
    pub ingredients: Vec<Uuid>,
}

impl From<RecipeRequest> for NewRecipe {
    fn from(request: RecipeRequest) -> Self {
        NewRecipe {
            title: request.title,
            time_minutes: request.time_minutes,
            price: request.price,
            link: request.link.unwrap_or_default(),
            tags: request.tags,
            ingredients: request.ingredients,
        }
    }
}

/// Partial recipe update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRecipeRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "Time must not be negative"))]
    pub time_minutes: Option<i32>,
    #[schema(value_type = Option<String>, example = "7.50")]
    pub price: Option<Decimal>,
    /// Empty string clears the link
    #[validate(length(max = 255, message = "Link must be at most 255 characters"))]
    pub link: Option<String>,
    /// Replaces all tags when present
    pub tags: Option<Vec<Uuid>>,
    /// Replaces all ingredients when present
    pub ingredients: Option<Vec<Uuid>>,
}

impl From<UpdateRecipeRequest> for RecipeChanges {
    fn from(request: UpdateRecipeRequest) -> Self {
        RecipeChanges {
            title: request.title,
            time_minutes: request.time_minutes,
            price: request.price,
            link: request.link,
            tags: request.tags,
            ingredients: request.ingredients,
        }
    }
}

/// Recipe list filters
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeListQuery {
    /// Comma-separated tag ids; recipes with any of them
    #[param(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub tags: Option<String>,
    /// Comma-separated ingredient ids; recipes with any of them
    pub ingredients: Option<String>,
}

impl RecipeListQuery {
    fn into_filter(self) -> AppResult<RecipeFilter> {
        Ok(RecipeFilter {
            tags: parse_ids("tags", self.tags.as_deref())?,
            ingredients: parse_ids("ingredients", self.ingredients.as_deref())?,
        })
    }
}

fn parse_ids(param: &str, raw: Option<&str>) -> AppResult<Vec<Uuid>> {
    raw.unwrap_or_default()
        .split(QUERY_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            Uuid::parse_str(part)
                .map_err(|_| AppError::bad_request(format!("Invalid id in {}: {}", param, part)))
        })
        .collect()
}

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route(
            "/:id",
            get(get_recipe)
                .patch(update_recipe)
                .put(replace_recipe)
                .delete(delete_recipe),
        )
}

/// List the caller's recipes, newest first
#[utoipa::path(
    get,
    path = "/api/recipe/recipes",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(RecipeListQuery),
    responses(
        (status = 200, description = "Recipes of the caller", body = Vec<RecipeResponse>),
        (status = 400, description = "Malformed id in filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_recipes(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RecipeListQuery>,
) -> AppResult<Json<Vec<RecipeResponse>>> {
    let recipes = state
        .recipe_service
        .list(current_user.id, query.into_filter()?)
        .await?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

/// Create a recipe owned by the caller
#[utoipa::path(
    post,
    path = "/api/recipe/recipes",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    request_body = RecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Validation error or unknown tag / ingredient"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_recipe(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RecipeRequest>,
) -> AppResult<(StatusCode, Json<RecipeResponse>)> {
    let recipe = state
        .recipe_service
        .create(current_user.id, NewRecipe::from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(RecipeResponse::from(recipe))))
}

/// Get a recipe with its tags and ingredients
#[utoipa::path(
    get,
    path = "/api/recipe/recipes/{id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe detail", body = RecipeDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RecipeDetailResponse>> {
    let detail = state.recipe_service.get(current_user.id, id).await?;
    Ok(Json(RecipeDetailResponse::from(detail)))
}

/// Partially update a recipe
#[utoipa::path(
    patch,
    path = "/api/recipe/recipes/{id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn update_recipe(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRecipeRequest>,
) -> AppResult<Json<RecipeResponse>> {
    let recipe = state
        .recipe_service
        .update(current_user.id, id, RecipeChanges::from(payload))
        .await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

/// Replace every field of a recipe
#[utoipa::path(
    put,
    path = "/api/recipe/recipes/{id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = RecipeRequest,
    responses(
        (status = 200, description = "Recipe replaced", body = RecipeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn replace_recipe(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RecipeRequest>,
) -> AppResult<Json<RecipeResponse>> {
    let changes = RecipeChanges::from(NewRecipe::from(payload));
    let recipe = state
        .recipe_service
        .update(current_user.id, id, changes)
        .await?;
    Ok(Json(RecipeResponse::from(recipe)))
}

/// Delete a recipe
#[utoipa::path(
    delete,
    path = "/api/recipe/recipes/{id}",
    tag = "Recipes",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn delete_recipe(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.recipe_service.delete(current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_skips_blanks() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let raw = format!("{}, ,{}", a, b);
        assert_eq!(parse_ids("tags", Some(&raw)).unwrap(), vec![a, b]);
        assert!(parse_ids("tags", None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_ids_rejects_garbage() {
        let err = parse_ids("tags", Some("1,2")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
