//! Ingredient handlers, same contract as tags.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::tag_handler::AssignedOnlyQuery;
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::IngredientResponse;
use crate::errors::AppResult;

/// Ingredient create / rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngredientRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    #[schema(example = "Olive oil")]
    pub name: String,
}

pub fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route("/:id", patch(update_ingredient).delete(delete_ingredient))
}

/// List the caller's ingredients, name descending
#[utoipa::path(
    get,
    path = "/api/recipe/ingredients",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    params(AssignedOnlyQuery),
    responses(
        (status = 200, description = "Ingredients of the caller", body = Vec<IngredientResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_ingredients(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AssignedOnlyQuery>,
) -> AppResult<Json<Vec<IngredientResponse>>> {
    let ingredients = state
        .ingredient_service
        .list(current_user.id, query.assigned_only == 1)
        .await?;
    Ok(Json(ingredients.into_iter().map(IngredientResponse::from).collect()))
}

/// Create an ingredient owned by the caller
#[utoipa::path(
    post,
    path = "/api/recipe/ingredients",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    request_body = IngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_ingredient(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<IngredientRequest>,
) -> AppResult<(StatusCode, Json<IngredientResponse>)> {
    let ingredient = state
        .ingredient_service
        .create(current_user.id, payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(IngredientResponse::from(ingredient))))
}

/// Rename one of the caller's ingredients
#[utoipa::path(
    patch,
    path = "/api/recipe/ingredients/{id}",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    request_body = IngredientRequest,
    responses(
        (status = 200, description = "Ingredient renamed", body = IngredientResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ingredient not found")
    )
)]
pub async fn update_ingredient(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<IngredientRequest>,
) -> AppResult<Json<IngredientResponse>> {
    let ingredient = state
        .ingredient_service
        .rename(current_user.id, id, payload.name)
        .await?;
    Ok(Json(IngredientResponse::from(ingredient)))
}

/// Delete one of the caller's ingredients
#[utoipa::path(
    delete,
    path = "/api/recipe/ingredients/{id}",
    tag = "Ingredients",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ingredient not found")
    )
)]
pub async fn delete_ingredient(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.ingredient_service.delete(current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
