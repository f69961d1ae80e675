//! Tag handlers. Every route acts on the caller's own tags only.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::TagResponse;
use crate::errors::AppResult;

/// Tag create / rename request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TagRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    #[schema(example = "Vegetarian")]
    pub name: String,
}

/// Listing options
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignedOnlyQuery {
    /// `1` to list only items used by at least one recipe
    #[validate(range(max = 1, message = "assigned_only must be 0 or 1"))]
    #[serde(default)]
    pub assigned_only: u8,
}

pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/:id", patch(update_tag).delete(delete_tag))
}

/// List the caller's tags, name descending
#[utoipa::path(
    get,
    path = "/api/recipe/tags",
    tag = "Tags",
    security(("bearer_auth" = [])),
    params(AssignedOnlyQuery),
    responses(
        (status = 200, description = "Tags of the caller", body = Vec<TagResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_tags(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AssignedOnlyQuery>,
) -> AppResult<Json<Vec<TagResponse>>> {
    let tags = state
        .tag_service
        .list(current_user.id, query.assigned_only == 1)
        .await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

/// Create a tag owned by the caller
#[utoipa::path(
    post,
    path = "/api/recipe/tags",
    tag = "Tags",
    security(("bearer_auth" = [])),
    request_body = TagRequest,
    responses(
        (status = 201, description = "Tag created", body = TagResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_tag(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TagRequest>,
) -> AppResult<(StatusCode, Json<TagResponse>)> {
    let tag = state
        .tag_service
        .create(current_user.id, payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(TagResponse::from(tag))))
}

/// Rename one of the caller's tags
#[utoipa::path(
    patch,
    path = "/api/recipe/tags/{id}",
    tag = "Tags",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    request_body = TagRequest,
    responses(
        (status = 200, description = "Tag renamed", body = TagResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn update_tag(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TagRequest>,
) -> AppResult<Json<TagResponse>> {
    let tag = state
        .tag_service
        .rename(current_user.id, id, payload.name)
        .await?;
    Ok(Json(TagResponse::from(tag)))
}

/// Delete one of the caller's tags
#[utoipa::path(
    delete,
    path = "/api/recipe/tags/{id}",
    tag = "Tags",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    responses(
        (status = 204, description = "Tag deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Tag not found")
    )
)]
pub async fn delete_tag(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.tag_service.delete(current_user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
