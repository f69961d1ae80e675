//! Staff-only account administration.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::post,
    Router,
};
use uuid::Uuid;

use crate::api::middleware::{require_staff, CurrentUser};
use crate::api::AppState;
use crate::domain::IdentityResponse;
use crate::errors::{AppError, AppResult};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id/deactivate", post(deactivate_user))
        .route("/users/:id/activate", post(activate_user))
}

/// Deactivate an account; it can no longer log in
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/deactivate",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deactivated", body = IdentityResponse),
        (status = 400, description = "Cannot deactivate own account"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Staff only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn deactivate_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<IdentityResponse>> {
    require_staff(&current_user)?;
    if current_user.id == id {
        return Err(AppError::bad_request("Cannot deactivate your own account"));
    }

    let identity = state.identity_service.set_active(id, false).await?;
    Ok(Json(IdentityResponse::from(identity)))
}

/// Reactivate an account
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/activate",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User activated", body = IdentityResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Staff only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn activate_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<IdentityResponse>> {
    require_staff(&current_user)?;
    let identity = state.identity_service.set_active(id, true).await?;
    Ok(Json(IdentityResponse::from(identity)))
}
