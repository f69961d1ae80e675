//! Account handlers: sign-up, token and own profile.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{IdentityResponse, NewIdentity};
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Sign-up request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "cook@example.com")]
    pub email: String,
    /// Password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Display name
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(example = "Julia Child")]
    #[serde(default)]
    pub name: String,
}

/// Token request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "cook@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Profile update; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    #[schema(example = "Julia")]
    pub name: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Public account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_user))
        .route("/token", post(create_token))
}

/// Routes for the authenticated caller's own account
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me).patch(update_me))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/user/create",
    tag = "User",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = IdentityResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<IdentityResponse>)> {
    let identity = state
        .identity_service
        .create_user(
            Some(&payload.email),
            Some(&payload.password),
            NewIdentity::named(payload.name.trim()),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(IdentityResponse::from(identity))))
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/user/token",
    tag = "User",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn create_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = IdentityResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<IdentityResponse>> {
    let identity = state.identity_service.get(current_user.id).await?;
    Ok(Json(IdentityResponse::from(identity)))
}

/// Update the authenticated user's name or password
#[utoipa::path(
    patch,
    path = "/api/user/me",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = IdentityResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<IdentityResponse>> {
    let identity = state
        .identity_service
        .update_profile(current_user.id, payload.name, payload.password)
        .await?;

    Ok(Json(IdentityResponse::from(identity)))
}
