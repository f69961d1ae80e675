//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Authenticatable, PermissionBearing};
use crate::errors::AppError;

/// Authenticated identity resolved from the bearer token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub is_staff: bool,
}

/// JWT authentication middleware.
///
/// Validates the bearer token, then loads the identity so that accounts
/// deactivated after the token was issued are rejected, and injects
/// [`CurrentUser`] into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let identity = match state.identity_service.get(claims.sub).await {
        Ok(identity) if identity.is_active() => identity,
        Ok(_) | Err(AppError::NotFound) => return Err(AppError::Unauthorized),
        Err(e) => return Err(e),
    };

    let current_user = CurrentUser {
        id: identity.id,
        is_staff: identity.is_staff(),
        email: identity.email,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require staff permission, returns Forbidden error otherwise.
pub fn require_staff(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_staff {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
