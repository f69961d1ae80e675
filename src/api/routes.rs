//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use sea_orm::DbErr;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    admin_routes, ingredient_routes, profile_routes, recipe_routes, tag_routes, user_routes,
};
use super::middleware::auth_middleware;
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let recipe_api = Router::new()
        .nest("/tags", protected(tag_routes(), &state))
        .nest("/ingredients", protected(ingredient_routes(), &state))
        .nest("/recipes", protected(recipe_routes(), &state));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Sign-up and token are public, the profile is not
        .nest(
            "/api/user",
            user_routes().merge(protected(profile_routes(), &state)),
        )
        .nest("/api/admin", protected(admin_routes(), &state))
        .nest("/api/recipe", recipe_api)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Require a valid bearer token on every route of `routes`.
fn protected(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    routes.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ))
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Recipe API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ping = match &state.database {
        Some(database) => Some(database.ping().await),
        None => None,
    };
    let db_status = database_status(ping);

    let healthy = db_status.error.is_none();
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth {
            database: db_status,
        },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

/// `None` when running without a database. Driver errors are logged, not exposed.
fn database_status(ping: Option<Result<(), DbErr>>) -> ServiceStatus {
    match ping {
        Some(Ok(())) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Some(Err(e)) => {
            tracing::warn!("Health check database ping failed: {}", e);
            ServiceStatus {
                status: "unhealthy",
                error: Some("Database unreachable"),
            }
        }
        None => ServiceStatus {
            status: "in-memory",
            error: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_failure_hides_driver_detail() {
        let status = database_status(Some(Err(DbErr::Custom(
            "connection refused at 10.0.0.3:5432".to_string(),
        ))));

        assert_eq!(status.status, "unhealthy");
        assert_eq!(status.error, Some("Database unreachable"));
    }

    #[test]
    fn test_database_status_states() {
        assert_eq!(database_status(Some(Ok(()))).status, "healthy");
        let in_memory = database_status(None);
        assert_eq!(in_memory.status, "in-memory");
        assert!(in_memory.error.is_none());
    }
}
