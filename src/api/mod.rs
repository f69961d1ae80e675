//! API layer - HTTP handlers and middleware
//!
//! Request handlers, JWT middleware, validated extractors and the route
//! table. Handlers only talk to service traits held in [`AppState`].

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
