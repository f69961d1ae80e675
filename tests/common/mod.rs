//! Shared helpers for integration tests.
//!
//! Every test gets its own router over a fresh in-memory store, so no
//! database is needed and tests never see each other's data.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use recipe_api::infra::MemoryStore;
use recipe_api::services::{IdentityManager, IdentityService, Services};
use recipe_api::{create_router, AppState, Config};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const PASSWORD: &str = "testpass123";

/// Router plus the store behind it, for seeding data directly.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = Config::new("postgres://unused", TEST_SECRET).unwrap();
        let services = Services::from_unit_of_work(store.clone(), config);
        let router = create_router(AppState::new(&services, None));
        Self { router, store }
    }

    /// Send a request and return status plus parsed JSON body (Null if empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    /// Sign up through the API and return a bearer token.
    pub async fn register(&self, email: &str) -> String {
        let (status, _) = self
            .send(
                Method::POST,
                "/api/user/create",
                None,
                Some(json!({ "email": email, "password": PASSWORD, "name": "Test Name" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        self.login(email).await
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/user/token",
                None,
                Some(json!({ "email": email, "password": PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Create a superuser directly in the store and return its token.
    pub async fn superuser(&self, email: &str) -> String {
        IdentityManager::new(self.store.clone())
            .create_superuser(Some(email), Some(PASSWORD), Default::default())
            .await
            .unwrap();
        self.login(email).await
    }
}
