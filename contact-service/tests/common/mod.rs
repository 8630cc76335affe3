//! Shared setup for contact-service integration tests.
//!
//! Every test gets its own router over a fresh `InMemoryStore`, so tests run
//! in parallel without a database.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use contact_service::{
    build_router,
    config::{ContactConfig, DatabaseConfig, Environment},
    repositories::{InMemoryStore, Repositories},
    AppState,
};
use serde_json::{json, Value};
use service_core::config::Config;
use tower::ServiceExt;

pub const PASSWORD: &str = "secret123";

pub fn test_config() -> ContactConfig {
    ContactConfig {
        common: Config::default(),
        environment: Environment::Dev,
        service_name: "contact-service".to_string(),
        service_version: "test".to_string(),
        log_level: "warn".to_string(),
        otlp_endpoint: None,
        database: DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            name: "contacts_test".to_string(),
            user: None,
            password: None,
            max_connections: 1,
            min_connections: 0,
        },
        allowed_origins: vec!["http://localhost:3000".to_string()],
        swagger_enabled: false,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: InMemoryStore,
}

/// Response status, headers and the body parsed as JSON (`Null` when empty,
/// a JSON string when the body is not JSON).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ContactConfig) -> Self {
        let store = InMemoryStore::new();
        let state = AppState::new(config, Repositories::in_memory(store.clone()));
        let router = build_router(state).expect("router should build");
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, name: &str, email: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": PASSWORD })),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Register and log in, returning the new user's id and bearer token.
    pub async fn signed_in(&self, name: &str, email: &str) -> (i64, String) {
        let registered = self.register(name, email).await;
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

        let login = self.login(email, PASSWORD).await;
        assert_eq!(login.status, StatusCode::OK, "{}", login.body);

        let id = login.body["data"]["user"]["id"]
            .as_i64()
            .expect("user id in login response");
        let token = login.body["data"]["access_token"]
            .as_str()
            .expect("token in login response")
            .to_string();
        (id, token)
    }

    pub async fn create_contact(&self, token: &str, body: Value) -> i64 {
        let created = self.post("/contacts", token, body).await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
        created.body["data"]["id"].as_i64().expect("contact id")
    }

    pub async fn create_address(&self, token: &str, body: Value) -> i64 {
        let created = self.post("/addresses", token, body).await;
        assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
        created.body["data"]["id"].as_i64().expect("address id")
    }
}
