pub mod config;
pub mod db;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Json, Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ContactConfig;
use crate::repositories::{Repositories, StorageHealth};
use crate::services::{AddressService, AuthService, ContactService, UserService};
use std::sync::Arc;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        handlers::metrics::metrics,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::contacts::list_contacts,
        handlers::contacts::create_contact,
        handlers::contacts::get_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,
        handlers::addresses::list_addresses,
        handlers::addresses::create_address,
        handlers::addresses::get_address,
        handlers::addresses::update_address,
        handlers::addresses::delete_address,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::Deleted,
            dtos::auth::RegisterRequest,
            dtos::auth::LoginRequest,
            dtos::auth::AuthResponse,
            dtos::users::CreateUserRequest,
            dtos::users::UpdateUserRequest,
            dtos::contacts::CreateContactRequest,
            dtos::contacts::UpdateContactRequest,
            dtos::addresses::CreateAddressRequest,
            dtos::addresses::UpdateAddressRequest,
            dtos::UserResponse,
            dtos::SessionResponse,
            dtos::UserPageResponse,
            dtos::ContactResponse,
            dtos::ContactPageResponse,
            dtos::AddressResponse,
            dtos::AddressPageResponse,
            dtos::DeletedResponse,
            models::UserProfile,
            models::Contact,
            models::Address,
            models::UserPage,
            models::ContactPage,
            models::AddressPage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current session"),
        (name = "Users", description = "User directory"),
        (name = "Contacts", description = "The caller's contacts"),
        (name = "Addresses", description = "Addresses of the caller's contacts"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("opaque")
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: ContactConfig,
    pub storage: Arc<dyn StorageHealth>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub contact_service: ContactService,
    pub address_service: AddressService,
}

impl AppState {
    /// Wire every service to the given repositories.
    pub fn new(config: ContactConfig, repos: Repositories) -> Self {
        Self {
            config,
            storage: repos.health,
            auth_service: AuthService::new(repos.credentials.clone()),
            user_service: UserService::new(repos.credentials, repos.users),
            contact_service: ContactService::new(repos.contacts.clone()),
            address_service: AddressService::new(repos.contacts, repos.addresses),
        }
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins = origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]))
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let protected = Router::new()
        .route("/me", get(handlers::auth::me))
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/contacts",
            get(handlers::contacts::list_contacts).post(handlers::contacts::create_contact),
        )
        .route(
            "/contacts/:id",
            get(handlers::contacts::get_contact)
                .put(handlers::contacts::update_contact)
                .delete(handlers::contacts::delete_contact),
        )
        .route(
            "/addresses",
            get(handlers::addresses::list_addresses).post(handlers::addresses::create_address),
        )
        .route(
            "/addresses/:id",
            get(handlers::addresses::get_address)
                .put(handlers::addresses::update_address)
                .delete(handlers::addresses::delete_address),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(handlers::metrics::metrics));

    if state.config.swagger_enabled {
        app =
            app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    } else {
        app = app.route(
            "/.well-known/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        );
    }

    let cors = cors_layer(&state.config.allowed_origins)?;

    let app = app
        .route("/auth/register", axum::routing::post(handlers::auth::register))
        .route("/auth/login", axum::routing::post(handlers::auth::login))
        .merge(protected)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    user_id = tracing::field::Empty,
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors);

    Ok(app)
}

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Service is unhealthy")
    ),
    tag = "Observability"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let database = match state.storage.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Storage health check failed");
            "unavailable"
        }
    };
    let healthy = database == "ok";

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if healthy { "ok" } else { "unhealthy" },
            "service": state.config.service_name,
            "version": state.config.service_version,
            "checks": { "database": database },
        })),
    )
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Welcome to the contact book API",
    }))
}
