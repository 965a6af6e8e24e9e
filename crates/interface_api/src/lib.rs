//! HTTP API Layer
//!
//! This crate provides the REST API for the insurance backend using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain module
//! - **Middleware**: The bearer-token authentication gate and request logging
//! - **DTOs**: Request payloads with explicit validation and conversions
//! - **Error Handling**: Typed errors with consistent response bodies
//!
//! Handlers reach persistence only through the entity store port, so the
//! same router runs against PostgreSQL in production and the in-memory
//! adapter in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::postgres(pool, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::EntityStore;
use domain_insurance::Insurance;
use domain_user::User;
use infra_db::{DatabasePool, PgEntityStore};

use crate::config::ApiConfig;
use crate::handlers::{auth as auth_handlers, health, insurance, user};
use crate::middleware::log_requests;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn EntityStore<User>>,
    pub insurances: Arc<dyn EntityStore<Insurance>>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the state to any pair of store adapters
    pub fn new(
        users: Arc<dyn EntityStore<User>>,
        insurances: Arc<dyn EntityStore<Insurance>>,
        config: ApiConfig,
    ) -> Self {
        Self {
            users,
            insurances,
            config,
        }
    }

    /// Wires the state to PostgreSQL-backed stores over one pool
    pub fn postgres(pool: DatabasePool, config: ApiConfig) -> Self {
        Self {
            users: Arc::new(PgEntityStore::new(pool.clone())),
            insurances: Arc::new(PgEntityStore::new(pool)),
            config,
        }
    }
}

/// Creates the main API router
///
/// Gating is per handler through the [`middleware::AuthUser`] extractor.
/// Health, registration, login, refresh and insurance creation are open;
/// every other route requires a bearer credential.
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/refresh", post(auth_handlers::refresh));

    let insurance_routes = Router::new()
        .route("/", post(insurance::create).get(insurance::find_all))
        .route("/paginated", get(insurance::find_all_paginated))
        .route(
            "/filter-by-user-quote",
            post(insurance::filter_by_user_quote),
        )
        .route(
            "/policy-number/:policy_number",
            get(insurance::find_by_policy_number),
        )
        .route(
            "/:id",
            get(insurance::find_one)
                .patch(insurance::update)
                .delete(insurance::remove),
        );

    let user_routes = Router::new()
        .route("/", get(user::find_all))
        .route("/:id", get(user::find_one).patch(user::update));

    Router::new()
        .merge(public_routes)
        .nest("/auth", auth_routes)
        .nest("/insurance", insurance_routes)
        .nest("/users", user_routes)
        .layer(axum_middleware::from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
