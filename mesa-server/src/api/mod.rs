//! API routes

pub mod accounts;
pub mod auth;
pub mod guests;
pub mod health;
pub mod me;
pub mod tables;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Account sessions
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh-token", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        // Own profile
        .route("/me", get(me::profile).patch(me::update_profile))
        .route("/me/change-password", post(me::change_password))
        // Employee management (admin)
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/detail/{id}",
            get(accounts::detail)
                .put(accounts::update)
                .patch(accounts::update)
                .delete(accounts::remove),
        )
        // Guest sessions
        .route("/guests/login", post(guests::login))
        .route("/guests/refresh-token", post(guests::refresh))
        .route("/guests/logout", post(guests::logout))
        .route("/accounts/guests", post(guests::staff_create))
        // Tables (staff)
        .route("/tables", get(tables::list).post(tables::create))
        .route(
            "/tables/{number}",
            get(tables::detail)
                .put(tables::update)
                .delete(tables::remove),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
