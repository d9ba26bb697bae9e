use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::system::auth;

/// Конфигурация системных роутов приложения
pub fn configure_system_routes() -> Router {
    // ========================================
    // ADMIN ONLY
    // ========================================
    let admin = Router::new()
        .route(
            "/api/admin/users",
            get(handlers::users::list).post(handlers::users::create),
        )
        .route(
            "/api/admin/users/:id",
            get(handlers::users::get_by_id)
                .put(handlers::users::update)
                .delete(handlers::users::delete),
        )
        .route(
            "/api/admin/fix-return-id-mismatch",
            post(handlers::maintenance::fix_return_id_mismatch),
        )
        .route(
            "/api/admin/fix-serialnumber-index",
            post(handlers::maintenance::fix_serialnumber_index),
        )
        .route(
            "/api/admin/rename-item",
            post(handlers::maintenance::rename_item),
        )
        .route_layer(middleware::from_fn(auth::middleware::require_admin));

    Router::new()
        // ========================================
        // HEALTH CHECK
        // ========================================
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route(
            "/api/auth/me",
            get(handlers::auth::current_user)
                .layer(middleware::from_fn(auth::middleware::require_auth)),
        )
        .route("/api/debug/auth-status", get(handlers::debug::auth_status))
        .merge(admin)
}

