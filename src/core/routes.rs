// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

pub fn build_router(state: Arc<AppState>) -> Router {
    let assets_dir = &state.config.server.assets_dir;
    let login_page = ServeFile::new(assets_dir.join("login.html"));
    let assets = ServeDir::new(assets_dir);

    Router::new()
        // Authentication
        .route("/api/register", post(crate::handlers::auth::register_handler))
        .route("/api/login", post(crate::handlers::auth::login_handler))
        // Wallet
        .route("/wallet/{id}", get(crate::handlers::wallet::wallet_handler))
        .route(
            "/wallet/{id}/request-unlock",
            post(crate::handlers::wallet::request_unlock_handler),
        )
        // Live chat
        .route("/api/chat/send", post(crate::handlers::chat::send_handler))
        .route(
            "/api/chat/history/{username}",
            get(crate::handlers::chat::history_handler),
        )
        // Admin endpoints (token-gated except login)
        .route("/api/admin/login", post(crate::handlers::admin::admin_login_handler))
        .route("/api/admin/users/all", get(crate::handlers::admin::users_all_handler))
        .route(
            "/admin/approve/{username}",
            get(crate::handlers::admin::approve_handler),
        )
        // Operational
        .route("/health", get(crate::handlers::health::health_handler))
        // Static portal pages
        .route_service("/login", login_page)
        .fallback_service(assets)
        .with_state(state)
}
