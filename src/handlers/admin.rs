use crate::core::error::{AdminError, ApprovalPageError, WalletError};
use crate::core::state::AppState;
use crate::models::api::{AdminLoginRequest, AdminTokenResponse};
use crate::models::user::WalletView;
use crate::utils::auth::verify_secret;
use crate::wallet::lifecycle;
use axum::{
    extract::{Json, Path, Query, State},
    http::HeaderMap,
    response::{Html, Json as JsonResponse},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Deserialize)]
pub struct ApproveQuery {
    pub token: Option<String>,
}

/// Pull a bearer token out of the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Trade the panel password for a session token
///
/// POST /api/admin/login {password}
pub async fn admin_login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<JsonResponse<AdminTokenResponse>, AdminError> {
    if !verify_secret(&req.password, &state.config.admin.panel_password) {
        warn!("Failed admin panel login attempt");
        return Err(AdminError::InvalidPassword);
    }

    let token = state.sessions.issue();
    info!("Admin panel session issued");

    Ok(JsonResponse(AdminTokenResponse {
        success: true,
        token,
    }))
}

/// Every user record for operator review, credentials omitted
///
/// GET /api/admin/users/all  (Authorization: Bearer <token>)
pub async fn users_all_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<JsonResponse<Vec<WalletView>>, AdminError> {
    let token = bearer_token(&headers).ok_or(AdminError::InvalidToken)?;
    if !state.sessions.verify(token) {
        warn!("Rejected admin user listing with bad token");
        return Err(AdminError::InvalidToken);
    }

    let users = state.store.list_users()?;
    Ok(JsonResponse(users.iter().map(|u| u.view()).collect()))
}

/// Release a pending wallet via the link from the operator alert
///
/// GET /admin/approve/{username}?token=<token>
///
/// Answers a browser, so the body is an HTML fragment rather than JSON.
pub async fn approve_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(query): Query<ApproveQuery>,
    headers: HeaderMap,
) -> Result<Html<String>, ApprovalPageError> {
    let token = query
        .token
        .as_deref()
        .or_else(|| bearer_token(&headers))
        .ok_or(ApprovalPageError::InvalidToken)?;

    if !state.sessions.verify(token) {
        warn!(username = %username, "Rejected approval with bad token");
        return Err(ApprovalPageError::InvalidToken);
    }

    let approved = lifecycle::approve(state.store.as_ref(), &username).map_err(|e| match e {
        WalletError::UserNotFound => ApprovalPageError::UserNotFound,
        WalletError::InvalidState { current, .. } => ApprovalPageError::InvalidState { current },
        WalletError::Store(e) => ApprovalPageError::Store(e),
    })?;

    Ok(Html(format!(
        "<h1>Approval Success</h1><p>User <b>{}</b> now has access to their funds.</p>",
        approved.username
    )))
}
