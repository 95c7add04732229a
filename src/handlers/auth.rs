use crate::core::error::AuthError;
use crate::core::state::AppState;
use crate::models::api::{AckResponse, LoginRequest, LoginResponse, RegisterRequest};
use crate::wallet::lifecycle::{self, LoginOutcome};
use axum::{
    extract::{Json, State},
    response::Json as JsonResponse,
};
use std::sync::Arc;

/// Create a new account
///
/// POST /api/register {username, password}
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<JsonResponse<AckResponse>, AuthError> {
    lifecycle::register(
        state.store.as_ref(),
        &state.config.wallet,
        &req.username,
        &req.password,
    )?;

    Ok(JsonResponse(AckResponse { success: true }))
}

/// Check credentials and tell the client where to go next
///
/// POST /api/login {username, password}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<JsonResponse<LoginResponse>, AuthError> {
    let outcome = lifecycle::login(
        state.store.as_ref(),
        &state.config.admin,
        &req.username,
        &req.password,
    )?;

    let response = match outcome {
        LoginOutcome::Admin => LoginResponse {
            success: true,
            username: None,
            is_admin: true,
            redirect: "/admin.html".to_string(),
        },
        LoginOutcome::User { username } => LoginResponse {
            success: true,
            username: Some(username),
            is_admin: false,
            redirect: "/index.html".to_string(),
        },
    };

    Ok(JsonResponse(response))
}
