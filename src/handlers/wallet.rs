use crate::core::error::WalletError;
use crate::core::state::AppState;
use crate::models::api::MessageResponse;
use crate::models::user::WalletView;
use crate::wallet::lifecycle;
use axum::{
    extract::{Path, State},
    response::Json,
};
use std::sync::Arc;

/// Full wallet record for one user (credential omitted)
///
/// GET /wallet/{id}
pub async fn wallet_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WalletView>, WalletError> {
    let view = lifecycle::wallet_view(state.store.as_ref(), &id)?;
    Ok(Json(view))
}

/// User claims the unlock fee is paid; flags the wallet for admin review
///
/// POST /wallet/{id}/request-unlock
pub async fn request_unlock_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, WalletError> {
    lifecycle::request_unlock(state.store.as_ref(), &state.config.server.public_url, &id)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Payment notification sent. Your funds will be released after admin verification."
            .to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;
    use crate::models::api::RegisterRequest;
    use crate::models::user::WalletStatus;

    async fn register(state: &Arc<AppState>, username: &str) {
        crate::handlers::auth::register_handler(
            State(state.clone()),
            axum::extract::Json(RegisterRequest {
                username: username.to_string(),
                password: "pw".to_string(),
            }),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_wallet_handler_returns_view() {
        let state = test_state();
        register(&state, "alice").await;

        let response = wallet_handler(State(state), Path("alice".to_string()))
            .await
            .unwrap();

        assert_eq!(response.0.username, "alice");
        assert_eq!(response.0.wallet_status, WalletStatus::Locked);
        assert_eq!(response.0.pending_balance, 10000.00);
    }

    #[tokio::test]
    async fn test_wallet_handler_unknown_user() {
        let state = test_state();
        let err = wallet_handler(State(state), Path("ghost".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::UserNotFound));
    }

    #[tokio::test]
    async fn test_request_unlock_flags_wallet() {
        let state = test_state();
        register(&state, "alice").await;

        let response = request_unlock_handler(State(state.clone()), Path("alice".to_string()))
            .await
            .unwrap();
        assert!(response.0.success);
        assert!(response.0.message.contains("admin verification"));

        let view = wallet_handler(State(state), Path("alice".to_string()))
            .await
            .unwrap();
        assert_eq!(view.0.wallet_status, WalletStatus::PendingApproval);
        assert!(view.0.notified_admin);
    }
}
