use crate::core::error::AdminError;
use crate::core::state::AppState;
use crate::utils::time::current_timestamp;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub users: usize,
}

/// Health check handler
///
/// GET /health
pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AdminError> {
    let users = state.store.list_users()?.len();

    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: current_timestamp(),
            users,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_state;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_health_handler() {
        let state = test_state();
        let response = health_handler(State(state)).await.unwrap().into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_response_body() {
        use axum::body::Body;
        use http_body_util::BodyExt;

        let state = test_state();
        let response = health_handler(State(state)).await.unwrap().into_response();

        let (parts, body) = response.into_parts();
        assert_eq!(parts.status, StatusCode::OK);

        let body = Body::new(body);
        let bytes = body.collect().await.unwrap().to_bytes();
        let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(health.status, "ok");
        assert!(health.timestamp > 0);
        assert_eq!(health.users, 0);
    }
}
