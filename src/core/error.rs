// Centralized error handling for the portal API

use crate::models::api::ErrorResponse;
use crate::models::user::WalletStatus;
use crate::stores::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

/// Errors from registration and login.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Fill all fields")]
    MissingFields,

    #[error("User already exists")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Server error")]
    Hashing(argon2::password_hash::Error),

    #[error("Server error")]
    Store(#[from] StoreError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::MissingFields | AuthError::UserExists => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Hashing(e) => {
                error!(error = %e, "Password hashing failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthError::Store(e) => {
                error!(error = %e, "Store failure during auth");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors from wallet reads and lifecycle transitions.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("User not found")]
    UserNotFound,

    #[error("Wallet is {current}, cannot {action}")]
    InvalidState {
        current: WalletStatus,
        action: &'static str,
    },

    #[error("Server error")]
    Store(#[from] StoreError),
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let status = match &self {
            WalletError::UserNotFound => StatusCode::NOT_FOUND,
            WalletError::InvalidState { .. } => StatusCode::CONFLICT,
            WalletError::Store(e) => {
                error!(error = %e, "Store failure during wallet operation");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors from the chat endpoints.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Missing data")]
    MissingFields,

    #[error("Server error")]
    Store(#[from] StoreError),
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = match &self {
            ChatError::MissingFields => StatusCode::BAD_REQUEST,
            ChatError::Store(e) => {
                error!(error = %e, "Store failure during chat operation");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors from the JSON admin endpoints.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Unauthorized")]
    InvalidPassword,

    #[error("Unauthorized")]
    InvalidToken,

    #[error("Server error")]
    Store(#[from] StoreError),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self {
            AdminError::InvalidPassword | AdminError::InvalidToken => StatusCode::UNAUTHORIZED,
            AdminError::Store(e) => {
                error!(error = %e, "Store failure during admin operation");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Errors from the approve-by-link page, which answers a browser rather
/// than an API client, so bodies are plain text instead of JSON.
#[derive(Error, Debug)]
pub enum ApprovalPageError {
    #[error("Unauthorized")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Wallet is {current}, nothing to approve")]
    InvalidState { current: WalletStatus },

    #[error("Server Error")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApprovalPageError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApprovalPageError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApprovalPageError::UserNotFound => StatusCode::NOT_FOUND,
            ApprovalPageError::InvalidState { .. } => StatusCode::CONFLICT,
            ApprovalPageError::Store(e) => {
                error!(error = %e, "Store failure during approval");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
