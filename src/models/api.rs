use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub redirect: String,
}

#[derive(Deserialize)]
pub struct ChatSendRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminTokenResponse {
    pub success: bool,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
