/// Admin login placeholder.
///
/// Compares plaintext credentials against the configured pair and answers
/// with a fixed token. There is no session, hashing or rate limiting.
use crate::config::AdminConfig;
use crate::error::{AppError, Result};
use crate::models::{LoginRequest, LoginResponse};

const LOGIN_TOKEN: &str = "ok";

pub fn verify_admin(admin: &AdminConfig, req: &LoginRequest) -> Result<LoginResponse> {
    if req.username == admin.username && req.password == admin.password {
        return Ok(LoginResponse {
            token: LOGIN_TOKEN.to_string(),
        });
    }

    tracing::warn!(username = %req.username, "Admin login rejected");
    Err(AppError::Unauthorized("Invalid credentials".to_string()))
}
