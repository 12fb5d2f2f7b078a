use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;
use crate::handlers::session;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/login - Exchange a credential pair for a session token
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Success returns `{"token": "..."}` and also sets the `token` cookie, so
/// the route guard sees the same session the client stores. Failure returns
/// `{"error": "..."}` with 400 (missing fields) or 401 (bad pair).
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let security = &state.config.security;

    let token = match auth::login(security, &payload.email, &payload.password) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!("Login rejected for '{}': {}", payload.email.trim(), e);
            return Err(e.into());
        }
    };

    tracing::info!("Login succeeded for '{}'", payload.email.trim());
    let jar = session::establish(jar, security, token.clone());
    Ok((jar, Json(LoginResponse { token })))
}
