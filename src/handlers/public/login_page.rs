use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;
use crate::handlers::session;
use crate::middleware::GuardDecision;
use crate::templates;

const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login - Login form; sessions the guard would let through go straight on
///
/// A cookie the guard rejects is dropped before the form is shown, otherwise
/// the browser would bounce between `/login` and `/dashboard`.
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Result<Response, ApiError> {
    let security = &state.config.security;
    let current = session::from_jar(&jar, security);

    match state.guard.decide(DASHBOARD_PATH, current.token()) {
        GuardDecision::Pass => Ok(Redirect::to(DASHBOARD_PATH).into_response()),
        GuardDecision::RedirectToLogin if current.is_present() => {
            tracing::debug!("Discarding session cookie the guard rejects");
            let jar = session::clear(jar, security);
            let form = render_form(&state, StatusCode::OK, "", None)?;
            Ok((jar, form).into_response())
        }
        GuardDecision::RedirectToLogin => render_form(&state, StatusCode::OK, "", None),
    }
}

/// POST /login - Form-encoded login for the HTML page
pub async fn login_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let security = &state.config.security;

    match auth::login(security, &form.email, &form.password) {
        Ok(token) => {
            tracing::info!("Login succeeded for '{}'", form.email.trim());
            let jar = session::establish(jar, security, token);
            Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response())
        }
        Err(e) => {
            tracing::warn!("Login rejected for '{}': {}", form.email.trim(), e);
            let error = ApiError::from(e);
            let status = StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);
            render_form(&state, status, &form.email, Some(error.message()))
        }
    }
}

fn render_form(state: &AppState, status: StatusCode, email: &str, error: Option<&str>) -> Result<Response, ApiError> {
    let html = state
        .templates
        .render(templates::LOGIN, &json!({ "email": email, "error": error }))
        .map_err(|e| {
            tracing::error!("Failed to render login page: {}", e);
            ApiError::internal_server_error("Internal Server Error")
        })?;
    Ok((status, Html(html)).into_response())
}
