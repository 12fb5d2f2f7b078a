use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::app::AppState;
use crate::handlers::session;
use crate::middleware::LOGIN_PATH;

/// GET /logout - Drop the session cookie and return to the login page.
///
/// Tokens are not tracked server-side, so nothing is revoked here.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (session::clear(jar, &state.config.security), Redirect::to(LOGIN_PATH))
}
