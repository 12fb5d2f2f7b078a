use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::SecurityConfig;
use crate::dashboard::Session;

/// Set the session cookie for a freshly issued token
pub fn establish(jar: CookieJar, security: &SecurityConfig, token: String) -> CookieJar {
    let cookie = Cookie::build((security.session_cookie.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.secure_cookie)
        .build();
    jar.add(cookie)
}

/// Expire the session cookie
pub fn clear(jar: CookieJar, security: &SecurityConfig) -> CookieJar {
    jar.remove(Cookie::build(security.session_cookie.clone()).path("/"))
}

/// Read the request's session cookie into a session object
pub fn from_jar(jar: &CookieJar, security: &SecurityConfig) -> Session {
    match jar.get(&security.session_cookie) {
        Some(cookie) => Session::with_token(cookie.value()),
        None => Session::default(),
    }
}
