use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth;
use crate::config::SecurityConfig;

pub const LOGIN_PATH: &str = "/login";

/// Explicit path matcher for the guard.
///
/// Exempt prefixes are plain string prefixes (`/login*`, `/api*`). Protected
/// prefixes match the prefix itself and everything below it.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    protected: Vec<String>,
    exempt: Vec<String>,
}

impl RouteMatcher {
    pub fn new(protected: &[&str], exempt: &[&str]) -> Self {
        Self {
            protected: protected.iter().map(|p| p.to_string()).collect(),
            exempt: exempt.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|prefix| {
            path == prefix || path.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new(&["/dashboard"], &[LOGIN_PATH, "/api"])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    RedirectToLogin,
}

/// Stateless per-request access check.
///
/// By default only the presence of the session cookie is checked, never its
/// value. With `verify_session_token` on, the cookie must also carry a token
/// signed with the configured secret.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    matcher: RouteMatcher,
    cookie_name: String,
    verify_secret: Option<String>,
}

impl RouteGuard {
    pub fn new(matcher: RouteMatcher, cookie_name: impl Into<String>) -> Self {
        Self {
            matcher,
            cookie_name: cookie_name.into(),
            verify_secret: None,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        let mut guard = Self::new(RouteMatcher::default(), security.session_cookie.clone());
        if security.verify_session_token {
            guard.verify_secret = Some(security.jwt_secret.clone());
        }
        guard
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn decide(&self, path: &str, token: Option<&str>) -> GuardDecision {
        if self.matcher.is_exempt(path) || !self.matcher.is_protected(path) {
            return GuardDecision::Pass;
        }

        match (token, &self.verify_secret) {
            (None, _) => GuardDecision::RedirectToLogin,
            (Some(_), None) => GuardDecision::Pass,
            (Some(token), Some(secret)) => match auth::verify_token(secret, token) {
                Ok(_) => GuardDecision::Pass,
                Err(_) => GuardDecision::RedirectToLogin,
            },
        }
    }
}

/// Route guard middleware, applied to the whole router
pub async fn route_guard(
    State(guard): State<Arc<RouteGuard>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let token = jar.get(guard.cookie_name()).map(|cookie| cookie.value());

    match guard.decide(request.uri().path(), token) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::RedirectToLogin => {
            tracing::debug!("Redirecting unauthenticated request for {}", request.uri().path());
            Redirect::temporary(LOGIN_PATH).into_response()
        }
    }
}
