use serde::{Deserialize, Serialize};

/// Name of the session marker, both as a local key and as a cookie
pub const SESSION_COOKIE: &str = "token";

/// The single client-side session object.
///
/// Login sets it and logout clears it. The cookie sent to the server is
/// derived from it on every request, so the stored session and the cookie
/// always agree.
///
/// Only presence matters to the client; the token itself is opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn establish(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear(&mut self) {
        self.token = None;
    }

    pub fn is_present(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Cookie` header value carrying the token, if any
    pub fn cookie_header(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("{}={}", SESSION_COOKIE, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_logout_move_both_views_together() {
        let mut session = Session::default();
        assert!(!session.is_present());
        assert_eq!(session.cookie_header(), None);

        session.establish("abc");
        assert!(session.is_present());
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.cookie_header().as_deref(), Some("token=abc"));

        session.clear();
        assert!(!session.is_present());
        assert_eq!(session.cookie_header(), None);
    }

    #[test]
    fn presence_does_not_depend_on_content() {
        assert!(Session::with_token("").is_present());
    }
}
