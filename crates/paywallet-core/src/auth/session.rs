use tracing::debug;

use super::{SessionClaims, TokenVerifier};

/// Name of the cookie that carries the signed session token.
pub const SESSION_COOKIE: &str = "token";

/// Per-request session context.
///
/// Built once from the cookie by the route guard and handed to every view,
/// so nothing downstream reads the cookie itself.
#[derive(Debug, Clone, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
        claims: SessionClaims,
    },
}

impl Session {
    /// Resolve a session from an optional raw cookie value.
    /// Any verification failure yields `Anonymous`.
    pub fn resolve(raw_token: Option<&str>, verifier: &TokenVerifier) -> Self {
        let Some(token) = raw_token else {
            return Session::Anonymous;
        };

        match verifier.verify(token) {
            Ok(claims) => Session::Authenticated {
                token: token.to_string(),
                claims,
            },
            Err(e) => {
                debug!(error = %e, "Session token rejected");
                Session::Anonymous
            }
        }
    }

    /// Get the bearer token if the session is authenticated
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token.as_str()),
            Session::Anonymous => None,
        }
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        match self {
            Session::Authenticated { claims, .. } => Some(claims),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// Email shown in the navigation bar, empty when anonymous
    pub fn display_email(&self) -> &str {
        self.claims().map(|c| c.email.as_str()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PaymentStatus;
    use secrecy::SecretString;

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(&SecretString::from("secret".to_string()))
    }

    #[test]
    fn test_resolve_without_cookie_is_anonymous() {
        let session = Session::resolve(None, &verifier());
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
        assert_eq!(session.display_email(), "");
    }

    #[test]
    fn test_resolve_valid_token() {
        let v = verifier();
        let claims = SessionClaims::new("u1", "Ada", "ada@example.com", PaymentStatus::Pending);
        let token = v.issue(&claims, None).unwrap();

        let session = Session::resolve(Some(&token), &v);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some(token.as_str()));
        assert_eq!(session.claims(), Some(&claims));
        assert_eq!(session.display_email(), "ada@example.com");
    }

    #[test]
    fn test_resolve_invalid_token_is_anonymous() {
        let session = Session::resolve(Some("garbage.token.value"), &verifier());
        assert!(!session.is_authenticated());
    }
}
