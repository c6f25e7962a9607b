//! Route guard: decides whether a navigation is allowed or redirected.
//!
//! The decision is a pure lookup in [`DECISION_TABLE`], keyed by the class of
//! the requested path and the state of the session credential. Keeping it as
//! a table leaves the odd `/` row visible at a glance.

use crate::auth::Session;

// ============================================================================
// Paths
// ============================================================================

pub const SIGNIN_PATH: &str = "/signin";
pub const SIGNUP_PATH: &str = "/signup";
pub const PAYMENT_FORM_PATH: &str = "/paymentform";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ROOT_PATH: &str = "/";

/// Paths that never need a session.
const PUBLIC_PATHS: [&str; 2] = [SIGNIN_PATH, SIGNUP_PATH];

/// Prefixes (after the leading `/`) the guard does not run on.
const UNGUARDED_PREFIXES: [&str; 8] = [
    "_next/static",
    "_next/image",
    "favicon.ico",
    "public",
    "api",
    "static",
    "health",
    "logout",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Public,
    PaymentForm,
    Root,
    Protected,
    Unguarded,
}

impl PathClass {
    pub fn classify(path: &str) -> Self {
        let rest = path.strip_prefix('/').unwrap_or(path);
        if UNGUARDED_PREFIXES.iter().any(|p| rest.starts_with(p)) {
            PathClass::Unguarded
        } else if PUBLIC_PATHS.contains(&path) {
            PathClass::Public
        } else if path == PAYMENT_FORM_PATH {
            PathClass::PaymentForm
        } else if path == ROOT_PATH {
            PathClass::Root
        } else {
            PathClass::Protected
        }
    }
}

/// What the guard knows about the caller's credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    /// No cookie, or the token failed verification for any reason.
    Absent,
    Unpaid,
    Paid,
}

impl From<&Session> for CredentialState {
    fn from(session: &Session) -> Self {
        match session.claims() {
            None => CredentialState::Absent,
            Some(claims) if claims.has_paid() => CredentialState::Paid,
            Some(_) => CredentialState::Unpaid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    Allow,
    Redirect(&'static str),
}

use CredentialState::{Absent, Paid, Unpaid};
use GuardAction::{Allow, Redirect};
use PathClass::{PaymentForm, Protected, Public, Root, Unguarded};

/// Path class x credential state -> action. Every combination appears once.
pub const DECISION_TABLE: [(PathClass, CredentialState, GuardAction); 15] = [
    (Public, Absent, Allow),
    (Public, Unpaid, Redirect(PAYMENT_FORM_PATH)),
    (Public, Paid, Redirect(DASHBOARD_PATH)),
    (PaymentForm, Absent, Redirect(SIGNIN_PATH)),
    (PaymentForm, Unpaid, Allow),
    (PaymentForm, Paid, Redirect(DASHBOARD_PATH)),
    (Root, Absent, Redirect(SIGNIN_PATH)),
    (Root, Unpaid, Redirect(PAYMENT_FORM_PATH)),
    // Paid users are sent away from `/` to sign-in rather than the dashboard.
    (Root, Paid, Redirect(SIGNIN_PATH)),
    (Protected, Absent, Redirect(SIGNIN_PATH)),
    (Protected, Unpaid, Redirect(PAYMENT_FORM_PATH)),
    (Protected, Paid, Allow),
    (Unguarded, Absent, Allow),
    (Unguarded, Unpaid, Allow),
    (Unguarded, Paid, Allow),
];

pub fn decide(class: PathClass, credential: CredentialState) -> GuardAction {
    DECISION_TABLE
        .iter()
        .find(|(c, s, _)| *c == class && *s == credential)
        .map(|(_, _, action)| *action)
        // Unreachable while the table is complete; fail closed regardless.
        .unwrap_or(Redirect(SIGNIN_PATH))
}

/// Evaluate a navigation to `path` for the given session.
pub fn evaluate(path: &str, session: &Session) -> GuardAction {
    decide(PathClass::classify(path), CredentialState::from(session))
}
