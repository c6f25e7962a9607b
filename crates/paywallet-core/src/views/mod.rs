//! View models for the wallet pages.
//!
//! Each page owns its fetch lifecycle: it loads what it needs from the
//! backend on every request and derives display-only state from it.
//! Nothing here is cached or shared between requests.

pub mod dashboard;
pub mod keys;
pub mod notifications;

use serde::Serialize;

use crate::api::ApiError;

pub use dashboard::{DashboardSummary, Series};
pub use keys::{load_public_keys, KeyManager};
pub use notifications::{Notification, NotificationDetail, NotificationFeed};

/// Outcome message shown after a form submission or action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    /// Error feedback from a failed backend call
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        Feedback::Error(err.user_message(fallback))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(m) | Feedback::Error(m) => m,
        }
    }
}

/// Generic fallbacks used when the backend sends no message.
pub mod fallback {
    pub const SIGN_IN: &str = "Invalid email or password.";
    pub const SIGN_UP: &str = "An unexpected error occurred.";
    pub const VERIFY_CODE: &str = "Verification failed. Please check the code and try again.";
    pub const PAYMENT: &str = "Payment failed. Please try again.";
}
