//! Session credential handling.
//!
//! This module provides:
//! - `SessionClaims`: strongly typed identity and payment claims
//! - `TokenVerifier`: HS256 signature verification against the shared secret
//! - `Session`: the explicit per-request session context
//!
//! The backend issues the token at sign-in; this crate only reads it.

pub mod claims;
pub mod session;
pub mod token;

use thiserror::Error;

pub use claims::{PaymentStatus, SessionClaims};
pub use session::{Session, SESSION_COOKIE};
pub use token::TokenVerifier;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Session token is empty")]
    Empty,

    #[error("Invalid session token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Session token is missing claim `{0}`")]
    MissingClaim(&'static str),

    #[error("Session token has malformed claim `{0}`")]
    MalformedClaim(&'static str),
}
