//! Core library for paywallet.
//!
//! Holds everything the web front end needs that is not HTTP plumbing:
//! session claims and token verification, the route guard decision table,
//! the typed backend API client, form validation, view models and
//! configuration.

pub mod api;
pub mod auth;
pub mod config;
pub mod guard;
pub mod models;
pub mod utils;
pub mod validation;
pub mod views;

pub use api::{ApiClient, ApiError};
pub use auth::{PaymentStatus, Session, SessionClaims, TokenError, TokenVerifier};
pub use config::{Config, ConfigError, Environment};
pub use guard::{GuardAction, PathClass};
