//! Page handlers.
//!
//! Every handler receives the [`Session`](paywallet_core::Session) resolved
//! by the route guard through request extensions and never reads the cookie
//! itself.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod keys;
pub mod payment;
