//! REST API client module for the payment wallet backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! backend that owns accounts, keys, balances and transactions.
//!
//! Authenticated endpoints take the session token as a bearer
//! credential; every response is wrapped in a `{ data, message }` envelope.

pub mod client;
pub mod error;

pub use client::{ApiClient, Envelope};
pub use error::ApiError;
