//! Data models for the payment wallet backend.
//!
//! This module contains the structures exchanged with the remote API:
//!
//! - `ApiTransaction`, `Transaction`: transaction history items
//! - `KeyPair`, `PublicKeyEntry`: key management
//! - Request bodies for sign-up, sign-in and payments

pub mod account;
pub mod keys;
pub mod transaction;

pub use account::{
    CardPaymentRequest, EmailCodeRequest, PasswordRequest, PaymentReceipt, SendPaymentRequest,
    SignInData, SignInRequest, SignUpRequest,
};
pub use keys::{KeyPair, PublicKeyEntry};
pub use transaction::{normalize_all, ApiTransaction, Transaction, TransactionKind, WireAmount};
