//! Request and response bodies for the account and payment endpoints.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailCodeRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordRequest<'a> {
    pub password: &'a str,
}

/// Card details for the onboarding payment. The card number is sent
/// without spaces.
#[derive(Debug, Clone, Serialize)]
pub struct CardPaymentRequest<'a> {
    #[serde(rename = "cardholderName")]
    pub cardholder_name: &'a str,
    #[serde(rename = "cardNumber")]
    pub card_number: &'a str,
    #[serde(rename = "expiryDate")]
    pub expiry_date: &'a str,
    pub cvc: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendPaymentRequest<'a> {
    #[serde(rename = "receiverKey")]
    pub receiver_key: &'a str,
    pub amount: f64,
}

/// Payload of a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInData {
    pub token: String,
}

/// Payload of a completed card payment. A refreshed token is returned when
/// the backend re-issues the session with the payment claim set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentReceipt {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BalanceData {
    #[serde(rename = "totalBalance")]
    pub total_balance: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct NotificationsData {
    #[serde(rename = "transactionTransformed", default)]
    pub transactions: Vec<super::ApiTransaction>,
}
