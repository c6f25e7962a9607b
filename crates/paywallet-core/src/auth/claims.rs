//! Typed session claims carried inside the signed token.
//!
//! The token payload is decoded into [`RawClaims`] first, where every field
//! is optional, then validated into [`SessionClaims`]. Any missing or
//! malformed field rejects the whole credential.

use serde::{Deserialize, Serialize};

use super::TokenError;

/// Whether the account holder has completed the onboarding card payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum PaymentStatus {
    Pending,
    Completed,
}

impl PaymentStatus {
    pub fn is_completed(self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }
}

impl From<bool> for PaymentStatus {
    fn from(paid: bool) -> Self {
        if paid {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Pending
        }
    }
}

/// Validated identity claims for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct SessionClaims {
    pub id: String,
    pub name: String,
    pub email: String,
    pub payment: PaymentStatus,
}

impl SessionClaims {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        payment: PaymentStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            payment,
        }
    }

    pub fn has_paid(&self) -> bool {
        self.payment.is_completed()
    }
}

/// The payment flag as issued by the backend: a JSON boolean or the
/// strings `"true"` / `"false"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum PaymentClaim {
    Flag(bool),
    Text(String),
}

impl PaymentClaim {
    fn status(&self) -> Option<PaymentStatus> {
        match self {
            PaymentClaim::Flag(paid) => Some(PaymentStatus::from(*paid)),
            PaymentClaim::Text(text) => match text.as_str() {
                "true" => Some(PaymentStatus::Completed),
                "false" => Some(PaymentStatus::Pending),
                _ => None,
            },
        }
    }
}

/// Token payload as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawClaims {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub payment: Option<PaymentClaim>,
}

/// Payload written when minting a token locally.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct IssuedClaims<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub payment: bool,
    pub iat: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

fn required(value: Option<String>, claim: &'static str) -> Result<String, TokenError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(TokenError::MissingClaim(claim)),
    }
}

impl TryFrom<RawClaims> for SessionClaims {
    type Error = TokenError;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let id = required(raw.id, "_id")?;
        let name = required(raw.name, "name")?;
        let email = required(raw.email, "email")?;
        let payment = raw
            .payment
            .ok_or(TokenError::MissingClaim("payment"))?
            .status()
            .ok_or(TokenError::MalformedClaim("payment"))?;

        Ok(Self {
            id,
            name,
            email,
            payment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawClaims {
        serde_json::from_str(json).expect("raw claims parse")
    }

    #[test]
    fn test_payment_claim_accepts_bool_and_string() {
        let claims = SessionClaims::try_from(raw(
            r#"{"_id":"u1","name":"Ada","email":"ada@example.com","payment":true}"#,
        ))
        .unwrap();
        assert_eq!(claims.payment, PaymentStatus::Completed);

        let claims = SessionClaims::try_from(raw(
            r#"{"_id":"u1","name":"Ada","email":"ada@example.com","payment":"false"}"#,
        ))
        .unwrap();
        assert_eq!(claims.payment, PaymentStatus::Pending);
    }

    #[test]
    fn test_missing_identity_claims_rejected() {
        let err = SessionClaims::try_from(raw(
            r#"{"name":"Ada","email":"ada@example.com","payment":true}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, TokenError::MissingClaim("_id")));

        let err = SessionClaims::try_from(raw(
            r#"{"_id":"u1","name":"  ","email":"ada@example.com","payment":true}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, TokenError::MissingClaim("name")));

        let err = SessionClaims::try_from(raw(r#"{"_id":"u1","name":"Ada","payment":true}"#))
            .unwrap_err();
        assert!(matches!(err, TokenError::MissingClaim("email")));
    }

    #[test]
    fn test_payment_claim_must_be_present_and_well_formed() {
        let err = SessionClaims::try_from(raw(
            r#"{"_id":"u1","name":"Ada","email":"ada@example.com"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, TokenError::MissingClaim("payment")));

        let err = SessionClaims::try_from(raw(
            r#"{"_id":"u1","name":"Ada","email":"ada@example.com","payment":"yes"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, TokenError::MalformedClaim("payment")));
    }

    #[test]
    fn test_non_string_id_fails_to_parse() {
        let result = serde_json::from_str::<RawClaims>(
            r#"{"_id":42,"name":"Ada","email":"ada@example.com","payment":true}"#,
        );
        assert!(result.is_err());
    }
}
