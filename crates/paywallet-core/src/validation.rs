//! Local shape validation for the wallet forms.
//!
//! Each form validates into a cleaned value ready to send to the backend,
//! or the first failing rule as a [`FormError`] naming the offending field.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Largest single transfer accepted by the send-payment form.
pub const MAX_TRANSFER_AMOUNT: f64 = 1_000_000.0;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z .'-]{1,49}$").expect("name pattern"));

static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("expiry pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    Code,
    CardholderName,
    CardNumber,
    ExpiryDate,
    Cvc,
    ReceiverKey,
    Amount,
    ConfirmAmount,
    /// Rule spans several fields.
    Form,
}

impl Field {
    /// Form input name the error attaches to
    pub fn input_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::Code => "code",
            Field::CardholderName => "cardholderName",
            Field::CardNumber => "cardNumber",
            Field::ExpiryDate => "expiryDate",
            Field::Cvc => "cvc",
            Field::ReceiverKey => "receiverKey",
            Field::Amount => "amount",
            Field::ConfirmAmount => "confirmAmount",
            Field::Form => "form",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FormError {
    pub field: Field,
    pub message: &'static str,
}

impl FormError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

// ===== Sign-in / sign-up =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignIn {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<ValidSignIn, FormError> {
        if blank(&self.email) || blank(&self.password) {
            return Err(FormError::new(Field::Form, "Both email and password are required."));
        }
        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(FormError::new(Field::Email, "Please enter a valid email address."));
        }
        Ok(ValidSignIn {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignUp {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<ValidSignUp, FormError> {
        if blank(&self.name) || blank(&self.email) || blank(&self.password) {
            return Err(FormError::new(Field::Form, "All fields are required."));
        }
        let name = self.name.trim();
        if !NAME_RE.is_match(name) {
            return Err(FormError::new(
                Field::Name,
                "Name may only contain letters, spaces, and . ' - (2-50 characters).",
            ));
        }
        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(FormError::new(Field::Email, "Please enter a valid email address."));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::new(
                Field::Password,
                "Password must be at least 6 characters long.",
            ));
        }
        Ok(ValidSignUp {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailCodeForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub code: String,
}

impl EmailCodeForm {
    pub fn validate(&self) -> Result<(String, String), FormError> {
        let email = self.email.trim();
        if !EMAIL_RE.is_match(email) {
            return Err(FormError::new(Field::Email, "Please enter a valid email address."));
        }
        let code = self.code.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FormError::new(Field::Code, "Please enter the code from your email."));
        }
        Ok((email.to_string(), code.to_string()))
    }
}

// ===== Card payment =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardPaymentForm {
    #[serde(rename = "cardholderName", default)]
    pub cardholder_name: String,
    #[serde(rename = "cardNumber", default)]
    pub card_number: String,
    #[serde(rename = "expiryDate", default)]
    pub expiry_date: String,
    #[serde(default)]
    pub cvc: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCardPayment {
    pub cardholder_name: String,
    /// Digits only
    pub card_number: String,
    pub expiry_date: String,
    pub cvc: String,
}

impl CardPaymentForm {
    pub fn validate(&self) -> Result<ValidCardPayment, FormError> {
        if blank(&self.cardholder_name)
            || blank(&self.card_number)
            || blank(&self.expiry_date)
            || blank(&self.cvc)
        {
            return Err(FormError::new(Field::Form, "All payment fields are required."));
        }
        let expiry = self.expiry_date.trim();
        if !EXPIRY_RE.is_match(expiry) {
            return Err(FormError::new(
                Field::ExpiryDate,
                "Expiry date must be in MM/YY format.",
            ));
        }
        let card_number: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if !(12..=19).contains(&card_number.len()) || !card_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(FormError::new(
                Field::CardNumber,
                "Card number must be 12 to 19 digits.",
            ));
        }
        let cvc = self.cvc.trim();
        if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(FormError::new(Field::Cvc, "CVC must be 3 or 4 digits."));
        }
        Ok(ValidCardPayment {
            cardholder_name: self.cardholder_name.trim().to_string(),
            card_number,
            expiry_date: expiry.to_string(),
            cvc: cvc.to_string(),
        })
    }
}

// ===== Send payment =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendPaymentForm {
    #[serde(rename = "receiverKey", default)]
    pub receiver_key: String,
    #[serde(default)]
    pub amount: String,
    #[serde(rename = "confirmAmount", default)]
    pub confirm_amount: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidSendPayment {
    pub receiver_key: String,
    pub amount: f64,
}

impl ValidSendPayment {
    /// `Successfully sent $12.50 to 0xAbC12345...`
    pub fn success_message(&self) -> String {
        let prefix: String = self.receiver_key.chars().take(10).collect();
        format!("Successfully sent ${:.2} to {}...", self.amount, prefix)
    }
}

impl SendPaymentForm {
    pub fn validate(&self) -> Result<ValidSendPayment, FormError> {
        if blank(&self.receiver_key) {
            return Err(FormError::new(Field::ReceiverKey, "Receiver Public Key is required."));
        }
        if blank(&self.amount) || blank(&self.confirm_amount) {
            return Err(FormError::new(
                Field::Amount,
                "Amount and Confirm Amount are required.",
            ));
        }
        let amount = match self.amount.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => return Err(FormError::new(Field::Amount, "Please enter a valid amount.")),
        };
        let confirm = self.confirm_amount.trim().parse::<f64>().ok();
        if confirm != Some(amount) {
            return Err(FormError::new(Field::ConfirmAmount, "Amounts do not match."));
        }
        if amount > MAX_TRANSFER_AMOUNT {
            return Err(FormError::new(
                Field::Amount,
                "Amount exceeds the maximum of $1,000,000.00.",
            ));
        }
        Ok(ValidSendPayment {
            receiver_key: self.receiver_key.trim().to_string(),
            amount,
        })
    }
}

// ===== Key reveal =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

impl PasswordForm {
    pub fn validate_for_reveal(&self) -> Result<&str, FormError> {
        if self.password.is_empty() {
            return Err(FormError::new(
                Field::Password,
                "Password is required to reveal the private key.",
            ));
        }
        Ok(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_requires_both_fields() {
        let form = SignInForm {
            email: "  ".into(),
            password: "secret".into(),
        };
        assert_eq!(
            form.validate().unwrap_err().message,
            "Both email and password are required."
        );

        let form = SignInForm {
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate().unwrap_err().field, Field::Email);

        let form = SignInForm {
            email: " ada@example.com ".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate().unwrap().email, "ada@example.com");
    }

    #[test]
    fn test_sign_up_rules_in_order() {
        let mut form = SignUpForm {
            name: "".into(),
            email: "ada@example.com".into(),
            password: "abcdef".into(),
        };
        assert_eq!(form.validate().unwrap_err().message, "All fields are required.");

        form.name = "Ada9".into();
        assert_eq!(form.validate().unwrap_err().field, Field::Name);

        form.name = "Ada O'Neil-Byron".into();
        form.email = "ada@example".into();
        assert_eq!(form.validate().unwrap_err().field, Field::Email);

        form.email = "ada@example.com".into();
        form.password = "abc".into();
        assert_eq!(
            form.validate().unwrap_err().message,
            "Password must be at least 6 characters long."
        );

        form.password = "abcdef".into();
        let valid = form.validate().unwrap();
        assert_eq!(valid.name, "Ada O'Neil-Byron");
    }

    #[test]
    fn test_email_code() {
        let form = EmailCodeForm {
            email: "ada@example.com".into(),
            code: " 123456 ".into(),
        };
        assert_eq!(
            form.validate().unwrap(),
            ("ada@example.com".to_string(), "123456".to_string())
        );

        let form = EmailCodeForm {
            email: "ada@example.com".into(),
            code: "12 34".into(),
        };
        assert_eq!(form.validate().unwrap_err().field, Field::Code);
    }

    fn card() -> CardPaymentForm {
        CardPaymentForm {
            cardholder_name: "Ada Lovelace".into(),
            card_number: "4242 4242 4242 4242".into(),
            expiry_date: "12/29".into(),
            cvc: "123".into(),
        }
    }

    #[test]
    fn test_card_payment_valid_strips_spaces() {
        let valid = card().validate().unwrap();
        assert_eq!(valid.card_number, "4242424242424242");
    }

    #[test]
    fn test_card_payment_rules() {
        let mut form = card();
        form.cvc = "".into();
        assert_eq!(form.validate().unwrap_err().message, "All payment fields are required.");

        let mut form = card();
        form.expiry_date = "1229".into();
        assert_eq!(
            form.validate().unwrap_err().message,
            "Expiry date must be in MM/YY format."
        );

        let mut form = card();
        form.card_number = "4242 42".into();
        assert_eq!(form.validate().unwrap_err().field, Field::CardNumber);

        let mut form = card();
        form.cvc = "12a".into();
        assert_eq!(form.validate().unwrap_err().field, Field::Cvc);
    }

    fn send(amount: &str, confirm: &str) -> SendPaymentForm {
        SendPaymentForm {
            receiver_key: "0xAbC1234567890".into(),
            amount: amount.into(),
            confirm_amount: confirm.into(),
        }
    }

    #[test]
    fn test_send_payment_rules() {
        let mut form = send("10", "10");
        form.receiver_key = " ".into();
        assert_eq!(form.validate().unwrap_err().message, "Receiver Public Key is required.");

        assert_eq!(
            send("", "10").validate().unwrap_err().message,
            "Amount and Confirm Amount are required."
        );
        assert_eq!(
            send("-5", "-5").validate().unwrap_err().message,
            "Please enter a valid amount."
        );
        assert_eq!(
            send("abc", "abc").validate().unwrap_err().message,
            "Please enter a valid amount."
        );
        assert_eq!(
            send("10", "10.01").validate().unwrap_err().message,
            "Amounts do not match."
        );
        assert_eq!(send("2000000", "2000000").validate().unwrap_err().field, Field::Amount);
    }

    #[test]
    fn test_send_payment_success_message() {
        let valid = send("12.5", "12.50").validate().unwrap();
        assert_eq!(valid.amount, 12.5);
        assert_eq!(valid.success_message(), "Successfully sent $12.50 to 0xAbC12345...");

        let short = ValidSendPayment {
            receiver_key: "0xAb".to_string(),
            amount: 1.0,
        };
        assert_eq!(short.success_message(), "Successfully sent $1.00 to 0xAb...");
    }

    #[test]
    fn test_reveal_requires_password() {
        let form = PasswordForm::default();
        assert_eq!(form.validate_for_reveal().unwrap_err().field, Field::Password);

        let form = PasswordForm {
            password: "pw".into(),
        };
        assert_eq!(form.validate_for_reveal().unwrap(), "pw");
    }
}
