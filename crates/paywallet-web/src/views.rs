//! Page templates and the render helper.
//!
//! Every page extends `base.html`, which shows the navigation bar when
//! `user_email` is non-empty.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use paywallet_core::api::ApiError;
use paywallet_core::models::{PublicKeyEntry, TransactionKind};
use paywallet_core::utils::{format_currency, format_date_short};
use paywallet_core::validation::FormError;
use paywallet_core::views::{
    DashboardSummary, Feedback, KeyManager, Notification, NotificationDetail,
};

/// Render a template, falling back to a plain 500 when rendering fails.
pub fn render_template<T: Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering error").into_response()
        }
    }
}

/// Outcome of a form submission: a message plus the input to highlight.
#[derive(Debug, Clone, Default)]
pub struct FormStatus {
    pub feedback: Option<Feedback>,
    pub invalid: &'static str,
}

impl FormStatus {
    pub fn rejected(err: &FormError) -> Self {
        Self {
            feedback: Some(Feedback::Error(err.message.to_string())),
            invalid: err.field.input_name(),
        }
    }

    pub fn failed(err: &ApiError, fallback: &str) -> Self {
        Self {
            feedback: Some(Feedback::from_api(err, fallback)),
            invalid: "",
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            feedback: Some(Feedback::Error(message.into())),
            invalid: "",
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            feedback: Some(Feedback::Success(message.into())),
            invalid: "",
        }
    }

    /// `aria-invalid` attribute for the named input, empty otherwise
    pub fn invalid_attr(&self, input: &str) -> &'static str {
        if !self.invalid.is_empty() && self.invalid == input {
            r#"aria-invalid="true""#
        } else {
            ""
        }
    }
}

// ===== Account =====

#[derive(Template, Default)]
#[template(path = "signin.html")]
pub struct SignInPage {
    pub user_email: String,
    pub status: FormStatus,
    pub email: String,
}

#[derive(Template, Default)]
#[template(path = "signup.html")]
pub struct SignUpPage {
    pub user_email: String,
    pub status: FormStatus,
    pub name: String,
    pub email: String,
}

/// Second sign-up step: the emailed verification code.
#[derive(Template, Default)]
#[template(path = "verify_email.html")]
pub struct VerifyEmailPage {
    pub user_email: String,
    pub status: FormStatus,
    pub email: String,
}

// ===== Payments =====

#[derive(Template, Default)]
#[template(path = "payment_form.html")]
pub struct PaymentFormPage {
    pub user_email: String,
    pub status: FormStatus,
    pub cardholder_name: String,
}

#[derive(Template, Default)]
#[template(path = "send_payment.html")]
pub struct SendPaymentPage {
    pub user_email: String,
    pub status: FormStatus,
    pub receiver_key: String,
}

// ===== Keys =====

#[derive(Template, Default)]
#[template(path = "generate_keys.html")]
pub struct GenerateKeysPage {
    pub user_email: String,
    pub status: FormStatus,
    pub has_keys: bool,
    pub public_key: String,
    /// Empty until the password check passes
    pub private_key: String,
}

impl GenerateKeysPage {
    pub fn new(user_email: &str, manager: &KeyManager) -> Self {
        Self {
            user_email: user_email.to_string(),
            status: FormStatus {
                feedback: manager.feedback.clone(),
                invalid: "",
            },
            has_keys: manager.has_keys(),
            public_key: manager.public_key().unwrap_or_default().to_string(),
            private_key: manager
                .revealed_private_key()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

pub struct PublicKeyRow {
    pub name: String,
    pub public_key: String,
}

#[derive(Template, Default)]
#[template(path = "public_keys.html")]
pub struct PublicKeysPage {
    pub user_email: String,
    pub keys: Vec<PublicKeyRow>,
}

impl PublicKeysPage {
    pub fn new(user_email: &str, keys: &[PublicKeyEntry]) -> Self {
        Self {
            user_email: user_email.to_string(),
            keys: keys
                .iter()
                .map(|k| PublicKeyRow {
                    name: k.display_name().to_string(),
                    public_key: k.public_key.clone(),
                })
                .collect(),
        }
    }
}

// ===== Dashboard =====

pub struct TransactionRow {
    pub date: String,
    pub time: String,
    pub kind: &'static str,
    pub description: String,
    pub amount: String,
}

#[derive(Template, Default)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub user_email: String,
    pub balance: String,
    pub sent_total: String,
    pub sent_count: usize,
    pub received_total: String,
    pub received_count: usize,
    pub net_flow: String,
    pub rows: Vec<TransactionRow>,
}

impl DashboardPage {
    pub fn new(user_email: &str, summary: &DashboardSummary) -> Self {
        let rows = summary
            .transactions
            .iter()
            .map(|t| TransactionRow {
                date: format_date_short(&t.date),
                time: t.time.clone(),
                kind: match t.kind {
                    TransactionKind::Sent => "Sent",
                    TransactionKind::Received => "Received",
                },
                description: t.description.clone(),
                amount: format_currency(t.amount),
            })
            .collect();

        Self {
            user_email: user_email.to_string(),
            balance: format_currency(summary.balance),
            sent_total: format_currency(summary.sent.total),
            sent_count: summary.sent.count(),
            received_total: format_currency(summary.received.total),
            received_count: summary.received.count(),
            net_flow: format_currency(summary.net_flow()),
            rows,
        }
    }
}

// ===== Notifications =====

#[derive(Template, Default)]
#[template(path = "notifications.html")]
pub struct NotificationsPage {
    pub user_email: String,
    pub items: Vec<Notification>,
    pub detail: Option<NotificationDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use paywallet_core::validation::SignInForm;

    #[test]
    fn test_rejected_form_marks_field() {
        let err = SignInForm {
            email: "not-an-email".into(),
            password: "pw".into(),
        }
        .validate()
        .unwrap_err();

        let status = FormStatus::rejected(&err);
        assert_eq!(status.invalid_attr("email"), r#"aria-invalid="true""#);
        assert_eq!(status.invalid_attr("password"), "");
    }

    #[test]
    fn test_signin_page_escapes_sticky_values() {
        let page = SignInPage {
            email: "<script>".to_string(),
            ..Default::default()
        };
        let html = page.render().unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_navigation_only_when_signed_in() {
        let anonymous = SignInPage::default().render().unwrap();
        assert!(!anonymous.contains("/logout"));

        let signed_in = DashboardPage {
            user_email: "ada@example.com".to_string(),
            ..Default::default()
        }
        .render()
        .unwrap();
        assert!(signed_in.contains("ada@example.com"));
        assert!(signed_in.contains("/logout"));
    }

    #[test]
    fn test_render_template_returns_html() {
        let response = render_template(SignInPage::default());
        assert_eq!(response.status(), StatusCode::OK);
    }
}
