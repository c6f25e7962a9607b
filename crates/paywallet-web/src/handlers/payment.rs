//! Onboarding card payment and wallet-to-wallet transfers.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::cookie::CookieJar;
use paywallet_core::guard::DASHBOARD_PATH;
use paywallet_core::models::{CardPaymentRequest, SendPaymentRequest};
use paywallet_core::validation::{CardPaymentForm, SendPaymentForm};
use paywallet_core::views::fallback;
use paywallet_core::Session;
use tracing::{info, warn};

use crate::cookies;
use crate::state::AppState;
use crate::views::{render_template, FormStatus, PaymentFormPage, SendPaymentPage};

pub async fn payment_form_page(Extension(session): Extension<Session>) -> Response {
    render_template(PaymentFormPage {
        user_email: session.display_email().to_string(),
        ..Default::default()
    })
}

/// Submit the card payment. A refreshed token in the receipt replaces the
/// cookie so the guard sees the updated payment claim on the next request.
pub async fn submit_payment_form(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    jar: CookieJar,
    Form(form): Form<CardPaymentForm>,
) -> Response {
    let mut page = PaymentFormPage {
        user_email: session.display_email().to_string(),
        cardholder_name: form.cardholder_name.trim().to_string(),
        ..Default::default()
    };

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(e) => {
            page.status = FormStatus::rejected(&e);
            return render_template(page);
        }
    };

    let request = CardPaymentRequest {
        cardholder_name: &valid.cardholder_name,
        card_number: &valid.card_number,
        expiry_date: &valid.expiry_date,
        cvc: &valid.cvc,
    };
    match state.api_for(&session).submit_card_payment(&request).await {
        Ok(receipt) => match receipt.token {
            Some(token) => {
                info!("Card payment accepted, session refreshed");
                let jar = cookies::store_token(jar, token, state.config.secure_cookies);
                (jar, Redirect::to(DASHBOARD_PATH)).into_response()
            }
            None => {
                info!("Card payment accepted");
                page.status = FormStatus::success(
                    "Payment successful. Sign in again to activate your wallet.",
                );
                render_template(page)
            }
        },
        Err(e) => {
            warn!(error = %e, "Card payment failed");
            page.status = FormStatus::failed(&e, fallback::PAYMENT);
            render_template(page)
        }
    }
}

pub async fn send_payment_page(Extension(session): Extension<Session>) -> Response {
    render_template(SendPaymentPage {
        user_email: session.display_email().to_string(),
        ..Default::default()
    })
}

pub async fn send_payment(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<SendPaymentForm>,
) -> Response {
    let mut page = SendPaymentPage {
        user_email: session.display_email().to_string(),
        receiver_key: form.receiver_key.trim().to_string(),
        ..Default::default()
    };

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(e) => {
            page.status = FormStatus::rejected(&e);
            return render_template(page);
        }
    };

    let request = SendPaymentRequest {
        receiver_key: &valid.receiver_key,
        amount: valid.amount,
    };
    match state.api_for(&session).send_payment(&request).await {
        Ok(_) => {
            info!(amount = valid.amount, "Payment sent");
            page.receiver_key.clear();
            page.status = FormStatus::success(valid.success_message());
        }
        Err(e) => {
            warn!(error = %e, "Send payment failed");
            page.status = FormStatus::failed(&e, fallback::PAYMENT);
        }
    }
    render_template(page)
}
