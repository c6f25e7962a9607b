//! Axum router configuration
//!
//! ```text
//! /                     - guard only, always redirected
//! /signin, /signup      - public account pages
//! /paymentform          - onboarding card payment (unpaid sessions)
//! /dashboard            - balance and transaction aggregates
//! /sendpayment          - wallet-to-wallet transfer
//! /generatekeys         - key pair generation and private key reveal
//! /keys                 - public key directory
//! /notifications        - transaction notifications, `?id=` for detail
//! /logout, /health      - unguarded
//! ```
//!
//! The route guard wraps every route and the default fallback. Unmatched
//! paths are guarded like protected pages, so only paid sessions reach the
//! 404.

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, dashboard, health, keys, payment};
use crate::middleware::route_guard;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::root))
        .route("/signin", get(auth::signin_page).post(auth::signin))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route(
            "/paymentform",
            get(payment::payment_form_page).post(payment::submit_payment_form),
        )
        .route(
            "/sendpayment",
            get(payment::send_payment_page).post(payment::send_payment),
        )
        .route(
            "/generatekeys",
            get(keys::generate_keys_page).post(keys::generate_keys),
        )
        .route("/generatekeys/reveal", post(keys::reveal_private_key))
        .route("/keys", get(keys::public_keys))
        .route("/notifications", get(dashboard::notifications))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/logout", get(auth::logout))
        .route("/health", get(health::health))
        .layer(from_fn_with_state(state.clone(), route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
