//! Key generation, private key reveal, and the public key directory.

use axum::{extract::State, response::Response, Extension, Form};
use paywallet_core::validation::PasswordForm;
use paywallet_core::views::{load_public_keys, KeyManager};
use paywallet_core::Session;

use crate::state::AppState;
use crate::views::{render_template, GenerateKeysPage, PublicKeysPage};

pub async fn generate_keys_page(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    let manager = KeyManager::load(&state.api_for(&session)).await;
    render_template(GenerateKeysPage::new(session.display_email(), &manager))
}

pub async fn generate_keys(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<PasswordForm>,
) -> Response {
    let api = state.api_for(&session);
    let manager = KeyManager::load(&api).await.generate(&api, &form.password).await;
    render_template(GenerateKeysPage::new(session.display_email(), &manager))
}

pub async fn reveal_private_key(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<PasswordForm>,
) -> Response {
    let api = state.api_for(&session);
    let manager = KeyManager::load(&api).await.reveal(&api, &form).await;
    let mut page = GenerateKeysPage::new(session.display_email(), &manager);
    if manager.revealed_private_key().is_none() {
        page.status.invalid = "password";
    }
    render_template(page)
}

pub async fn public_keys(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Response {
    let keys = load_public_keys(&state.api_for(&session)).await;
    render_template(PublicKeysPage::new(session.display_email(), &keys))
}
