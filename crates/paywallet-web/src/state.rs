//! Shared application state, read-only after startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use paywallet_core::{ApiClient, Config, Session, TokenVerifier};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub verifier: Arc<TokenVerifier>,
    api: ApiClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api_base_url).context("Failed to build API client")?;
        let verifier = TokenVerifier::new(&config.jwt_secret);
        Ok(Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            api,
        })
    }

    /// Client without credentials, for the sign-in and sign-up calls
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Client carrying the session's bearer token when there is one.
    pub fn api_for(&self, session: &Session) -> ApiClient {
        match session.token() {
            Some(token) => self.api.with_token(token),
            None => self.api.clone(),
        }
    }
}
