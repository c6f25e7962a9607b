//! API client for communicating with the payment wallet backend.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! API requests for accounts, keys, balances and payments.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::account::{BalanceData, NotificationsData};
use crate::models::keys::PasswordCheck;
use crate::models::{
    ApiTransaction, CardPaymentRequest, EmailCodeRequest, KeyPair, PasswordRequest,
    PaymentReceipt, PublicKeyEntry, SendPaymentRequest, SignInData, SignInRequest,
    SignUpRequest,
};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const SIGN_UP_PATH: &str = "/api/user/signup";
const SIGN_IN_PATH: &str = "/api/user/signin";
const VERIFY_EMAIL_CODE_PATH: &str = "/api/user/verify-email-code";
const VERIFY_USER_PATH: &str = "/api/verify-user";
const CHECK_PASSWORD_PATH: &str = "/api/user/check-password";
const TOTAL_BALANCE_PATH: &str = "/api/user/total-balance";
const GET_KEYS_PATH: &str = "/api/keys/get-keys";
const GENERATE_KEYS_PATH: &str = "/api/keys/generate-keys";
const PUBLIC_KEYS_PATH: &str = "/api/keys/get-public-keys";
const NOTIFICATIONS_PATH: &str = "/api/notifications/my-notifications";
const SEND_PAYMENT_PATH: &str = "/api/payments/send";
const CARD_PAYMENT_PATH: &str = "/api/payments/card";

/// Standard response wrapper used by every backend endpoint.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    fn into_data(self, what: &str) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::InvalidResponse(format!("{} response has no data", what)))
    }
}

/// API client for the wallet backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidResponse("Token is not a valid header value".into()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!(url = url, error = %e, "Failed to parse response");
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse(response, &url).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        Self::parse(response, &url).await
    }

    // ===== Account =====

    /// Register a new account. Returns the backend's confirmation message.
    pub async fn sign_up(&self, request: &SignUpRequest<'_>) -> Result<Option<String>, ApiError> {
        let envelope: Envelope<serde_json::Value> = self.post(SIGN_UP_PATH, request).await?;
        Ok(envelope.message)
    }

    /// Exchange credentials for a session token
    pub async fn sign_in(&self, request: &SignInRequest<'_>) -> Result<String, ApiError> {
        let envelope: Envelope<SignInData> = self.post(SIGN_IN_PATH, request).await?;
        Ok(envelope.into_data("Sign-in")?.token)
    }

    /// Confirm the emailed verification code for a new account
    pub async fn verify_email_code(
        &self,
        request: &EmailCodeRequest<'_>,
    ) -> Result<Option<String>, ApiError> {
        let envelope: Envelope<serde_json::Value> =
            self.post(VERIFY_EMAIL_CODE_PATH, request).await?;
        Ok(envelope.message)
    }

    /// Ask the backend whether the current token belongs to a verified user.
    /// Any successful JSON reply counts as verified; any failure does not.
    pub async fn verify_user(&self) -> bool {
        let Some(token) = self.token.as_deref() else {
            return false;
        };
        let body = serde_json::json!({ "token": token });
        match self.post::<serde_json::Value, _>(VERIFY_USER_PATH, &body).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "User verification failed");
                false
            }
        }
    }

    /// Re-check the account password before revealing sensitive data
    pub async fn check_password(&self, password: &str) -> Result<bool, ApiError> {
        let envelope: Envelope<PasswordCheck> = self
            .post(CHECK_PASSWORD_PATH, &PasswordRequest { password })
            .await?;
        Ok(envelope.data.is_some_and(|d| d.is_password_correct))
    }

    // ===== Keys =====

    /// Fetch the user's key pair. `Ok(None)` when no keys exist yet.
    pub async fn fetch_keys(&self) -> Result<Option<KeyPair>, ApiError> {
        match self.get::<KeyPair>(GET_KEYS_PATH).await {
            Ok(envelope) => Ok(envelope.data),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Generate a new key pair. Returns the keys and the backend's message.
    pub async fn generate_keys(&self, password: &str) -> Result<(KeyPair, Option<String>), ApiError> {
        let envelope: Envelope<KeyPair> = self
            .post(GENERATE_KEYS_PATH, &PasswordRequest { password })
            .await?;
        let message = envelope.message.clone();
        Ok((envelope.into_data("Key generation")?, message))
    }

    /// Fetch the public key directory (no authentication required)
    pub async fn fetch_public_keys(&self) -> Result<Vec<PublicKeyEntry>, ApiError> {
        let envelope: Envelope<Vec<PublicKeyEntry>> = self.get(PUBLIC_KEYS_PATH).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    // ===== Balance and history =====

    pub async fn fetch_total_balance(&self) -> Result<f64, ApiError> {
        let envelope: Envelope<BalanceData> = self.get(TOTAL_BALANCE_PATH).await?;
        Ok(envelope.into_data("Balance")?.total_balance)
    }

    /// Fetch the raw transaction notifications for the signed-in user
    pub async fn fetch_notifications(&self) -> Result<Vec<ApiTransaction>, ApiError> {
        let envelope: Envelope<NotificationsData> = self.get(NOTIFICATIONS_PATH).await?;
        Ok(envelope.data.unwrap_or_default().transactions)
    }

    // ===== Payments =====

    /// Send funds to another user's public key
    pub async fn send_payment(&self, request: &SendPaymentRequest<'_>) -> Result<Option<String>, ApiError> {
        let envelope: Envelope<serde_json::Value> = self.post(SEND_PAYMENT_PATH, request).await?;
        Ok(envelope.message)
    }

    /// Submit the onboarding card payment
    pub async fn submit_card_payment(
        &self,
        request: &CardPaymentRequest<'_>,
    ) -> Result<PaymentReceipt, ApiError> {
        let envelope: Envelope<PaymentReceipt> = self.post(CARD_PAYMENT_PATH, request).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_sign_in_returns_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", SIGN_IN_PATH)
            .match_body(Matcher::Json(serde_json::json!({
                "email": "ada@example.com",
                "password": "hunter22"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"token":"abc.def.ghi"},"message":"Signed in"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let token = client
            .sign_in(&SignInRequest {
                email: "ada@example.com",
                password: "hunter22",
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn test_sign_in_error_carries_server_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", SIGN_IN_PATH)
            .with_status(401)
            .with_body(r#"{"message":"Invalid email or password"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client
            .sign_in(&SignInRequest {
                email: "ada@example.com",
                password: "wrong",
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized(Some(_))));
        assert_eq!(err.user_message("Login failed"), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_bearer_token_sent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", TOTAL_BALANCE_PATH)
            .match_header("authorization", "Bearer tok-123")
            .with_status(200)
            .with_body(r#"{"data":{"totalBalance":1250.75}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("tok-123");
        let balance = client.fetch_total_balance().await.unwrap();

        mock.assert_async().await;
        assert_eq!(balance, 1250.75);
    }

    #[tokio::test]
    async fn test_fetch_keys_not_found_is_none() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", GET_KEYS_PATH)
            .with_status(404)
            .with_body(r#"{"message":"No keys found"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        assert_eq!(client.fetch_keys().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_keys_server_error_propagates() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", GET_KEYS_PATH)
            .with_status(500)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        assert!(matches!(
            client.fetch_keys().await,
            Err(ApiError::ServerError(None))
        ));
    }

    #[tokio::test]
    async fn test_generate_keys() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", GENERATE_KEYS_PATH)
            .match_body(Matcher::Json(serde_json::json!({ "password": "" })))
            .with_status(201)
            .with_body(r#"{"data":{"publicKey":"pub","privateKey":"priv"},"message":"Keys generated"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        let (keys, message) = client.generate_keys("").await.unwrap();
        assert_eq!(keys.public_key, "pub");
        assert_eq!(keys.private_key, "priv");
        assert_eq!(message.as_deref(), Some("Keys generated"));
    }

    #[tokio::test]
    async fn test_check_password() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", CHECK_PASSWORD_PATH)
            .with_status(200)
            .with_body(r#"{"data":{"isPasswordCorrect":false}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        assert!(!client.check_password("nope").await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_notifications_missing_list_is_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", NOTIFICATIONS_PATH)
            .with_status(200)
            .with_body(r#"{"data":{}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        assert!(client.fetch_notifications().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_public_keys_without_auth_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PUBLIC_KEYS_PATH)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"data":[{"_id":"1","name":"Ada","publicKey":"0xabc"}]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&format!("{}/", server.url())).unwrap();
        let keys = client.fetch_public_keys().await.unwrap();

        mock.assert_async().await;
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].public_key, "0xabc");
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TOTAL_BALANCE_PATH)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        assert!(matches!(
            client.fetch_total_balance().await,
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_verify_user_false_on_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", VERIFY_USER_PATH)
            .with_status(403)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        assert!(!client.verify_user().await);
        assert!(!client.with_token("t").verify_user().await);
    }

    #[tokio::test]
    async fn test_verify_user_accepts_reply_without_data() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", VERIFY_USER_PATH)
            .match_body(Matcher::Json(serde_json::json!({ "token": "t" })))
            .with_status(200)
            .with_body(r#"{"message":"User is verified"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        assert!(client.verify_user().await);
    }

    #[tokio::test]
    async fn test_card_payment_returns_refreshed_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", CARD_PAYMENT_PATH)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "cardNumber": "4242424242424242"
            })))
            .with_status(200)
            .with_body(r#"{"data":{"token":"new.token.value"},"message":"Payment successful"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap().with_token("t");
        let receipt = client
            .submit_card_payment(&CardPaymentRequest {
                cardholder_name: "Ada Lovelace",
                card_number: "4242424242424242",
                expiry_date: "12/29",
                cvc: "123",
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(receipt.token.as_deref(), Some("new.token.value"));
    }
}
