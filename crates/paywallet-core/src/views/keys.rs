//! Key management: load, generate once, reveal the private key behind a
//! password re-check.

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::models::{KeyPair, PublicKeyEntry};
use crate::validation::PasswordForm;

use super::Feedback;

const GENERATE_FALLBACK: &str = "An unexpected error occurred during key generation.";
const VERIFY_FALLBACK: &str = "An error occurred while verifying password.";

/// State of the key generation page for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyManager {
    keys: Option<KeyPair>,
    revealed: bool,
    pub feedback: Option<Feedback>,
}

impl KeyManager {
    pub fn public_key(&self) -> Option<&str> {
        self.keys.as_ref().map(|k| k.public_key.as_str())
    }

    pub fn has_keys(&self) -> bool {
        self.keys.is_some()
    }

    /// The private key, only once the password check has passed
    pub fn revealed_private_key(&self) -> Option<&str> {
        if self.revealed {
            self.keys.as_ref().map(|k| k.private_key.as_str())
        } else {
            None
        }
    }

    /// Generation is offered only while the user has no keys.
    pub fn can_generate(&self) -> bool {
        !self.has_keys()
    }

    /// Fetch existing keys. A failed fetch shows the empty state.
    pub async fn load(api: &ApiClient) -> Self {
        match api.fetch_keys().await {
            Ok(keys) => Self {
                keys,
                ..Self::default()
            },
            Err(e) => {
                warn!(error = %e, "Failed to fetch user keys");
                Self::default()
            }
        }
    }

    /// Generate a key pair unless one already exists.
    pub async fn generate(mut self, api: &ApiClient, password: &str) -> Self {
        if self.has_keys() {
            self.feedback = Some(Feedback::Error(
                "You already have keys. Existing keys must be removed before generating new ones."
                    .to_string(),
            ));
            return self;
        }

        match api.generate_keys(password).await {
            Ok((keys, message)) => {
                info!("Generated new key pair");
                self.keys = Some(keys);
                self.revealed = false;
                self.feedback = Some(Feedback::Success(
                    message.unwrap_or_else(|| "New keys generated successfully!".to_string()),
                ));
            }
            Err(e) => {
                warn!(error = %e, "Key generation failed");
                self.feedback = Some(Feedback::Error(e.user_message(GENERATE_FALLBACK)));
            }
        }
        self
    }

    /// Re-check the account password and reveal the private key on success.
    pub async fn reveal(mut self, api: &ApiClient, form: &PasswordForm) -> Self {
        self.revealed = false;
        if !self.has_keys() {
            self.feedback = Some(Feedback::Error("No keys found.".to_string()));
            return self;
        }
        let password = match form.validate_for_reveal() {
            Ok(p) => p,
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.message.to_string()));
                return self;
            }
        };

        match api.check_password(password).await {
            Ok(true) => {
                self.revealed = true;
                self.feedback = Some(Feedback::Success(
                    "Password verified. Private key revealed.".to_string(),
                ));
            }
            Ok(false) => {
                self.feedback = Some(Feedback::Error(
                    "Incorrect password. Private key remains hidden.".to_string(),
                ));
            }
            Err(e) => {
                warn!(error = %e, "Password check failed");
                self.feedback = Some(Feedback::Error(e.user_message(VERIFY_FALLBACK)));
            }
        }
        self
    }
}

/// Load the public key directory; failure shows an empty list.
pub async fn load_public_keys(api: &ApiClient) -> Vec<PublicKeyEntry> {
    match api.fetch_public_keys().await {
        Ok(keys) => keys,
        Err(e) => {
            warn!(error = %e, "Failed to fetch public keys");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const KEYS_BODY: &str = r#"{"data":{"publicKey":"0xPUB","privateKey":"0xPRIV"}}"#;

    #[tokio::test]
    async fn test_load_without_keys_offers_generation() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/keys/get-keys")
            .with_status(404)
            .create_async()
            .await;

        let api = ApiClient::new(&server.url()).unwrap().with_token("t");
        let manager = KeyManager::load(&api).await;
        assert!(manager.can_generate());
        assert_eq!(manager.public_key(), None);
    }

    #[tokio::test]
    async fn test_generate_refused_when_keys_exist() {
        let mut server = Server::new_async().await;
        let _get = server
            .mock("GET", "/api/keys/get-keys")
            .with_status(200)
            .with_body(KEYS_BODY)
            .create_async()
            .await;
        let generate = server
            .mock("POST", "/api/keys/generate-keys")
            .expect(0)
            .create_async()
            .await;

        let api = ApiClient::new(&server.url()).unwrap().with_token("t");
        let manager = KeyManager::load(&api).await.generate(&api, "").await;

        generate.assert_async().await;
        assert!(matches!(manager.feedback, Some(Feedback::Error(_))));
        assert_eq!(manager.public_key(), Some("0xPUB"));
    }

    #[tokio::test]
    async fn test_generate_error_uses_server_message() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/keys/generate-keys")
            .with_status(400)
            .with_body(r#"{"message":"Keys already exist"}"#)
            .create_async()
            .await;

        let api = ApiClient::new(&server.url()).unwrap().with_token("t");
        let manager = KeyManager::default().generate(&api, "").await;
        assert_eq!(
            manager.feedback,
            Some(Feedback::Error("Keys already exist".to_string()))
        );
    }

    #[tokio::test]
    async fn test_reveal_requires_correct_password() {
        let mut server = Server::new_async().await;
        let _get = server
            .mock("GET", "/api/keys/get-keys")
            .with_status(200)
            .with_body(KEYS_BODY)
            .create_async()
            .await;
        let _wrong = server
            .mock("POST", "/api/user/check-password")
            .match_body(mockito::Matcher::Json(serde_json::json!({"password": "wrong"})))
            .with_status(200)
            .with_body(r#"{"data":{"isPasswordCorrect":false}}"#)
            .create_async()
            .await;
        let _right = server
            .mock("POST", "/api/user/check-password")
            .match_body(mockito::Matcher::Json(serde_json::json!({"password": "right"})))
            .with_status(200)
            .with_body(r#"{"data":{"isPasswordCorrect":true}}"#)
            .create_async()
            .await;

        let api = ApiClient::new(&server.url()).unwrap().with_token("t");
        let loaded = KeyManager::load(&api).await;

        let hidden = loaded
            .clone()
            .reveal(&api, &PasswordForm { password: "wrong".into() })
            .await;
        assert_eq!(hidden.revealed_private_key(), None);
        assert_eq!(
            hidden.feedback,
            Some(Feedback::Error("Incorrect password. Private key remains hidden.".to_string()))
        );

        let shown = loaded
            .reveal(&api, &PasswordForm { password: "right".into() })
            .await;
        assert_eq!(shown.revealed_private_key(), Some("0xPRIV"));
    }

    #[tokio::test]
    async fn test_reveal_without_password_skips_backend() {
        let mut server = Server::new_async().await;
        let check = server
            .mock("POST", "/api/user/check-password")
            .expect(0)
            .create_async()
            .await;
        let _get = server
            .mock("GET", "/api/keys/get-keys")
            .with_status(200)
            .with_body(KEYS_BODY)
            .create_async()
            .await;

        let api = ApiClient::new(&server.url()).unwrap().with_token("t");
        let manager = KeyManager::load(&api)
            .await
            .reveal(&api, &PasswordForm::default())
            .await;

        check.assert_async().await;
        assert_eq!(
            manager.feedback,
            Some(Feedback::Error("Password is required to reveal the private key.".to_string()))
        );
    }

    #[tokio::test]
    async fn test_public_keys_degrade_to_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/keys/get-public-keys")
            .with_status(503)
            .create_async()
            .await;

        let api = ApiClient::new(&server.url()).unwrap();
        assert!(load_public_keys(&api).await.is_empty());
    }
}
