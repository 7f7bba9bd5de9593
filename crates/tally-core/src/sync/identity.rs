//! Identity collaborator: session tokens for the remote mirror.
//!
//! The provider itself is opaque -- sign-in is a single HTTP exchange
//! that yields a bearer token, persisted in the OS keyring. A missing
//! token is never an error; the app silently runs local-only.

use reqwest::Client;
use serde::Deserialize;

use crate::error::AuthError;

/// Source of the current bearer token, if any.
pub trait TokenProvider: Send + Sync {
    /// `None` when there is no session. Failures degrade to `None`.
    fn token(&self) -> Option<String>;
}

/// Keyring-backed token source used by the running app.
pub struct KeyringTokens;

impl TokenProvider for KeyringTokens {
    fn token(&self) -> Option<String> {
        keyring_store::get("session").ok().flatten()
    }
}

/// Fixed token source for tests and tooling.
pub struct StaticTokens(pub Option<String>);

impl TokenProvider for StaticTokens {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Deserialize)]
struct SignInResponse {
    token: String,
}

/// Client for the identity provider's HTTP contract.
pub struct IdentityClient {
    base_url: String,
    http: Client,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// Exchange credentials for a session token and persist it.
    ///
    /// Bad credentials surface as a descriptive error for display; they
    /// never affect local progression state.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let url = format!("{}/auth/sign-in", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::NotVerified);
        }
        if !resp.status().is_success() {
            return Err(AuthError::SignInFailed(format!(
                "provider returned {}",
                resp.status()
            )));
        }

        let body: SignInResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::SignInFailed(e.to_string()))?;
        keyring_store::set("session", &body.token)
            .map_err(|e| AuthError::CredentialStore(e.to_string()))?;
        Ok(())
    }

    /// Drop the stored session. Local state is untouched.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        keyring_store::delete("session").map_err(|e| AuthError::CredentialStore(e.to_string()))
    }

    /// Whether a session token is currently stored.
    pub fn is_signed_in(&self) -> bool {
        KeyringTokens.token().is_some()
    }
}

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "tally";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_tokens_provide_or_withhold() {
        assert_eq!(StaticTokens(None).token(), None);
        assert_eq!(
            StaticTokens(Some("tok".into())).token(),
            Some("tok".to_string())
        );
    }

    #[tokio::test]
    async fn sign_in_rejects_bad_credentials() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/sign-in")
            .with_status(401)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let err = client.sign_in("a@b.c", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::SignInFailed(_)));
    }

    #[tokio::test]
    async fn sign_in_surfaces_unverified_account() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("POST", "/auth/sign-in")
            .with_status(403)
            .create_async()
            .await;

        let client = IdentityClient::new(server.url());
        let err = client.sign_in("a@b.c", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::NotVerified));
    }
}
