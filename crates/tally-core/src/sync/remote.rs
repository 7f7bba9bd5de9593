//! Remote mirror of the state document.
//!
//! The remote is an opaque key-value HTTP resource holding one JSON
//! document per account. Every failure mode -- no identity, network
//! error, non-2xx -- degrades to `None`/`false` and is logged for
//! diagnostics only. Nothing here is ever fatal to local operation.

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::progress::ProgressState;

use super::identity::TokenProvider;

/// Client for the `/state` resource.
pub struct RemoteStore {
    base_url: String,
    http: Client,
    tokens: Box<dyn TokenProvider>,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, tokens: Box<dyn TokenProvider>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
            tokens,
        }
    }

    /// Whether an identity is currently established.
    pub fn has_identity(&self) -> bool {
        self.tokens.token().is_some()
    }

    fn state_url(&self) -> String {
        format!("{}/state", self.base_url)
    }

    /// Fetch the remote document. Absent document and missing identity
    /// both resolve to `None`, never an error.
    pub async fn get(&self) -> Option<ProgressState> {
        let token = self.tokens.token()?;
        let resp = match self
            .http
            .get(self.state_url())
            .bearer_auth(&token)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "remote state fetch failed");
                return None;
            }
        };

        match resp.status() {
            StatusCode::NOT_FOUND => {
                debug!("no remote state document yet");
                None
            }
            status if status.is_success() => match resp.json::<ProgressState>().await {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!(error = %e, "remote state document failed to decode");
                    None
                }
            },
            status => {
                warn!(%status, "remote state fetch returned failure");
                None
            }
        }
    }

    /// Push the full document. Best-effort: `false` on any failure.
    pub async fn put(&self, state: &ProgressState) -> bool {
        let Some(token) = self.tokens.token() else {
            debug!("skipping remote put: no identity");
            return false;
        };
        match self
            .http
            .put(self.state_url())
            .bearer_auth(&token)
            .json(state)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(status = %resp.status(), "remote state put rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "remote state put failed");
                false
            }
        }
    }

    /// Delete the remote document. Best-effort.
    pub async fn delete(&self) -> bool {
        let Some(token) = self.tokens.token() else {
            return false;
        };
        match self
            .http
            .delete(self.state_url())
            .bearer_auth(&token)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                warn!(status = %resp.status(), "remote state delete rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "remote state delete failed");
                false
            }
        }
    }
}
