//! `EntitlementStore` implementation over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use tuning_core::entitlement::EntitlementStore;
use tuning_core::error::EntitlementError;
use tuning_core::event::UserIdentity;

use crate::response::parse_lookup_body;

/// Connection settings for the entitlement backend.
#[derive(Debug, Clone)]
pub struct HttpEntitlementConfig {
    /// Endpoint serving both lookup (GET) and registration (POST).
    pub endpoint: String,
    /// Name of the query parameter and body field carrying the user id.
    pub id_field: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpEntitlementConfig {
    /// Settings for `endpoint` with the default `user_id` field and a five
    /// second timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            id_field: "user_id".to_owned(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Entitlement backend reached over HTTP.
///
/// - lookup: `GET {endpoint}?{id_field}={user}`
/// - register: `POST {endpoint}` with `{"{id_field}": user, "keyword": ...}`
#[derive(Debug, Clone)]
pub struct HttpEntitlementStore {
    client: reqwest::Client,
    config: HttpEntitlementConfig,
}

impl HttpEntitlementStore {
    /// Builds a store with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns `EntitlementError::Transport` if the HTTP client cannot be
    /// constructed.
    pub fn new(config: HttpEntitlementConfig) -> Result<Self, EntitlementError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tuning-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EntitlementError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn map_error(&self, err: &reqwest::Error) -> EntitlementError {
        if err.is_timeout() {
            EntitlementError::Timeout(self.config.timeout)
        } else {
            EntitlementError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl EntitlementStore for HttpEntitlementStore {
    #[instrument(skip_all, fields(user = %user))]
    async fn lookup(&self, user: &UserIdentity) -> Result<bool, EntitlementError> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[(self.config.id_field.as_str(), user.as_str())])
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EntitlementError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.map_error(&e))?;
        debug!(body_len = body.len(), "entitlement lookup response");
        parse_lookup_body(&body)
    }

    #[instrument(skip_all, fields(user = %user))]
    async fn register(
        &self,
        user: &UserIdentity,
        keyword: Option<&str>,
    ) -> Result<(), EntitlementError> {
        let mut payload = Map::new();
        payload.insert(
            self.config.id_field.clone(),
            Value::String(user.as_str().to_owned()),
        );
        if let Some(keyword) = keyword {
            payload.insert("keyword".to_owned(), Value::String(keyword.to_owned()));
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&Value::Object(payload))
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EntitlementError::Status(status.as_u16()));
        }
        Ok(())
    }
}
