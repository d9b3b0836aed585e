//! Environment configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tuning_conversation::application::dispatcher::ConversationSettings;
use tuning_entitlement::HttpEntitlementConfig;

use crate::error::AppError;
use crate::line::client::DEFAULT_API_BASE_URL;

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Secret used to verify webhook signatures.
    pub channel_secret: String,
    /// Bearer token for the reply API.
    pub channel_access_token: String,
    /// Reply API base URL.
    pub line_api_base_url: String,
    /// Entitlement backend settings.
    pub entitlement: HttpEntitlementConfig,
    /// Path of the episode catalog file.
    pub catalog_path: PathBuf,
    /// Conversation engine settings.
    pub conversation: ConversationSettings,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first missing or invalid
    /// variable.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first missing or invalid
    /// variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let channel_secret = required(&var, "CHANNEL_SECRET")?;
        let channel_access_token = required(&var, "CHANNEL_ACCESS_TOKEN")?;
        let endpoint = var("ENTITLEMENT_URL")
            .or_else(|| var("GAS_URL"))
            .ok_or_else(|| AppError::Config("ENTITLEMENT_URL must be set".to_owned()))?;

        let defaults = ConversationSettings::default();
        let conversation = ConversationSettings {
            unlock_phrase: var("UNLOCK_PHRASE").unwrap_or(defaults.unlock_phrase),
            free_threshold: parsed(&var, "FREE_EPISODES")?.unwrap_or(defaults.free_threshold),
            max_episode: parsed(&var, "MAX_EPISODE")?,
            upsell_url: var("UPSELL_URL").unwrap_or(defaults.upsell_url),
        };

        let mut entitlement = HttpEntitlementConfig::new(endpoint);
        if let Some(id_field) = var("ENTITLEMENT_ID_FIELD") {
            entitlement.id_field = id_field;
        }
        if let Some(secs) = parsed::<u64>(&var, "ENTITLEMENT_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(AppError::Config(
                    "ENTITLEMENT_TIMEOUT_SECS must be positive".to_owned(),
                ));
            }
            entitlement.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parsed(&var, "PORT")?.unwrap_or(10000),
            channel_secret,
            channel_access_token,
            line_api_base_url: var("LINE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned()),
            entitlement,
            catalog_path: var("CATALOG_PATH")
                .map_or_else(|| PathBuf::from("episodes.json"), PathBuf::from),
            conversation,
        })
    }
}

fn required(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, AppError> {
    var(key).ok_or_else(|| AppError::Config(format!("{key} environment variable must be set")))
}

fn parsed<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
        })
        .transpose()
}
