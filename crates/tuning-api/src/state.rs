//! Shared application state.

use std::sync::Arc;

use tuning_catalog::Catalog;
use tuning_conversation::application::dispatcher::Dispatcher;

use crate::line::signature::SignatureVerifier;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Conversation engine.
    pub dispatcher: Arc<Dispatcher>,
    /// Webhook signature verifier.
    pub verifier: Arc<SignatureVerifier>,
    /// The loaded catalog, for reporting.
    pub catalog: Arc<Catalog>,
    /// SHA-256 of the catalog source.
    pub catalog_version: Arc<str>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        dispatcher: Dispatcher,
        verifier: SignatureVerifier,
        catalog: Arc<Catalog>,
        catalog_version: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            verifier: Arc::new(verifier),
            catalog,
            catalog_version: catalog_version.into(),
        }
    }
}
