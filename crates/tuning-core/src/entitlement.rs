//! Entitlement store abstraction and the fail-closed client over it.
//!
//! A store implementation reports failures honestly through
//! [`EntitlementError`]. [`EntitlementClient`] is the only thing the
//! conversation engine talks to; it bounds every call with a timeout and
//! converts failures into safe defaults:
//!
//! - `check` fails closed: any failure means "not entitled".
//! - `register` fails silent: any failure is logged and dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::EntitlementError;
use crate::event::UserIdentity;

/// Remote store holding one "premium unlocked" flag per user.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// Returns whether `user` is currently entitled.
    async fn lookup(&self, user: &UserIdentity) -> Result<bool, EntitlementError>;

    /// Marks `user` as entitled. `keyword` is the phrase that unlocked it.
    async fn register(
        &self,
        user: &UserIdentity,
        keyword: Option<&str>,
    ) -> Result<(), EntitlementError>;
}

/// Timeout-bounded, failure-absorbing front for an [`EntitlementStore`].
#[derive(Clone)]
pub struct EntitlementClient {
    store: Arc<dyn EntitlementStore>,
    timeout: Duration,
}

impl EntitlementClient {
    /// Wraps `store`, bounding each call by `timeout`.
    #[must_use]
    pub fn new(store: Arc<dyn EntitlementStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Returns whether `user` is entitled, or `false` if the store could
    /// not answer.
    pub async fn check(&self, user: &UserIdentity) -> bool {
        match self.bounded(self.store.lookup(user)).await {
            Ok(entitled) => {
                debug!(user = %user, entitled, "entitlement lookup");
                entitled
            }
            Err(err) => {
                warn!(user = %user, error = %err, "entitlement lookup failed, treating as free tier");
                false
            }
        }
    }

    /// Asks the store to entitle `user`. Failures are logged, never returned.
    pub async fn register(&self, user: &UserIdentity, keyword: Option<&str>) {
        match self.bounded(self.store.register(user, keyword)).await {
            Ok(()) => debug!(user = %user, "entitlement registered"),
            Err(err) => warn!(user = %user, error = %err, "entitlement registration failed"),
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, EntitlementError>>,
    ) -> Result<T, EntitlementError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| EntitlementError::Timeout(self.timeout))?
    }
}

impl std::fmt::Debug for EntitlementClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntitlementClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
