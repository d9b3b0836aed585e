//! Test entitlement stores — mock `EntitlementStore` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use tuning_core::entitlement::EntitlementStore;
use tuning_core::error::EntitlementError;
use tuning_core::event::UserIdentity;

/// An entitlement store that records every call. Lookups answer with the
/// configured flag, or fail if constructed with [`failing`]; registrations
/// succeed unless failing.
///
/// [`failing`]: RecordingEntitlementStore::failing
#[derive(Debug)]
pub struct RecordingEntitlementStore {
    entitled: bool,
    fail: bool,
    lookups: Mutex<Vec<UserIdentity>>,
    registrations: Mutex<Vec<(UserIdentity, Option<String>)>>,
}

impl RecordingEntitlementStore {
    /// A store that answers every lookup with `entitled`.
    #[must_use]
    pub fn new(entitled: bool) -> Self {
        Self {
            entitled,
            fail: false,
            lookups: Mutex::new(Vec::new()),
            registrations: Mutex::new(Vec::new()),
        }
    }

    /// A store that records calls but fails every one of them.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(true)
        }
    }

    /// Users looked up so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn lookups(&self) -> Vec<UserIdentity> {
        self.lookups.lock().unwrap().clone()
    }

    /// Registrations so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn registrations(&self) -> Vec<(UserIdentity, Option<String>)> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntitlementStore for RecordingEntitlementStore {
    async fn lookup(&self, user: &UserIdentity) -> Result<bool, EntitlementError> {
        self.lookups.lock().unwrap().push(user.clone());
        if self.fail {
            return Err(EntitlementError::Transport("connection refused".into()));
        }
        Ok(self.entitled)
    }

    async fn register(
        &self,
        user: &UserIdentity,
        keyword: Option<&str>,
    ) -> Result<(), EntitlementError> {
        self.registrations
            .lock()
            .unwrap()
            .push((user.clone(), keyword.map(str::to_owned)));
        if self.fail {
            return Err(EntitlementError::Transport("connection refused".into()));
        }
        Ok(())
    }
}

/// An entitlement store that always returns a transport error. Useful for
/// testing the fail-closed path.
#[derive(Debug)]
pub struct FailingEntitlementStore;

#[async_trait]
impl EntitlementStore for FailingEntitlementStore {
    async fn lookup(&self, _user: &UserIdentity) -> Result<bool, EntitlementError> {
        Err(EntitlementError::Transport("connection refused".into()))
    }

    async fn register(
        &self,
        _user: &UserIdentity,
        _keyword: Option<&str>,
    ) -> Result<(), EntitlementError> {
        Err(EntitlementError::Transport("connection refused".into()))
    }
}
