//! Client state shared across commands and views.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::gate::{AccessGate, Notifier, RouteRequirement};
use crate::session::SessionManager;
use crate::store::{RestStore, RestStoreError};
use crate::tracker::ProcessTracker;

/// Everything a running client needs, wired together.
///
/// This struct is cheaply cloneable via `Arc`. The REST store reads its
/// bearer token from the session owned here.
#[derive(Clone)]
pub struct ClientState {
    inner: Arc<ClientStateInner>,
}

struct ClientStateInner {
    config: ClientConfig,
    session: SessionManager,
    store: RestStore,
    tracker: ProcessTracker,
}

impl ClientState {
    /// Create the client state; the session starts out resolving.
    ///
    /// # Errors
    ///
    /// Returns `RestStoreError` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, RestStoreError> {
        let session = SessionManager::new();
        let store = RestStore::new(&config.backend, session.token_receiver())?;
        let tracker = ProcessTracker::new(config.progress);

        Ok(Self {
            inner: Arc::new(ClientStateInner {
                config,
                session,
                store,
                tracker,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    #[must_use]
    pub fn store(&self) -> &RestStore {
        &self.inner.store
    }

    #[must_use]
    pub fn tracker(&self) -> &ProcessTracker {
        &self.inner.tracker
    }

    /// A gate for one route using the configured redirect targets.
    #[must_use]
    pub fn gate<N: Notifier>(&self, requirement: RouteRequirement, notifier: N) -> AccessGate<N> {
        AccessGate::new(requirement, self.inner.config.routes.clone(), notifier)
    }
}
