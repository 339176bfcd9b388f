//! Explicit session capability.
//!
//! A [`SessionManager`] is created once at startup in the resolving state and
//! handed to whoever needs it. It publishes two channels:
//!
//! - the [`SessionState`], read by the access gate through [`SessionView`]
//! - the bearer token, read by [`RestStore`](crate::store::RestStore) on
//!   every request
//!
//! Lifecycle: `new` (resolving) -> `establish` or `resolve_anonymous` ->
//! `refresh_token`* -> `sign_out`.

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::instrument;

use discover_zimbabwe_core::UserId;

use crate::db::RoleRepository;
use crate::gate::SessionView;
use crate::store::RemoteStore;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: Option<String>,
    pub is_admin: bool,
}

/// Current session state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Startup: the authentication service has not answered yet.
    #[default]
    Resolving,
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl SessionState {
    #[must_use]
    pub const fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Resolving | Self::Anonymous => None,
        }
    }

    #[must_use]
    pub const fn view(&self) -> SessionView {
        match self {
            Self::Resolving => SessionView::resolving(),
            Self::Anonymous => SessionView::anonymous(),
            Self::Authenticated(user) => SessionView::signed_in(user.user_id, user.is_admin),
        }
    }
}

/// What the authentication service hands over after a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub user_id: UserId,
    pub email: Option<String>,
    pub access_token: SecretString,
}

/// Owner of the session state and bearer token.
#[derive(Debug)]
pub struct SessionManager {
    state: watch::Sender<SessionState>,
    token: watch::Sender<Option<SecretString>>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Create a manager in the resolving state with no token.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Resolving);
        let (token, _) = watch::channel(None);
        Self { state, token }
    }

    /// Watch session state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Watch the bearer token. Pass this to the REST store.
    #[must_use]
    pub fn token_receiver(&self) -> watch::Receiver<Option<SecretString>> {
        self.token.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Current gate view.
    #[must_use]
    pub fn view(&self) -> SessionView {
        self.state.borrow().view()
    }

    /// Publish a signed-in session, resolving admin privilege from the
    /// `user_roles` table with the new token already in place.
    ///
    /// If the role lookup fails the user is treated as non-admin.
    #[instrument(skip(self, store, grant), fields(user_id = %grant.user_id))]
    pub async fn establish<S: RemoteStore>(&self, store: &S, grant: AuthGrant) -> SessionState {
        self.token.send_replace(Some(grant.access_token));

        let is_admin = match RoleRepository::new(store).is_admin(grant.user_id).await {
            Ok(is_admin) => is_admin,
            Err(e) => {
                tracing::warn!(error = %e, "Role lookup failed, continuing without admin privilege");
                false
            }
        };

        let state = SessionState::Authenticated(AuthenticatedUser {
            user_id: grant.user_id,
            email: grant.email,
            is_admin,
        });
        self.state.send_replace(state.clone());
        tracing::info!(is_admin, "Session established");
        state
    }

    /// Startup found no stored session.
    pub fn resolve_anonymous(&self) {
        self.token.send_replace(None);
        self.state.send_replace(SessionState::Anonymous);
    }

    /// Swap the bearer token after the authentication service refreshed it.
    ///
    /// Returns `false` (and changes nothing) when nobody is signed in.
    pub fn refresh_token(&self, token: SecretString) -> bool {
        if self.state.borrow().user().is_none() {
            tracing::warn!("Ignoring token refresh without a signed-in user");
            return false;
        }
        self.token.send_replace(Some(token));
        tracing::debug!("Session token refreshed");
        true
    }

    /// Tear down the session.
    pub fn sign_out(&self) {
        self.token.send_replace(None);
        self.state.send_replace(SessionState::Anonymous);
        tracing::info!("Signed out");
    }
}
