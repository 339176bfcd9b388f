//! Access-control gate for navigation targets.
//!
//! The gate turns a route requirement, the current session view and the
//! requested location into one [`GateDecision`]:
//!
//! ```text
//! resolving                 -> Loading
//! anonymous                 -> RedirectToSignIn (remembers the location)
//! signed in, admin required -> RedirectToLanding + one denial notice
//! otherwise                 -> Render
//! ```

use discover_zimbabwe_core::{NoticeVariant, UserId};

use crate::config::RouteConfig;

/// What a route needs from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteRequirement {
    pub require_admin: bool,
}

impl RouteRequirement {
    /// Any signed-in user.
    #[must_use]
    pub const fn signed_in() -> Self {
        Self {
            require_admin: false,
        }
    }

    /// Administrators only.
    #[must_use]
    pub const fn admin() -> Self {
        Self {
            require_admin: true,
        }
    }
}

/// Read-only view of the session, as supplied by the session owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub user: Option<UserId>,
    pub is_admin: bool,
    pub is_loading: bool,
}

impl SessionView {
    #[must_use]
    pub const fn resolving() -> Self {
        Self {
            user: None,
            is_admin: false,
            is_loading: true,
        }
    }

    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user: None,
            is_admin: false,
            is_loading: false,
        }
    }

    #[must_use]
    pub const fn signed_in(user: UserId, is_admin: bool) -> Self {
        Self {
            user: Some(user),
            is_admin,
            is_loading: false,
        }
    }
}

/// A navigation target: path plus optional raw query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: None,
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Path and query as a relative URI.
    #[must_use]
    pub fn to_uri(&self) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.path),
            _ => self.path.clone(),
        }
    }
}

/// Outcome of evaluating a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session still resolving; show a placeholder.
    Loading,
    /// No user; send them to sign in and bring them back afterwards.
    RedirectToSignIn { to: String, return_to: Location },
    /// Signed in without the required privilege.
    RedirectToLanding { to: String },
    /// Render the requested content.
    Render,
}

impl GateDecision {
    /// Where to navigate, if anywhere. The sign-in target carries the
    /// original location as `?redirect=`.
    #[must_use]
    pub fn redirect_uri(&self) -> Option<String> {
        match self {
            Self::RedirectToSignIn { to, return_to } => Some(format!(
                "{to}?redirect={}",
                urlencoding::encode(&return_to.to_uri())
            )),
            Self::RedirectToLanding { to } => Some(to.clone()),
            Self::Loading | Self::Render => None,
        }
    }
}

/// Decide how to handle a navigation, without side effects.
#[must_use]
pub fn decide(
    requirement: RouteRequirement,
    session: &SessionView,
    location: &Location,
    routes: &RouteConfig,
) -> GateDecision {
    if session.is_loading {
        return GateDecision::Loading;
    }
    if session.user.is_none() {
        return GateDecision::RedirectToSignIn {
            to: routes.sign_in_path.clone(),
            return_to: location.clone(),
        };
    }
    if requirement.require_admin && !session.is_admin {
        return GateDecision::RedirectToLanding {
            to: routes.landing_path.clone(),
        };
    }
    GateDecision::Render
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    /// The notice shown when a signed-in user opens an admin page.
    #[must_use]
    pub fn access_denied() -> Self {
        Self {
            title: "Access denied".to_string(),
            description: "You don't have permission to access this page.".to_string(),
            variant: NoticeVariant::Destructive,
        }
    }
}

/// Sink for user-visible notices (toasts, alerts).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Stateful gate for one mounted route.
///
/// Emits the denial notice once when the decision becomes
/// [`GateDecision::RedirectToLanding`]; any other decision re-arms it.
pub struct AccessGate<N> {
    requirement: RouteRequirement,
    routes: RouteConfig,
    notifier: N,
    denied: bool,
}

impl<N: Notifier> AccessGate<N> {
    #[must_use]
    pub const fn new(requirement: RouteRequirement, routes: RouteConfig, notifier: N) -> Self {
        Self {
            requirement,
            routes,
            notifier,
            denied: false,
        }
    }

    /// Evaluate the route for the current session and location.
    pub fn evaluate(&mut self, session: &SessionView, location: &Location) -> GateDecision {
        let decision = decide(self.requirement, session, location, &self.routes);

        let denied = matches!(decision, GateDecision::RedirectToLanding { .. });
        if denied && !self.denied {
            tracing::info!(path = %location.path, "Denied non-admin access to admin route");
            self.notifier.notify(Notice::access_denied());
        }
        self.denied = denied;

        decision
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<Notice>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.borrow_mut().push(notice);
        }
    }

    fn admin_page() -> Location {
        Location::new("/admin").with_query("tab=bookings")
    }

    #[test]
    fn test_resolving_always_loads() {
        let routes = RouteConfig::default();
        for requirement in [RouteRequirement::signed_in(), RouteRequirement::admin()] {
            let decision = decide(requirement, &SessionView::resolving(), &admin_page(), &routes);
            assert_eq!(decision, GateDecision::Loading);
        }
    }

    #[test]
    fn test_anonymous_redirects_with_return_location() {
        let decision = decide(
            RouteRequirement::signed_in(),
            &SessionView::anonymous(),
            &admin_page(),
            &RouteConfig::default(),
        );
        assert_eq!(
            decision,
            GateDecision::RedirectToSignIn {
                to: "/auth".to_string(),
                return_to: admin_page(),
            }
        );
        assert_eq!(
            decision.redirect_uri().unwrap(),
            "/auth?redirect=%2Fadmin%3Ftab%3Dbookings"
        );
    }

    #[test]
    fn test_admin_renders() {
        let decision = decide(
            RouteRequirement::admin(),
            &SessionView::signed_in(UserId::generate(), true),
            &admin_page(),
            &RouteConfig::default(),
        );
        assert_eq!(decision, GateDecision::Render);
        assert!(decision.redirect_uri().is_none());
    }

    #[test]
    fn test_denial_notice_fires_once_per_transition() {
        let recorder = Recorder::default();
        let mut gate = AccessGate::new(RouteRequirement::admin(), RouteConfig::default(), &recorder);
        let plain = SessionView::signed_in(UserId::generate(), false);

        assert_eq!(gate.evaluate(&SessionView::resolving(), &admin_page()), GateDecision::Loading);
        for _ in 0..3 {
            let decision = gate.evaluate(&plain, &admin_page());
            assert_eq!(decision.redirect_uri().as_deref(), Some("/"));
        }
        assert_eq!(recorder.0.borrow().len(), 1);

        // Leaving and re-entering the denied state notifies again.
        gate.evaluate(&SessionView::anonymous(), &admin_page());
        gate.evaluate(&plain, &admin_page());
        assert_eq!(recorder.0.borrow().len(), 2);
        assert_eq!(
            recorder.0.borrow().first().unwrap().variant,
            NoticeVariant::Destructive
        );
    }

    #[test]
    fn test_custom_routes() {
        let recorder = Recorder::default();
        let routes = RouteConfig {
            sign_in_path: "/login".to_string(),
            landing_path: "/explore".to_string(),
        };
        let mut gate = AccessGate::new(RouteRequirement::admin(), routes, &recorder);

        let decision = gate.evaluate(
            &SessionView::signed_in(UserId::generate(), false),
            &Location::new("/admin"),
        );
        assert_eq!(
            decision,
            GateDecision::RedirectToLanding {
                to: "/explore".to_string()
            }
        );
        assert_eq!(recorder.0.borrow().len(), 1);

        let decision = gate.evaluate(&SessionView::anonymous(), &Location::new("/admin"));
        assert_eq!(decision.redirect_uri().as_deref(), Some("/login?redirect=%2Fadmin"));
    }
}
