//! Integration tests for the session lifecycle driving the access gate.

use std::cell::RefCell;

use secrecy::SecretString;
use serde_json::json;

use discover_zimbabwe_client::config::RouteConfig;
use discover_zimbabwe_client::gate::{
    AccessGate, GateDecision, Location, Notice, Notifier, RouteRequirement,
};
use discover_zimbabwe_client::session::{AuthGrant, SessionManager, SessionState};
use discover_zimbabwe_client::store::MemoryStore;
use discover_zimbabwe_core::UserId;

#[derive(Default)]
struct Toasts(RefCell<Vec<Notice>>);

impl Notifier for Toasts {
    fn notify(&self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

fn grant(user_id: UserId) -> AuthGrant {
    AuthGrant {
        user_id,
        email: None,
        access_token: SecretString::from("access-token"),
    }
}

#[tokio::test]
async fn test_admin_route_across_session_lifecycle() {
    let admin = UserId::generate();
    let traveller = UserId::generate();
    let store = MemoryStore::new();
    store
        .seed(
            "user_roles",
            [
                json!({"user_id": admin, "role": "admin"}),
                json!({"user_id": traveller, "role": "user"}),
            ],
        )
        .await;

    let session = SessionManager::new();
    let toasts = Toasts::default();
    let mut gate = AccessGate::new(RouteRequirement::admin(), RouteConfig::default(), &toasts);
    let page = Location::new("/admin");

    assert_eq!(gate.evaluate(&session.view(), &page), GateDecision::Loading);

    session.resolve_anonymous();
    let decision = gate.evaluate(&session.view(), &page);
    assert_eq!(decision.redirect_uri().as_deref(), Some("/auth?redirect=%2Fadmin"));

    session.establish(&store, grant(traveller)).await;
    for _ in 0..2 {
        let decision = gate.evaluate(&session.view(), &page);
        assert_eq!(decision.redirect_uri().as_deref(), Some("/"));
    }
    assert_eq!(toasts.0.borrow().len(), 1);

    session.sign_out();
    assert_eq!(session.state(), SessionState::Anonymous);

    session.establish(&store, grant(admin)).await;
    assert_eq!(gate.evaluate(&session.view(), &page), GateDecision::Render);
    assert_eq!(toasts.0.borrow().len(), 1);
}

#[tokio::test]
async fn test_signed_in_route_renders_for_any_user() {
    let store = MemoryStore::new();
    let session = SessionManager::new();
    let toasts = Toasts::default();
    let mut gate = AccessGate::new(RouteRequirement::signed_in(), RouteConfig::default(), &toasts);

    session.establish(&store, grant(UserId::generate())).await;
    let decision = gate.evaluate(&session.view(), &Location::new("/itineraries"));

    assert_eq!(decision, GateDecision::Render);
    assert!(toasts.0.borrow().is_empty());
}
