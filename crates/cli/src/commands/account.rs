//! Per-user commands.
//!
//! These read rows protected by row-level access policy, so they need the
//! user's access token.

use secrecy::SecretString;
use tracing::{info, warn};

use discover_zimbabwe_client::ClientState;
use discover_zimbabwe_client::db::{CartRepository, NotificationRepository};
use discover_zimbabwe_client::error::DataError;
use discover_zimbabwe_client::session::AuthGrant;
use discover_zimbabwe_core::{CurrencyCode, Price, UserId};

/// Establish the session for `user` when a token was supplied.
pub async fn sign_in(state: &ClientState, user: UserId, token: Option<SecretString>) {
    match token {
        Some(access_token) => {
            state
                .session()
                .establish(
                    state.store(),
                    AuthGrant {
                        user_id: user,
                        email: None,
                        access_token,
                    },
                )
                .await;
        }
        None => {
            warn!("No access token supplied; requests use the anon key and may return nothing");
            state.session().resolve_anonymous();
        }
    }
}

/// Print a user's cart with line totals.
///
/// # Errors
///
/// Returns `DataError` if the backend call fails.
pub async fn cart(state: &ClientState, user: UserId) -> Result<(), DataError> {
    let items = CartRepository::new(state.store()).user_cart(user).await?;

    if items.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    let mut total = Some(Price::zero(CurrencyCode::USD));
    for item in &items {
        let line = item.line_total(CurrencyCode::USD);
        total = total.zip(line).and_then(|(total, line)| total.checked_add(line));
        let date = item
            .preferred_date
            .map_or_else(String::new, |d| format!(" on {d}"));
        let line = line.map_or_else(|| "out of range".to_string(), |line| line.to_string());
        info!("  {} x{}{date}: {line}", item.title(), item.quantity_or_one());
    }
    match total {
        Some(total) => info!("Total: {total}"),
        None => warn!("Total: out of range"),
    }
    Ok(())
}

/// Print a user's notifications, or only the unread count.
///
/// # Errors
///
/// Returns `DataError` if the backend call fails.
pub async fn notifications(state: &ClientState, user: UserId, unread: bool) -> Result<(), DataError> {
    let repo = NotificationRepository::new(state.store());

    if unread {
        let count = repo.unread_count(user).await?;
        info!("{count} unread notifications");
        return Ok(());
    }

    let notifications = repo.for_user(user).await?;
    info!("{} notifications:", notifications.len());
    for notification in &notifications {
        let marker = if notification.is_read { " " } else { "*" };
        info!(
            "{marker} {} - {}",
            notification.title.as_deref().unwrap_or("(untitled)"),
            notification.description.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}
