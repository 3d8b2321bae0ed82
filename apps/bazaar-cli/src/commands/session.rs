//! # Session Commands
//!
//! Login, logout and the current-user view.

use serde::Serialize;
use tracing::debug;

use bazaar_core::{Navigation, UserSession};

use crate::error::AppResult;
use crate::state::Stores;

/// Result of a command that moves the user to another view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub navigation: Navigation,
    pub path: &'static str,
}

impl From<Navigation> for NavigationResponse {
    fn from(navigation: Navigation) -> Self {
        NavigationResponse {
            navigation,
            path: navigation.path(),
        }
    }
}

/// Logs in and lands on the profile view.
pub async fn login(stores: &Stores, username: &str, password: &str) -> AppResult<NavigationResponse> {
    debug!(username = %username, "login command");
    let navigation = stores.session()?.login(username, password).await?;
    Ok(navigation.into())
}

/// Logs out, empties the cart and lands on the login view.
///
/// The cart is cleared even when the session could not be removed; the
/// first failure is returned.
pub async fn logout(stores: &Stores) -> AppResult<NavigationResponse> {
    debug!("logout command");
    let session = stores.session()?.logout().await;
    let cart = stores.cart()?.clear_cart().await;
    let navigation = session?;
    cart?;
    Ok(navigation.into())
}

/// The profile view.
pub async fn whoami(stores: &Stores) -> AppResult<UserSession> {
    debug!("whoami command");
    require_session(stores).await
}

/// Gate for commands that need a logged-in user.
pub(crate) async fn require_session(stores: &Stores) -> AppResult<UserSession> {
    stores.session()?.require_user().await
}
