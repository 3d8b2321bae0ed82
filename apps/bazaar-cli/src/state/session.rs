//! # Session State
//!
//! Owns the authenticated user and keeps it in sync with durable storage.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   startup ──► restore() ──┬── token + user parse ──► LoggedIn          │
//! │                           ├── user corrupted ──────► keys removed,     │
//! │                           │                          LoggedOut         │
//! │                           └── anything missing ────► LoggedOut         │
//! │                                                                         │
//! │   LoggedOut ──login()──► POST /auth/login ──► GET /users/{id}          │
//! │                              │                    │                     │
//! │                        401 → INVALID_CREDENTIALS  │ (failure falls      │
//! │                              (state unchanged)    │  back to typed      │
//! │                                                   ▼  username)          │
//! │                                   persist token + user ──► LoggedIn     │
//! │                                                                         │
//! │   LoggedIn ──logout()──► remove token ──► LoggedOut ──► remove user    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! `current_user()` is `Some` iff both the `token` and `user` keys exist in
//! storage. Writes happen under the session lock so readers never observe
//! memory and storage disagreeing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use bazaar_api::{token_subject, ApiClient, ErrorKind};
use bazaar_core::validation::validate_credentials;
use bazaar_core::{Navigation, UserId, UserSession, TOKEN_KEY, USER_KEY};
use bazaar_store::Storage;

use crate::error::{AppError, AppResult};

/// The session store.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    api: ApiClient,
    profile_user_id: UserId,
    user: RwLock<Option<UserSession>>,
    ready: AtomicBool,
}

impl SessionStore {
    /// Creates a logged-out store. Call [`SessionStore::restore`] before use.
    pub fn new(storage: Arc<dyn Storage>, api: ApiClient, profile_user_id: UserId) -> Self {
        SessionStore {
            storage,
            api,
            profile_user_id,
            user: RwLock::new(None),
            ready: AtomicBool::new(false),
        }
    }

    /// Rehydrates the session from storage.
    ///
    /// A stored user that does not parse is treated as corrupted: both keys
    /// are removed and the store comes up logged out. That is not an error.
    pub async fn restore(&self) -> AppResult<()> {
        let mut user = self.user.write().await;

        let token = self.storage.get(TOKEN_KEY).await?;
        let stored_user = self.storage.get(USER_KEY).await?;

        *user = match (token, stored_user) {
            (Some(_), Some(json)) => match serde_json::from_str::<UserSession>(&json) {
                Ok(session) => {
                    info!(username = %session.username, "Session restored");
                    Some(session)
                }
                Err(e) => {
                    warn!(error = %e, "Stored user is corrupted, logging out");
                    self.storage.remove(TOKEN_KEY).await?;
                    self.storage.remove(USER_KEY).await?;
                    None
                }
            },
            _ => {
                debug!("No stored session");
                None
            }
        };

        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    /// True once [`SessionStore::restore`] has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Logs in against the remote API and persists the session.
    ///
    /// ## Steps
    /// 1. Reject blank credentials
    /// 2. POST `/auth/login`; a 4xx answer is `INVALID_CREDENTIALS`
    /// 3. Pick the profile id from the token's `sub` claim, else the
    ///    configured default
    /// 4. GET `/users/{id}`; any failure falls back to the typed username
    /// 5. Persist `token` and `user`, then update memory
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Navigation> {
        let credentials = validate_credentials(username, password)?;
        debug!(username = %credentials.username, "Logging in");

        let token = match self.api.login(&credentials).await {
            Ok(token) => token,
            Err(e) if is_rejection(e.kind(), e.status()) => {
                info!(username = %credentials.username, "Login rejected");
                return Err(AppError::invalid_credentials());
            }
            Err(e) => return Err(e.into()),
        };

        let user_id = token_subject(&token).unwrap_or(self.profile_user_id);
        let profile = match self.api.get_user(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id, error = %e, "Profile fetch failed, using typed username");
                None
            }
        };

        let session = UserSession::from_profile(profile.as_ref(), &credentials.username, token);
        let user_json =
            serde_json::to_string(&session).map_err(|e| AppError::internal(e.to_string()))?;

        let mut user = self.user.write().await;
        self.storage.set(TOKEN_KEY, &session.token).await?;
        if let Err(e) = self.storage.set(USER_KEY, &user_json).await {
            // No token without a user.
            if let Err(rollback) = self.storage.remove(TOKEN_KEY).await {
                error!(error = %rollback, "Failed to roll back token after user write failed");
            }
            return Err(e.into());
        }

        info!(username = %session.username, "Logged in");
        *user = Some(session);
        Ok(Navigation::Profile)
    }

    /// Removes the persisted session, then clears memory.
    ///
    /// If the token cannot be removed the session stays logged in, matching
    /// what the next [`SessionStore::restore`] would see.
    pub async fn logout(&self) -> AppResult<Navigation> {
        let mut user = self.user.write().await;
        self.storage.remove(TOKEN_KEY).await?;
        // Without a token the stored user no longer restores.
        *user = None;
        self.storage.remove(USER_KEY).await?;

        info!("Logged out");
        Ok(Navigation::Login)
    }

    /// Snapshot of the current user.
    pub async fn current_user(&self) -> Option<UserSession> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// The current user, or `UNAUTHENTICATED` pointing at the login view.
    pub async fn require_user(&self) -> AppResult<UserSession> {
        self.current_user()
            .await
            .ok_or_else(AppError::unauthenticated)
    }

    /// Remote user id for the current session.
    pub async fn user_id(&self) -> Option<UserId> {
        self.user
            .read()
            .await
            .as_ref()
            .map(|s| token_subject(&s.token).unwrap_or(self.profile_user_id))
    }
}

fn is_rejection(kind: ErrorKind, status: Option<u16>) -> bool {
    kind == ErrorKind::Status && matches!(status, Some(400..=499))
}

// =============================================================================
// Unit Tests
// =============================================================================
