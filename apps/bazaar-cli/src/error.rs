//! # App Error Type
//!
//! Unified error type for store operations and commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bazaar                                 │
//! │                                                                         │
//! │  Command Function → Result<T, AppError>                                │
//! │         │                                                               │
//! │         ├── ValidationError ─── VALIDATION_ERROR ──┐                    │
//! │         ├── CoreError ───────── NOT_FOUND / ... ───┤                    │
//! │         ├── StoreError ──────── STORAGE_ERROR ─────┼──► AppError        │
//! │         ├── ClientError ─────── NETWORK_ERROR ─────┤    {code, message, │
//! │         └── Stores registry ─── STORE_NOT_INIT ────┘     navigation?}   │
//! │                                                                         │
//! │  The presentation layer switches on `code` and follows `navigation`    │
//! │  when present (NOT_FOUND → /not-found, UNAUTHENTICATED → /login).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::error;

use bazaar_api::ClientError;
use bazaar_core::{CoreError, Navigation, ValidationError};
use bazaar_store::StoreError;

/// Shown when the remote API rejects a login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password. Please try again.";

/// Error returned from store operations and commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42",
///   "navigation": "not_found"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Where the presentation layer should go, if anywhere
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource or route parameter not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Remote API rejected the credentials
    InvalidCredentials,

    /// Command needs a logged-in session
    Unauthenticated,

    /// Store looked up before it was registered
    StoreNotInitialized,

    /// Durable storage failed
    StorageError,

    /// Remote API unreachable or misbehaving
    NetworkError,

    /// Internal error
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
            navigation: None,
        }
    }

    /// Attaches a navigation target.
    pub fn navigate_to(mut self, navigation: Navigation) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Not found; the presentation layer should show the not-found view.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
            .navigate_to(Navigation::NotFound)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_credentials() -> Self {
        AppError::new(ErrorCode::InvalidCredentials, INVALID_CREDENTIALS_MESSAGE)
    }

    pub fn unauthenticated() -> Self {
        AppError::new(ErrorCode::Unauthenticated, "Please log in to continue")
            .navigate_to(Navigation::Login)
    }

    pub fn store_not_initialized(store: &str) -> Self {
        AppError::new(
            ErrorCode::StoreNotInitialized,
            format!("{} store is not initialized", store),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", id),
            CoreError::CartRecordNotFound(id) => {
                AppError::new(ErrorCode::NotFound, format!("Cart record not found: {}", id))
            }
            CoreError::CorruptRecord { key, reason } => {
                error!(key = %key, reason = %reason, "Corrupted record");
                AppError::new(ErrorCode::StorageError, format!("Stored {} is corrupted", key))
            }
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(_) => {
                AppError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            StoreError::MigrationFailed(_) => {
                AppError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            StoreError::PoolExhausted => {
                AppError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            StoreError::QueryFailed(e) | StoreError::Internal(e) => {
                // Log the actual error but return a generic message
                error!("Storage operation failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        if err.status() == Some(404) {
            AppError::new(ErrorCode::NotFound, err.to_string())
        } else if err.is_config_error() {
            AppError::internal(err.to_string())
        } else {
            AppError::new(ErrorCode::NetworkError, err.to_string())
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
