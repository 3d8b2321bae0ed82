//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bazaar-store errors (separate crate)                                  │
//! │  └── StoreError       - Persistent storage failures                    │
//! │                                                                         │
//! │  bazaar-api errors (separate crate)                                    │
//! │  └── ClientError      - Remote API failures                            │
//! │                                                                         │
//! │  App errors (apps/bazaar-cli)                                          │
//! │  └── AppError         - What the presentation layer sees               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │        StoreError ──────────────────┼──► AppError → Presentation       │
//! │        ClientError ─────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{CartRecordId, ProductId};

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    ///
    /// ## When This Occurs
    /// - Remote API has no product with this id
    /// - Remote API answered with an empty body
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No displayed bag row belongs to the remote cart record.
    #[error("Cart record not found: {0}")]
    CartRecordNotFound(CartRecordId),

    /// A persisted record could not be decoded.
    ///
    /// ## When This Occurs
    /// - Stored JSON was truncated by an abrupt termination
    /// - Stored value was written by an incompatible format
    #[error("Corrupted record '{key}': {reason}")]
    CorruptRecord { key: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a CorruptRecord error for a storage key.
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        CoreError::CorruptRecord {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric product id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
