//! # Validation Module
//!
//! Input validation for values that arrive from the presentation layer.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Presentation (form fields, route parameters)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Credentials are non-empty                                         │
//! │  └── Route product ids are positive integers                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote API (authoritative answer: 401, empty body, ...)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::validation::parse_product_id;
//!
//! assert_eq!(parse_product_id("12").unwrap(), 12);
//! assert!(parse_product_id("abc").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Credentials, ProductId};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates login credentials.
///
/// ## Rules
/// - Username must not be blank (surrounding whitespace is trimmed)
/// - Password must not be empty (kept verbatim)
pub fn validate_credentials(username: &str, password: &str) -> ValidationResult<Credentials> {
    let username = username.trim();
    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Parses a product id taken from a route parameter.
///
/// ## Rules
/// - Must be a base-10 unsigned integer
/// - Zero is not a valid id
pub fn parse_product_id(raw: &str) -> ValidationResult<ProductId> {
    let id: ProductId = raw
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| ValidationError::InvalidFormat {
            field: "product id".to_string(),
            reason: e.to_string(),
        })?;

    if id == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================
