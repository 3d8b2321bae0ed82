//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  REMOTE (read from the store API)      LOCAL (owned by the client)      │
//! │  ─────────────────────────────────     ────────────────────────────     │
//! │  ┌─────────────────┐                   ┌─────────────────┐              │
//! │  │    Product      │ ─from_product──►  │    CartItem     │              │
//! │  │  id, title      │                   │  id, name       │              │
//! │  │  price, rating? │                   │  price, qty ≥ 1 │              │
//! │  └─────────────────┘                   └─────────────────┘              │
//! │  ┌─────────────────┐                   ┌─────────────────┐              │
//! │  │  RemoteCart     │                   │  UserSession    │              │
//! │  │  id, userId     │                   │  username       │              │
//! │  │  products[]     │                   │  email, token   │              │
//! │  └─────────────────┘                   └─────────────────┘              │
//! │  ┌─────────────────┐                                                   │
//! │  │  UserProfile    │ ─fallbacks──────► UserSession                     │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Remote Fields
//! The remote API may omit `rating`, `description` and `image`. They are
//! modelled as `Option` and given display defaults here rather than at every
//! call site.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{MAX_STARS, PLACEHOLDER_DESCRIPTION};

/// Identity of a product in the remote catalogue.
pub type ProductId = u64;

/// Identity of a remote cart record.
pub type CartRecordId = u64;

/// Identity of a remote user.
pub type UserId = u64;

// =============================================================================
// Product
// =============================================================================

/// Average rating of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    pub rate: f64,
    #[serde(default)]
    pub count: u32,
}

/// A product from the remote catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[ts(type = "number")]
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Unit price.
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    /// Image URI.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Returns the description, or a placeholder when the API omitted it.
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => PLACEHOLDER_DESCRIPTION,
        }
    }

    /// Number of highlighted stars (0..=5). Unrated products show zero.
    ///
    /// A star is lit while its index is below the rate, so 3.9 lights four.
    pub fn filled_stars(&self) -> u8 {
        let rate = self.rating.map(|r| r.rate).unwrap_or(0.0);
        if !rate.is_finite() || rate <= 0.0 {
            return 0;
        }
        rate.ceil().min(f64::from(MAX_STARS)) as u8
    }

    /// Rating label for display, "No Ratings" when unrated.
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(rating) => rating.rate.to_string(),
            None => "No Ratings".to_string(),
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the local shopping cart.
///
/// ## Invariants
/// - `quantity >= 1`
/// - At most one item per `id` inside a [`crate::cart::Cart`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Product identity.
    #[ts(type = "number")]
    pub id: ProductId,

    /// Product title at time of adding.
    pub name: String,

    /// Unit price at time of adding.
    #[ts(type = "number")]
    pub price: Money,

    /// Image URI (may be empty).
    #[serde(default)]
    pub image: String,

    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart item with quantity 1.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, image: impl Into<String>) -> Self {
        CartItem {
            id,
            name: name.into(),
            price,
            image: image.into(),
            quantity: 1,
        }
    }

    /// Creates a cart item from a catalogue product.
    pub fn from_product(product: &Product) -> Self {
        CartItem::new(
            product.id,
            product.title.clone(),
            product.price,
            product.image.clone().unwrap_or_default(),
        )
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Remote Cart Records
// =============================================================================

/// One product line inside a remote cart record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RemoteCartLine {
    #[ts(type = "number")]
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A server-side cart record.
///
/// Not kept consistent with the local cart; see [`crate::bag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RemoteCart {
    #[ts(type = "number")]
    pub id: CartRecordId,

    #[ts(type = "number")]
    pub user_id: UserId,

    /// Submission date as sent by the API (ISO 8601).
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub products: Vec<RemoteCartLine>,
}

/// Request body for creating a remote cart record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRemoteCart {
    pub user_id: UserId,
    pub date: String,
    pub products: Vec<RemoteCartLine>,
}

impl NewRemoteCart {
    /// Builds a record dated now.
    pub fn new(user_id: UserId, products: Vec<RemoteCartLine>) -> Self {
        NewRemoteCart::dated(user_id, Utc::now(), products)
    }

    /// Builds a record with an explicit date.
    pub fn dated(user_id: UserId, date: DateTime<Utc>, products: Vec<RemoteCartLine>) -> Self {
        NewRemoteCart {
            user_id,
            date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
            products,
        }
    }

    /// Single-line record, as posted when mirroring an add.
    pub fn single(user_id: UserId, product_id: ProductId, quantity: u32) -> Self {
        NewRemoteCart::new(
            user_id,
            vec![RemoteCartLine {
                product_id,
                quantity,
            }],
        )
    }
}

// =============================================================================
// Authentication
// =============================================================================

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Full name block of a remote user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonName {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
}

/// A remote user record. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<PersonName>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// The authenticated user, as persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserSession {
    pub username: String,
    pub email: String,
    pub token: String,
}

impl UserSession {
    /// Builds a session from a profile, falling back to the typed username
    /// and a derived `{username}@example.com` address for missing fields.
    pub fn from_profile(profile: Option<&UserProfile>, username: &str, token: impl Into<String>) -> Self {
        let non_empty = |value: Option<&String>| value.filter(|v| !v.is_empty()).cloned();

        let resolved_username = profile
            .and_then(|p| non_empty(p.username.as_ref()))
            .unwrap_or_else(|| username.to_string());
        let email = profile
            .and_then(|p| non_empty(p.email.as_ref()))
            .unwrap_or_else(|| format!("{}@example.com", username));

        UserSession {
            username: resolved_username,
            email,
            token: token.into(),
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Where the presentation layer should go after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Navigation {
    Profile,
    Login,
    ProductDashboard,
    NotFound,
}

impl Navigation {
    /// Route path of the destination view.
    pub fn path(&self) -> &'static str {
        match self {
            Navigation::Profile => "/profile",
            Navigation::Login => "/login",
            Navigation::ProductDashboard => "/productDashboard",
            Navigation::NotFound => "/not-found",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
