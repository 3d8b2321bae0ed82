//! # Commands Module
//!
//! Every operation the CLI exposes. Each takes the [`crate::state::Stores`]
//! registry and returns a serializable response or an
//! [`crate::error::AppError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── session.rs  ◄─── login, logout, whoami
//! ├── product.rs  ◄─── dashboard, details, add to bag
//! ├── cart.rs     ◄─── local cart, checkout
//! ├── bag.rs      ◄─── remote records joined with products
//! └── doctor.rs   ◄─── storage diagnostics
//! ```
//!
//! ## Session Gate
//! Dashboard, details, checkout and bag commands need a logged-in user and
//! fail with `UNAUTHENTICATED` (navigate to `/login`) otherwise. Local cart
//! views do not.

pub mod bag;
pub mod cart;
pub mod doctor;
pub mod product;
pub mod session;
