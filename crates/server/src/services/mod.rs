//! Business logic services.

pub mod auth;
pub mod checkout;

pub use auth::{hash_password, verify_password};
pub use checkout::{CheckoutError, place_order};
