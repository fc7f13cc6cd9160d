//! Middleware for sessions and authentication.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireStaff};
pub use session::{clear_current_user, create_session_layer, set_current_user};
