//! Domain and session models for the storefront.

pub mod session;
pub mod user;

pub use session::{CurrentUser, SessionTokens, session_keys};
pub use user::CachedUser;
