//! The session wishlist store.

use tower_sessions::Session;

use wildfig_core::wishlist::Wishlist;

use crate::models::session_keys;

/// Load the wishlist from the session, creating an empty one on first
/// access.
pub async fn load(session: &Session) -> Wishlist {
    session
        .get::<Wishlist>(session_keys::WISHLIST)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the wishlist to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save(
    session: &Session,
    wishlist: &Wishlist,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::WISHLIST, wishlist).await
}
