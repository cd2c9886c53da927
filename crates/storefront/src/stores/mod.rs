//! Session-backed client stores.
//!
//! The cart and wishlist belong to the browser session, not the commerce
//! API - the server-side analogue of the original localStorage stores.
//! Each store is loaded from the session at the start of a mutation and
//! written back immediately after, so the session row always reflects the
//! last completed operation.

pub mod cart;
pub mod wishlist;
