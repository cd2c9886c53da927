//! Integration tests for Wildfig.
//!
//! These tests exercise behavior that crosses crate boundaries: the cart
//! engine as the storefront checkout consumes it, the order status
//! lifecycle as the admin panel surfaces it, and variant generation as
//! the product form uses it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wildfig-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_checkout` - cart mutations through to the order payload
//! - `order_lifecycle` - transition table, tracker, list filters, CSV
//! - `variant_generation` - generator output as the admin form uses it

#![cfg_attr(not(test), forbid(unsafe_code))]
