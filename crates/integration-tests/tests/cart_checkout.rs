//! Cart-to-checkout integration tests.
//!
//! Drives the cart engine the way the storefront routes do and checks the
//! order payload assembled at checkout against what the cart displayed.

use rust_decimal::Decimal;

use wildfig_core::ProductId;
use wildfig_core::cart::{Cart, LineKey, PricingPolicy};
use wildfig_storefront::commerce::types::{
    ApiAddress, ApiCustomer, ApiProduct, ApiVariant,
};
use wildfig_storefront::commerce::{cart_line, order_input_from_cart};

fn test_product(id: &str, price: i64) -> ApiProduct {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("Product {id}"),
        "slug": format!("product-{id}"),
        "sku": format!("SKU-{id}"),
        "productType": "simple",
        "price": price.to_string(),
        "stock": 25
    }))
    .expect("test product should deserialize")
}

fn test_variant(name: &str, sku: &str, price: i64) -> ApiVariant {
    serde_json::from_value(serde_json::json!({
        "name": name,
        "sku": sku,
        "price": price.to_string(),
        "stock": 5
    }))
    .expect("test variant should deserialize")
}

fn test_address() -> ApiAddress {
    ApiAddress {
        line1: "14 Orchard Row".to_owned(),
        line2: None,
        city: "Asheville".to_owned(),
        state: "NC".to_owned(),
        postal_code: "28801".to_owned(),
        country: "US".to_owned(),
    }
}

fn test_customer() -> ApiCustomer {
    ApiCustomer {
        name: "June Park".to_owned(),
        email: "june@example.com".to_owned(),
        phone: Some("555-0100".to_owned()),
    }
}

#[test]
fn adding_same_product_twice_merges_into_one_line() {
    let product = test_product("p1", 40);

    let mut cart = Cart::new();
    cart.add(cart_line(&product, None, 1));
    cart.add(cart_line(&product, None, 2));

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn variant_selection_keys_lines_separately() {
    let mut product = test_product("p1", 60);
    product.variants = vec![
        test_variant("S - Olive", "SKU-p1-SO", 60),
        test_variant("M - Olive", "SKU-p1-MO", 60),
    ];

    let small = product.variants[0].clone();
    let medium = product.variants[1].clone();

    let mut cart = Cart::new();
    cart.add(cart_line(&product, Some(&small), 1));
    cart.add(cart_line(&product, Some(&medium), 1));
    cart.add(cart_line(&product, Some(&small), 1));

    assert_eq!(cart.len(), 2);

    // The stored key finds the same line the display uses
    let key = LineKey::with_variant(ProductId::new("p1"), "S - Olive");
    assert_eq!(cart.line(&key).map(|l| l.quantity), Some(2));
}

#[test]
fn checkout_payload_mirrors_cart_exactly() {
    let product = test_product("p1", 100);

    let mut cart = Cart::new();
    cart.add(cart_line(&product, None, 2));

    let policy = PricingPolicy::default();
    let input = order_input_from_cart(
        &cart,
        &policy,
        test_customer(),
        test_address(),
        test_address(),
        "card".to_owned(),
    );

    // price=100 qty=2: subtotal 200, tax 20, free shipping, total 220
    assert_eq!(input.subtotal, Decimal::from(200));
    assert_eq!(input.tax, Decimal::from(20));
    assert_eq!(input.shipping_cost, Decimal::ZERO);
    assert_eq!(input.total, Decimal::from(220));
    assert_eq!(
        input.total,
        input.subtotal + input.tax + input.shipping_cost
    );

    assert_eq!(input.items.len(), 1);
    assert_eq!(input.items[0].sku, "SKU-p1");
    assert_eq!(input.items[0].quantity, 2);
}

#[test]
fn below_threshold_checkout_carries_flat_shipping() {
    let product = test_product("p2", 30);

    let mut cart = Cart::new();
    cart.add(cart_line(&product, None, 1));

    let input = order_input_from_cart(
        &cart,
        &PricingPolicy::default(),
        test_customer(),
        test_address(),
        test_address(),
        "cash_on_delivery".to_owned(),
    );

    assert_eq!(input.shipping_cost, Decimal::from(10));
    assert_eq!(input.total, Decimal::from(43)); // 30 + 3 tax + 10 shipping
}

#[test]
fn cart_clears_after_order_placement() {
    let product = test_product("p1", 50);

    let mut cart = Cart::new();
    cart.add(cart_line(&product, None, 1));
    assert!(!cart.is_empty());

    // The checkout route clears only after the API accepted the order
    cart.clear();
    assert!(cart.is_empty());
    assert!(cart.totals(&PricingPolicy::default()).total.is_zero());
}

#[test]
fn totals_are_stable_across_serialization() {
    // The cart round-trips through the session store on every mutation;
    // totals must survive that round trip unchanged.
    let product = test_product("p1", 19);

    let mut cart = Cart::new();
    cart.add(cart_line(&product, None, 3));

    let policy = PricingPolicy::default();
    let before = cart.totals(&policy);

    let json = serde_json::to_string(&cart).expect("cart should serialize");
    let restored: Cart = serde_json::from_str(&json).expect("cart should deserialize");

    assert_eq!(restored.totals(&policy), before);
}
