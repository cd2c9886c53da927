//! Conversions between API wire types and core domain types.

use wildfig_core::cart::{Cart, CartLine, PricingPolicy};
use wildfig_core::catalog::{ProductSnapshot, VariantSnapshot};
use wildfig_core::{CurrencyCode, Money};

use super::types::{ApiCustomer, ApiOrderItem, ApiAddress, ApiProduct, ApiVariant, OrderInput};

/// Snapshot a product for a cart or wishlist line.
#[must_use]
pub fn product_snapshot(product: &ApiProduct) -> ProductSnapshot {
    ProductSnapshot {
        id: product.id.clone(),
        name: product.name.clone(),
        sku: product.sku.clone(),
        slug: product.slug.clone(),
        image: product.primary_image().map(str::to_owned),
    }
}

/// Snapshot a selected variant.
#[must_use]
pub fn variant_snapshot(variant: &ApiVariant) -> VariantSnapshot {
    VariantSnapshot {
        name: variant.name.clone(),
        sku: variant.sku.clone(),
        price: Money::new(variant.price, CurrencyCode::default()),
        attributes: variant.attributes.clone(),
    }
}

/// Build a cart line from a product and an optional variant selection.
///
/// The unit price is the variant price when a variant is selected, else
/// the product's base price.
#[must_use]
pub fn cart_line(product: &ApiProduct, variant: Option<&ApiVariant>, quantity: u32) -> CartLine {
    let unit_price = Money::new(
        variant.map_or(product.price, |v| v.price),
        CurrencyCode::default(),
    );
    CartLine::new(
        product_snapshot(product),
        variant.map(variant_snapshot),
        quantity,
        unit_price,
    )
}

/// Assemble the order payload from the session cart and checkout form data.
///
/// Line items and money totals both come from the cart under the given
/// policy, so what the customer saw on the cart page is exactly what the
/// API receives.
#[must_use]
pub fn order_input_from_cart(
    cart: &Cart,
    policy: &PricingPolicy,
    customer: ApiCustomer,
    shipping_address: ApiAddress,
    billing_address: ApiAddress,
    payment_method: String,
) -> OrderInput {
    let totals = cart.totals(policy);

    let items = cart
        .lines()
        .iter()
        .map(|line| ApiOrderItem {
            product_id: line.product.id.clone(),
            product_name: line.product.name.clone(),
            variant_name: line.variant.as_ref().map(|v| v.name.clone()),
            sku: line
                .variant
                .as_ref()
                .map_or_else(|| line.product.sku.clone(), |v| v.sku.clone()),
            quantity: line.quantity,
            unit_price: line.unit_price.amount,
            subtotal: line.subtotal().amount,
            attributes: line
                .variant
                .as_ref()
                .map(|v| v.attributes.clone())
                .unwrap_or_default(),
        })
        .collect();

    OrderInput {
        customer,
        items,
        shipping_address,
        billing_address,
        payment_method,
        subtotal: totals.subtotal.amount,
        shipping_cost: totals.shipping.amount,
        tax: totals.tax.amount,
        discount: rust_decimal::Decimal::ZERO,
        total: totals.total.amount,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use wildfig_core::{ProductId, ProductType};

    fn product(price: i64) -> ApiProduct {
        ApiProduct {
            id: ProductId::new("p1"),
            name: "Wool Coat".to_owned(),
            slug: "wool-coat".to_owned(),
            sku: "COAT-1".to_owned(),
            description: None,
            product_type: ProductType::Simple,
            price: Decimal::from(price),
            compare_at_price: None,
            stock: 10,
            low_stock_threshold: 5,
            category: None,
            brand: None,
            variants: vec![],
            images: vec![],
            seo: None,
            is_active: true,
        }
    }

    fn address() -> ApiAddress {
        ApiAddress {
            line1: "1 Fig Lane".to_owned(),
            line2: None,
            city: "Portland".to_owned(),
            state: "OR".to_owned(),
            postal_code: "97201".to_owned(),
            country: "US".to_owned(),
        }
    }

    #[test]
    fn test_order_input_matches_cart_totals() {
        let mut cart = Cart::new();
        cart.add(cart_line(&product(100), None, 2));

        let policy = PricingPolicy::default();
        let input = order_input_from_cart(
            &cart,
            &policy,
            ApiCustomer {
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                phone: None,
            },
            address(),
            address(),
            "card".to_owned(),
        );

        assert_eq!(input.items.len(), 1);
        assert_eq!(input.items[0].quantity, 2);
        assert_eq!(input.subtotal, Decimal::from(200));
        assert_eq!(input.tax, Decimal::from(20));
        assert_eq!(input.shipping_cost, Decimal::ZERO);
        assert_eq!(input.total, Decimal::from(220));
        // total must equal subtotal + tax + shipping exactly
        assert_eq!(
            input.total,
            input.subtotal + input.tax + input.shipping_cost
        );
    }

    #[test]
    fn test_variant_sku_wins_over_product_sku() {
        let mut product = product(40);
        product.variants = vec![ApiVariant {
            id: None,
            name: "M - Red".to_owned(),
            sku: "COAT-1-MR".to_owned(),
            price: Decimal::from(45),
            stock: 3,
            attributes: std::collections::BTreeMap::new(),
        }];

        let variant = product.variants[0].clone();
        let line = cart_line(&product, Some(&variant), 1);
        assert_eq!(line.unit_price.amount, Decimal::from(45));

        let mut cart = Cart::new();
        cart.add(line);
        let input = order_input_from_cart(
            &cart,
            &PricingPolicy::default(),
            ApiCustomer {
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
                phone: None,
            },
            address(),
            address(),
            "card".to_owned(),
        );

        assert_eq!(input.items[0].sku, "COAT-1-MR");
        assert_eq!(input.items[0].variant_name.as_deref(), Some("M - Red"));
    }
}
