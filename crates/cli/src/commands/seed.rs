//! Demo-catalog seeding through the backoffice API.
//!
//! Creates a small set of brands, categories, and products (one of them a
//! variant product with a generated size/color grid) so a fresh deploy has
//! something to browse.
//!
//! # Environment Variables
//!
//! - `COMMERCE_API_URL` - Base URL of the commerce REST API
//! - `BACKOFFICE_API_KEY` - Service key

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;

use wildfig_admin::commerce::types::{
    BrandInput, CategoryInput, Image, ProductInput, Variant,
};
use wildfig_admin::commerce::{BackofficeClient, BackofficeError};
use wildfig_admin::config::BackofficeApiConfig;
use wildfig_core::variants::{OptionGroup, generate};
use wildfig_core::{ParentCategory, ProductType};

/// Errors from the seed command.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Commerce API error: {0}")]
    Commerce(#[from] BackofficeError),

    #[error("Variant generation error: {0}")]
    Variants(#[from] wildfig_core::variants::VariantError),
}

fn env(key: &'static str) -> Result<String, SeedError> {
    std::env::var(key).map_err(|_| SeedError::MissingEnvVar(key))
}

/// Seed the demo catalog.
///
/// # Errors
///
/// Returns `SeedError` if configuration is missing or an API call fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let config = BackofficeApiConfig {
        api_url: env("COMMERCE_API_URL")?.trim_end_matches('/').to_owned(),
        service_key: SecretString::from(env("BACKOFFICE_API_KEY")?),
    };
    let client = BackofficeClient::new(&config);

    tracing::info!("Seeding brands...");
    let brand = client
        .create_brand(&BrandInput {
            name: "Fig & Field".to_owned(),
            slug: "fig-and-field".to_owned(),
            logo: None,
            is_active: true,
        })
        .await?;

    tracing::info!("Seeding categories...");
    let category = client
        .create_category(&CategoryInput {
            name: "Shirts".to_owned(),
            slug: "shirts".to_owned(),
            image: None,
            parent: Some(ParentCategory::Men),
            is_active: true,
        })
        .await?;
    client
        .create_category(&CategoryInput {
            name: "Dresses".to_owned(),
            slug: "dresses".to_owned(),
            image: None,
            parent: Some(ParentCategory::Women),
            is_active: true,
        })
        .await?;

    tracing::info!("Seeding products...");

    // A simple product
    client
        .create_product(&ProductInput {
            name: "Canvas Tote".to_owned(),
            slug: "canvas-tote".to_owned(),
            sku: "TOTE-1".to_owned(),
            description: Some("Heavyweight canvas tote bag.".to_owned()),
            product_type: ProductType::Simple,
            price: Decimal::new(2400, 2),
            compare_at_price: None,
            stock: 40,
            low_stock_threshold: 5,
            category_id: None,
            brand_id: Some(brand.id.clone()),
            variants: vec![],
            images: vec![Image {
                url: "https://cdn.wildfig.shop/seed/tote.jpg".to_owned(),
                alt: Some("Canvas tote".to_owned()),
                is_primary: true,
            }],
            seo: None,
            is_active: true,
        })
        .await?;

    // A variant product with a generated size/color grid
    let groups = [
        OptionGroup::new("Size", ["S", "M", "L"]),
        OptionGroup::new("Color", ["Olive", "Rust"]),
    ];
    let variants: Vec<Variant> = generate("LINEN", &groups)?
        .into_iter()
        .map(|g| Variant {
            id: None,
            name: g.name,
            sku: g.sku,
            price: Decimal::new(6800, 2),
            stock: 10,
            attributes: g.attributes,
        })
        .collect();

    client
        .create_product(&ProductInput {
            name: "Linen Shirt".to_owned(),
            slug: "linen-shirt".to_owned(),
            sku: "LINEN".to_owned(),
            description: Some("Garment-washed linen shirt.".to_owned()),
            product_type: ProductType::Variant,
            price: Decimal::new(6800, 2),
            compare_at_price: Some(Decimal::new(8400, 2)),
            stock: 60,
            low_stock_threshold: 6,
            category_id: Some(category.id.clone()),
            brand_id: Some(brand.id),
            variants,
            images: vec![Image {
                url: "https://cdn.wildfig.shop/seed/linen-shirt.jpg".to_owned(),
                alt: Some("Linen shirt".to_owned()),
                is_primary: true,
            }],
            seo: None,
            is_active: true,
        })
        .await?;

    tracing::info!("Seed complete");
    Ok(())
}
