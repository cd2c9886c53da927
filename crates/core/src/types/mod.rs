//! Shared scalar and status types.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{AddressId, BrandId, CategoryId, OrderId, ProductId, UserId, VariantId};
pub use money::{CurrencyCode, Money};
pub use status::{
    OrderStatus, ParentCategory, PaymentStatus, ProductType, StockStatus, TrackerStep, UserRole,
};
