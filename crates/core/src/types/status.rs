//! Status enums for orders, payments, products, and users.
//!
//! `OrderStatus` carries an explicit transition table: the admin panel only
//! offers reachable statuses and update handlers reject anything else, so
//! an order can never jump from `delivered` back to `pending` the way an
//! unconstrained dropdown would allow.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
    OnHold,
}

impl OrderStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
        Self::Refunded,
        Self::OnHold,
    ];

    /// Statuses reachable from this one.
    ///
    /// `Cancelled` and `Refunded` are terminal; `Delivered` can only move
    /// to `Refunded`.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::OnHold, Self::Cancelled],
            Self::Processing => &[Self::Shipped, Self::OnHold, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered => &[Self::Refunded],
            Self::OnHold => &[Self::Processing, Self::Cancelled],
            Self::Cancelled | Self::Refunded => &[],
        }
    }

    /// Whether moving to `next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Project the status onto the customer-facing 4-step tracker.
    ///
    /// Returns `None` for statuses the tracker does not display
    /// (cancelled, refunded, on hold).
    #[must_use]
    pub const fn tracker_step(self) -> Option<TrackerStep> {
        match self {
            Self::Pending => Some(TrackerStep::Placed),
            Self::Processing | Self::OnHold => Some(TrackerStep::Processing),
            Self::Shipped => Some(TrackerStep::Shipped),
            Self::Delivered | Self::Refunded => Some(TrackerStep::Delivered),
            Self::Cancelled => None,
        }
    }

    /// Wire representation used by the commerce API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Refunded => "refunded",
            Self::OnHold => "on_hold",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
            Self::OnHold => "On Hold",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "refunded" => Ok(Self::Refunded),
            "on_hold" => Ok(Self::OnHold),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// One step of the fixed 4-step order tracker.
///
/// Display-only projection of [`OrderStatus`]; it does not validate
/// reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerStep {
    Placed,
    Processing,
    Shipped,
    Delivered,
}

impl TrackerStep {
    /// All steps in tracker order.
    pub const ALL: [Self; 4] = [
        Self::Placed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
    ];

    /// Zero-based position in the tracker.
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Placed => 0,
            Self::Processing => 1,
            Self::Shipped => 2,
            Self::Delivered => 3,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Placed => "Placed",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

/// Payment status for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }
}

/// User role with different permission levels.
///
/// Parsed case-insensitively: the API historically returned "admin",
/// "Admin", and "ADMIN" for the same role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access to the back-office panel.
    Admin,
    /// Regular storefront customer.
    #[default]
    Customer,
}

impl UserRole {
    /// Whether this role may access the back-office.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "customer" | "user" => Ok(Self::Customer),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Product type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    Simple,
    Variant,
}

/// Derived stock label computed from current stock versus the configured
/// low-stock threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Derive the label from a stock level and a low-stock threshold.
    #[must_use]
    pub const fn from_level(stock: i64, low_stock_threshold: i64) -> Self {
        if stock <= 0 {
            Self::OutOfStock
        } else if stock <= low_stock_threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// Optional classification label on a category.
///
/// This is a tag, not a graph edge: it groups categories for navigation
/// and implies no parent/child relationship between records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentCategory {
    Men,
    Women,
    Children,
}

impl ParentCategory {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Children => "Children",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_legal_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::Delivered.can_transition_to(OrderStatus::Refunded));
        assert!(OrderStatus::OnHold.can_transition_to(OrderStatus::Processing));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::Delivered.is_terminal());
    }

    #[test]
    fn test_no_self_transitions() {
        for status in OrderStatus::ALL {
            assert!(
                !status.can_transition_to(status),
                "{status} should not transition to itself"
            );
        }
    }

    #[test]
    fn test_tracker_projection() {
        assert_eq!(
            OrderStatus::Pending.tracker_step(),
            Some(TrackerStep::Placed)
        );
        assert_eq!(
            OrderStatus::OnHold.tracker_step(),
            Some(TrackerStep::Processing)
        );
        assert_eq!(
            OrderStatus::Delivered.tracker_step(),
            Some(TrackerStep::Delivered)
        );
        assert_eq!(OrderStatus::Cancelled.tracker_step(), None);
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed = OrderStatus::from_str(status.as_str()).unwrap();
            assert_eq!(parsed, status);
        }
        assert!(OrderStatus::from_str("unknown").is_err());
    }

    #[test]
    fn test_role_parsing_case_insensitive() {
        assert_eq!(UserRole::from_str("Admin").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("ADMIN").unwrap(), UserRole::Admin);
        assert_eq!(UserRole::from_str("customer").unwrap(), UserRole::Customer);
        assert!(UserRole::from_str("root").is_err());
    }

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(StockStatus::from_level(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_level(-2, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_level(3, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::from_level(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::from_level(6, 5), StockStatus::InStock);
    }
}
