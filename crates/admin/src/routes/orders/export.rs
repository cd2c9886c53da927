//! CSV export for the orders list.
//!
//! Fetches every page matching the active filter (bounded) and streams the
//! rows back as an attachment.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use crate::commerce::types::Order;
use crate::{middleware::auth::RequireAdminAuth, state::AppState};

use super::types::{OrdersQuery, build_list_query};

/// Hard ceiling on exported pages; keeps one request from walking an
/// unbounded order book.
const MAX_EXPORT_PAGES: u32 = 40;

const CSV_HEADER: &str =
    "order_number,created_at,customer_name,customer_email,status,payment_status,payment_method,items,subtotal,shipping,tax,discount,total,tracking_number\n";

/// Escape one CSV field per RFC 4180: quote when the value contains a
/// comma, quote, or newline, doubling embedded quotes.
#[must_use]
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Render one order as a CSV row.
fn csv_row(order: &Order) -> String {
    let item_count: u32 = order.items.iter().map(|i| i.quantity).sum();
    let fields = [
        order.order_number.clone(),
        order.created_at.clone(),
        order.customer.name.clone(),
        order.customer.email.clone(),
        order.status.as_str().to_owned(),
        order.payment.status.label().to_lowercase(),
        order.payment.method.clone(),
        item_count.to_string(),
        order.subtotal.to_string(),
        order.shipping_cost.to_string(),
        order.tax.to_string(),
        order.discount.to_string(),
        order.total.to_string(),
        order.shipping.tracking_number.clone().unwrap_or_default(),
    ];

    let mut row = fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Export orders matching the current filter as CSV.
#[instrument(skip(_admin, state))]
pub async fn export(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Response {
    let mut list_query = build_list_query(&query);
    list_query.page = 1;

    let mut csv = String::from(CSV_HEADER);
    let mut exported = 0usize;

    loop {
        let page = match state.commerce().list_orders(&list_query).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to fetch orders for export: {e}");
                return (StatusCode::BAD_GATEWAY, "Failed to fetch orders").into_response();
            }
        };

        for order in &page.items {
            csv.push_str(&csv_row(order));
            exported += 1;
        }

        if !page.has_next_page() || list_query.page >= MAX_EXPORT_PAGES {
            if page.has_next_page() {
                tracing::warn!(
                    exported,
                    "CSV export truncated at {MAX_EXPORT_PAGES} pages"
                );
            }
            break;
        }
        list_query.page += 1;
    }

    tracing::info!(exported, "orders exported to CSV");

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"orders.csv\"",
            ),
        ],
        csv,
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_escape_plain() {
        assert_eq!(csv_escape("plain"), "plain");
    }

    #[test]
    fn test_csv_escape_comma() {
        assert_eq!(csv_escape("Doe, Jane"), "\"Doe, Jane\"");
    }

    #[test]
    fn test_csv_escape_quotes() {
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_escape_newline() {
        assert_eq!(csv_escape("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn test_header_column_count_matches_rows() {
        // 14 columns in the header; csv_row must emit the same count
        assert_eq!(CSV_HEADER.trim_end().split(',').count(), 14);
    }
}
