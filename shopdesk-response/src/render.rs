//! Fixed-format bullet lists for stock rows and order counts.

use shopdesk_core::constants::NO_ORDERS_FOUND;
use shopdesk_core::models::{RetrievalResult, StockRow, StructuredCount};

pub fn render_inventory(rows: &[StockRow]) -> String {
    let lines: Vec<String> = rows
        .iter()
        .map(|r| format!("• {} - Warehouse: {} - Qty Available: {}", r.sku, r.warehouse, r.quantity))
        .collect();
    let total: i64 = rows.iter().map(|r| r.quantity.units()).sum();
    format!(
        "Here is the list of inventory:\n\n{}\n\nTotal Quantity Available: {total}",
        lines.join("\n")
    )
}

pub fn render_orders(entries: &[StructuredCount]) -> String {
    let blocks: Vec<String> = entries.iter().map(order_block).collect();
    format!("Here is the list of orders:\n\n{}", blocks.join("\n\n"))
}

fn order_block(entry: &StructuredCount) -> String {
    let header = format!(
        "• {} - Order count: {} - Date: {}\n",
        entry.status, entry.count, entry.date
    );
    let none_found = entry.references.len() == 1 && entry.references[0] == NO_ORDERS_FOUND;
    if none_found {
        format!("{header}   {NO_ORDERS_FOUND}")
    } else {
        format!("{header}{}", entry.references.join("\n"))
    }
}

/// Text for results that need no generation call. `None` for documents.
pub fn render_structured(result: &RetrievalResult) -> Option<String> {
    match result {
        RetrievalResult::Records(rows) => Some(render_inventory(rows)),
        RetrievalResult::Counts(entries) => Some(render_orders(entries)),
        RetrievalResult::Documents(_) => None,
    }
}
