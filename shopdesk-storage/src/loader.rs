//! Bulk upsert of upstream feed records into the catalog tables.
//!
//! Each record is stored whole as the row's JSON; the key columns are lifted
//! out of it. Records missing a key are skipped.

use serde_json::Value;
use tracing::{info, warn};

use shopdesk_core::errors::{ShopdeskError, ShopdeskResult};
use shopdesk_core::models::{InventoryRow, OrderRow, PageRow, ProductRow};
use shopdesk_core::traits::IRelationalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Inventory,
    Orders,
    Products,
    Pages,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 4] = [Self::Inventory, Self::Orders, Self::Products, Self::Pages];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Orders => "orders",
            Self::Products => "products",
            Self::Pages => "pages",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Upsert every record of `kind`. Store failures abort; malformed records are skipped.
pub fn load_feed(
    store: &dyn IRelationalStore,
    kind: CatalogKind,
    records: &[Value],
) -> ShopdeskResult<LoadReport> {
    let mut report = LoadReport::default();
    for (index, record) in records.iter().enumerate() {
        let stored = match kind {
            CatalogKind::Inventory => inventory_row(record).map(|r| store.upsert_inventory(&r)),
            CatalogKind::Orders => order_row(record).map(|r| store.upsert_order(&r)),
            CatalogKind::Products => product_row(record).map(|r| store.upsert_product(&r)),
            CatalogKind::Pages => page_row(record).map(|r| store.upsert_page(&r)),
        };
        match stored {
            Ok(result) => {
                result?;
                report.loaded += 1;
            }
            Err(e) => {
                warn!(event = "record_skipped", kind = kind.as_str(), index, error = %e, "skipping feed record");
                report.skipped += 1;
            }
        }
    }
    info!(kind = kind.as_str(), loaded = report.loaded, skipped = report.skipped, "feed loaded");
    Ok(report)
}

pub fn inventory_row(record: &Value) -> ShopdeskResult<InventoryRow> {
    Ok(InventoryRow {
        sku: required(record, &["sku"])?,
        category: optional(record, &["category", "categories"]),
        inventory_json: record.to_string(),
    })
}

pub fn order_row(record: &Value) -> ShopdeskResult<OrderRow> {
    Ok(OrderRow {
        po_no: required(record, &["po_no", "cust_po_no"])?,
        cust_ref: optional(record, &["cust_ref"]),
        status: optional(record, &["order_status", "status"]),
        source: optional(record, &["order_source", "source"]),
        order_date: optional(record, &["order_date"]),
        order_json: record.to_string(),
    })
}

pub fn product_row(record: &Value) -> ShopdeskResult<ProductRow> {
    Ok(ProductRow {
        product_id: required(record, &["id", "product_id"])?,
        name: optional(record, &["name"]),
        product_json: record.to_string(),
    })
}

pub fn page_row(record: &Value) -> ShopdeskResult<PageRow> {
    Ok(PageRow {
        page_id: required(record, &["id", "page_id"])?,
        name: optional(record, &["name"]),
        page_json: record.to_string(),
    })
}

/// First of `keys` holding a non-empty string or a number, as text.
fn field(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match record.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn required(record: &Value, keys: &[&str]) -> ShopdeskResult<String> {
    field(record, keys).ok_or_else(|| ShopdeskError::MalformedRecord {
        key: keys.join("|"),
        reason: "missing key field".to_string(),
    })
}

fn optional(record: &Value, keys: &[&str]) -> String {
    field(record, keys).unwrap_or_default()
}
