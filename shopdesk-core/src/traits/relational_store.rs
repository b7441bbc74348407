use std::sync::Arc;

use crate::errors::ShopdeskResult;
use crate::models::{InventoryRow, OrderRef, OrderRow, PageRow, ProductRow};

/// The locally materialized catalog: inventory, orders, products, pages.
///
/// Status arguments are lowercase; dates are `YYYY-MM-DD`.
pub trait IRelationalStore: Send + Sync {
    // --- Upserts (sync jobs / loaders) ---
    fn upsert_inventory(&self, row: &InventoryRow) -> ShopdeskResult<()>;
    fn upsert_order(&self, row: &OrderRow) -> ShopdeskResult<()>;
    fn upsert_product(&self, row: &ProductRow) -> ShopdeskResult<()>;
    fn upsert_page(&self, row: &PageRow) -> ShopdeskResult<()>;

    // --- Orders ---
    fn orders_by_status_and_date(&self, status: &str, date: &str) -> ShopdeskResult<Vec<OrderRef>>;
    /// Orders from `source` matching `date` OR `status`.
    fn orders_by_source(
        &self,
        source: &str,
        date: Option<&str>,
        status: &str,
    ) -> ShopdeskResult<Vec<OrderRef>>;
    fn orders_by_source_only(&self, source: &str) -> ShopdeskResult<Vec<OrderRef>>;
    /// Orders whose po_no OR cust_ref equals `identifier`.
    fn orders_by_identifier(&self, identifier: &str) -> ShopdeskResult<Vec<OrderRow>>;

    // --- Snapshots ---
    fn inventory_by_category(&self, category: &str) -> ShopdeskResult<Vec<InventoryRow>>;
    fn all_inventory(&self) -> ShopdeskResult<Vec<InventoryRow>>;
    fn all_products(&self) -> ShopdeskResult<Vec<ProductRow>>;
    fn all_pages(&self) -> ShopdeskResult<Vec<PageRow>>;

    // --- Generated statements ---
    /// Execute one read-only statement, returning at most `row_limit` rows.
    fn run_read_only(
        &self,
        statement: &str,
        row_limit: usize,
    ) -> ShopdeskResult<Vec<Vec<serde_json::Value>>>;
}

impl<T: IRelationalStore> IRelationalStore for Arc<T> {
    fn upsert_inventory(&self, row: &InventoryRow) -> ShopdeskResult<()> {
        (**self).upsert_inventory(row)
    }
    fn upsert_order(&self, row: &OrderRow) -> ShopdeskResult<()> {
        (**self).upsert_order(row)
    }
    fn upsert_product(&self, row: &ProductRow) -> ShopdeskResult<()> {
        (**self).upsert_product(row)
    }
    fn upsert_page(&self, row: &PageRow) -> ShopdeskResult<()> {
        (**self).upsert_page(row)
    }
    fn orders_by_status_and_date(&self, status: &str, date: &str) -> ShopdeskResult<Vec<OrderRef>> {
        (**self).orders_by_status_and_date(status, date)
    }
    fn orders_by_source(
        &self,
        source: &str,
        date: Option<&str>,
        status: &str,
    ) -> ShopdeskResult<Vec<OrderRef>> {
        (**self).orders_by_source(source, date, status)
    }
    fn orders_by_source_only(&self, source: &str) -> ShopdeskResult<Vec<OrderRef>> {
        (**self).orders_by_source_only(source)
    }
    fn orders_by_identifier(&self, identifier: &str) -> ShopdeskResult<Vec<OrderRow>> {
        (**self).orders_by_identifier(identifier)
    }
    fn inventory_by_category(&self, category: &str) -> ShopdeskResult<Vec<InventoryRow>> {
        (**self).inventory_by_category(category)
    }
    fn all_inventory(&self) -> ShopdeskResult<Vec<InventoryRow>> {
        (**self).all_inventory()
    }
    fn all_products(&self) -> ShopdeskResult<Vec<ProductRow>> {
        (**self).all_products()
    }
    fn all_pages(&self) -> ShopdeskResult<Vec<PageRow>> {
        (**self).all_pages()
    }
    fn run_read_only(
        &self,
        statement: &str,
        row_limit: usize,
    ) -> ShopdeskResult<Vec<Vec<serde_json::Value>>> {
        (**self).run_read_only(statement, row_limit)
    }
}
