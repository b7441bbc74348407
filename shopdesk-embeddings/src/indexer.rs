//! Embeds the catalog tables into a vector collection.
//!
//! Each passage's metadata carries `id` (the table key) and `kind`, which the
//! semantic strategy uses to cross-reference fresh table snapshots.

use serde_json::json;
use tracing::info;

use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::traits::{IRelationalStore, IVectorStorage};

use crate::index::VectorIndex;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexReport {
    pub inventory: usize,
    pub products: usize,
    pub pages: usize,
}

impl IndexReport {
    pub fn total(&self) -> usize {
        self.inventory + self.products + self.pages
    }
}

pub fn index_catalog<S: IVectorStorage>(
    store: &dyn IRelationalStore,
    index: &VectorIndex<S>,
    collection: &str,
) -> ShopdeskResult<IndexReport> {
    let mut report = IndexReport::default();

    for row in store.all_inventory()? {
        let text = format!("inventory {} {} {}", row.sku, row.category, row.inventory_json);
        index.index_text(
            collection,
            &format!("inventory:{}", row.sku),
            &text,
            &row.inventory_json,
            &metadata(&row.sku, "inventory"),
        )?;
        report.inventory += 1;
    }

    for row in store.all_products()? {
        let text = format!("product:{} {} {}", row.product_id, row.name, row.product_json);
        index.index_text(
            collection,
            &format!("product:{}", row.product_id),
            &text,
            &row.product_json,
            &metadata(&row.product_id, "product"),
        )?;
        report.products += 1;
    }

    for row in store.all_pages()? {
        let text = format!("page {} {}", row.name, row.page_json);
        index.index_text(
            collection,
            &format!("page:{}", row.page_id),
            &text,
            &row.page_json,
            &metadata(&row.page_id, "page"),
        )?;
        report.pages += 1;
    }

    info!(
        collection,
        inventory = report.inventory,
        products = report.products,
        pages = report.pages,
        "catalog indexed"
    );
    Ok(report)
}

fn metadata(id: &str, kind: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut m = serde_json::Map::new();
    m.insert("id".to_string(), json!(id));
    m.insert("kind".to_string(), json!(kind));
    m
}
