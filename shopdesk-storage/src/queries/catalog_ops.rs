//! Inventory, product, and page rows.

use rusqlite::{params, Connection};

use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{InventoryRow, PageRow, ProductRow};

use crate::to_storage_err;

pub fn upsert_inventory(conn: &Connection, row: &InventoryRow) -> ShopdeskResult<()> {
    conn.execute(
        "INSERT INTO inventory (sku, category, inventory_json)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(sku) DO UPDATE SET
            category = excluded.category,
            inventory_json = excluded.inventory_json,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![row.sku, row.category, row.inventory_json],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn upsert_product(conn: &Connection, row: &ProductRow) -> ShopdeskResult<()> {
    conn.execute(
        "INSERT INTO products (product_id, name, product_json)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(product_id) DO UPDATE SET
            name = excluded.name,
            product_json = excluded.product_json,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![row.product_id, row.name, row.product_json],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn upsert_page(conn: &Connection, row: &PageRow) -> ShopdeskResult<()> {
    conn.execute(
        "INSERT INTO pages (page_id, page_name, page_json)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(page_id) DO UPDATE SET
            page_name = excluded.page_name,
            page_json = excluded.page_json,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![row.page_id, row.name, row.page_json],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Inventory rows whose category matches exactly (e.g. `Wood`).
pub fn inventory_by_category(conn: &Connection, category: &str) -> ShopdeskResult<Vec<InventoryRow>> {
    query_inventory(
        conn,
        "SELECT sku, category, inventory_json FROM inventory WHERE category = ?1 ORDER BY sku",
        Some(category),
    )
}

pub fn all_inventory(conn: &Connection) -> ShopdeskResult<Vec<InventoryRow>> {
    query_inventory(
        conn,
        "SELECT sku, category, inventory_json FROM inventory ORDER BY sku",
        None,
    )
}

fn query_inventory(
    conn: &Connection,
    sql: &str,
    category: Option<&str>,
) -> ShopdeskResult<Vec<InventoryRow>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let map_row = |row: &rusqlite::Row<'_>| {
        Ok(InventoryRow {
            sku: row.get(0)?,
            category: row.get(1)?,
            inventory_json: row.get(2)?,
        })
    };
    let rows = match category {
        Some(c) => stmt.query_map(params![c], map_row),
        None => stmt.query_map([], map_row),
    }
    .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn all_products(conn: &Connection) -> ShopdeskResult<Vec<ProductRow>> {
    let mut stmt = conn
        .prepare("SELECT product_id, name, product_json FROM products ORDER BY product_id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ProductRow {
                product_id: row.get(0)?,
                name: row.get(1)?,
                product_json: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

pub fn all_pages(conn: &Connection) -> ShopdeskResult<Vec<PageRow>> {
    let mut stmt = conn
        .prepare("SELECT page_id, page_name, page_json FROM pages ORDER BY page_id")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(PageRow {
                page_id: row.get(0)?,
                name: row.get(1)?,
                page_json: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
