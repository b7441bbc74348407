//! v001: inventory, orders, products, pages.

use rusqlite::Connection;

use shopdesk_core::errors::ShopdeskResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> ShopdeskResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS inventory (
            sku             TEXT PRIMARY KEY,
            category        TEXT NOT NULL,
            inventory_json  TEXT NOT NULL,
            updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_inventory_category ON inventory(category);

        CREATE TABLE IF NOT EXISTS orders (
            po_no         TEXT PRIMARY KEY,
            cust_ref      TEXT NOT NULL,
            order_status  TEXT NOT NULL,
            order_source  TEXT NOT NULL,
            order_date    TEXT,
            order_json    TEXT NOT NULL,
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_orders_status_date ON orders(order_status, order_date);
        CREATE INDEX IF NOT EXISTS idx_orders_source ON orders(order_source);
        CREATE INDEX IF NOT EXISTS idx_orders_cust_ref ON orders(cust_ref);

        CREATE TABLE IF NOT EXISTS products (
            product_id    TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            product_json  TEXT NOT NULL,
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS pages (
            page_id     TEXT PRIMARY KEY,
            page_name   TEXT NOT NULL,
            page_json   TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
