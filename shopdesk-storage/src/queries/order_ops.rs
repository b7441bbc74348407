//! Order rows and the parameterized lookups behind the order strategy.

use rusqlite::{params, Connection, Params};

use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{OrderRef, OrderRow};

use crate::to_storage_err;

/// Insert or replace an order. Status is normalised to lowercase.
pub fn upsert_order(conn: &Connection, row: &OrderRow) -> ShopdeskResult<()> {
    let order_date = (!row.order_date.is_empty()).then_some(row.order_date.as_str());
    conn.execute(
        "INSERT INTO orders (po_no, cust_ref, order_status, order_source, order_date, order_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(po_no) DO UPDATE SET
            cust_ref = excluded.cust_ref,
            order_status = excluded.order_status,
            order_source = excluded.order_source,
            order_date = excluded.order_date,
            order_json = excluded.order_json,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            row.po_no,
            row.cust_ref,
            row.status.to_lowercase(),
            row.source,
            order_date,
            row.order_json
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn orders_by_status_and_date(
    conn: &Connection,
    status: &str,
    date: &str,
) -> ShopdeskResult<Vec<OrderRef>> {
    query_refs(
        conn,
        "SELECT cust_ref, order_json FROM orders
         WHERE order_status = ?1 AND order_date = ?2
         ORDER BY cust_ref",
        params![status.to_lowercase(), date],
    )
}

/// Orders from `source` placed on `date` OR currently in `status`.
/// A missing date never matches, leaving the status filter alone.
pub fn orders_by_source(
    conn: &Connection,
    source: &str,
    date: Option<&str>,
    status: &str,
) -> ShopdeskResult<Vec<OrderRef>> {
    query_refs(
        conn,
        "SELECT cust_ref, order_json FROM orders
         WHERE order_source = ?1 AND (order_date = ?2 OR LOWER(order_status) = ?3)
         ORDER BY cust_ref",
        params![source, date, status.to_lowercase()],
    )
}

pub fn orders_by_source_only(conn: &Connection, source: &str) -> ShopdeskResult<Vec<OrderRef>> {
    query_refs(
        conn,
        "SELECT cust_ref, order_json FROM orders WHERE order_source = ?1 ORDER BY cust_ref",
        params![source],
    )
}

/// Orders whose purchase-order number or customer reference equals `identifier`.
pub fn orders_by_identifier(conn: &Connection, identifier: &str) -> ShopdeskResult<Vec<OrderRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT po_no, cust_ref, order_status, order_source, COALESCE(order_date, ''), order_json
             FROM orders
             WHERE po_no = ?1 OR cust_ref = ?1
             ORDER BY po_no",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![identifier], |row| {
            Ok(OrderRow {
                po_no: row.get(0)?,
                cust_ref: row.get(1)?,
                status: row.get(2)?,
                source: row.get(3)?,
                order_date: row.get(4)?,
                order_json: row.get(5)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

fn query_refs<P: Params>(conn: &Connection, sql: &str, params: P) -> ShopdeskResult<Vec<OrderRef>> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params, |row| {
            Ok(OrderRef {
                cust_ref: row.get(0)?,
                order_json: row.get(1)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
