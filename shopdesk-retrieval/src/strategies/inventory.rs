//! Inventory questions: material and location filtered stock rows.

use serde_json::Value;
use tracing::{debug, warn};

use shopdesk_core::constants::{NOT_AVAILABLE, NO_INFO_AVAILABLE, PRODUCT_NOT_AVAILABLE, WAREHOUSES};
use shopdesk_core::errors::{ShopdeskError, ShopdeskResult};
use shopdesk_core::models::{InventoryRow, Quantity, RetrievalResult, StockRow};
use shopdesk_core::traits::IRelationalStore;

use crate::rules::{Fired, RuleTable};

/// Words that make an inventory-labelled question a stock listing rather than a semantic search.
pub const STOCK_KEYWORDS: [&str; 7] = ["full", "all", "complete", "total", "entire", "wood", "metal"];

/// Words asking for every row of a material when no warehouse is named.
const BREADTH_KEYWORDS: [&str; 4] = ["full", "all", "complete", "total"];

/// Words that trigger a scan of the whole inventory table.
const FULL_SCAN_KEYWORDS: [&str; 7] = [
    "complete",
    "full",
    "all",
    "total",
    "los angeles",
    "indiana",
    "pennsylvania",
];

struct InventoryQuery<'a> {
    store: &'a dyn IRelationalStore,
    text: String,
    /// Canonical name of the first warehouse mentioned.
    location: Option<&'static str>,
}

impl InventoryQuery<'_> {
    fn mentions(&self, word: &str) -> bool {
        self.text.contains(word)
    }

    fn mentions_any(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.text.contains(w))
    }
}

type Outcome = ShopdeskResult<Vec<StockRow>>;

fn inventory_rules<'a>() -> RuleTable<InventoryQuery<'a>, Outcome> {
    RuleTable::<InventoryQuery<'a>, Outcome>::new("inventory")
        .rule("wood_material", |q| q.mentions("wood"), wood)
        .rule("metal_material", |q| q.mentions("metal"), metal)
        .rule("full_scan", |q| q.mentions_any(&FULL_SCAN_KEYWORDS), full_scan)
        .rule("fallback", |_| true, |_| Ok(vec![not_available()]))
}

/// Resolve an inventory question into stock rows.
pub fn resolve_inventory(store: &dyn IRelationalStore, query: &str) -> ShopdeskResult<RetrievalResult> {
    resolve_inventory_traced(store, query).map(|fired| fired.value)
}

/// Resolve an inventory question, reporting which rule answered it.
pub fn resolve_inventory_traced(
    store: &dyn IRelationalStore,
    query: &str,
) -> ShopdeskResult<Fired<RetrievalResult>> {
    let text = query.to_lowercase();
    let location = WAREHOUSES
        .iter()
        .copied()
        .find(|w| text.contains(&w.to_lowercase()));
    let q = InventoryQuery {
        store,
        text,
        location,
    };

    let (rule, rows) = match inventory_rules().apply(&q) {
        Some(Fired { rule, value }) => (rule, value?),
        None => ("fallback", vec![not_available()]),
    };
    debug!(rule, location = ?q.location, rows = rows.len(), "inventory rule fired");
    Ok(Fired {
        rule,
        value: RetrievalResult::Records(rows),
    })
}

// Wood lists every row only when the question asks for breadth; metal always does.
fn wood(q: &InventoryQuery<'_>) -> Outcome {
    let rows = q.store.inventory_by_category("Wood")?;
    if q.location.is_none() && !q.mentions_any(&BREADTH_KEYWORDS) {
        return Ok(vec![not_available()]);
    }
    Ok(or_placeholder(stock_rows(&rows, q.location)))
}

fn metal(q: &InventoryQuery<'_>) -> Outcome {
    let rows = q.store.inventory_by_category("Metal")?;
    Ok(or_placeholder(stock_rows(&rows, q.location)))
}

fn full_scan(q: &InventoryQuery<'_>) -> Outcome {
    let rows = q.store.all_inventory()?;
    Ok(or_placeholder(stock_rows(&rows, q.location)))
}

/// An empty listing becomes the single not-available row.
fn or_placeholder(rows: Vec<StockRow>) -> Vec<StockRow> {
    if rows.is_empty() {
        vec![not_available()]
    } else {
        rows
    }
}

/// Flatten rows into per-warehouse lines, keeping only `location` when given.
/// Malformed rows are skipped.
fn stock_rows(rows: &[InventoryRow], location: Option<&str>) -> Vec<StockRow> {
    let mut out = Vec::new();
    for row in rows {
        let warehouses = match parse_warehouses(row) {
            Ok(w) => w,
            Err(e) => {
                warn!(event = "record_skipped", sku = %row.sku, error = %e, "skipping inventory row");
                continue;
            }
        };
        for (warehouse, quantity) in warehouses {
            if location.is_some_and(|loc| loc != warehouse) {
                continue;
            }
            out.push(StockRow {
                sku: row.sku.clone(),
                warehouse,
                quantity,
            });
        }
    }
    out
}

/// `{"warehouses": {<id>: {"warehouse": <name>, "qty_available": <n>}}}` → (trimmed name, quantity).
fn parse_warehouses(row: &InventoryRow) -> ShopdeskResult<Vec<(String, Quantity)>> {
    let malformed = |reason: String| ShopdeskError::MalformedRecord {
        key: row.sku.clone(),
        reason,
    };
    let data: Value = serde_json::from_str(&row.inventory_json).map_err(|e| malformed(e.to_string()))?;
    let warehouses = match data.get("warehouses") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(malformed(format!("warehouses is not an object: {other}"))),
    };

    warehouses
        .iter()
        .map(|(id, entry)| -> ShopdeskResult<(String, Quantity)> {
            let entry = entry
                .as_object()
                .ok_or_else(|| malformed(format!("warehouse {id} is not an object")))?;
            let name = entry
                .get("warehouse")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_string();
            Ok((name, quantity(entry.get("qty_available"))))
        })
        .collect()
}

fn quantity(value: Option<&Value>) -> Quantity {
    match value {
        None | Some(Value::Null) => Quantity::Units(0),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => Quantity::Units(i),
            // Fractional or out-of-range counts are shown as given, not truncated.
            None => Quantity::Note(n.to_string()),
        },
        Some(Value::String(s)) => Quantity::Note(s.clone()),
        Some(other) => Quantity::Note(other.to_string()),
    }
}

fn not_available() -> StockRow {
    StockRow {
        sku: NOT_AVAILABLE.to_string(),
        warehouse: NO_INFO_AVAILABLE.to_string(),
        quantity: Quantity::Note(PRODUCT_NOT_AVAILABLE.to_string()),
    }
}
