//! Order questions: per-status counts on a date, per-source summaries, and
//! direct lookups by order number.

use std::collections::BTreeSet;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use shopdesk_core::constants::{
    DEFAULT_ORDER_STATUSES, NOT_AVAILABLE, NO_DATE_TIME, NO_INFO_AVAILABLE, NO_ORDERS_FOUND,
    ORDER_SOURCES, ORDER_STATUSES,
};
use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{Document, OrderRef, OrderResolution, RetrievalResult, StructuredCount};
use shopdesk_core::traits::IRelationalStore;

use crate::extract::{extract_dates_on, extract_identifiers};
use crate::rules::{Fired, RuleTable};

/// Label used for the single entry listing every order of a source.
const ALL_ORDERS: &str = "All";

/// What an order question mentions.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSignals {
    /// First status found, in detection order.
    pub status: Option<&'static str>,
    pub source: Option<&'static str>,
    pub dates: BTreeSet<String>,
    pub identifiers: Vec<String>,
}

impl OrderSignals {
    pub fn detect(query: &str, today: NaiveDate) -> Self {
        let lowered = query.to_lowercase();
        Self {
            status: first_mentioned(&lowered, &ORDER_STATUSES),
            source: first_mentioned(&lowered, &ORDER_SOURCES),
            dates: extract_dates_on(&lowered, today),
            identifiers: extract_identifiers(&lowered),
        }
    }

    /// Lookup date: the earliest one mentioned.
    pub fn first_date(&self) -> Option<&str> {
        self.dates.iter().next().map(String::as_str)
    }
}

fn first_mentioned(lowered: &str, vocabulary: &[&'static str]) -> Option<&'static str> {
    vocabulary
        .iter()
        .copied()
        .find(|term| lowered.contains(&term.to_lowercase()))
}

struct OrderQuery<'a> {
    store: &'a dyn IRelationalStore,
    signals: OrderSignals,
}

type Outcome = ShopdeskResult<OrderResolution>;

fn order_rules<'a>() -> RuleTable<OrderQuery<'a>, Outcome> {
    RuleTable::<OrderQuery<'a>, Outcome>::new("order")
        .rule(
            "status_on_date",
            |q| q.signals.source.is_none() && q.signals.status.is_some() && !q.signals.dates.is_empty(),
            by_status_on_date,
        )
        .rule(
            "default_statuses_on_date",
            |q| q.signals.status.is_none() && !q.signals.dates.is_empty(),
            by_default_statuses_on_date,
        )
        .rule("by_source", |q| q.signals.source.is_some(), by_source)
        .rule("by_identifier", |q| !q.signals.identifiers.is_empty(), by_identifier)
        .rule("no_match", |_| true, |_| Ok(placeholder(false)))
}

/// Resolve an order question against today's calendar.
pub fn resolve_order(store: &dyn IRelationalStore, query: &str) -> Outcome {
    resolve_order_on(store, query, Local::now().date_naive()).map(|fired| fired.value)
}

/// Resolve an order question, reporting which rule answered it.
pub fn resolve_order_on(
    store: &dyn IRelationalStore,
    query: &str,
    today: NaiveDate,
) -> ShopdeskResult<Fired<OrderResolution>> {
    let q = OrderQuery {
        store,
        signals: OrderSignals::detect(query, today),
    };
    debug!(signals = ?q.signals, "order signals");
    match order_rules().apply(&q) {
        Some(Fired { rule, value }) => Ok(Fired { rule, value: value? }),
        None => Ok(Fired {
            rule: "no_match",
            value: placeholder(false),
        }),
    }
}

fn by_status_on_date(q: &OrderQuery<'_>) -> Outcome {
    let (Some(status), Some(date)) = (q.signals.status, q.signals.first_date()) else {
        return Ok(placeholder(false));
    };
    let refs = q.store.orders_by_status_and_date(&status.to_lowercase(), date)?;
    Ok(counts(vec![count_entry(status, date, &refs)]))
}

fn by_default_statuses_on_date(q: &OrderQuery<'_>) -> Outcome {
    let Some(date) = q.signals.first_date() else {
        return Ok(placeholder(false));
    };
    let mut entries = Vec::with_capacity(DEFAULT_ORDER_STATUSES.len());
    for status in DEFAULT_ORDER_STATUSES {
        let refs = q.store.orders_by_status_and_date(&status.to_lowercase(), date)?;
        entries.push(count_entry(status, date, &refs));
    }
    Ok(counts(entries))
}

fn by_source(q: &OrderQuery<'_>) -> Outcome {
    let Some(source) = q.signals.source else {
        return Ok(placeholder(false));
    };
    let date = q.signals.first_date();
    let shown_date = date.unwrap_or(NOT_AVAILABLE);

    if date.is_none() && q.signals.status.is_none() {
        let refs = q.store.orders_by_source_only(source)?;
        return Ok(counts(vec![count_entry(ALL_ORDERS, shown_date, &refs)]));
    }

    let mut entries = Vec::with_capacity(DEFAULT_ORDER_STATUSES.len());
    for status in DEFAULT_ORDER_STATUSES {
        let refs = q.store.orders_by_source(source, date, &status.to_lowercase())?;
        entries.push(count_entry(status, shown_date, &refs));
    }
    Ok(counts(entries))
}

fn by_identifier(q: &OrderQuery<'_>) -> Outcome {
    let Some(identifier) = q.signals.identifiers.first() else {
        return Ok(placeholder(false));
    };
    let rows = q.store.orders_by_identifier(identifier)?;
    if rows.is_empty() {
        return Ok(placeholder(true));
    }
    let order_numbers = serde_json::json!(q.signals.identifiers);
    let documents = rows
        .into_iter()
        .map(|row| Document::new(row.order_json).with_metadata("order number", order_numbers.clone()))
        .collect();
    Ok(OrderResolution {
        result: RetrievalResult::Documents(documents),
        is_identifier_lookup: true,
        found: true,
    })
}

fn counts(entries: Vec<StructuredCount>) -> OrderResolution {
    let found = entries.iter().any(|e| e.count > 0);
    OrderResolution {
        result: RetrievalResult::Counts(entries),
        is_identifier_lookup: false,
        found,
    }
}

fn count_entry(status: &str, date: &str, refs: &[OrderRef]) -> StructuredCount {
    let references = if refs.is_empty() {
        vec![NO_ORDERS_FOUND.to_string()]
    } else {
        refs.iter().map(detail_line).collect()
    };
    StructuredCount {
        status: status.to_string(),
        count: refs.len(),
        date: date.to_string(),
        references,
    }
}

/// The "nothing to report" entry. `identifier_lookup` marks a missed order-number lookup.
fn placeholder(identifier_lookup: bool) -> OrderResolution {
    OrderResolution {
        result: RetrievalResult::Counts(vec![StructuredCount {
            status: NO_INFO_AVAILABLE.to_string(),
            count: 0,
            date: NOT_AVAILABLE.to_string(),
            references: vec![NOT_AVAILABLE.to_string()],
        }]),
        is_identifier_lookup: identifier_lookup,
        found: false,
    }
}

/// `Order Id: <ref> - Date: <YYYY-MM-DD> - <HH:MM:SS>`, from the order's last update time.
pub(crate) fn detail_line(order: &OrderRef) -> String {
    match updated_at(&order.order_json) {
        Some(ts) => format!(
            "Order Id: {} - Date: {} - {}",
            order.cust_ref,
            ts.format("%Y-%m-%d"),
            ts.format("%H:%M:%S")
        ),
        None => format!("Order Id: {} - Date: {NO_DATE_TIME}", order.cust_ref),
    }
}

fn updated_at(order_json: &str) -> Option<NaiveDateTime> {
    let value: serde_json::Value = serde_json::from_str(order_json).ok()?;
    parse_timestamp(value.get("updated_date_time")?.as_str()?)
}

/// ISO-8601 in the forms the order feed emits. Offsets keep their local wall time.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.naive_local());
    }
    const NAIVE: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_ref(json: &str) -> OrderRef {
        OrderRef {
            cust_ref: "30257".into(),
            order_json: json.into(),
        }
    }

    #[test]
    fn detail_line_splits_date_and_time() {
        let line = detail_line(&order_ref(r#"{"updated_date_time":"2024-11-08T14:05:09"}"#));
        assert_eq!(line, "Order Id: 30257 - Date: 2024-11-08 - 14:05:09");
    }

    #[test]
    fn detail_line_keeps_offset_wall_time() {
        let line = detail_line(&order_ref(r#"{"updated_date_time":"2024-11-08T23:59:00-05:00"}"#));
        assert_eq!(line, "Order Id: 30257 - Date: 2024-11-08 - 23:59:00");
    }

    #[test]
    fn bad_or_missing_timestamp_uses_placeholder() {
        for json in [
            r#"{"updated_date_time":null}"#,
            r#"{"updated_date_time":"last tuesday"}"#,
            r#"{}"#,
            "not json",
        ] {
            assert_eq!(
                detail_line(&order_ref(json)),
                "Order Id: 30257 - Date: No date time available"
            );
        }
    }

    #[test]
    fn signals_detect_first_status_in_detection_order() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 20).unwrap();
        let s = OrderSignals::detect("new or shipped orders on costco today", today);
        assert_eq!(s.status, Some("Shipped"));
        assert_eq!(s.source, Some("Costco"));
        assert_eq!(s.first_date(), Some("2024-11-20"));
    }

    #[test]
    fn rule_order_is_fixed() {
        assert_eq!(
            order_rules().rule_names(),
            vec![
                "status_on_date",
                "default_statuses_on_date",
                "by_source",
                "by_identifier",
                "no_match"
            ]
        );
    }
}
