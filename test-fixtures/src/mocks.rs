//! Collaborator doubles: a completion provider that plays back a script and a
//! relational store wrapper that records every call it forwards.

use std::collections::VecDeque;
use std::sync::Mutex;

use shopdesk_core::errors::{CompletionError, ShopdeskResult};
use shopdesk_core::models::{ChatMessage, InventoryRow, OrderRef, OrderRow, PageRow, ProductRow};
use shopdesk_core::traits::{ICompletionProvider, IRelationalStore};

enum Step {
    Reply(String),
    Fail,
}

/// One request seen by `ScriptedCompletion`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCall {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Returns queued replies in order, then `fallback` (or an error) once the queue runs dry.
#[derive(Default)]
pub struct ScriptedCompletion {
    steps: Mutex<VecDeque<Step>>,
    fallback: Option<String>,
    calls: Mutex<Vec<CompletionCall>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request with `reply`.
    pub fn repeating(reply: impl Into<String>) -> Self {
        Self {
            fallback: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Queue a successful reply.
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(Step::Reply(text.into()));
        self
    }

    /// Queue a failed request.
    pub fn fail(self) -> Self {
        self.push(Step::Fail);
        self
    }

    fn push(&self, step: Step) {
        self.steps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(step);
    }

    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl ICompletionProvider for ScriptedCompletion {
    fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> ShopdeskResult<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(CompletionCall {
                system_prompt: system_prompt.to_string(),
                messages: messages.to_vec(),
                temperature,
            });
        let next = self.steps.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        match next {
            Some(Step::Reply(text)) => Ok(text),
            Some(Step::Fail) => Err(CompletionError::RequestFailed {
                reason: "scripted failure".to_string(),
            }
            .into()),
            None => self.fallback.clone().ok_or_else(|| {
                CompletionError::RequestFailed {
                    reason: "script exhausted".to_string(),
                }
                .into()
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A read against the catalog, as seen by `RecordingStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    StatusAndDate { status: String, date: String },
    Source { source: String, date: Option<String>, status: String },
    SourceOnly { source: String },
    Identifier { identifier: String },
    InventoryByCategory { category: String },
    AllInventory,
    AllProducts,
    AllPages,
    ReadOnly { statement: String },
}

/// Forwards to `inner`, logging each read. Upserts are forwarded unlogged.
pub struct RecordingStore<S: IRelationalStore> {
    inner: S,
    calls: Mutex<Vec<StoreCall>>,
}

impl<S: IRelationalStore> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

impl<S: IRelationalStore> IRelationalStore for RecordingStore<S> {
    fn upsert_inventory(&self, row: &InventoryRow) -> ShopdeskResult<()> {
        self.inner.upsert_inventory(row)
    }
    fn upsert_order(&self, row: &OrderRow) -> ShopdeskResult<()> {
        self.inner.upsert_order(row)
    }
    fn upsert_product(&self, row: &ProductRow) -> ShopdeskResult<()> {
        self.inner.upsert_product(row)
    }
    fn upsert_page(&self, row: &PageRow) -> ShopdeskResult<()> {
        self.inner.upsert_page(row)
    }

    fn orders_by_status_and_date(&self, status: &str, date: &str) -> ShopdeskResult<Vec<OrderRef>> {
        self.record(StoreCall::StatusAndDate {
            status: status.to_string(),
            date: date.to_string(),
        });
        self.inner.orders_by_status_and_date(status, date)
    }

    fn orders_by_source(
        &self,
        source: &str,
        date: Option<&str>,
        status: &str,
    ) -> ShopdeskResult<Vec<OrderRef>> {
        self.record(StoreCall::Source {
            source: source.to_string(),
            date: date.map(str::to_string),
            status: status.to_string(),
        });
        self.inner.orders_by_source(source, date, status)
    }

    fn orders_by_source_only(&self, source: &str) -> ShopdeskResult<Vec<OrderRef>> {
        self.record(StoreCall::SourceOnly {
            source: source.to_string(),
        });
        self.inner.orders_by_source_only(source)
    }

    fn orders_by_identifier(&self, identifier: &str) -> ShopdeskResult<Vec<OrderRow>> {
        self.record(StoreCall::Identifier {
            identifier: identifier.to_string(),
        });
        self.inner.orders_by_identifier(identifier)
    }

    fn inventory_by_category(&self, category: &str) -> ShopdeskResult<Vec<InventoryRow>> {
        self.record(StoreCall::InventoryByCategory {
            category: category.to_string(),
        });
        self.inner.inventory_by_category(category)
    }

    fn all_inventory(&self) -> ShopdeskResult<Vec<InventoryRow>> {
        self.record(StoreCall::AllInventory);
        self.inner.all_inventory()
    }

    fn all_products(&self) -> ShopdeskResult<Vec<ProductRow>> {
        self.record(StoreCall::AllProducts);
        self.inner.all_products()
    }

    fn all_pages(&self) -> ShopdeskResult<Vec<PageRow>> {
        self.record(StoreCall::AllPages);
        self.inner.all_pages()
    }

    fn run_read_only(
        &self,
        statement: &str,
        row_limit: usize,
    ) -> ShopdeskResult<Vec<Vec<serde_json::Value>>> {
        self.record(StoreCall::ReadOnly {
            statement: statement.to_string(),
        });
        self.inner.run_read_only(statement, row_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_plays_in_order_then_errors() {
        let c = ScriptedCompletion::new().reply("one").fail().reply("two");
        assert_eq!(c.complete("", &[], 0.0).unwrap(), "one");
        assert!(c.complete("", &[], 0.0).is_err());
        assert_eq!(c.complete("", &[], 0.0).unwrap(), "two");
        assert!(c.complete("", &[], 0.0).is_err());
        assert_eq!(c.call_count(), 4);
    }

    #[test]
    fn repeating_never_runs_dry() {
        let c = ScriptedCompletion::repeating("same");
        for _ in 0..3 {
            assert_eq!(c.complete("sys", &[ChatMessage::human("q")], 0.3).unwrap(), "same");
        }
        let calls = c.calls();
        assert_eq!(calls[0].system_prompt, "sys");
        assert_eq!(calls[0].messages, vec![ChatMessage::human("q")]);
    }
}
