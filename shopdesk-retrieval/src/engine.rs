//! RetrievalEngine: picks exactly one strategy per classified query and runs it.
//!
//! Precedence: order > inventory > semantic (product, page, everything else).

use std::fmt;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, info_span};

use shopdesk_core::config::{RetrievalConfig, ShopdeskConfig, VectorConfig};
use shopdesk_core::constants::{NOT_AVAILABLE, ORDER_SOURCES};
use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{Category, Classification, Document, RetrievalResult};
use shopdesk_core::traits::{ICompletionProvider, IRelationalStore, IVectorIndex};

use crate::generated_sql::GeneratedQueryRunner;
use crate::rules::RuleTable;
use crate::strategies::{order, resolve_inventory_traced, SemanticSearch, STOCK_KEYWORDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Order,
    Inventory,
    Semantic,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Inventory => "inventory",
            Self::Semantic => "semantic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one query resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Retrieval {
    pub strategy: Strategy,
    /// Name of the strategy rule that produced the result.
    pub rule: &'static str,
    pub result: RetrievalResult,
    pub is_identifier_lookup: bool,
    pub found: bool,
}

struct Dispatch<'a> {
    classification: &'a Classification,
    lowered: String,
}

impl Dispatch<'_> {
    fn mentions_any<S: AsRef<str>>(&self, words: &[S]) -> bool {
        words
            .iter()
            .any(|w| self.lowered.contains(&w.as_ref().to_lowercase()))
    }
}

fn dispatch_rules<'a>() -> RuleTable<Dispatch<'a>, Strategy> {
    RuleTable::<Dispatch<'a>, Strategy>::new("dispatch")
        .rule(
            "order",
            |d| d.classification.has(Category::Order) || d.mentions_any(&ORDER_SOURCES),
            |_| Strategy::Order,
        )
        .rule(
            "inventory",
            |d| d.classification.has(Category::Inventory) && d.mentions_any(&STOCK_KEYWORDS),
            |_| Strategy::Inventory,
        )
        .rule("semantic", |_| true, |_| Strategy::Semantic)
}

/// The single strategy a classification dispatches to.
pub fn select_strategy(classification: &Classification) -> Strategy {
    let dispatch = Dispatch {
        classification,
        lowered: classification.rephrased_query.to_lowercase(),
    };
    dispatch_rules()
        .apply(&dispatch)
        .map_or(Strategy::Semantic, |fired| fired.value)
}

pub struct RetrievalEngine {
    store: Arc<dyn IRelationalStore>,
    index: Arc<dyn IVectorIndex>,
    completion: Arc<dyn ICompletionProvider>,
    vector: VectorConfig,
    retrieval: RetrievalConfig,
    sql_temperature: f32,
}

impl RetrievalEngine {
    pub fn new(
        store: Arc<dyn IRelationalStore>,
        index: Arc<dyn IVectorIndex>,
        completion: Arc<dyn ICompletionProvider>,
        config: &ShopdeskConfig,
    ) -> Self {
        Self {
            store,
            index,
            completion,
            vector: config.vector.clone(),
            retrieval: config.retrieval.clone(),
            sql_temperature: config.completion.sql_temperature,
        }
    }

    pub fn retrieve(&self, classification: &Classification) -> ShopdeskResult<Retrieval> {
        let _span = info_span!("shopdesk.retrieve").entered();
        let strategy = select_strategy(classification);
        info!(
            event = "strategy_selected",
            strategy = strategy.as_str(),
            categories = ?classification.categories,
            "strategy selected"
        );

        let query = classification.rephrased_query.as_str();
        match strategy {
            Strategy::Order => self.retrieve_orders(query),
            Strategy::Inventory => {
                let fired = resolve_inventory_traced(self.store.as_ref(), query)?;
                let found = match &fired.value {
                    RetrievalResult::Records(rows) => rows.iter().any(|r| r.sku != NOT_AVAILABLE),
                    _ => false,
                };
                Ok(Retrieval {
                    strategy,
                    rule: fired.rule,
                    result: fired.value,
                    is_identifier_lookup: false,
                    found,
                })
            }
            Strategy::Semantic => {
                let search = SemanticSearch::new(self.index.as_ref(), self.store.as_ref(), &self.vector);
                let result = search.resolve_semantic(query, &classification.categories)?;
                let found = !result.is_empty();
                Ok(Retrieval {
                    strategy,
                    rule: "semantic_chain",
                    result,
                    is_identifier_lookup: false,
                    found,
                })
            }
        }
    }

    fn retrieve_orders(&self, query: &str) -> ShopdeskResult<Retrieval> {
        let fired = order::resolve_order_on(self.store.as_ref(), query, Local::now().date_naive())?;
        if fired.rule == "no_match" && self.retrieval.generated_sql_fallback {
            let document = self.run_generated_query(query)?;
            return Ok(Retrieval {
                strategy: Strategy::Order,
                rule: "generated_sql",
                result: RetrievalResult::Documents(vec![document]),
                is_identifier_lookup: false,
                found: true,
            });
        }
        Ok(Retrieval {
            strategy: Strategy::Order,
            rule: fired.rule,
            is_identifier_lookup: fired.value.is_identifier_lookup,
            found: fired.value.found,
            result: fired.value.result,
        })
    }

    /// Answer an order question through model-generated SQL.
    pub fn run_generated_query(&self, question: &str) -> ShopdeskResult<Document> {
        GeneratedQueryRunner::new(
            self.completion.as_ref(),
            self.store.as_ref(),
            self.sql_temperature,
            self.retrieval.generated_sql_row_limit,
        )
        .run(question)
    }
}
