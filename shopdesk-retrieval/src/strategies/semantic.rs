//! Product, page, and general questions: vector search, with each hit
//! resolved against fresh table snapshots through a named fallback chain.

use std::collections::HashMap;

use tracing::{debug, info};

use shopdesk_core::config::VectorConfig;
use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{Category, Document, RetrievalResult, VectorHit};
use shopdesk_core::traits::{IRelationalStore, IVectorIndex};

use crate::rules::{Fired, RuleTable};

/// Current catalog contents keyed by id, loaded once per query.
struct Snapshots {
    inventory: HashMap<String, String>,
    products: HashMap<String, String>,
    pages: HashMap<String, String>,
}

impl Snapshots {
    fn load(store: &dyn IRelationalStore) -> ShopdeskResult<Self> {
        Ok(Self {
            inventory: store
                .all_inventory()?
                .into_iter()
                .map(|r| (r.sku, r.inventory_json))
                .collect(),
            products: store
                .all_products()?
                .into_iter()
                .map(|r| (r.product_id, r.product_json))
                .collect(),
            pages: store
                .all_pages()?
                .into_iter()
                .map(|r| (r.page_id, r.page_json))
                .collect(),
        })
    }
}

struct HitContext<'a> {
    search: &'a SemanticSearch<'a>,
    snapshots: &'a Snapshots,
    query: &'a str,
    wants_product: bool,
    id: String,
}

type Resolved = ShopdeskResult<Option<String>>;

fn hit_chain<'a>() -> RuleTable<HitContext<'a>, Resolved> {
    RuleTable::<HitContext<'a>, Resolved>::new("semantic_hit")
        .rule(
            "inventory_snapshot",
            |h| h.query.contains("inventory") && h.snapshots.inventory.contains_key(&h.id),
            |h| Ok(h.snapshots.inventory.get(&h.id).cloned()),
        )
        .rule(
            "product_snapshot",
            |h| h.wants_product && h.snapshots.products.contains_key(&h.id),
            |h| Ok(h.snapshots.products.get(&h.id).cloned()),
        )
        .rule(
            "product_index_lookup",
            |h| h.wants_product && !h.snapshots.products.contains_key(&h.id),
            |h| h.search.lookup_product(&h.id),
        )
        .rule(
            "page_snapshot",
            |h| h.query.contains("page") && h.snapshots.pages.contains_key(&h.id),
            |h| Ok(h.snapshots.pages.get(&h.id).cloned()),
        )
}

/// Similarity search over the embedded catalog.
pub struct SemanticSearch<'a> {
    index: &'a dyn IVectorIndex,
    store: &'a dyn IRelationalStore,
    config: &'a VectorConfig,
}

impl<'a> SemanticSearch<'a> {
    pub fn new(
        index: &'a dyn IVectorIndex,
        store: &'a dyn IRelationalStore,
        config: &'a VectorConfig,
    ) -> Self {
        Self {
            index,
            store,
            config,
        }
    }

    /// Resolve a question into grounding documents. `categories` is the classifier's hint.
    pub fn resolve_semantic(&self, query: &str, categories: &[Category]) -> ShopdeskResult<RetrievalResult> {
        let hits = self.index.search(
            &self.config.collection,
            query,
            self.config.score_threshold,
            self.config.top_k,
        )?;
        debug!(hits = hits.len(), "semantic search");
        if hits.is_empty() {
            return Ok(RetrievalResult::Documents(Vec::new()));
        }

        let snapshots = Snapshots::load(self.store)?;
        let lowered = query.to_lowercase();
        let wants_product = categories.contains(&Category::Product);
        let chain = hit_chain();

        let mut documents = Vec::new();
        for hit in hits {
            let ctx = HitContext {
                search: self,
                snapshots: &snapshots,
                query: &lowered,
                wants_product,
                id: hit_key(&hit),
            };
            match chain.apply(&ctx) {
                Some(Fired { value, rule }) => match value? {
                    Some(content) => documents.push(Document {
                        content,
                        metadata: hit.metadata,
                    }),
                    None => {
                        info!(event = "semantic_hit_dropped", id = %ctx.id, rule, "resolver found no content")
                    }
                },
                None => info!(event = "semantic_hit_dropped", id = %ctx.id, "no resolver matched hit"),
            }
        }
        Ok(RetrievalResult::Documents(documents))
    }

    /// Content of the best `product:<id>` match in the index.
    fn lookup_product(&self, id: &str) -> ShopdeskResult<Option<String>> {
        let hits = self.index.search(
            &self.config.collection,
            &format!("product:{id}"),
            self.config.fallback_score_threshold,
            self.config.fallback_top_k,
        )?;
        Ok(hits.into_iter().next().map(|h| h.content))
    }
}

/// The catalog key a hit was indexed under: its `id` metadata, else the entry id.
fn hit_key(hit: &VectorHit) -> String {
    match hit.metadata.get("id") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => hit.id.clone(),
    }
}
