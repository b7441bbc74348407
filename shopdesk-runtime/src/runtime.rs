//! ShopdeskRuntime: owns every engine and runs one question through
//! classify → retrieve → assemble.
//!
//! The runtime can be held as a singleton behind `OnceLock`, set once via
//! `initialize()` (or `install()`) and fetched with `get()`.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;

use tracing::info;

use shopdesk_completion::ChatCompletionClient;
use shopdesk_core::config::ShopdeskConfig;
use shopdesk_core::errors::{CompletionError, ShopdeskError, ShopdeskResult};
use shopdesk_core::models::{ChatMessage, Document};
use shopdesk_core::traits::ICompletionProvider;
use shopdesk_embeddings::{index_catalog, EmbeddingEngine, IndexReport, VectorIndex};
use shopdesk_observability::tracing_setup::events;
use shopdesk_observability::{query_span, QueryLog, QueryLogEntry, QueryOutcome};
use shopdesk_response::ResponseAssembler;
use shopdesk_retrieval::{QueryClassifier, Retrieval, RetrievalEngine};
use shopdesk_session::{session_id_for_channel, SessionManager};
use shopdesk_storage::{load_feed, CatalogKind, LoadReport, StorageEngine};

/// Global singleton.
static RUNTIME: OnceLock<Arc<ShopdeskRuntime>> = OnceLock::new();

/// Options for initializing the runtime.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Path to the SQLite database. If None, uses in-memory.
    pub db_path: Option<PathBuf>,
    /// TOML configuration string. If None, uses defaults.
    pub config_toml: Option<String>,
}

/// The answer to one question plus how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub session_id: String,
    pub text: String,
    pub retrieval: Retrieval,
    pub generated: bool,
}

pub struct ShopdeskRuntime {
    pub storage: Arc<StorageEngine>,
    pub index: Arc<VectorIndex<Arc<StorageEngine>>>,
    pub sessions: SessionManager,
    classifier: QueryClassifier,
    retrieval: RetrievalEngine,
    assembler: ResponseAssembler,
    pub query_log: Mutex<QueryLog>,
    pub config: ShopdeskConfig,
}

impl ShopdeskRuntime {
    /// Build a runtime talking to the configured chat completion endpoint.
    pub fn new(opts: RuntimeOptions) -> ShopdeskResult<Self> {
        let config = parse_config(&opts)?;
        let completion = Arc::new(ChatCompletionClient::from_config(&config.completion)?);
        Self::build(opts, config, completion)
    }

    /// Build a runtime around an existing completion provider.
    pub fn with_completion(
        opts: RuntimeOptions,
        completion: Arc<dyn ICompletionProvider>,
    ) -> ShopdeskResult<Self> {
        let config = parse_config(&opts)?;
        Self::build(opts, config, completion)
    }

    /// Build a runtime for catalog maintenance (loading, reindexing) without
    /// completion credentials. Questions fail with `MissingApiKey`.
    pub fn catalog_only(opts: RuntimeOptions) -> ShopdeskResult<Self> {
        let config = parse_config(&opts)?;
        let completion = Arc::new(NoCompletion {
            env_var: config.completion.api_key_env.clone(),
        });
        Self::build(opts, config, completion)
    }

    fn build(
        opts: RuntimeOptions,
        config: ShopdeskConfig,
        completion: Arc<dyn ICompletionProvider>,
    ) -> ShopdeskResult<Self> {
        let storage = Arc::new(match &opts.db_path {
            Some(path) => StorageEngine::open_with_config(path, &config.storage)?,
            None => StorageEngine::open_in_memory()?,
        });
        let index = Arc::new(VectorIndex::new(
            Arc::clone(&storage),
            EmbeddingEngine::new(&config.embedding),
        ));

        let provider = completion.name().to_string();
        let sessions = SessionManager::from_config(&config.session);
        let classifier = QueryClassifier::new(
            completion.clone(),
            config.session.context_turns,
            config.completion.rephrase_temperature,
        );
        let retrieval = RetrievalEngine::new(storage.clone(), index.clone(), completion.clone(), &config);
        let assembler = ResponseAssembler::from_config(completion, storage.clone(), &config);
        let query_log = Mutex::new(QueryLog::with_capacity(config.observability.query_log_capacity));

        info!(
            db = ?opts.db_path,
            completion = %provider,
            "shopdesk runtime initialized"
        );
        Ok(Self {
            storage,
            index,
            sessions,
            classifier,
            retrieval,
            assembler,
            query_log,
            config,
        })
    }

    /// Answer one question from `channel`. The channel determines the session.
    pub fn handle_query(&self, channel: &str, text: &str) -> ShopdeskResult<Reply> {
        let session_id = session_id_for_channel(channel);
        let span = query_span!(session_id, channel);
        let _guard = span.enter();

        let started = Instant::now();
        let outcome = self.run_pipeline(&session_id, text);
        let latency = started.elapsed();
        let latency_ms = latency.as_millis() as u64;

        let entry = match &outcome {
            Ok(reply) => {
                let r = &reply.retrieval;
                events::query_answered(&session_id, r.strategy.as_str(), r.rule, r.found, latency_ms);
                QueryLogEntry::new(
                    &session_id,
                    text,
                    Some(r.strategy.to_string()),
                    Some(r.rule.to_string()),
                    latency,
                    if r.found {
                        QueryOutcome::Found
                    } else {
                        QueryOutcome::NotFound
                    },
                )
            }
            Err(e) => {
                events::query_failed(&session_id, e, latency_ms);
                QueryLogEntry::new(&session_id, text, None, None, latency, QueryOutcome::Failed)
            }
        };
        self.query_log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record(entry);
        outcome
    }

    /// The reply text, or the user-facing error text when the pipeline fails.
    pub fn answer_or_apology(&self, channel: &str, text: &str) -> String {
        match self.handle_query(channel, text) {
            Ok(reply) => reply.text,
            Err(e) => e.user_message(),
        }
    }

    fn run_pipeline(&self, session_id: &str, text: &str) -> ShopdeskResult<Reply> {
        let classification = self.classifier.classify(text, session_id, &self.sessions)?;
        let retrieval = self.retrieval.retrieve(&classification)?;
        let answer = self.assembler.assemble(session_id, text, &retrieval.result)?;
        Ok(Reply {
            session_id: session_id.to_string(),
            text: answer.text,
            retrieval,
            generated: answer.generated,
        })
    }

    /// Upsert one feed into the catalog tables.
    pub fn load_feed(&self, kind: CatalogKind, records: &[serde_json::Value]) -> ShopdeskResult<LoadReport> {
        let report = load_feed(self.storage.as_ref(), kind, records)?;
        events::catalog_loaded(kind.as_str(), report.loaded, report.skipped);
        Ok(report)
    }

    /// Re-embed the catalog into the configured collection.
    pub fn reindex(&self) -> ShopdeskResult<IndexReport> {
        let collection = &self.config.vector.collection;
        let report = index_catalog(self.storage.as_ref(), &*self.index, collection)?;
        events::catalog_indexed(collection, report.total());
        Ok(report)
    }

    /// Answer an order question through model-written SQL, bypassing dispatch.
    pub fn generated_query(&self, question: &str) -> ShopdeskResult<Document> {
        self.retrieval.run_generated_query(question)
    }
}

struct NoCompletion {
    env_var: String,
}

impl ICompletionProvider for NoCompletion {
    fn complete(&self, _system_prompt: &str, _messages: &[ChatMessage], _temperature: f32) -> ShopdeskResult<String> {
        Err(CompletionError::MissingApiKey {
            env_var: self.env_var.clone(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "none"
    }
}

fn parse_config(opts: &RuntimeOptions) -> ShopdeskResult<ShopdeskConfig> {
    match &opts.config_toml {
        Some(toml_str) => {
            ShopdeskConfig::from_toml(toml_str).map_err(|e| ShopdeskError::ConfigError(e.to_string()))
        }
        None => Ok(ShopdeskConfig::default()),
    }
}

/// Build the runtime from `opts` and install it as the global singleton.
pub fn initialize(opts: RuntimeOptions) -> ShopdeskResult<Arc<ShopdeskRuntime>> {
    install(ShopdeskRuntime::new(opts)?)
}

/// Install an already-built runtime as the global singleton.
///
/// Returns an error if one is already installed.
pub fn install(runtime: ShopdeskRuntime) -> ShopdeskResult<Arc<ShopdeskRuntime>> {
    let runtime = Arc::new(runtime);
    RUNTIME
        .set(runtime.clone())
        .map_err(|_| ShopdeskError::ConfigError("ShopdeskRuntime already initialized".to_string()))?;
    Ok(runtime)
}

/// Get the global runtime. Errors if not yet initialized.
pub fn get() -> ShopdeskResult<Arc<ShopdeskRuntime>> {
    RUNTIME
        .get()
        .cloned()
        .ok_or_else(|| ShopdeskError::ConfigError("ShopdeskRuntime not initialized".to_string()))
}

pub fn is_initialized() -> bool {
    RUNTIME.get().is_some()
}
