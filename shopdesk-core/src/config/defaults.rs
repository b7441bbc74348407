// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "shopdesk.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EMBEDDING_MAX_RETRIES: u32 = 3;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 1_024;

// --- Vector index ---
pub const DEFAULT_COLLECTION: &str = "catalog";
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_TOP_K: usize = 30;
pub const DEFAULT_FALLBACK_SCORE_THRESHOLD: f64 = 0.1;
pub const DEFAULT_FALLBACK_TOP_K: usize = 10;

// --- Completion ---
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_REPHRASE_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_ANSWER_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_SQL_TEMPERATURE: f32 = 0.4;

// --- Session ---
pub const DEFAULT_MAX_TURNS: usize = 10;
pub const DEFAULT_EVICT_BATCH: usize = 3;
pub const DEFAULT_CONTEXT_TURNS: usize = 3;
pub const DEFAULT_HISTORY_WINDOW: usize = 2;

// --- Retrieval ---
pub const DEFAULT_GENERATED_SQL_FALLBACK: bool = false;
pub const DEFAULT_GENERATED_SQL_ROW_LIMIT: usize = 200;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 256;
