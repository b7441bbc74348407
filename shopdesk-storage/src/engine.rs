//! StorageEngine: owns the ConnectionPool and implements the relational,
//! vector, and history collaborator traits.

use std::path::Path;

use rusqlite::Connection;

use shopdesk_core::config::StorageConfig;
use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{
    ChatMessage, InventoryRow, OrderRef, OrderRow, PageRow, ProductRow, VectorHit,
};
use shopdesk_core::traits::{IHistoryStore, IRelationalStore, IVectorStorage};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{catalog_ops, history_ops, order_ops, read_only, vector_ops};

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine with default pool settings.
    pub fn open(path: &Path) -> ShopdeskResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> ShopdeskResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory engine (for testing). All reads go through the writer.
    pub fn open_in_memory() -> ShopdeskResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> ShopdeskResult<()> {
        self.pool.writer.with_conn(migrations::run_migrations)
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> ShopdeskResult<u32> {
        self.with_reader(migrations::current_version)
    }

    /// Run a read on the pool when file-backed, on the writer otherwise.
    fn with_reader<F, T>(&self, f: F) -> ShopdeskResult<T>
    where
        F: FnOnce(&Connection) -> ShopdeskResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn(f),
        }
    }
}

impl IRelationalStore for StorageEngine {
    fn upsert_inventory(&self, row: &InventoryRow) -> ShopdeskResult<()> {
        self.pool
            .writer
            .with_conn(|conn| catalog_ops::upsert_inventory(conn, row))
    }

    fn upsert_order(&self, row: &OrderRow) -> ShopdeskResult<()> {
        self.pool
            .writer
            .with_conn(|conn| order_ops::upsert_order(conn, row))
    }

    fn upsert_product(&self, row: &ProductRow) -> ShopdeskResult<()> {
        self.pool
            .writer
            .with_conn(|conn| catalog_ops::upsert_product(conn, row))
    }

    fn upsert_page(&self, row: &PageRow) -> ShopdeskResult<()> {
        self.pool
            .writer
            .with_conn(|conn| catalog_ops::upsert_page(conn, row))
    }

    fn orders_by_status_and_date(&self, status: &str, date: &str) -> ShopdeskResult<Vec<OrderRef>> {
        self.with_reader(|conn| order_ops::orders_by_status_and_date(conn, status, date))
    }

    fn orders_by_source(
        &self,
        source: &str,
        date: Option<&str>,
        status: &str,
    ) -> ShopdeskResult<Vec<OrderRef>> {
        self.with_reader(|conn| order_ops::orders_by_source(conn, source, date, status))
    }

    fn orders_by_source_only(&self, source: &str) -> ShopdeskResult<Vec<OrderRef>> {
        self.with_reader(|conn| order_ops::orders_by_source_only(conn, source))
    }

    fn orders_by_identifier(&self, identifier: &str) -> ShopdeskResult<Vec<OrderRow>> {
        self.with_reader(|conn| order_ops::orders_by_identifier(conn, identifier))
    }

    fn inventory_by_category(&self, category: &str) -> ShopdeskResult<Vec<InventoryRow>> {
        self.with_reader(|conn| catalog_ops::inventory_by_category(conn, category))
    }

    fn all_inventory(&self) -> ShopdeskResult<Vec<InventoryRow>> {
        self.with_reader(catalog_ops::all_inventory)
    }

    fn all_products(&self) -> ShopdeskResult<Vec<ProductRow>> {
        self.with_reader(catalog_ops::all_products)
    }

    fn all_pages(&self) -> ShopdeskResult<Vec<PageRow>> {
        self.with_reader(catalog_ops::all_pages)
    }

    fn run_read_only(
        &self,
        statement: &str,
        row_limit: usize,
    ) -> ShopdeskResult<Vec<Vec<serde_json::Value>>> {
        self.with_reader(|conn| read_only::run_read_only(conn, statement, row_limit))
    }
}

impl IVectorStorage for StorageEngine {
    fn upsert_vector(
        &self,
        collection: &str,
        id: &str,
        embedding: &[f32],
        content: &str,
        metadata: &serde_json::Map<String, serde_json::Value>,
    ) -> ShopdeskResult<()> {
        self.pool.writer.with_conn(|conn| {
            vector_ops::upsert_vector(conn, collection, id, embedding, content, metadata)
        })
    }

    fn search_vectors(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
    ) -> ShopdeskResult<Vec<VectorHit>> {
        self.with_reader(|conn| vector_ops::search_vectors(conn, collection, embedding, limit))
    }

    fn vector_count(&self, collection: &str) -> ShopdeskResult<usize> {
        self.with_reader(|conn| vector_ops::vector_count(conn, collection))
    }
}

impl IHistoryStore for StorageEngine {
    fn append(&self, session_id: &str, message: &ChatMessage) -> ShopdeskResult<()> {
        self.pool
            .writer
            .with_conn(|conn| history_ops::append_message(conn, session_id, message))
    }

    fn get(&self, session_id: &str) -> ShopdeskResult<Vec<ChatMessage>> {
        self.with_reader(|conn| history_ops::get_messages(conn, session_id))
    }
}
