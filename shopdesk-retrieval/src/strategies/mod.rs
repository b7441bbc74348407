//! The three retrieval strategies. Each resolves one query into one result shape.

pub mod inventory;
pub mod order;
pub mod semantic;

pub use inventory::{resolve_inventory, resolve_inventory_traced, STOCK_KEYWORDS};
pub use order::{resolve_order, resolve_order_on, OrderSignals};
pub use semantic::SemanticSearch;
