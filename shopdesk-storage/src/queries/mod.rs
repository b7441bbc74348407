pub mod catalog_ops;
pub mod history_ops;
pub mod order_ops;
pub mod read_only;
pub mod vector_ops;
