mod completion;
mod embedding;
mod history;
mod relational_store;
mod vector;

pub use completion::ICompletionProvider;
pub use embedding::IEmbeddingProvider;
pub use history::IHistoryStore;
pub use relational_store::IRelationalStore;
pub use vector::{IVectorIndex, IVectorStorage};
