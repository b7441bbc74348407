pub mod category;
pub mod classification;
pub mod conversation_turn;
pub mod records;
pub mod retrieval_result;

pub use category::Category;
pub use classification::Classification;
pub use conversation_turn::ConversationTurn;
pub use records::{
    ChatMessage, InventoryRow, OrderRef, OrderRow, PageRow, ProductRow, Role, VectorHit,
};
pub use retrieval_result::{
    Document, OrderResolution, Quantity, RetrievalResult, StockRow, StructuredCount,
};
