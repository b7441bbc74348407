//! # shopdesk-response
//!
//! Turns a retrieval result into the reply text. Counts and stock rows are
//! rendered as fixed bullet lists; documents are handed to a generation call
//! together with the recent conversation history.

pub mod assembler;
pub mod prompt;
pub mod render;

pub use assembler::{Answer, ResponseAssembler};
pub use render::{render_inventory, render_orders, render_structured};
