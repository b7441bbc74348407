//! # shopdesk-completion
//!
//! `ICompletionProvider` over an OpenAI-compatible `/chat/completions`
//! endpoint. Requests are blocking and bounded by the configured timeout.

mod chat_client;
mod wire;

pub use chat_client::ChatCompletionClient;
pub use wire::{ChatRequest, ChatResponse, WireMessage};
