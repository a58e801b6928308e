//! Local chat provider implementation
//!
//! Speaks the OpenAI-compatible chat completions protocol exposed by local
//! model servers such as LM Studio.

pub mod client;
pub mod mapper;
pub mod types;

pub use client::LocalChatClient;
