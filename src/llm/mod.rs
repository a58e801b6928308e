//! LLM Abstraction Layer
//!
//! This module provides a unified interface for sending a conversation to
//! local OpenAI-compatible chat servers and to Google's generative language
//! API, and for classifying their failures.

pub mod core;
pub mod gemini;
pub mod http;
pub mod local;

// Re-export commonly used types
pub use core::{
    config::{ApiKey, ProviderConfig, ProviderKind, ProviderRegistry},
    error::LlmError,
    provider::{LlmProvider, ProviderAdapter, DEFAULT_REQUEST_TIMEOUT},
    types::{ConversationTurn, TurnRole},
};
