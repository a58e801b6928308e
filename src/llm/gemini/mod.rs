//! Cloud generative provider implementation
//!
//! This module provides a client for Google's generative language
//! `generateContent` endpoint, implementing the LlmProvider trait.

pub mod client;
pub mod mapper;
pub mod types;

// Re-export main types for convenience
pub use client::{GeminiClient, FALLBACK_REPLY};
