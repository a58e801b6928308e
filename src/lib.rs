// HTTP Server modules
pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;

// Chat turn pipeline
pub mod conversation;

// Message store library
pub mod message_store;

// LLM abstraction layer
pub mod llm;
