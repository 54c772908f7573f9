//! Shared domain types for Followup.
//!
//! This crate contains the types passed between the layers of the proxy:
//! persisted exchanges, LLM transcript messages, configuration, and the
//! error enums every layer speaks.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
