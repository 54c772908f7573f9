//! Infrastructure layer for Followup.
//!
//! Contains implementations of the ports defined in `followup-core`:
//! SQLite session storage, the OpenAI-compatible model endpoint client,
//! and configuration file loading.

pub mod config;
pub mod llm;
pub mod sqlite;
