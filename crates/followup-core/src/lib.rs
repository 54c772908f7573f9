//! Business logic and port definitions for Followup.
//!
//! This crate defines the "ports" (the session store and model endpoint
//! traits) that the infrastructure layer implements, plus the chat
//! orchestration that drives them. It depends only on `followup-types` --
//! never on `followup-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
