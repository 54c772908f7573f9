//! Chat session persistence and orchestration.
//!
//! - `SessionRepository`: the session/exchange store contract
//! - `ChatService`: the ensure -> read -> invoke -> write pipeline
//! - `transcript`: assembly of the role-tagged transcript sent to the model

pub mod repository;
pub mod service;
pub mod transcript;
