//! HTTP/REST API layer for Followup.
//!
//! Axum-based JSON API: `POST /chat` plus followup listing and deletion
//! under `/{session_id}/followups`.

pub mod error;
pub mod handlers;
pub mod router;
