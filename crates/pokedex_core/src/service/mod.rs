//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate connection, parsing and repository calls into one use case.
//! - Keep callers decoupled from storage details.

pub mod persist_service;
