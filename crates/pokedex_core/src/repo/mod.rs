//! Repository layer: SQL statement shapes and positional binding.
//!
//! # Responsibility
//! - Isolate SQL text from the persistence orchestration.
//!
//! # Invariants
//! - Identifiers come from a validated `InsertTarget`; values are always bound.

pub mod pokemon_repo;
