//! Domain model for the persisted record.
//!
//! # Responsibility
//! - Define the canonical record shape used by serialization and persistence.
//!
//! # Invariants
//! - Field values are type-checked before they are stored.

pub mod pokemon;
