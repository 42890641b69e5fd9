//! Persistence layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the durable key-value backend seam the core persists through.
//! - Own the lead collection slot and its read-modify-write semantics.
//!
//! # Invariants
//! - Every collection mutation is a whole-slot read-modify-write cycle.
//! - Backend transport errors and corrupt payloads are reported as
//!   distinct semantic errors.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod kv_store;
pub mod lead_store;
