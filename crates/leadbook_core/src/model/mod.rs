//! Domain model for captured leads.
//!
//! # Responsibility
//! - Define the canonical lead record and its raw form-input counterpart.
//! - Define the closed course catalog the validator checks against.
//!
//! # Invariants
//! - Every stored lead is identified by a stable string id.
//! - Optional fields are kept as empty strings once a lead exists.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod lead;
