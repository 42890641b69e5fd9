//! Core domain logic for Leadbook.
//! This crate is the single source of truth for lead business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use logging::{default_log_level, init_logging};
pub use model::lead::{CourseCatalog, Lead, LeadCandidate};
pub use repo::kv_store::{KeyValueStore, KvError, KvResult, SqliteKeyValueStore};
pub use repo::lead_store::{KvLeadStore, LeadStore, StoreError, StoreResult, LEADS_SLOT_KEY};
pub use service::lead_service::{
    IdSource, LeadService, LeadServiceError, TimestampIdSource,
};
pub use validate::{
    validate, CourseError, EmailError, FieldErrors, NameError, NormalizedLead, PhoneError,
    ValidationRejection,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
