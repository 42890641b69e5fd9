//! Lead use-case service.
//!
//! # Responsibility
//! - Tie validation, id minting and persistence into the add/list/delete
//!   flows consumed by the UI.
//! - Keep the validator pure by owning the id source.
//!
//! # Invariants
//! - Nothing is persisted when validation rejects a candidate.
//! - Minted ids are unique per process and ordered roughly by creation
//!   time.

use crate::model::lead::{CourseCatalog, Lead, LeadCandidate};
use crate::repo::lead_store::{LeadStore, StoreError, StoreResult};
use crate::validate::{validate, NormalizedLead, ValidationRejection};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Mints one unique string id per call.
pub trait IdSource {
    fn next_id(&self) -> String;
}

/// Epoch-millisecond ids with a process-wide counter suffix.
///
/// The counter keeps ids distinct even when two leads are created within
/// the same millisecond; sorting by id stays roughly chronological.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampIdSource;

impl IdSource for TimestampIdSource {
    fn next_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        format!("{millis}-{sequence}")
    }
}

/// Service error for lead use-cases.
#[derive(Debug)]
pub enum LeadServiceError {
    /// Candidate failed validation; nothing was persisted.
    Rejected(ValidationRejection),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for LeadServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(rejection) => write!(f, "{rejection}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LeadServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationRejection> for LeadServiceError {
    fn from(value: ValidationRejection) -> Self {
        Self::Rejected(value)
    }
}

impl From<StoreError> for LeadServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case facade over the lead store.
pub struct LeadService<S: LeadStore, I: IdSource = TimestampIdSource> {
    store: S,
    catalog: CourseCatalog,
    ids: I,
}

impl<S: LeadStore> LeadService<S> {
    /// Creates a service with the default catalog and id scheme.
    pub fn new(store: S) -> Self {
        Self::with_catalog(store, CourseCatalog::default())
    }

    /// Creates a service over a deployment-specific course catalog.
    pub fn with_catalog(store: S, catalog: CourseCatalog) -> Self {
        Self {
            store,
            catalog,
            ids: TimestampIdSource,
        }
    }
}

impl<S: LeadStore, I: IdSource> LeadService<S, I> {
    /// Creates a service with a caller-provided id source.
    pub fn with_id_source(store: S, catalog: CourseCatalog, ids: I) -> Self {
        Self {
            store,
            catalog,
            ids,
        }
    }

    /// Returns the catalog this service validates against.
    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// Validates one candidate without persisting anything.
    pub fn check_candidate(
        &self,
        candidate: &LeadCandidate,
    ) -> Result<NormalizedLead, ValidationRejection> {
        validate(candidate, &self.catalog)
    }

    /// Validates one candidate, mints an id and persists the lead.
    ///
    /// Returns the stored record on success. On a store failure the lead
    /// must not be assumed saved.
    pub fn create_lead(&self, candidate: &LeadCandidate) -> Result<Lead, LeadServiceError> {
        let normalized = validate(candidate, &self.catalog)?;
        let lead = normalized.into_lead(self.ids.next_id());
        self.store.append(&lead)?;
        info!("event=lead_create module=service status=ok id={}", lead.id);
        Ok(lead)
    }

    /// Returns the stored collection, newest-first.
    pub fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        self.store.get_all()
    }

    /// Removes one lead by id. Removing an unknown id is a no-op.
    pub fn delete_lead(&self, id: &str) -> StoreResult<()> {
        self.store.remove(id)?;
        info!("event=lead_delete module=service status=ok id={id}");
        Ok(())
    }
}
