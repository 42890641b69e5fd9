//! Lead collection store over the key-value backend.
//!
//! # Responsibility
//! - Own the serialized lead collection slot and its ordering.
//! - Keep every mutation a whole-collection read-modify-write cycle.
//!
//! # Invariants
//! - New leads are prepended; listings stay newest-first.
//! - An absent slot reads as an empty collection, never as an error.
//! - Corrupt payloads are reported, not silently replaced: the read path
//!   never writes, so the stored bytes stay available for diagnostics.

use crate::model::lead::Lead;
use crate::repo::kv_store::{KeyValueStore, KvError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key holding the serialized lead collection.
pub const LEADS_SLOT_KEY: &str = "leads";

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failure for lead collection operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backend read/write failed; a failed write must not be assumed saved.
    Persistence(KvError),
    /// Stored payload did not parse as a lead collection.
    CorruptState(serde_json::Error),
    /// Collection could not be serialized for writing.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persistence(err) => write!(f, "{err}"),
            Self::CorruptState(err) => write!(f, "stored lead collection is corrupt: {err}"),
            Self::Encode(err) => write!(f, "lead collection could not be encoded: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            Self::CorruptState(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<KvError> for StoreError {
    fn from(value: KvError) -> Self {
        Self::Persistence(value)
    }
}

/// Store contract for the durable lead collection.
///
/// No partial update exists on purpose: the collection is small and
/// single-user, and whole-slot rewrites cannot leave divergent partial
/// state behind.
pub trait LeadStore {
    /// Returns the full collection, newest-first.
    fn get_all(&self) -> StoreResult<Vec<Lead>>;
    /// Prepends one lead and persists the whole collection.
    fn append(&self, lead: &Lead) -> StoreResult<()>;
    /// Removes the lead with the given id. Unknown ids are a no-op.
    fn remove(&self, id: &str) -> StoreResult<()>;
}

/// Lead store over any durable key-value backend.
pub struct KvLeadStore<B: KeyValueStore> {
    backend: B,
}

impl<B: KeyValueStore> KvLeadStore<B> {
    /// Creates a store persisting through the provided backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn write_all(&self, leads: &[Lead]) -> StoreResult<()> {
        let payload = serde_json::to_string(leads).map_err(StoreError::Encode)?;
        self.backend.set(LEADS_SLOT_KEY, &payload)?;
        Ok(())
    }
}

impl<B: KeyValueStore> LeadStore for KvLeadStore<B> {
    fn get_all(&self) -> StoreResult<Vec<Lead>> {
        match self.backend.get(LEADS_SLOT_KEY)? {
            Some(payload) => serde_json::from_str(&payload).map_err(StoreError::CorruptState),
            None => Ok(Vec::new()),
        }
    }

    fn append(&self, lead: &Lead) -> StoreResult<()> {
        let mut leads = self.get_all()?;
        leads.insert(0, lead.clone());
        self.write_all(&leads)
    }

    fn remove(&self, id: &str) -> StoreResult<()> {
        let mut leads = self.get_all()?;
        leads.retain(|lead| lead.id != id);
        self.write_all(&leads)
    }
}
