use leadbook_core::{
    CourseCatalog, IdSource, KeyValueStore, KvError, KvLeadStore, KvResult, LeadCandidate,
    LeadService, LeadServiceError, StoreError, ValidationRejection,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory backend with injectable write failures.
#[derive(Default)]
struct MemoryBackend {
    slots: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl KeyValueStore for MemoryBackend {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        if self.fail_writes.get() {
            return Err(KvError::Backend("injected write failure".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Deterministic id source for ordering-sensitive assertions.
struct SequenceIdSource(AtomicU64);

impl SequenceIdSource {
    fn new() -> Self {
        Self(AtomicU64::new(1))
    }
}

impl IdSource for SequenceIdSource {
    fn next_id(&self) -> String {
        format!("lead-{}", self.0.fetch_add(1, Ordering::Relaxed))
    }
}

fn service_with_memory_store(
) -> LeadService<KvLeadStore<MemoryBackend>, SequenceIdSource> {
    LeadService::with_id_source(
        KvLeadStore::new(MemoryBackend::default()),
        CourseCatalog::default(),
        SequenceIdSource::new(),
    )
}

fn asha_candidate() -> LeadCandidate {
    LeadCandidate {
        name: "Asha".to_string(),
        course: "Data Science & AI".to_string(),
        email: "ASHA@TEST.com".to_string(),
        phone: String::new(),
        notes: String::new(),
    }
}

#[test]
fn create_then_list_returns_the_normalized_lead() {
    let service = service_with_memory_store();

    let created = service.create_lead(&asha_candidate()).unwrap();
    assert_eq!(created.id, "lead-1");
    assert_eq!(created.email, "asha@test.com");
    assert_eq!(created.phone, "");

    let listed = service.list_leads().unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn newer_leads_are_listed_before_older_ones() {
    let service = service_with_memory_store();

    let first = service.create_lead(&asha_candidate()).unwrap();
    let second = service
        .create_lead(&LeadCandidate {
            name: "Rahul".to_string(),
            course: "Full Stack Web Development".to_string(),
            email: String::new(),
            phone: "9123456780".to_string(),
            notes: String::new(),
        })
        .unwrap();

    let listed = service.list_leads().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[test]
fn rejected_candidate_mutates_nothing() {
    let service = service_with_memory_store();
    service.create_lead(&asha_candidate()).unwrap();

    let empty = LeadCandidate {
        name: String::new(),
        course: "X".to_string(),
        email: String::new(),
        phone: String::new(),
        notes: String::new(),
    };
    let err = service.create_lead(&empty).unwrap_err();
    match err {
        LeadServiceError::Rejected(ValidationRejection::MissingContact(errors)) => {
            assert!(errors.name.is_some());
            assert!(errors.course.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(service.list_leads().unwrap().len(), 1);
}

#[test]
fn delete_is_idempotent() {
    let service = service_with_memory_store();
    let kept = service.create_lead(&asha_candidate()).unwrap();
    let removed = service
        .create_lead(&LeadCandidate {
            name: "Rahul".to_string(),
            course: "Digital Marketing Pro".to_string(),
            email: "rahul@test.com".to_string(),
            phone: String::new(),
            notes: String::new(),
        })
        .unwrap();

    service.delete_lead(&removed.id).unwrap();
    let after_first = service.list_leads().unwrap();

    service.delete_lead(&removed.id).unwrap();
    let after_second = service.list_leads().unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(after_second, vec![kept]);
}

#[test]
fn write_failure_surfaces_and_nothing_is_saved() {
    let backend = MemoryBackend::default();
    backend.fail_writes.set(true);
    let service = LeadService::with_id_source(
        KvLeadStore::new(backend),
        CourseCatalog::default(),
        SequenceIdSource::new(),
    );

    let err = service.create_lead(&asha_candidate()).unwrap_err();
    assert!(matches!(
        err,
        LeadServiceError::Store(StoreError::Persistence(KvError::Backend(_)))
    ));

    assert_eq!(service.list_leads().unwrap(), Vec::new());
}

#[test]
fn check_candidate_validates_without_persisting() {
    let service = service_with_memory_store();

    let normalized = service.check_candidate(&asha_candidate()).unwrap();
    assert_eq!(normalized.email, "asha@test.com");
    assert_eq!(service.list_leads().unwrap(), Vec::new());
}

#[test]
fn service_honors_a_swapped_catalog() {
    let catalog = CourseCatalog::new(["Evening Yoga"]);
    let service = LeadService::with_id_source(
        KvLeadStore::new(MemoryBackend::default()),
        catalog,
        SequenceIdSource::new(),
    );

    let accepted = service
        .create_lead(&LeadCandidate {
            name: "Meera".to_string(),
            course: "Evening Yoga".to_string(),
            email: "meera@test.com".to_string(),
            phone: String::new(),
            notes: String::new(),
        })
        .unwrap();
    assert_eq!(accepted.course, "Evening Yoga");

    let err = service.create_lead(&asha_candidate()).unwrap_err();
    match err {
        LeadServiceError::Rejected(rejection) => {
            assert!(rejection.field_errors().course.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn timestamp_ids_stay_unique_under_rapid_creation() {
    let service = LeadService::new(KvLeadStore::new(MemoryBackend::default()));

    for _ in 0..20 {
        service.create_lead(&asha_candidate()).unwrap();
    }

    let listed = service.list_leads().unwrap();
    let mut ids: Vec<&str> = listed.iter().map(|lead| lead.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn end_to_end_capture_review_delete_scenario() {
    let service = service_with_memory_store();
    assert_eq!(service.list_leads().unwrap(), Vec::new());

    let created = service.create_lead(&asha_candidate()).unwrap();
    let listed = service.list_leads().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "asha@test.com");
    assert_eq!(listed[0].phone, "");

    let invalid = LeadCandidate {
        name: String::new(),
        course: "X".to_string(),
        email: String::new(),
        phone: String::new(),
        notes: String::new(),
    };
    assert!(service.create_lead(&invalid).is_err());
    assert_eq!(service.list_leads().unwrap().len(), 1);

    service.delete_lead(&created.id).unwrap();
    assert_eq!(service.list_leads().unwrap(), Vec::new());
}
