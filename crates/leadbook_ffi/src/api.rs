//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the lead capture use-cases to Dart via FRB.
//! - Keep error semantics envelope-shaped for early-stage UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - List reads degrade to an empty list plus a logged error, never a
//!   crash.
//!
//! # See also
//! - docs/architecture/logging.md

use leadbook_core::db::open_db;
use leadbook_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    validate, CourseCatalog, CourseError, EmailError, FieldErrors, KvLeadStore, Lead,
    LeadCandidate, LeadService, LeadServiceError, NameError, PhoneError, SqliteKeyValueStore,
};
use log::{error, warn};
use std::path::PathBuf;
use std::sync::OnceLock;

const LEAD_DB_FILE_NAME: &str = "leadbook.sqlite3";
const DB_PATH_ENV: &str = "LEADBOOK_DB_PATH";
const COURSES_ENV: &str = "LEADBOOK_COURSES";

static LEAD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static COURSE_CATALOG: OnceLock<CourseCatalog> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Returns the offered programs for the add-lead picker, in catalog order.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; the catalog is resolved once per process.
#[flutter_rust_bridge::frb(sync)]
pub fn course_catalog() -> Vec<String> {
    resolve_catalog().courses().to_vec()
}

/// Lead record projected for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadView {
    pub id: String,
    pub name: String,
    pub course: String,
    /// Empty string when the lead has no email.
    pub email: String,
    /// Empty string when the lead has no phone.
    pub phone: String,
    pub notes: String,
}

/// Fixed-shape field error codes for inline form display.
///
/// Each slot is `None` when the field passed, or a stable code
/// (`required`, `not_offered`, `invalid_format`, `invalid_length`,
/// `implausible`) when it failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFieldErrors {
    pub name: Option<String>,
    pub course: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Validation envelope for the add-lead form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadValidateResponse {
    /// Whether the candidate passed all rules.
    pub ok: bool,
    /// True when neither contact method was provided; the UI must block
    /// submission with a notice instead of inline field highlighting.
    pub missing_contact: bool,
    pub field_errors: LeadFieldErrors,
    /// Human-readable summary for diagnostics/UI.
    pub message: String,
}

/// Save envelope: the stored lead, or rejection/persistence details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSaveResponse {
    pub ok: bool,
    /// Present only on success.
    pub lead: Option<LeadView>,
    pub missing_contact: bool,
    pub field_errors: LeadFieldErrors,
    pub message: String,
}

/// List envelope; `items` is newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadListResponse {
    pub items: Vec<LeadView>,
    pub message: String,
}

/// Generic action envelope for delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Validates one candidate without saving anything.
///
/// # FFI contract
/// - Sync call, no persistence work.
/// - Never panics; always returns a complete envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn lead_validate(
    name: String,
    course: String,
    email: String,
    phone: String,
    notes: String,
) -> LeadValidateResponse {
    let candidate = LeadCandidate {
        name,
        course,
        email,
        phone,
        notes,
    };
    match validate(&candidate, resolve_catalog()) {
        Ok(_) => LeadValidateResponse {
            ok: true,
            missing_contact: false,
            field_errors: LeadFieldErrors::default(),
            message: String::new(),
        },
        Err(rejection) => LeadValidateResponse {
            ok: false,
            missing_contact: rejection.is_missing_contact(),
            field_errors: field_error_codes(rejection.field_errors()),
            message: rejection.to_string(),
        },
    }
}

/// Validates and persists one lead from the add-lead form.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - On validation failure the envelope carries per-field codes and the
///   missing-contact flag; nothing was persisted.
/// - On persistence failure the lead must not be assumed saved.
#[flutter_rust_bridge::frb(sync)]
pub fn lead_save(
    name: String,
    course: String,
    email: String,
    phone: String,
    notes: String,
) -> LeadSaveResponse {
    let candidate = LeadCandidate {
        name,
        course,
        email,
        phone,
        notes,
    };
    match with_lead_service(|service| service.create_lead(&candidate)) {
        Ok(lead) => LeadSaveResponse {
            ok: true,
            lead: Some(to_lead_view(lead)),
            missing_contact: false,
            field_errors: LeadFieldErrors::default(),
            message: "Lead saved.".to_string(),
        },
        Err(ServiceFailure::Service(LeadServiceError::Rejected(rejection))) => LeadSaveResponse {
            ok: false,
            lead: None,
            missing_contact: rejection.is_missing_contact(),
            field_errors: field_error_codes(rejection.field_errors()),
            message: rejection.to_string(),
        },
        Err(failure) => LeadSaveResponse {
            ok: false,
            lead: None,
            missing_contact: false,
            field_errors: LeadFieldErrors::default(),
            message: format!("lead_save failed: {}", failure.message()),
        },
    }
}

/// Lists stored leads, newest-first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Read failures (including a corrupt collection payload) degrade to an
///   empty list; the failure is logged and echoed in `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn lead_list() -> LeadListResponse {
    match with_lead_service(|service| service.list_leads().map_err(Into::into)) {
        Ok(leads) => {
            let items: Vec<LeadView> = leads.into_iter().map(to_lead_view).collect();
            let message = if items.is_empty() {
                "No leads captured yet.".to_string()
            } else {
                format!("{} lead(s).", items.len())
            };
            LeadListResponse { items, message }
        }
        Err(failure) => {
            let message = failure.message();
            error!("event=lead_list module=ffi status=error error={message}");
            LeadListResponse {
                items: Vec::new(),
                message: format!("lead_list failed: {message}"),
            }
        }
    }
}

/// Deletes one lead by id. Deleting an unknown id succeeds as a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn lead_delete(id: String) -> LeadActionResponse {
    match with_lead_service(|service| service.delete_lead(&id).map_err(Into::into)) {
        Ok(()) => LeadActionResponse {
            ok: true,
            message: "Lead deleted.".to_string(),
        },
        Err(failure) => LeadActionResponse {
            ok: false,
            message: format!("lead_delete failed: {}", failure.message()),
        },
    }
}

enum ServiceFailure {
    /// Connection/backend bootstrap failed before any use-case ran.
    Setup(String),
    Service(LeadServiceError),
}

impl ServiceFailure {
    fn message(&self) -> String {
        match self {
            Self::Setup(message) => message.clone(),
            Self::Service(err) => err.to_string(),
        }
    }
}

fn with_lead_service<T>(
    f: impl FnOnce(
        &LeadService<KvLeadStore<SqliteKeyValueStore<'_>>>,
    ) -> Result<T, LeadServiceError>,
) -> Result<T, ServiceFailure> {
    let db_path = resolve_lead_db_path();
    let conn =
        open_db(&db_path).map_err(|err| ServiceFailure::Setup(format!("lead DB open failed: {err}")))?;
    let backend = SqliteKeyValueStore::try_new(&conn)
        .map_err(|err| ServiceFailure::Setup(format!("lead backend init failed: {err}")))?;
    let service = LeadService::with_catalog(KvLeadStore::new(backend), resolve_catalog().clone());
    f(&service).map_err(ServiceFailure::Service)
}

fn resolve_lead_db_path() -> PathBuf {
    LEAD_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(LEAD_DB_FILE_NAME)
        })
        .clone()
}

fn resolve_catalog() -> &'static CourseCatalog {
    COURSE_CATALOG.get_or_init(|| {
        if let Ok(raw) = std::env::var(COURSES_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                match serde_json::from_str::<Vec<String>>(trimmed) {
                    Ok(courses) if !courses.is_empty() => return CourseCatalog::new(courses),
                    Ok(_) => {
                        warn!("event=catalog_override module=ffi status=ignored reason=empty_list");
                    }
                    Err(err) => {
                        warn!(
                            "event=catalog_override module=ffi status=ignored reason=parse_error error={err}"
                        );
                    }
                }
            }
        }
        CourseCatalog::default()
    })
}

fn to_lead_view(lead: Lead) -> LeadView {
    LeadView {
        id: lead.id,
        name: lead.name,
        course: lead.course,
        email: lead.email,
        phone: lead.phone,
        notes: lead.notes,
    }
}

fn field_error_codes(errors: &FieldErrors) -> LeadFieldErrors {
    LeadFieldErrors {
        name: errors.name.map(|err| {
            match err {
                NameError::Missing => "required",
            }
            .to_string()
        }),
        course: errors.course.map(|err| {
            match err {
                CourseError::Missing => "required",
                CourseError::NotOffered => "not_offered",
            }
            .to_string()
        }),
        email: errors.email.map(|err| {
            match err {
                EmailError::InvalidFormat => "invalid_format",
            }
            .to_string()
        }),
        phone: errors.phone.map(|err| {
            match err {
                PhoneError::InvalidLength => "invalid_length",
                PhoneError::Implausible => "implausible",
            }
            .to_string()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, course_catalog, init_logging, lead_delete, lead_list, lead_save,
        lead_validate, ping,
    };
    use std::sync::{Mutex, MutexGuard, Once};
    use std::time::{SystemTime, UNIX_EPOCH};

    // The lead slot is one shared blob per database; saves from parallel
    // test threads would interleave their read-modify-write cycles, so
    // every db-touching test holds this guard and the whole binary runs
    // against one fresh per-process database file.
    static DB_TEST_GUARD: Mutex<()> = Mutex::new(());
    static ISOLATE_DB: Once = Once::new();

    fn db_test_lock() -> MutexGuard<'static, ()> {
        ISOLATE_DB.call_once(|| {
            let path = std::env::temp_dir().join(format!(
                "leadbook-ffi-test-{}-{}.sqlite3",
                std::process::id(),
                nanos_now()
            ));
            std::env::set_var(super::DB_PATH_ENV, path);
        });
        DB_TEST_GUARD
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn nanos_now() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn course_catalog_exposes_reference_programs() {
        let courses = course_catalog();
        assert_eq!(courses.len(), 6);
        assert!(courses.iter().any(|course| course == "Data Science & AI"));
    }

    #[test]
    fn lead_validate_reports_field_codes_and_contact_gate() {
        let response = lead_validate(
            String::new(),
            "Underwater Basket Weaving".to_string(),
            String::new(),
            String::new(),
            String::new(),
        );
        assert!(!response.ok);
        assert!(response.missing_contact);
        assert_eq!(response.field_errors.name.as_deref(), Some("required"));
        assert_eq!(response.field_errors.course.as_deref(), Some("not_offered"));
        assert_eq!(response.field_errors.email, None);
        assert_eq!(response.field_errors.phone, None);
    }

    #[test]
    fn lead_save_then_list_contains_new_lead() {
        let _guard = db_test_lock();
        let token = unique_token("save-list");
        let saved = lead_save(
            format!("Lead {token}"),
            "Data Science & AI".to_string(),
            format!("{token}@Example.COM"),
            String::new(),
            "call after 6pm".to_string(),
        );
        assert!(saved.ok, "{}", saved.message);
        let lead = saved.lead.expect("saved lead should be returned");
        assert_eq!(lead.email, format!("{token}@example.com"));

        let listed = lead_list();
        assert!(listed.items.iter().any(|item| item.id == lead.id));
    }

    #[test]
    fn lead_save_rejects_blocklisted_phone() {
        let _guard = db_test_lock();
        let response = lead_save(
            "Blocked Phone".to_string(),
            "Digital Marketing Pro".to_string(),
            String::new(),
            "1234567890".to_string(),
            String::new(),
        );
        assert!(!response.ok);
        assert!(!response.missing_contact);
        assert_eq!(response.field_errors.phone.as_deref(), Some("implausible"));
        assert!(response.lead.is_none());
    }

    #[test]
    fn lead_delete_is_idempotent() {
        let _guard = db_test_lock();
        let token = unique_token("delete");
        let saved = lead_save(
            format!("Lead {token}"),
            "Full Stack Web Development".to_string(),
            format!("{token}@test.com"),
            String::new(),
            String::new(),
        );
        assert!(saved.ok, "{}", saved.message);
        let id = saved.lead.expect("saved lead should be returned").id;

        let first = lead_delete(id.clone());
        assert!(first.ok, "{}", first.message);
        let second = lead_delete(id.clone());
        assert!(second.ok, "{}", second.message);

        let listed = lead_list();
        assert!(listed.items.iter().all(|item| item.id != id));
    }

    fn unique_token(prefix: &str) -> String {
        format!("{prefix}-{}", nanos_now())
    }
}
