//! Candidate lead validation.
//!
//! # Responsibility
//! - Decide whether an add-lead submission is acceptable.
//! - Produce normalized output ready for persistence, or structured
//!   field errors for inline form display.
//!
//! # Invariants
//! - Validation is pure: no I/O, no clock access, no id minting.
//! - The missing-contact rejection fires before any email/phone format
//!   check and short-circuits them for that pass.
//! - Field errors for name/course/email/phone are reported together in
//!   one fixed-shape structure.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::lead::{CourseCatalog, Lead, LeadCandidate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

/// Why the name field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// Trimmed name was empty.
    Missing,
}

/// Why the course field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseError {
    /// No program was selected.
    Missing,
    /// Selected value is not in the offered catalog.
    NotOffered,
}

/// Why the email field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    /// Value does not match the `local@domain.tld` shape.
    InvalidFormat,
}

/// Why the phone field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneError {
    /// Not exactly 10 decimal digits (covers non-digit input too).
    InvalidLength,
    /// Ten digits, but a blocklisted implausible pattern.
    Implausible,
}

impl Display for NameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "student name is required"),
        }
    }
}

impl Display for CourseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "a program must be selected"),
            Self::NotOffered => write!(f, "selected program is not offered"),
        }
    }
}

impl Display for EmailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "email address is not valid"),
        }
    }
}

impl Display for PhoneError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength => write!(f, "phone number must be exactly 10 digits"),
            Self::Implausible => write!(f, "phone number is not a real number"),
        }
    }
}

/// Field-keyed validation failures, one optional slot per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<NameError>,
    pub course: Option<CourseError>,
    pub email: Option<EmailError>,
    pub phone: Option<PhoneError>,
}

impl FieldErrors {
    /// Returns whether every slot is clear.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.course.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(err) = &self.name {
            parts.push(err.to_string());
        }
        if let Some(err) = &self.course {
            parts.push(err.to_string());
        }
        if let Some(err) = &self.email {
            parts.push(err.to_string());
        }
        if let Some(err) = &self.phone {
            parts.push(err.to_string());
        }
        if parts.is_empty() {
            write!(f, "no field errors")
        } else {
            write!(f, "{}", parts.join("; "))
        }
    }
}

/// Rejection outcome for a candidate lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRejection {
    /// One or more fields failed their rules.
    Invalid(FieldErrors),
    /// Neither contact method was provided. Carries any name/course
    /// errors found before the contact gate; email/phone checks were
    /// skipped for this pass.
    MissingContact(FieldErrors),
}

impl ValidationRejection {
    /// Returns the field errors carried by either rejection shape.
    pub fn field_errors(&self) -> &FieldErrors {
        match self {
            Self::Invalid(errors) | Self::MissingContact(errors) => errors,
        }
    }

    /// Returns whether this is the missing-contact rejection.
    pub fn is_missing_contact(&self) -> bool {
        matches!(self, Self::MissingContact(_))
    }
}

impl Display for ValidationRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "lead validation failed: {errors}"),
            Self::MissingContact(_) => {
                write!(f, "at least an email or a phone number is required")
            }
        }
    }
}

impl Error for ValidationRejection {}

/// Accepted candidate with normalization applied, ready for id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLead {
    pub name: String,
    pub course: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl NormalizedLead {
    /// Attaches a freshly minted unique id, producing the persistable record.
    pub fn into_lead(self, id: impl Into<String>) -> Lead {
        Lead {
            id: id.into(),
            name: self.name,
            course: self.course,
            email: self.email,
            phone: self.phone,
            notes: self.notes,
        }
    }
}

/// Checks one candidate against the business rules.
///
/// Checks run in order: name, course, contact-presence gate, email shape,
/// phone shape and blocklist. The contact gate compares trimmed values;
/// the email/phone format rules apply to the raw values whenever they are
/// non-empty, matching form behavior where any typed character counts as
/// an attempt at that field.
///
/// On success the output carries the trimmed name, the selected course, a
/// trimmed lowercased email (or empty), the 10-digit phone (or empty) and
/// the notes exactly as entered.
pub fn validate(
    candidate: &LeadCandidate,
    catalog: &CourseCatalog,
) -> Result<NormalizedLead, ValidationRejection> {
    let mut errors = FieldErrors::default();

    let name = candidate.name.trim();
    if name.is_empty() {
        errors.name = Some(NameError::Missing);
    }

    let course = candidate.course.trim();
    if course.is_empty() {
        errors.course = Some(CourseError::Missing);
    } else if !catalog.contains(course) {
        errors.course = Some(CourseError::NotOffered);
    }

    if candidate.email.trim().is_empty() && candidate.phone.trim().is_empty() {
        return Err(ValidationRejection::MissingContact(errors));
    }

    if !candidate.email.is_empty() && !EMAIL_RE.is_match(&candidate.email) {
        errors.email = Some(EmailError::InvalidFormat);
    }

    if !candidate.phone.is_empty() {
        if !PHONE_RE.is_match(&candidate.phone) {
            errors.phone = Some(PhoneError::InvalidLength);
        } else if is_blocklisted(&candidate.phone) {
            errors.phone = Some(PhoneError::Implausible);
        }
    }

    if !errors.is_empty() {
        return Err(ValidationRejection::Invalid(errors));
    }

    Ok(NormalizedLead {
        name: name.to_string(),
        course: course.to_string(),
        email: candidate.email.trim().to_lowercase(),
        phone: candidate.phone.clone(),
        notes: candidate.notes.clone(),
    })
}

/// Syntactically valid 10-digit numbers that are practically implausible.
///
/// A single digit repeated ten times also covers the all-zeros case. The
/// repeated-digit rule is plain code because the `regex` crate has no
/// backreferences.
fn is_blocklisted(phone: &str) -> bool {
    if phone == "1234567890" || phone == "9876543210" {
        return true;
    }
    let mut digits = phone.chars();
    match digits.next() {
        Some(first) => digits.all(|digit| digit == first),
        None => false,
    }
}
