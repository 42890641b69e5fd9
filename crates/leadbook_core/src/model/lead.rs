//! Lead domain model.
//!
//! # Responsibility
//! - Define the canonical record captured by the add-lead flow.
//! - Define the closed catalog of offered programs.
//!
//! # Invariants
//! - `id` is stable and never reused for another lead.
//! - Optional fields (`email`, `phone`, `notes`) are empty strings when
//!   absent, never missing keys in the serialized form.
//! - A persisted lead carries at least one of `email`/`phone`.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};

/// Programs offered in the reference deployment.
const DEFAULT_COURSES: [&str; 6] = [
    "React Native Masterclass",
    "Full Stack Web Development",
    "Data Science & AI",
    "UI/UX Design Certification",
    "Digital Marketing Pro",
    "Cloud Computing (AWS/Azure)",
];

/// Captured prospective-student record.
///
/// Instances are only built from validator output plus a freshly minted
/// id, so a `Lead` in the store always satisfies the field invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Stable unique id assigned at creation time.
    pub id: String,
    /// Display name, trimmed and non-empty.
    pub name: String,
    /// Offered program the prospect is interested in.
    pub course: String,
    /// Lowercased contact email, or empty when not provided.
    pub email: String,
    /// 10-digit contact phone, or empty when not provided.
    pub phone: String,
    /// Free-form notes, stored as entered.
    pub notes: String,
}

impl Lead {
    /// Returns whether at least one contact method is present.
    pub fn has_contact(&self) -> bool {
        !self.email.is_empty() || !self.phone.is_empty()
    }
}

/// Raw add-lead form input prior to validation.
///
/// Fields hold whatever the form submitted; trimming, casing and format
/// rules are applied by the validator, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadCandidate {
    pub name: String,
    pub course: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// Closed set of offered programs.
///
/// The set is deployment configuration: the validator only ever asks for
/// membership, so swapping the catalog never touches validation logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCatalog {
    courses: Vec<String>,
}

impl CourseCatalog {
    /// Builds a catalog from an ordered list of program names.
    pub fn new(courses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether `course` names an offered program (exact match).
    pub fn contains(&self, course: &str) -> bool {
        self.courses.iter().any(|offered| offered == course)
    }

    /// Returns the offered programs in catalog order.
    pub fn courses(&self) -> &[String] {
        &self.courses
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_COURSES)
    }
}

#[cfg(test)]
mod tests {
    use super::CourseCatalog;

    #[test]
    fn default_catalog_has_six_reference_programs() {
        let catalog = CourseCatalog::default();
        assert_eq!(catalog.courses().len(), 6);
        assert!(catalog.contains("Data Science & AI"));
        assert!(catalog.contains("Cloud Computing (AWS/Azure)"));
    }

    #[test]
    fn catalog_membership_is_exact() {
        let catalog = CourseCatalog::default();
        assert!(!catalog.contains("data science & ai"));
        assert!(!catalog.contains("Data Science"));
    }
}
