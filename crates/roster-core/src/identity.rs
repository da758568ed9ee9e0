//! # Unique Identities
//!
//! A [`UniqueIdentity`] aggregates every observed [`Identity`] of one
//! person under a single opaque `uuid`, together with the person's
//! time-bounded [`Enrollment`]s in organizations.
//!
//! ## Organization Linkage
//!
//! An enrollment refers to its organization by name. The organization
//! itself lives in the document's organization collection and is resolved
//! by lookup; enrollments never own a copy of it.

use serde::{Deserialize, Serialize};

use crate::temporal::Timestamp;

/// One observed attribution (name, email, username) of a person in a
/// data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Identifier of this identity.
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Data source the identity was observed in, e.g. `scm`.
    pub source: String,
}

impl Identity {
    /// Create an identity with no name, email, or username.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            email: None,
            username: None,
            source: source.into(),
        }
    }
}

/// A time-bounded affiliation with an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enrollment {
    /// Name of the organization, resolvable in the document's
    /// organization collection.
    pub organization: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Enrollment {
    /// Create an enrollment.
    pub fn new(organization: impl Into<String>, start: Timestamp, end: Timestamp) -> Self {
        Self {
            organization: organization.into(),
            start,
            end,
        }
    }
}

/// The person-level entity: identities and enrollments under one `uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueIdentity {
    /// Opaque, non-empty identifier; unique within a document.
    pub uuid: String,
    pub identities: Vec<Identity>,
    pub enrollments: Vec<Enrollment>,
}

impl UniqueIdentity {
    /// Create a unique identity with no identities or enrollments.
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            identities: Vec::new(),
            enrollments: Vec::new(),
        }
    }

    /// Whether any identity was observed in `source`.
    pub fn has_source(&self, source: &str) -> bool {
        self.identities.iter().any(|id| id.source == source)
    }

    /// Apply the canonical ordering: identities ascending by `id`,
    /// enrollments ascending by `start`, ties broken by `end`.
    pub fn sort(&mut self) {
        self.identities.sort_by(|a, b| a.id.cmp(&b.id));
        self.enrollments
            .sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));
    }
}
