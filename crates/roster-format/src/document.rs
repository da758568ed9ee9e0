//! # Document Parser
//!
//! Validates a full registry document (organizations section plus
//! `uidentities` section) and materializes it as an owned, deterministically
//! ordered object graph.
//!
//! ## Validation Order
//!
//! 1. Stream admission and JSON decoding.
//! 2. Organizations section (absent means no organizations).
//! 3. Identities section, resolving each enrollment's organization by name
//!    against the organizations validated in step 2.
//!
//! The first violation aborts the parse; no partial document is returned.
//!
//! ## Ordering
//!
//! | Collection | Order |
//! |---|---|
//! | unique identities | `uuid` ascending |
//! | identities of a unique identity | `id` ascending |
//! | enrollments of a unique identity | `start`, then `end`, ascending |
//! | organizations | `name` ascending |
//! | domains of an organization | `domain` ascending |

use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

use roster_core::{Enrollment, Identity, InvalidFormatError, Organization, Result, UniqueIdentity};
use serde_json::Value;

use crate::stream::parse_organization;
use crate::validate::{
    as_object, decode_object, optional_str, require, require_list, require_non_empty_str,
    require_str, require_timestamp, Object,
};
use crate::{ORGANIZATIONS_KEY, UIDENTITIES_KEY};

/// A validated registry document.
///
/// Constructed only through [`Document::parse`] (or `str::parse`), so an
/// existing `Document` always satisfies every schema and ordering rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    identities: Vec<UniqueIdentity>,
    organizations: Vec<Organization>,
}

impl Document {
    /// Validate and materialize a full document.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidFormatError`] encountered: empty stream,
    /// malformed JSON, a missing or mistyped attribute, an invalid date, an
    /// enrollment naming an undeclared organization, or a repeated `uuid`.
    pub fn parse(stream: Option<&str>) -> Result<Self> {
        let doc = decode_object(stream)?;

        let mut organizations = parse_organizations(&doc)?;
        organizations.sort_by(|a, b| a.name.cmp(&b.name));

        let known: BTreeSet<&str> = organizations.iter().map(|org| org.name.as_str()).collect();
        let mut identities = parse_identities(&doc, &known)?;
        identities.sort_by(|a, b| a.uuid.cmp(&b.uuid));

        tracing::debug!(
            unique_identities = identities.len(),
            organizations = organizations.len(),
            "registry document parsed"
        );

        Ok(Self {
            identities,
            organizations,
        })
    }

    /// Unique identities, ascending by `uuid`.
    pub fn identities(&self) -> &[UniqueIdentity] {
        &self.identities
    }

    /// Organizations, ascending by `name`.
    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    /// Look up a unique identity by `uuid`.
    pub fn identity(&self, uuid: &str) -> Option<&UniqueIdentity> {
        self.identities
            .binary_search_by(|uid| uid.uuid.as_str().cmp(uuid))
            .ok()
            .map(|i| &self.identities[i])
    }

    /// Look up an organization by name.
    pub fn organization(&self, name: &str) -> Option<&Organization> {
        self.organizations
            .binary_search_by(|org| org.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.organizations[i])
    }

    /// Resolve the organization an enrollment refers to.
    pub fn organization_of(&self, enrollment: &Enrollment) -> Option<&Organization> {
        self.organization(&enrollment.organization)
    }

    /// Take ownership of both collections.
    pub fn into_parts(self) -> (Vec<UniqueIdentity>, Vec<Organization>) {
        (self.identities, self.organizations)
    }
}

impl FromStr for Document {
    type Err = InvalidFormatError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}

fn parse_organizations(doc: &Object) -> Result<Vec<Organization>> {
    let Some(section) = doc.get(ORGANIZATIONS_KEY) else {
        return Ok(Vec::new());
    };
    as_object(section, ORGANIZATIONS_KEY)?
        .iter()
        .map(|(name, domains)| {
            let mut org = parse_organization(name, domains)?;
            org.sort_domains();
            Ok(org)
        })
        .collect()
}

fn parse_identities(doc: &Object, known: &BTreeSet<&str>) -> Result<Vec<UniqueIdentity>> {
    let section = as_object(require(doc, UIDENTITIES_KEY)?, UIDENTITIES_KEY)?;

    let mut seen = HashSet::with_capacity(section.len());
    let mut identities = Vec::with_capacity(section.len());

    for (key, record) in section {
        let uid = parse_unique_identity(key, record, known)?;
        if uid.uuid != *key {
            tracing::warn!(
                key = %key,
                uuid = %uid.uuid,
                "identity record key differs from its uuid"
            );
        }
        if !seen.insert(uid.uuid.clone()) {
            return Err(InvalidFormatError::DuplicateValue {
                attribute: "uuid".to_string(),
                value: uid.uuid,
            });
        }
        identities.push(uid);
    }

    Ok(identities)
}

fn parse_unique_identity(
    key: &str,
    record: &Value,
    known: &BTreeSet<&str>,
) -> Result<UniqueIdentity> {
    let record = as_object(record, key)?;
    let uuid = require_non_empty_str(record, "uuid")?;

    let identities = require_list(record, "identities")?
        .iter()
        .map(parse_identity)
        .collect::<Result<Vec<_>>>()?;

    let enrollments = require_list(record, "enrollments")?
        .iter()
        .map(|rol| parse_enrollment(rol, known))
        .collect::<Result<Vec<_>>>()?;

    let mut uid = UniqueIdentity {
        uuid: uuid.to_string(),
        identities,
        enrollments,
    };
    uid.sort();
    Ok(uid)
}

fn parse_identity(record: &Value) -> Result<Identity> {
    let record = as_object(record, "identities")?;
    Ok(Identity {
        id: require_str(record, "id")?.to_string(),
        name: optional_str(record, "name")?.map(str::to_string),
        email: optional_str(record, "email")?.map(str::to_string),
        username: optional_str(record, "username")?.map(str::to_string),
        source: require_str(record, "source")?.to_string(),
    })
}

/// Dates are checked before the organization is resolved, so a bad date is
/// reported even when the organization is also unknown.
fn parse_enrollment(record: &Value, known: &BTreeSet<&str>) -> Result<Enrollment> {
    let record = as_object(record, "enrollments")?;
    let organization = require_str(record, "organization")?;
    let start = require_timestamp(record, "start")?;
    let end = require_timestamp(record, "end")?;

    if !known.contains(organization) {
        return Err(InvalidFormatError::UnknownOrganization {
            name: organization.to_string(),
        });
    }

    Ok(Enrollment::new(organization, start, end))
}
