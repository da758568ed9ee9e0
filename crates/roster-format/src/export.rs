//! # Exporters
//!
//! Serialize an object graph back into the registry exchange format. The
//! output of each exporter is accepted by the matching parser and re-parses
//! to an equal graph.
//!
//! Both exporters stamp the dump with a `time` attribute, which parsers
//! ignore.

use std::collections::BTreeMap;

use roster_core::{Organization, Timestamp, UniqueIdentity};
use serde::Serialize;
use serde_json::Value;

use crate::{ORGANIZATIONS_KEY, UIDENTITIES_KEY};

#[derive(Serialize)]
struct IdentitiesDump<'a> {
    time: Timestamp,
    source: Option<&'a str>,
    #[serde(rename = "uidentities")]
    identities: BTreeMap<&'a str, UniqueIdentityRecord<'a>>,
}

#[derive(Serialize)]
struct UniqueIdentityRecord<'a> {
    uuid: &'a str,
    identities: Vec<IdentityRecord<'a>>,
    enrollments: Vec<EnrollmentRecord<'a>>,
}

#[derive(Serialize)]
struct IdentityRecord<'a> {
    id: &'a str,
    name: Option<&'a str>,
    email: Option<&'a str>,
    username: Option<&'a str>,
    source: &'a str,
    uuid: &'a str,
}

#[derive(Serialize)]
struct EnrollmentRecord<'a> {
    uuid: &'a str,
    organization: &'a str,
    start: Timestamp,
    end: Timestamp,
}

#[derive(Serialize)]
struct OrganizationsDump<'a> {
    time: Timestamp,
    organizations: BTreeMap<&'a str, Vec<DomainRecord<'a>>>,
}

#[derive(Serialize)]
struct DomainRecord<'a> {
    domain: &'a str,
    is_top: bool,
}

/// Export unique identities.
///
/// With `source` set, only unique identities having at least one identity
/// from that source are exported, each with all of its identities and
/// enrollments. Records are keyed by `uuid` in ascending order; identities
/// are ordered by `id` and enrollments by `start`, then `end`.
pub fn export_identities(
    identities: &[UniqueIdentity],
    source: Option<&str>,
    time: Timestamp,
) -> serde_json::Result<Value> {
    let records = identities
        .iter()
        .filter(|uid| source.map_or(true, |s| uid.has_source(s)))
        .map(|uid| (uid.uuid.as_str(), unique_identity_record(uid)))
        .collect();

    serde_json::to_value(IdentitiesDump {
        time,
        source,
        identities: records,
    })
}

/// Export organizations keyed by name, each with its domains ordered by
/// `domain`.
pub fn export_organizations(
    organizations: &[Organization],
    time: Timestamp,
) -> serde_json::Result<Value> {
    let records = organizations
        .iter()
        .map(|org| {
            let mut domains: Vec<DomainRecord<'_>> = org
                .domains
                .iter()
                .map(|d| DomainRecord {
                    domain: &d.domain,
                    is_top: d.is_top_domain,
                })
                .collect();
            domains.sort_by(|a, b| a.domain.cmp(b.domain));
            (org.name.as_str(), domains)
        })
        .collect();

    serde_json::to_value(OrganizationsDump {
        time,
        organizations: records,
    })
}

fn unique_identity_record(uid: &UniqueIdentity) -> UniqueIdentityRecord<'_> {
    let uuid = uid.uuid.as_str();

    let mut identities: Vec<IdentityRecord<'_>> = uid
        .identities
        .iter()
        .map(|id| IdentityRecord {
            id: &id.id,
            name: id.name.as_deref(),
            email: id.email.as_deref(),
            username: id.username.as_deref(),
            source: &id.source,
            uuid,
        })
        .collect();
    identities.sort_by(|a, b| a.id.cmp(b.id));

    let mut enrollments: Vec<EnrollmentRecord<'_>> = uid
        .enrollments
        .iter()
        .map(|rol| EnrollmentRecord {
            uuid,
            organization: &rol.organization,
            start: rol.start,
            end: rol.end,
        })
        .collect();
    enrollments.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.end.cmp(&b.end)));

    UniqueIdentityRecord {
        uuid,
        identities,
        enrollments,
    }
}

/// Merge an identities dump and an organizations dump into one full
/// document, as accepted by [`crate::Document::parse`].
///
/// Returns `None` when either value is not an exporter-shaped object.
pub fn merge_dumps(identities: Value, organizations: Value) -> Option<Value> {
    let Value::Object(mut doc) = identities else {
        return None;
    };
    let Value::Object(mut orgs) = organizations else {
        return None;
    };
    doc.get(UIDENTITIES_KEY)?;
    doc.insert(ORGANIZATIONS_KEY.to_string(), orgs.remove(ORGANIZATIONS_KEY)?);
    Some(Value::Object(doc))
}
