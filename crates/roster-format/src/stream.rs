//! # Organizations Stream Parser
//!
//! Validates and yields the organizations of a document one record at a
//! time, in source order.
//!
//! ## Laziness
//!
//! [`organizations()`] does no work when called. The first call to
//! `next()` admits and decodes the stream; every later call validates
//! exactly one organization record before yielding it. A consumer that
//! stops early never pays for validating records it did not ask for, and
//! a malformed record N is reported only after records `1..N-1` were
//! yielded. The first error ends the sequence.
//!
//! [`check()`] is the cheap counterpart: a structural admissibility test
//! that never fails and never looks inside organization records.

use std::iter::FusedIterator;

use roster_core::{Domain, InvalidFormatError, Organization, Result, ValueKind};
use serde_json::Value;

use crate::validate::{as_list, as_object, decode, decode_object, require_bool, require_str};
use crate::ORGANIZATIONS_KEY;

/// Lazily parse the organizations section of `stream`.
///
/// The returned iterator yields `Err` at most once, then ends.
///
/// # Example
///
/// ```
/// let doc = r#"{"organizations": {"Example": [{"domain": "example.com", "is_top": true}]}}"#;
/// let orgs: Vec<_> = roster_format::stream::organizations(Some(doc))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(orgs[0].name, "Example");
/// ```
pub fn organizations(stream: Option<&str>) -> Organizations<'_> {
    Organizations {
        state: State::Pending(stream),
    }
}

/// Whether `stream` is a non-empty JSON object with an organizations
/// section of the expected container shape.
///
/// Organization and domain records are not inspected: a document with a
/// missing or non-bool `is_top` passes.
pub fn check(stream: Option<&str>) -> bool {
    match decode(stream) {
        Ok(Value::Object(doc)) => matches!(doc.get(ORGANIZATIONS_KEY), Some(Value::Object(_))),
        _ => false,
    }
}

/// Lazy sequence of organizations produced by [`organizations()`].
///
/// Finite and not restartable; each call to [`organizations()`] builds a
/// fresh one.
pub struct Organizations<'a> {
    state: State<'a>,
}

enum State<'a> {
    Pending(Option<&'a str>),
    Streaming(serde_json::map::IntoIter),
    Done,
}

impl Iterator for Organizations<'_> {
    type Item = Result<Organization>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, State::Done) {
                State::Pending(stream) => match open(stream) {
                    Ok(records) => self.state = State::Streaming(records),
                    Err(e) => return Some(Err(e)),
                },
                State::Streaming(mut records) => {
                    let (name, domains) = records.next()?;
                    let parsed = parse_organization(&name, &domains);
                    match &parsed {
                        Ok(org) => {
                            tracing::trace!(
                                organization = %org.name,
                                domains = org.domains.len(),
                                "organization parsed"
                            );
                            self.state = State::Streaming(records);
                        }
                        Err(e) => {
                            tracing::debug!(organization = %name, error = %e, "organization rejected");
                        }
                    }
                    return Some(parsed);
                }
                State::Done => return None,
            }
        }
    }
}

impl FusedIterator for Organizations<'_> {}

fn open(stream: Option<&str>) -> Result<serde_json::map::IntoIter> {
    let mut doc = decode_object(stream)?;
    match doc.remove(ORGANIZATIONS_KEY) {
        Some(Value::Object(section)) => Ok(section.into_iter()),
        Some(_) => Err(InvalidFormatError::wrong_type(ORGANIZATIONS_KEY, ValueKind::Object)),
        None => Err(InvalidFormatError::missing(ORGANIZATIONS_KEY)),
    }
}

/// Validate one organization record: `name` maps to a list of
/// `{"domain": <string>, "is_top": <bool>}` entries.
///
/// Domains keep their source order.
pub(crate) fn parse_organization(name: &str, domains: &Value) -> Result<Organization> {
    let domains = as_list(domains, name)?
        .iter()
        .map(parse_domain)
        .collect::<Result<Vec<_>>>()?;
    Ok(Organization::with_domains(name, domains))
}

fn parse_domain(record: &Value) -> Result<Domain> {
    let record = as_object(record, "domain")?;
    let is_top = require_bool(record, "is_top")?;
    let domain = require_str(record, "domain")?;
    Ok(Domain::new(domain, is_top))
}
