//! # Organizations and Domains
//!
//! An [`Organization`] is identified by its name, which is unique within a
//! document's organization collection. Its [`Domain`]s are the DNS names
//! used to attribute identities to it.

use serde::{Deserialize, Serialize};

/// A DNS-style domain owned by an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domain {
    /// The domain name, e.g. `bitergia.com`.
    pub domain: String,
    /// Whether this is a top (root) domain of the organization rather
    /// than a subdomain.
    pub is_top_domain: bool,
}

impl Domain {
    /// Create a domain entry.
    pub fn new(domain: impl Into<String>, is_top_domain: bool) -> Self {
        Self {
            domain: domain.into(),
            is_top_domain,
        }
    }
}

/// An organization and the domains attributed to it.
///
/// An organization with no domains is valid (a catch-all bucket such as
/// `Unknown`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Organization {
    /// Unique name within a document.
    pub name: String,
    /// Domains in document order, or ascending by `domain` once sorted.
    pub domains: Vec<Domain>,
}

impl Organization {
    /// Create an organization without domains.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domains: Vec::new(),
        }
    }

    /// Create an organization with the given domains.
    pub fn with_domains(name: impl Into<String>, domains: Vec<Domain>) -> Self {
        Self {
            name: name.into(),
            domains,
        }
    }

    /// Sort domains ascending by name.
    pub fn sort_domains(&mut self) {
        self.domains.sort_by(|a, b| a.domain.cmp(&b.domain));
    }
}
