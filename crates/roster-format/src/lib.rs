//! # roster-format — Registry Document Parsing
//!
//! The single point where exported registry data is admitted. Every
//! malformed shape (missing keys, wrong types, bad dates, truncated JSON)
//! is rejected with an [`InvalidFormatError`] naming the attribute or the
//! literal that failed.
//!
//! ## Entry Points
//!
//! - [`Document::parse`] — validates a full document eagerly and exposes
//!   sorted unique identities and organizations.
//! - [`stream::organizations`] — validates the organizations section one
//!   record at a time, in source order.
//! - [`stream::check`] — a non-failing structural pre-flight for
//!   organizations documents.
//! - [`export`] — the inverse direction, from object graph to document.
//!
//! Both parsers share the validators in [`validate`]; neither holds state
//! between calls, so concurrent parses need no coordination.
//!
//! ## Document Shape
//!
//! ```json
//! {
//!   "organizations": { "Example": [ { "domain": "example.com", "is_top": true } ] },
//!   "uidentities": {
//!     "<uuid>": {
//!       "uuid": "<uuid>",
//!       "identities": [ { "id": "...", "name": null, "email": "...", "username": null, "source": "scm" } ],
//!       "enrollments": [ { "organization": "Example", "start": "1900-01-01T00:00:00", "end": "2100-01-01T00:00:00" } ]
//!     }
//!   }
//! }
//! ```

pub mod document;
pub mod export;
pub mod stream;
pub mod validate;

pub use document::Document;
pub use export::{export_identities, export_organizations, merge_dumps};
pub use roster_core::{InvalidFormatError, Result};
pub use stream::{check, organizations, Organizations};

/// Key of the organizations section.
pub const ORGANIZATIONS_KEY: &str = "organizations";

/// Key of the unique identities section.
pub const UIDENTITIES_KEY: &str = "uidentities";
