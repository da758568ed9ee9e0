//! # roster-core — Foundational Types for Roster
//!
//! Defines the typed object graph that roster builds from an exported
//! identity registry: unique identities with their observed identities and
//! enrollments, and organizations with their domains. Also defines the
//! single [`InvalidFormatError`] every parser reports through, and the
//! fixed-format [`Timestamp`] enrollments are bounded by.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `roster-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All model types derive `Debug`, `Clone`, `PartialEq` and implement
//!   `Serialize`/`Deserialize`.
//! - Entities are plain owned values. Nothing here caches or shares state
//!   across parse calls.

pub mod error;
pub mod identity;
pub mod organization;
pub mod temporal;

pub use error::{InvalidFormatError, Result, ValueKind};
pub use identity::{Enrollment, Identity, UniqueIdentity};
pub use organization::{Domain, Organization};
pub use temporal::{Timestamp, TIMESTAMP_FORMAT};
