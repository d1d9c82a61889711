//! # riviere_sonde
//!
//! Sonde - The type-oracle probe for Riviere.
//!
//! ## Name Origin
//!
//! A **sonde** is the instrument river engineers lower into water they cannot
//! see through. This crate is that instrument: it probes the host project's
//! language service for the declared type of a binding, when such a service
//! happens to be attached.
//!
//! ## Purpose
//!
//! - **TypeOracle**: the async, best-effort resolution boundary
//! - **TimedOracle**: per-query deadline enforcement
//! - **TableOracle**: a table-backed oracle for tests and replays
//! - **TypeFacts**: display string + coarse kind of one resolved type
//! - **split_object_members**: balanced-delimiter member-name extraction
//!
//! Every query can fail — the oracle may be absent, dead, slow or confused —
//! and none of that may fail an analysis. Callers degrade to the naming
//! heuristic and keep going.

pub mod members;
pub mod oracle;
pub mod types;

pub use members::{split_object_members, ObjectMember};
pub use oracle::{OracleError, TableOracle, TimedOracle, TypeOracle, UnreachableOracle};
pub use types::{TypeFacts, TypeKind};
