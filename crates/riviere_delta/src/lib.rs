//! # riviere_delta
//!
//! Delta - The data-flow graph Riviere deposits at the river mouth.
//!
//! ## Name Origin
//!
//! **Delta** is where a river's flow finally fans out and settles. This crate
//! holds what the analysis pipeline deposits: the Data-Flow Diagram for one
//! component, ready for a renderer to pick up.
//!
//! ## Purpose
//!
//! - **DfdGraph**: nodes, edges and subgraphs with an id index
//! - **Node metadata**: per-binding role and access records
//! - **Validation**: id uniqueness and edge-endpoint existence
//! - **Text rendering**: a deterministic TOML-like dump for CLI and tests
//!
//! The serialized shape (`serde::Serialize` on every type here) is the
//! stable contract consumers depend on; adding a processor upstream must
//! never change it.

pub mod display;
pub mod graph;
pub mod node;

pub use graph::{DfdEdge, DfdGraph, GraphError, SubgraphDef};
pub use node::{BindingRecord, DfdNode, NodeId, NodeKind, NodeMeta};

// Re-export the shared role vocabulary so consumers of the graph only need
// this crate.
pub use riviere_socle::{AccessFlags, BindingRole};
