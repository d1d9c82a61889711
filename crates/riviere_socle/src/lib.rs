//! Socle - The bedrock toolbox for Riviere.
//!
//! This crate provides the foundational utilities and data structures shared
//! by every Riviere crate, much like a socle (the plinth a sculpture stands
//! on) carries everything built above it.
//!
//! # Modules
//!
//! - **ids**: Deterministic per-prefix id generation for graph nodes
//! - **pos**: Source positions reported by the framework extractor
//!
//! # Example
//!
//! ```
//! use riviere_socle::IdGenerator;
//!
//! let mut ids = IdGenerator::new();
//! assert_eq!(ids.next("store").as_str(), "store-1");
//! assert_eq!(ids.next("store").as_str(), "store-2");
//! assert_eq!(ids.next("process").as_str(), "process-1");
//! ```

pub mod ids;
pub mod pos;
pub mod role;

pub use ids::IdGenerator;
pub use pos::SourcePos;
pub use role::{AccessFlags, BindingRole};

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;
pub use compact_str::CompactString as String;
pub use compact_str::format_compact;

/// Boxed future alias for the async seams (extractor, type oracle).
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export bitflags for flag types
pub use bitflags::bitflags;

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_map, phf_set, Map as PhfMap, Set as PhfSet};
