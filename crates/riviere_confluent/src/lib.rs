//! # riviere_confluent
//!
//! Confluent - Where Riviere's classified flows merge.
//!
//! ## Name Origin
//!
//! A **confluent** is the point where two watercourses join into one. This
//! crate is that point for Riviere: upstream component facts and library
//! knowledge meet here and merge into a single data-flow graph.
//!
//! ## Purpose
//!
//! - **Classifier**: builtin tables, naming heuristic, the two-tier
//!   oracle/heuristic fallback chain
//! - **Registry & dispatch**: priority-ordered, first-match-wins processor
//!   selection with a documented registration-order tie-break
//! - **Library processors**: one translator per supported primitive family
//! - **Session**: all per-analysis mutable state, constructed fresh per call
//! - **Assembler**: render-tree walk producing display/invocation edges and
//!   conditional/loop subgraphs
//! - **Analyzer**: the pipeline facade
//!
//! ## Architecture
//!
//! ```text
//! riviere_amont (facts)        riviere_sonde (types)
//!          \                        /
//!           riviere_confluent (analysis)   <- this crate
//!                      |
//!             riviere_delta (graph)
//! ```

pub mod analyzer;
pub mod assembler;
pub mod builtins;
pub mod classifier;
pub mod heuristic;
pub mod processor;
pub mod processors;
pub mod session;

pub use analyzer::{AnalyzeError, AnalyzerOptions, DfdAnalyzer};
pub use assembler::GraphAssembler;
pub use classifier::{ClassifiedHook, HookCategory, HookClassifier};
pub use processor::{
    NodeAugment, Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput,
    ProcessorRegistry,
};
pub use session::{AnalysisSession, ResourceKey};
