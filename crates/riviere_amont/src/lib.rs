//! # riviere_amont
//!
//! Amont - The upstream component facts for Riviere.
//!
//! ## Name Origin
//!
//! **Amont** (/a.mɔ̃/) is the French term for the upstream side of a river.
//! Everything Riviere knows about a component flows in from here: the facts a
//! framework extractor gathered from one source file, before any data-flow
//! reasoning happens downstream.
//!
//! ## Purpose
//!
//! This crate defines the input surface of the analysis pipeline:
//!
//! - **ComponentAnalysis**: structural facts for one component
//! - **HookInvocation**: one hook/composable call site with its bindings
//! - **Render tree**: elements, conditionals, iterations, attribute bindings
//! - **AtomDefinition**: statically scanned atomic-state definitions
//! - **FrameworkExtractor**: the seam to the source-dialect parser
//!
//! All types are plain owned data, built once per file by the extractor and
//! immutable afterwards. They serialize with serde so an out-of-process
//! extractor can hand them over as JSON.

pub mod analysis;
pub mod atom;
pub mod extract;
pub mod hook;
pub mod render;

pub use analysis::{BindingRole, ComponentAnalysis, Framework, PropDescriptor};
pub use atom::AtomDefinition;
pub use extract::{ExtractionError, FrameworkExtractor};
pub use hook::{BindingForm, HookArg, HookInvocation};
pub use render::{
    AttrBinding, AttrValue, ConditionalNode, ElementNode, ExprRef, IterationNode, RenderNode,
};
