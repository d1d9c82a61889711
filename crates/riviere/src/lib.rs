//! # Riviere
//!
//! Component data-flow diagrams from extracted UI facts.
//!
//! ## Name Origin
//!
//! **Rivière** (/ʁi.vjɛʁ/) is French for river. A UI component is a
//! watershed: props, route state and remote data flow in upstream, reactive
//! state pools in the middle, and everything drains into the rendered
//! output. Riviere maps that watershed.
//!
//! ## Crates
//!
//! - [`socle`] - Foundational utilities and shared vocabulary
//! - [`amont`] - Upstream component facts (the extractor contract)
//! - [`delta`] - The data-flow graph deposited for the renderer
//! - [`sonde`] - The optional type-oracle probe
//! - [`confluent`] - Classification, dispatch, processors, assembly

/// Foundational utilities and shared vocabulary.
pub use riviere_socle as socle;

/// Upstream component facts (the extractor contract).
pub use riviere_amont as amont;

/// The data-flow graph deposited for the renderer.
pub use riviere_delta as delta;

/// The optional type-oracle probe.
pub use riviere_sonde as sonde;

/// Classification, dispatch, processors, assembly.
pub use riviere_confluent as confluent;

// The common entry points, re-exported flat.
pub use riviere_amont::{AtomDefinition, ComponentAnalysis, FrameworkExtractor};
pub use riviere_confluent::{AnalyzeError, AnalyzerOptions, DfdAnalyzer, ProcessorRegistry};
pub use riviere_delta::DfdGraph;
pub use riviere_sonde::TypeOracle;
