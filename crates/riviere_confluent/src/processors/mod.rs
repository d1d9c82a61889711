//! Library processors.
//!
//! One module per supported primitive family. Every processor is a stateless
//! translator from one classified invocation into graph parts; shared state
//! (resource caches, URL singletons, id counters) lives in the
//! `AnalysisSession` that dispatch threads through.

pub mod atom;
pub mod context;
pub mod custom;
pub mod effect;
pub mod form;
pub mod navigation;
pub mod query;
pub mod state;
pub mod store;

pub use atom::AtomProcessor;
pub use context::ContextProcessor;
pub use custom::CustomHookProcessor;
pub use effect::EffectProcessor;
pub use form::FormProcessor;
pub use navigation::NavigationProcessor;
pub use query::QueryProcessor;
pub use state::BuiltinStateProcessor;
pub use store::StoreProcessor;
