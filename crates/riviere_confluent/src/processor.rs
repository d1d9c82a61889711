//! Processor trait and registry.
//!
//! A processor translates one recognized invocation into graph parts. The
//! registry dispatches each classified invocation to exactly one processor:
//! descending priority, first match wins, and equal-priority ties resolve by
//! registration order (earliest wins) — an explicit, documented tie-break.
//!
//! Processors are stateless; everything mutable goes through the
//! `AnalysisSession` passed into `process`.

use crate::classifier::ClassifiedHook;
use crate::session::AnalysisSession;
use riviere_delta::{BindingRecord, DfdEdge, DfdNode, GraphError, NodeId, SubgraphDef};
use riviere_socle::CompactString;
use thiserror::Error;

/// Dispatch priority band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Priority {
    /// The catch-all custom-hook processor; always matches.
    Fallback = 0,
    /// Third-party library processors.
    ThirdParty = 1,
    /// Builtin primitive processors.
    Builtin = 2,
}

/// Static processor metadata.
pub struct ProcessorMeta {
    /// Processor id, used in fault logs.
    pub id: &'static str,
    /// Owning library name (e.g. "react", "jotai").
    pub library: &'static str,
    /// Package-name patterns; `*` suffix matches a prefix. Empty means the
    /// processor does not discriminate on package.
    pub package_patterns: &'static [&'static str],
    /// Handled hook-name literals. Processors matching by pattern override
    /// `matches_hook` instead.
    pub hook_names: &'static [&'static str],
    pub priority: Priority,
}

impl ProcessorMeta {
    /// Package predicate: exact or `prefix*` match. An empty pattern list
    /// accepts anything — the invocation may not carry a package at all.
    pub fn matches_package(&self, package: &str) -> bool {
        if self.package_patterns.is_empty() {
            return true;
        }
        self.package_patterns.iter().any(|pattern| {
            match pattern.strip_suffix('*') {
                Some(prefix) => package.starts_with(prefix),
                None => *pattern == package,
            }
        })
    }
}

/// A processor fault. Caught at the dispatch boundary; never aborts the
/// remaining invocations.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("{0}")]
    Fault(String),
}

/// Augmentation of an already-merged node: the documented resource-reuse
/// case (a later invocation adds the missing read/write binding).
#[derive(Debug, Clone)]
pub struct NodeAugment {
    pub id: NodeId,
    pub binding: BindingRecord,
}

/// Graph parts produced by one processor for one invocation.
#[derive(Debug, Default)]
pub struct ProcessorOutput {
    pub nodes: Vec<DfdNode>,
    pub edges: Vec<DfdEdge>,
    pub subgraphs: Vec<SubgraphDef>,
    pub augments: Vec<NodeAugment>,
    pub handled: bool,
}

impl ProcessorOutput {
    /// An output that marks the invocation as handled.
    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Default::default()
        }
    }

    /// An empty, unhandled output.
    pub fn unhandled() -> Self {
        Self::default()
    }

    /// Queue a node; returns its id for wiring edges.
    pub fn add_node(&mut self, node: DfdNode) -> NodeId {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Queue an edge between nodes that exist or are queued in this output.
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId, label: impl Into<CompactString>) {
        self.edges.push(DfdEdge {
            from: from.clone(),
            to: to.clone(),
            label: label.into(),
        });
    }

    /// Queue a binding augmentation on an existing node.
    pub fn augment(&mut self, id: &NodeId, binding: BindingRecord) {
        self.augments.push(NodeAugment {
            id: id.clone(),
            binding,
        });
    }

    /// Merge this output into the graph. Individually broken parts degrade
    /// (logged and skipped) instead of aborting the merge — a processor
    /// fault must never cost more than its own invocation.
    pub fn merge_into(self, graph: &mut riviere_delta::DfdGraph) {
        for node in self.nodes {
            let id = node.id.clone();
            if let Err(err) = graph.add_node(node) {
                tracing::warn!(node = id.as_str(), error = %err, "node dropped in merge");
            }
        }
        for augment in self.augments {
            match graph.node_mut(&augment.id) {
                Some(node) => node.meta.record_binding(augment.binding),
                None => tracing::warn!(
                    node = augment.id.as_str(),
                    "augmentation target missing; dropped"
                ),
            }
        }
        for subgraph in self.subgraphs {
            if let Err(err) = graph.add_subgraph(subgraph.id.clone(), subgraph.label, subgraph.parent)
            {
                tracing::warn!(error = %err, "subgraph dropped in merge");
            }
        }
        for edge in self.edges {
            if let Err(err) = graph.add_edge(&edge.from, &edge.to, edge.label) {
                tracing::warn!(error = %err, "edge dropped in merge");
            }
        }
    }
}

/// Library-specific translator from one invocation to graph parts.
pub trait Processor: Send + Sync {
    fn meta(&self) -> &'static ProcessorMeta;

    /// Hook-name predicate. Defaults to the literal list in the metadata.
    fn matches_hook(&self, name: &str) -> bool {
        self.meta().hook_names.contains(&name)
    }

    /// Full dispatch predicate: hook-name match and, when the invocation
    /// carries a package name, package match. An absent package degrades to
    /// name-match-only.
    fn matches(&self, hook: &ClassifiedHook) -> bool {
        if !self.matches_hook(&hook.invocation.callee) {
            return false;
        }
        match &hook.invocation.package {
            Some(package) => self.meta().matches_package(package),
            None => true,
        }
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError>;
}

/// Registry holding the processors for one analyzer.
///
/// Owned by the analyzer and threaded through each analysis call; there is
/// no process-wide registry.
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn Processor>>,
}

impl ProcessorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// Register a processor. Processors are kept in descending priority;
    /// within one priority band, earlier registration wins dispatch ties.
    pub fn register(&mut self, processor: Box<dyn Processor>) {
        self.processors.push(processor);
        // stable sort: registration order survives within a band
        self.processors
            .sort_by_key(|p| std::cmp::Reverse(p.meta().priority));
    }

    /// Registered processors in dispatch order.
    pub fn processors(&self) -> &[Box<dyn Processor>] {
        &self.processors
    }

    /// Create a registry with the full default roster.
    pub fn with_default_processors() -> Self {
        use crate::processors;

        let mut registry = Self::new();

        // ============================================
        // Builtin primitive processors
        // ============================================

        registry.register(Box::new(processors::state::BuiltinStateProcessor));
        registry.register(Box::new(processors::effect::EffectProcessor));
        registry.register(Box::new(processors::context::ContextProcessor));

        // ============================================
        // Third-party library processors
        // ============================================

        registry.register(Box::new(processors::query::QueryProcessor));
        registry.register(Box::new(processors::atom::AtomProcessor));
        registry.register(Box::new(processors::navigation::NavigationProcessor));
        registry.register(Box::new(processors::form::FormProcessor));
        registry.register(Box::new(processors::store::StoreProcessor::new()));

        // ============================================
        // Catch-all fallback (always matches)
        // ============================================

        registry.register(Box::new(processors::custom::CustomHookProcessor));

        registry
    }

    /// Dispatch one classified invocation: single pass, first match wins.
    /// A processor fault is logged with the processor id and invocation name
    /// and degrades to an empty output — remaining invocations continue.
    pub fn dispatch(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> ProcessorOutput {
        for processor in &self.processors {
            if !processor.matches(hook) {
                continue;
            }
            return match processor.process(hook, session) {
                Ok(output) => output,
                Err(err) => {
                    tracing::warn!(
                        processor = processor.meta().id,
                        hook = %hook.invocation.callee,
                        error = %err,
                        "processor fault; invocation dropped from graph"
                    );
                    ProcessorOutput::unhandled()
                }
            };
        }

        // unreachable once the fallback processor is registered
        tracing::warn!(hook = %hook.invocation.callee, "no processor matched");
        ProcessorOutput::unhandled()
    }
}

impl Default for ProcessorRegistry {
    fn default() -> Self {
        Self::with_default_processors()
    }
}
