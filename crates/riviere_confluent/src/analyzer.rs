//! Top-level analysis pipeline.
//!
//! One call, one graph: a fresh session, prop nodes, classification
//! (awaiting the oracle), dispatch, merge, assembly, validation. The
//! analyzer owns its registry — there is no process-wide one — and a fresh
//! session per call is what makes processor "reset" structural instead of
//! something to remember.

use crate::assembler::GraphAssembler;
use crate::classifier::HookClassifier;
use crate::processor::ProcessorRegistry;
use crate::session::AnalysisSession;
use riviere_amont::{AtomDefinition, ComponentAnalysis, ExtractionError, FrameworkExtractor};
use riviere_delta::{AccessFlags, BindingRecord, DfdGraph, DfdNode, GraphError, NodeKind};
use riviere_sonde::{TimedOracle, TypeOracle};
use thiserror::Error;

/// Analysis failures that surface to the caller.
///
/// Everything else — oracle trouble, processor faults, ambiguous resource
/// keys — degrades inside the pipeline and still yields a best-effort graph.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The source could not be extracted at all. There is no graph, not
    /// even an empty one.
    #[error("component is not analyzable: {0}")]
    NotAnalyzable(#[from] ExtractionError),
    /// Graph invariants failed during assembly. Indicates a pipeline bug,
    /// never a user-input problem.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Tunables for one analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Per-query deadline for the type oracle, in milliseconds. Zero
    /// disables the wrapper and trusts the oracle's own timeouts.
    pub oracle_timeout_ms: u64,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            oracle_timeout_ms: 1500,
        }
    }
}

/// Component-analysis to data-flow-diagram pipeline.
pub struct DfdAnalyzer {
    registry: ProcessorRegistry,
    options: AnalyzerOptions,
}

impl DfdAnalyzer {
    /// Analyzer with the default processor roster and options.
    pub fn new() -> Self {
        Self {
            registry: ProcessorRegistry::with_default_processors(),
            options: AnalyzerOptions::default(),
        }
    }

    /// Analyzer with a custom registry.
    pub fn with_registry(registry: ProcessorRegistry) -> Self {
        Self {
            registry,
            options: AnalyzerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    /// Analyze already-extracted component facts.
    pub async fn analyze(
        &self,
        analysis: &ComponentAnalysis,
        oracle: Option<&dyn TypeOracle>,
        atoms: &[AtomDefinition],
    ) -> Result<DfdGraph, AnalyzeError> {
        let mut session = AnalysisSession::new(analysis.file_path.clone(), atoms);
        let mut graph = DfdGraph::new(analysis.name.clone());

        // Props are the component's first external inputs, in declaration
        // order, ahead of anything a hook produces.
        for prop in &analysis.props {
            let id = session.next_id(NodeKind::ExternalInput);
            graph.add_node(
                DfdNode::new(id.clone(), prop.name.clone(), NodeKind::ExternalInput)
                    .with_binding(BindingRecord::new(
                        prop.name.clone(),
                        prop.role_guess,
                        AccessFlags::READ,
                    ))
                    .with_meta("prop", "true"),
            )?;
            session.register_owner(prop.name.clone(), id);
        }

        let timed: Option<TimedOracle<&dyn TypeOracle>> = oracle
            .filter(|_| self.options.oracle_timeout_ms > 0)
            .map(|inner| TimedOracle::new(inner, self.options.oracle_timeout_ms));
        let oracle_ref: Option<&dyn TypeOracle> = match (&timed, oracle) {
            (Some(wrapped), _) => Some(wrapped),
            (None, passthrough) => passthrough,
        };

        let classifier = HookClassifier::new(analysis.file_path.as_str(), oracle_ref);
        for invocation in &analysis.hooks {
            let classified = classifier.classify(invocation).await;
            let output = self.registry.dispatch(&classified, &mut session);
            output.merge_into(&mut graph);
        }

        GraphAssembler::new(&mut session).assemble(&mut graph, &analysis.render_root)?;

        graph.validate()?;
        Ok(graph)
    }

    /// Drive the framework extractor first, then analyze. Unparsable source
    /// surfaces as `NotAnalyzable`, never as an empty graph.
    pub async fn analyze_with_extractor(
        &self,
        extractor: &dyn FrameworkExtractor,
        file_path: &str,
        source: &str,
        oracle: Option<&dyn TypeOracle>,
        atoms: &[AtomDefinition],
    ) -> Result<DfdGraph, AnalyzeError> {
        let analysis = extractor.extract(file_path, source).await?;
        self.analyze(&analysis, oracle, atoms).await
    }
}

impl Default for DfdAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
