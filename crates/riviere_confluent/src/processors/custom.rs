//! Custom-hook fallback.
//!
//! The catch-all at the bottom of the dispatch order: one data-store node
//! per invocation, with the classifier's data/function verdict recorded per
//! bound variable. Never creates Server or subgraph nodes. Function-role
//! bindings register as mutators of the hook's own node — a custom hook's
//! verbs update the state that same hook returned.

use crate::classifier::ClassifiedHook;
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::AnalysisSession;
use riviere_delta::{BindingRecord, DfdNode, NodeKind};
use riviere_socle::BindingRole;

static META: ProcessorMeta = ProcessorMeta {
    id: "custom-hook",
    library: "custom",
    package_patterns: &[],
    hook_names: &[],
    priority: Priority::Fallback,
};

/// The always-matching fallback.
pub struct CustomHookProcessor;

impl Processor for CustomHookProcessor {
    fn meta(&self) -> &'static ProcessorMeta {
        &META
    }

    fn matches_hook(&self, _name: &str) -> bool {
        true
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError> {
        let invocation = &hook.invocation;
        let mut output = ProcessorOutput::handled();

        let id = session.next_id(NodeKind::DataStore);
        let mut node = DfdNode::new(id.clone(), invocation.callee.clone(), NodeKind::DataStore)
            .with_pos(invocation.site)
            .with_meta("hook", invocation.callee.clone());

        for binding in &invocation.bindings {
            let role = hook.role_of(binding).unwrap_or(BindingRole::Data);
            let record = if role.is_function() {
                session.register_mutator(binding.clone(), id.clone());
                BindingRecord::write(binding.clone())
            } else {
                BindingRecord::read(binding.clone())
            };
            session.register_owner(binding.clone(), id.clone());
            node.meta.record_binding(record);
        }

        output.add_node(node);
        Ok(output)
    }
}
