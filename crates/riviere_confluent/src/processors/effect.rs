//! Builtin effect primitives.
//!
//! `useEffect`, `watch`, `watchEffect`, `$effect` and friends become process
//! nodes with a "triggers" edge from each declared dependency's owning node.
//! Dependencies whose owner is not known yet are skipped silently.

use crate::builtins::BuiltinKind;
use crate::classifier::{ClassifiedHook, HookCategory};
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::AnalysisSession;
use riviere_delta::{BindingRecord, DfdNode, NodeKind};

static META: ProcessorMeta = ProcessorMeta {
    id: "builtin-effect",
    library: "builtin",
    package_patterns: &[],
    hook_names: &[],
    priority: Priority::Builtin,
};

/// Side-effect registrations of every supported dialect.
pub struct EffectProcessor;

impl Processor for EffectProcessor {
    fn meta(&self) -> &'static ProcessorMeta {
        &META
    }

    fn matches_hook(&self, name: &str) -> bool {
        matches!(
            crate::builtins::builtin_kind(name),
            Some(BuiltinKind::Effect)
        )
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError> {
        debug_assert!(matches!(
            hook.category,
            HookCategory::Builtin(BuiltinKind::Effect)
        ));

        let invocation = &hook.invocation;
        let mut output = ProcessorOutput::handled();

        let id = session.next_id(NodeKind::Process);
        let mut node = DfdNode::new(id.clone(), invocation.callee.clone(), NodeKind::Process)
            .with_pos(invocation.site)
            .with_meta("hook", invocation.callee.clone());

        // a bound name is the stop/cleanup handle
        for binding in &invocation.bindings {
            node = node.with_binding(BindingRecord::write(binding.clone()));
            session.register_owner(binding.clone(), id.clone());
        }
        output.add_node(node);

        for dep in &invocation.deps {
            if let Some(owner) = session.owner_of(dep) {
                output.add_edge(owner, &id, "triggers");
            }
        }

        Ok(output)
    }
}
