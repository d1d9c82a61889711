//! Builtin state primitives.
//!
//! One data-store node per invocation, holding every bound variable of the
//! pair: `const [count, setCount] = useState(0)` yields one node with a read
//! binding for `count` and a write binding for `setCount`. Display and
//! update edges are the assembler's job, not ours — the processor only
//! registers the setter as a known mutator of the node.

use crate::builtins::BuiltinKind;
use crate::classifier::{ClassifiedHook, HookCategory};
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::AnalysisSession;
use riviere_delta::{BindingRecord, DfdNode, NodeKind};

static META: ProcessorMeta = ProcessorMeta {
    id: "builtin-state",
    library: "builtin",
    package_patterns: &[],
    // matches by builtin-kind table, not by literal list
    hook_names: &[],
    priority: Priority::Builtin,
};

/// State, derived-value and callback builtins of every supported dialect.
pub struct BuiltinStateProcessor;

impl Processor for BuiltinStateProcessor {
    fn meta(&self) -> &'static ProcessorMeta {
        &META
    }

    fn matches_hook(&self, name: &str) -> bool {
        matches!(
            crate::builtins::builtin_kind(name),
            Some(
                BuiltinKind::StatePair
                    | BuiltinKind::Reducer
                    | BuiltinKind::Ref
                    | BuiltinKind::Reactive
                    | BuiltinKind::Derived
                    | BuiltinKind::Callback
                    | BuiltinKind::ReadonlyValue
            )
        )
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError> {
        let HookCategory::Builtin(kind) = hook.category else {
            return Err(ProcessorError::Fault(
                "builtin-state dispatched a non-builtin invocation".into(),
            ));
        };

        let invocation = &hook.invocation;
        let mut output = ProcessorOutput::handled();
        let label = invocation
            .bindings
            .first()
            .cloned()
            .unwrap_or_else(|| invocation.callee.clone());

        match kind {
            BuiltinKind::StatePair | BuiltinKind::Reducer => {
                let id = session.next_id(NodeKind::DataStore);
                let mut node = DfdNode::new(id.clone(), label, NodeKind::DataStore)
                    .with_pos(invocation.site)
                    .with_meta("hook", invocation.callee.clone());

                if let Some(value) = invocation.bindings.first() {
                    node = node.with_binding(BindingRecord::read(value.clone()));
                    session.register_owner(value.clone(), id.clone());
                }
                if let Some(setter) = invocation.bindings.get(1) {
                    node = node.with_binding(BindingRecord::write(setter.clone()));
                    session.register_owner(setter.clone(), id.clone());
                    session.register_mutator(setter.clone(), id.clone());
                }
                if !hook.state_members.is_empty() {
                    let members: Vec<&str> =
                        hook.state_members.iter().map(|m| m.as_str()).collect();
                    node = node.with_meta("members", members.join(","));
                }

                output.add_node(node);
            }
            BuiltinKind::Ref | BuiltinKind::Reactive | BuiltinKind::ReadonlyValue => {
                let id = session.next_id(NodeKind::DataStore);
                let mut node = DfdNode::new(id.clone(), label, NodeKind::DataStore)
                    .with_pos(invocation.site)
                    .with_meta("hook", invocation.callee.clone());

                for binding in &invocation.bindings {
                    node = node.with_binding(BindingRecord::read(binding.clone()));
                    session.register_owner(binding.clone(), id.clone());
                }

                output.add_node(node);
            }
            BuiltinKind::Derived => {
                let id = session.next_id(NodeKind::DataStore);
                let mut node = DfdNode::new(id.clone(), label, NodeKind::DataStore)
                    .with_pos(invocation.site)
                    .with_meta("hook", invocation.callee.clone())
                    .with_meta("derived", "true");

                for binding in &invocation.bindings {
                    node = node.with_binding(BindingRecord::read(binding.clone()));
                    session.register_owner(binding.clone(), id.clone());
                }
                output.add_node(node);

                for dep in &invocation.deps {
                    if let Some(owner) = session.owner_of(dep) {
                        output.add_edge(owner, &id, "derives");
                    }
                }
            }
            BuiltinKind::Callback => {
                let id = session.next_id(NodeKind::Process);
                let mut node = DfdNode::new(id.clone(), label, NodeKind::Process)
                    .with_pos(invocation.site)
                    .with_meta("hook", invocation.callee.clone());

                for binding in &invocation.bindings {
                    node = node.with_binding(BindingRecord::write(binding.clone()));
                    session.register_owner(binding.clone(), id.clone());
                }
                output.add_node(node);

                for dep in &invocation.deps {
                    if let Some(owner) = session.owner_of(dep) {
                        output.add_edge(owner, &id, "reads");
                    }
                }
            }
            BuiltinKind::Effect | BuiltinKind::Context => {
                return Err(ProcessorError::Fault(format!(
                    "builtin-state cannot handle {}",
                    invocation.callee
                )));
            }
        }

        Ok(output)
    }
}
