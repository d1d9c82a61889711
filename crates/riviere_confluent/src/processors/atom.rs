//! Atomic-state libraries (Jotai, Recoil).
//!
//! The atom name is the resource key: the first invocation creates the node,
//! later invocations on the same name augment it with the missing read or
//! write binding instead of duplicating it. Derived atoms (known from the
//! static definition scan) draw "derives" edges from their dependency atoms.
//! A dynamic atom reference has no key; the invocation is skipped.

use crate::classifier::ClassifiedHook;
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::{AnalysisSession, ResourceKey};
use phf::phf_set;
use riviere_delta::{BindingRecord, DfdNode, NodeId, NodeKind};

static META: ProcessorMeta = ProcessorMeta {
    id: "atomic-state",
    library: "jotai",
    package_patterns: &["jotai", "jotai/*", "recoil"],
    hook_names: &[
        "useAtom",
        "useAtomValue",
        "useSetAtom",
        "useRecoilState",
        "useRecoilValue",
        "useSetRecoilState",
        "useResetRecoilState",
    ],
    priority: Priority::ThirdParty,
};

/// Hooks that only write the atom.
static WRITE_ONLY_HOOKS: phf::Set<&'static str> = phf_set! {
    "useSetAtom",
    "useSetRecoilState",
    "useResetRecoilState",
};

/// Hooks that only read the atom.
static READ_ONLY_HOOKS: phf::Set<&'static str> = phf_set! {
    "useAtomValue",
    "useRecoilValue",
};

/// Atomic-state read/write accessors.
pub struct AtomProcessor;

impl AtomProcessor {
    /// Create or reuse the node for an atom, returning (id, created).
    fn atom_node(
        output: &mut ProcessorOutput,
        session: &mut AnalysisSession,
        hook: &ClassifiedHook,
        name: &str,
    ) -> (NodeId, bool) {
        let resource = ResourceKey::Atom(name.into());
        if let Some(id) = session.resource_node(&resource) {
            return (id.clone(), false);
        }
        let id = session.next_id(NodeKind::DataStore);
        let mut node = DfdNode::new(id.clone(), name, NodeKind::DataStore)
            .with_pos(hook.invocation.site)
            .with_meta("atom", name);
        if session.atom(name).is_some_and(|atom| atom.derived) {
            node = node.with_meta("derived", "true");
        }
        output.add_node(node);
        session.bind_resource(resource, id.clone());
        (id, true)
    }
}

impl Processor for AtomProcessor {
    fn meta(&self) -> &'static ProcessorMeta {
        &META
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError> {
        let invocation = &hook.invocation;
        let mut output = ProcessorOutput::handled();

        // Dynamic atom reference: no resource key, skip the invocation.
        let Some(atom_name) = invocation.first_arg_name().map(str::to_owned) else {
            tracing::debug!(
                hook = %invocation.callee,
                "dynamic atom reference; invocation skipped"
            );
            return Ok(output);
        };

        let (id, created) = Self::atom_node(&mut output, session, hook, &atom_name);

        let write_only = WRITE_ONLY_HOOKS.contains(invocation.callee.as_str());
        let read_only = READ_ONLY_HOOKS.contains(invocation.callee.as_str());

        for (i, binding) in invocation.bindings.iter().enumerate() {
            // useAtom binds [value, setter]; single-binding hooks bind one
            let record = if write_only || (!read_only && i == 1) {
                session.register_mutator(binding.clone(), id.clone());
                BindingRecord::write(binding.clone())
            } else {
                BindingRecord::read(binding.clone())
            };
            session.register_owner(binding.clone(), id.clone());
            if created {
                // node is still queued in this output; attach directly
                if let Some(node) = output.nodes.iter_mut().find(|n| n.id == id) {
                    node.meta.record_binding(record);
                }
            } else {
                output.augment(&id, record);
            }
        }

        // Derivation edges, drawn once when the node is first created.
        if created {
            if let Some(atom) = session.atom(&atom_name).cloned() {
                for dep in &atom.deps {
                    let (dep_id, _) = Self::atom_node(&mut output, session, hook, dep);
                    output.add_edge(&dep_id, &id, "derives");
                }
            }
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::HookClassifier;
    use riviere_amont::{AtomDefinition, BindingForm, HookArg, HookInvocation};
    use riviere_socle::{AccessFlags, SourcePos};

    async fn run_in(
        session: &mut AnalysisSession,
        invocation: HookInvocation,
    ) -> ProcessorOutput {
        let hook = HookClassifier::new("a.tsx", None)
            .classify(&invocation)
            .await;
        AtomProcessor.process(&hook, session).unwrap()
    }

    #[tokio::test]
    async fn test_read_then_write_shares_one_node() {
        let mut session = AnalysisSession::new("a.tsx", &[]);
        let read = run_in(
            &mut session,
            HookInvocation::new("useAtomValue", SourcePos::new(2, 1))
                .with_single_binding("count")
                .with_args(vec![HookArg::Ident("countAtom".into())]),
        )
        .await;
        let write = run_in(
            &mut session,
            HookInvocation::new("useSetAtom", SourcePos::new(3, 1))
                .with_single_binding("setCount")
                .with_args(vec![HookArg::Ident("countAtom".into())]),
        )
        .await;

        assert_eq!(read.nodes.len(), 1);
        assert_eq!(read.nodes[0].label.as_str(), "countAtom");
        assert!(write.nodes.is_empty());
        assert_eq!(write.augments.len(), 1);
        assert_eq!(write.augments[0].id, read.nodes[0].id);
        assert!(write.augments[0].binding.role.is_function());
        assert_eq!(session.mutated_by("setCount"), Some(&read.nodes[0].id));
    }

    #[tokio::test]
    async fn test_use_atom_pair_records_both_accesses() {
        let mut session = AnalysisSession::new("a.tsx", &[]);
        let output = run_in(
            &mut session,
            HookInvocation::new("useAtom", SourcePos::new(2, 1))
                .with_bindings(
                    BindingForm::ArrayPattern,
                    vec!["count".into(), "setCount".into()],
                )
                .with_args(vec![HookArg::Ident("countAtom".into())]),
        )
        .await;

        let node = &output.nodes[0];
        assert_eq!(node.meta.bindings.len(), 2);
        assert_eq!(node.meta.access(), AccessFlags::READ | AccessFlags::WRITE);
    }

    #[tokio::test]
    async fn test_derived_atom_draws_derivation_edges() {
        let atoms = vec![
            AtomDefinition::plain("countAtom"),
            AtomDefinition::derived("doubledAtom", vec!["countAtom".into()]),
        ];
        let mut session = AnalysisSession::new("a.tsx", &atoms);
        let output = run_in(
            &mut session,
            HookInvocation::new("useAtomValue", SourcePos::new(2, 1))
                .with_single_binding("doubled")
                .with_args(vec![HookArg::Ident("doubledAtom".into())]),
        )
        .await;

        // doubledAtom node plus an implicitly created countAtom node
        assert_eq!(output.nodes.len(), 2);
        assert_eq!(output.nodes[0].meta.get("derived"), Some("true"));
        assert_eq!(output.edges.len(), 1);
        assert_eq!(output.edges[0].from, output.nodes[1].id);
        assert_eq!(output.edges[0].to, output.nodes[0].id);
        assert_eq!(output.edges[0].label, "derives");
    }

    #[tokio::test]
    async fn test_dynamic_atom_reference_is_skipped() {
        let mut session = AnalysisSession::new("a.tsx", &[]);
        let output = run_in(
            &mut session,
            HookInvocation::new("useAtom", SourcePos::new(2, 1))
                .with_bindings(
                    BindingForm::ArrayPattern,
                    vec!["value".into(), "setValue".into()],
                )
                .with_args(vec![HookArg::Opaque]),
        )
        .await;

        assert!(output.nodes.is_empty());
        assert!(output.edges.is_empty());
        assert!(output.augments.is_empty());
    }
}
