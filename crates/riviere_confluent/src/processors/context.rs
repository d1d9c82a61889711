//! Context/injection builtins.
//!
//! `useContext(ThemeContext)` and `inject('theme')` read externally supplied
//! values. The token name is the resource key: every invocation of the same
//! token within one analysis shares one external-entity-input node.

use crate::builtins::BuiltinKind;
use crate::classifier::ClassifiedHook;
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::{AnalysisSession, ResourceKey};
use riviere_delta::{BindingRecord, DfdNode, NodeKind};

static META: ProcessorMeta = ProcessorMeta {
    id: "builtin-context",
    library: "builtin",
    package_patterns: &[],
    hook_names: &[],
    priority: Priority::Builtin,
};

/// Context readers of every supported dialect.
pub struct ContextProcessor;

impl Processor for ContextProcessor {
    fn meta(&self) -> &'static ProcessorMeta {
        &META
    }

    fn matches_hook(&self, name: &str) -> bool {
        matches!(
            crate::builtins::builtin_kind(name),
            Some(BuiltinKind::Context)
        )
    }

    fn process(
        &self,
        hook: &ClassifiedHook,
        session: &mut AnalysisSession,
    ) -> Result<ProcessorOutput, ProcessorError> {
        let invocation = &hook.invocation;
        let mut output = ProcessorOutput::handled();

        // Token name keys the shared node; an opaque token degrades to an
        // unshared node labeled by the binding.
        let token = invocation.first_arg_name();
        let shared = token.map(|name| ResourceKey::Context(name.into()));

        let existing = shared
            .as_ref()
            .and_then(|key| session.resource_node(key))
            .cloned();

        match existing {
            Some(id) => {
                for binding in &invocation.bindings {
                    output.augment(&id, BindingRecord::read(binding.clone()));
                    session.register_owner(binding.clone(), id.clone());
                }
            }
            None => {
                let label = token
                    .map(riviere_socle::String::new)
                    .or_else(|| invocation.bindings.first().cloned())
                    .unwrap_or_else(|| invocation.callee.clone());

                let id = session.next_id(NodeKind::ExternalInput);
                let mut node = DfdNode::new(id.clone(), label, NodeKind::ExternalInput)
                    .with_pos(invocation.site)
                    .with_meta("hook", invocation.callee.clone());

                for binding in &invocation.bindings {
                    node = node.with_binding(BindingRecord::read(binding.clone()));
                    session.register_owner(binding.clone(), id.clone());
                }
                output.add_node(node);

                if let Some(key) = shared {
                    session.bind_resource(key, id);
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
    use riviere_amont::{HookArg, HookInvocation};
    use riviere_socle::SourcePos;

    #[tokio::test]
    async fn test_same_token_shares_one_node() {
        let mut session = AnalysisSession::new("a.tsx", &[]);
        let classifier = HookClassifier::new("a.tsx", None);

        let first = classifier
            .classify(
                &HookInvocation::new("useContext", SourcePos::new(1, 1))
                    .with_single_binding("theme")
                    .with_args(vec![HookArg::Ident("ThemeContext".into())]),
            )
            .await;
        let first_output = ContextProcessor.process(&first, &mut session).unwrap();
        assert_eq!(first_output.nodes.len(), 1);
        assert_eq!(first_output.nodes[0].label.as_str(), "ThemeContext");

        let second = classifier
            .classify(
                &HookInvocation::new("useContext", SourcePos::new(9, 1))
                    .with_single_binding("palette")
                    .with_args(vec![HookArg::Ident("ThemeContext".into())]),
            )
            .await;
        let second_output = ContextProcessor.process(&second, &mut session).unwrap();

        // reuse: no new node, an augmentation instead
        assert!(second_output.nodes.is_empty());
        assert_eq!(second_output.augments.len(), 1);
        assert_eq!(second_output.augments[0].id, first_output.nodes[0].id);
    }

    #[tokio::test]
    async fn test_opaque_token_degrades_to_unshared_node() {
        let mut session = AnalysisSession::new("a.vue", &[]);
        let hook = HookClassifier::new("a.vue", None)
            .classify(
                &HookInvocation::new("inject", SourcePos::new(2, 1))
                    .with_single_binding("config")
                    .with_args(vec![HookArg::Opaque]),
            )
            .await;
        let output = ContextProcessor.process(&hook, &mut session).unwrap();

        assert_eq!(output.nodes.len(), 1);
        assert_eq!(output.nodes[0].label.as_str(), "config");
    }
}
