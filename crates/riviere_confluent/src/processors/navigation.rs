//! Navigation libraries (next/navigation, React Router, Vue Router).
//!
//! Input-style accessors (pathname, search params, route params) all hang
//! off one shared "URL: Input" node per analysis; output-style navigators
//! (router, navigate) hang off one shared "URL: Output" node. Both
//! singletons are created lazily and live in the session, so a fresh
//! analysis always gets fresh nodes.

use crate::classifier::ClassifiedHook;
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::AnalysisSession;
use phf::phf_set;
use riviere_delta::{BindingRecord, DfdNode, NodeId, NodeKind};

static META: ProcessorMeta = ProcessorMeta {
    id: "navigation",
    library: "next/navigation",
    package_patterns: &["next/*", "react-router*", "vue-router", "@remix-run/*"],
    hook_names: &[
        "usePathname",
        "useSearchParams",
        "useParams",
        "useLocation",
        "useRoute",
        "useRouter",
        "useNavigate",
    ],
    priority: Priority::ThirdParty,
};

/// Accessors that read route state.
static INPUT_HOOKS: phf::Set<&'static str> = phf_set! {
    "usePathname",
    "useSearchParams",
    "useParams",
    "useLocation",
    "useRoute",
};

/// URL-navigation hooks.
pub struct NavigationProcessor;

impl NavigationProcessor {
    fn url_input(output: &mut ProcessorOutput, session: &mut AnalysisSession) -> NodeId {
        if let Some(id) = session.url_input() {
            return id.clone();
        }
        let id = session.next_id(NodeKind::ExternalInput);
        output.add_node(DfdNode::new(
            id.clone(),
            "URL: Input",
            NodeKind::ExternalInput,
        ));
        session.set_url_input(id.clone());
        id
    }

    fn url_output(output: &mut ProcessorOutput, session: &mut AnalysisSession) -> NodeId {
        if let Some(id) = session.url_output() {
            return id.clone();
        }
        let id = session.next_id(NodeKind::ExternalOutput);
        output.add_node(DfdNode::new(
            id.clone(),
            "URL: Output",
            NodeKind::ExternalOutput,
        ));
        session.set_url_output(id.clone());
        id
    }
}

impl Processor for NavigationProcessor {
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

        let label = invocation
            .bindings
            .first()
            .cloned()
            .unwrap_or_else(|| invocation.callee.clone());

        if INPUT_HOOKS.contains(invocation.callee.as_str()) {
            let url = Self::url_input(&mut output, session);
            let id = session.next_id(NodeKind::DataStore);
            let mut node = DfdNode::new(id.clone(), label, NodeKind::DataStore)
                .with_pos(invocation.site)
                .with_meta("hook", invocation.callee.clone());
            for binding in &invocation.bindings {
                node = node.with_binding(BindingRecord::read(binding.clone()));
                session.register_owner(binding.clone(), id.clone());
            }
            output.add_node(node);
            output.add_edge(&url, &id, "provides");
        } else {
            let url = Self::url_output(&mut output, session);
            let id = session.next_id(NodeKind::Process);
            let mut node = DfdNode::new(id.clone(), label, NodeKind::Process)
                .with_pos(invocation.site)
                .with_meta("hook", invocation.callee.clone());
            for binding in &invocation.bindings {
                node = node.with_binding(BindingRecord::write(binding.clone()));
                session.register_owner(binding.clone(), id.clone());
            }
            output.add_node(node);
            output.add_edge(&id, &url, "navigates");
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::HookClassifier;
    use riviere_amont::HookInvocation;
    use riviere_socle::SourcePos;

    async fn run_in(
        session: &mut AnalysisSession,
        invocation: HookInvocation,
    ) -> ProcessorOutput {
        let hook = HookClassifier::new("a.tsx", None)
            .classify(&invocation)
            .await;
        NavigationProcessor.process(&hook, session).unwrap()
    }

    #[tokio::test]
    async fn test_input_accessors_share_url_input() {
        let mut session = AnalysisSession::new("a.tsx", &[]);
        let first = run_in(
            &mut session,
            HookInvocation::new("usePathname", SourcePos::new(2, 1))
                .with_single_binding("pathname"),
        )
        .await;
        let second = run_in(
            &mut session,
            HookInvocation::new("useSearchParams", SourcePos::new(3, 1))
                .with_single_binding("searchParams"),
        )
        .await;

        // first invocation creates the singleton plus its own node
        assert_eq!(first.nodes.len(), 2);
        assert_eq!(first.nodes[0].label.as_str(), "URL: Input");
        // second only creates its own node
        assert_eq!(second.nodes.len(), 1);

        let url = &first.nodes[0].id;
        assert_eq!(first.edges[0].from, *url);
        assert_eq!(first.edges[0].label, "provides");
        assert_eq!(second.edges[0].from, *url);
        assert_eq!(second.edges[0].label, "provides");
    }

    #[tokio::test]
    async fn test_navigator_is_a_process_into_url_output() {
        let mut session = AnalysisSession::new("a.tsx", &[]);
        let output = run_in(
            &mut session,
            HookInvocation::new("useNavigate", SourcePos::new(2, 1))
                .with_single_binding("navigate"),
        )
        .await;

        assert_eq!(output.nodes.len(), 2);
        assert_eq!(output.nodes[0].label.as_str(), "URL: Output");
        assert_eq!(output.nodes[1].kind, NodeKind::Process);
        assert_eq!(output.edges[0].from, output.nodes[1].id);
        assert_eq!(output.edges[0].to, output.nodes[0].id);
        assert_eq!(output.edges[0].label, "navigates");
    }

    #[tokio::test]
    async fn test_fresh_session_gets_fresh_singleton() {
        let mut first_session = AnalysisSession::new("a.tsx", &[]);
        // push the singleton away from the first id slot
        first_session.next_id(NodeKind::ExternalInput);
        let first = run_in(
            &mut first_session,
            HookInvocation::new("usePathname", SourcePos::new(2, 1))
                .with_single_binding("pathname"),
        )
        .await;

        let mut second_session = AnalysisSession::new("b.tsx", &[]);
        let second = run_in(
            &mut second_session,
            HookInvocation::new("usePathname", SourcePos::new(2, 1))
                .with_single_binding("pathname"),
        )
        .await;

        // no aliasing: the second analysis allocated its own node
        assert_eq!(first.nodes[0].id.as_str(), "input-2");
        assert_eq!(second.nodes[0].id.as_str(), "input-1");
    }
}
