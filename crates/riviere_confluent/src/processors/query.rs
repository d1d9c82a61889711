//! Remote-query libraries (TanStack Query, SWR).
//!
//! One consolidated node per invocation holds every returned property,
//! tagged data or process by the static map below. The endpoint key (query
//! key / SWR key) keys a shared Server node: reads draw Server -> node
//! ("fetch"), mutations draw node -> Server ("mutate"). A dynamic key means
//! no Server node — the consolidated node still lands in the graph.

use crate::classifier::ClassifiedHook;
use crate::processor::{Priority, Processor, ProcessorError, ProcessorMeta, ProcessorOutput};
use crate::session::{AnalysisSession, ResourceKey};
use phf::{phf_map, phf_set};
use riviere_delta::{AccessFlags, BindingRecord, DfdNode, NodeId, NodeKind};
use riviere_socle::BindingRole;

static META: ProcessorMeta = ProcessorMeta {
    id: "remote-query",
    library: "@tanstack/query",
    package_patterns: &["@tanstack/*", "react-query", "swr"],
    hook_names: &[
        "useQuery",
        "useInfiniteQuery",
        "useMutation",
        "useSWR",
        "useSWRMutation",
    ],
    priority: Priority::ThirdParty,
};

/// Returned-property role map; unmapped properties default to `data`.
static PROPERTY_ROLES: phf::Map<&'static str, BindingRole> = phf_map! {
    "data" => BindingRole::Data,
    "error" => BindingRole::Data,
    "status" => BindingRole::Data,
    "isLoading" => BindingRole::Data,
    "isPending" => BindingRole::Data,
    "isFetching" => BindingRole::Data,
    "isValidating" => BindingRole::Data,
    "isError" => BindingRole::Data,
    "isSuccess" => BindingRole::Data,
    "refetch" => BindingRole::Function,
    "fetchNextPage" => BindingRole::Function,
    "mutate" => BindingRole::Function,
    "mutateAsync" => BindingRole::Function,
    "trigger" => BindingRole::Function,
};

/// Hooks that write to the server rather than reading from it.
static MUTATION_HOOKS: phf::Set<&'static str> = phf_set! {
    "useMutation",
    "useSWRMutation",
};

/// Remote data fetching and mutation hooks.
pub struct QueryProcessor;

impl QueryProcessor {
    /// Create or reuse the Server node for an endpoint key.
    fn server_node(
        output: &mut ProcessorOutput,
        session: &mut AnalysisSession,
        key: &str,
    ) -> NodeId {
        let resource = ResourceKey::Endpoint(key.into());
        if let Some(id) = session.resource_node(&resource) {
            return id.clone();
        }
        let id = session.next_id(NodeKind::ExternalInput);
        output.add_node(
            DfdNode::new(
                id.clone(),
                format!("Server: {key}"),
                NodeKind::ExternalInput,
            )
            .with_meta("endpoint", key),
        );
        session.bind_resource(resource, id.clone());
        id
    }
}

impl Processor for QueryProcessor {
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

        let endpoint = invocation.first_arg_name().map(str::to_owned);
        let is_mutation = MUTATION_HOOKS.contains(invocation.callee.as_str());

        let label = endpoint
            .as_deref()
            .map(riviere_socle::String::new)
            .unwrap_or_else(|| invocation.callee.clone());
        let id = session.next_id(NodeKind::DataStore);
        let mut node = DfdNode::new(id.clone(), label, NodeKind::DataStore)
            .with_pos(invocation.site)
            .with_meta("hook", invocation.callee.clone());

        for binding in &invocation.bindings {
            let role = PROPERTY_ROLES
                .get(binding.as_str())
                .copied()
                .unwrap_or(BindingRole::Data);
            let access = if role.is_function() {
                AccessFlags::WRITE
            } else {
                AccessFlags::READ
            };
            node = node.with_binding(BindingRecord::new(binding.clone(), role, access));
            session.register_owner(binding.clone(), id.clone());
            if role.is_function() {
                session.register_mutator(binding.clone(), id.clone());
            }
        }
        output.add_node(node);

        // No static endpoint key: omit the Server node, keep the rest.
        if let Some(key) = endpoint {
            let server = Self::server_node(&mut output, session, &key);
            if is_mutation {
                output.add_edge(&id, &server, "mutate");
            } else {
                output.add_edge(&server, &id, "fetch");
            }
        }

        Ok(output)
    }
}
