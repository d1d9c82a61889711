//! Per-analysis session state.
//!
//! Everything mutable that processors share lives here, never in processor
//! instances: id counters, resource-key caches, the URL singletons, and the
//! variable-to-node maps the assembler reads. The session is constructed
//! inside each analyze call and never escapes it, so state cannot leak
//! between analyses and two concurrent analyses cannot alias each other's
//! nodes.

use riviere_amont::AtomDefinition;
use riviere_delta::{NodeId, NodeKind};
use riviere_socle::{CompactString, FxHashMap, IdGenerator, String};

/// Structural identity deciding whether two invocations share one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    /// Atomic-state unit, keyed by atom name.
    Atom(CompactString),
    /// Shared store, keyed by store name.
    Store(CompactString),
    /// Remote endpoint, keyed by query/mutation key.
    Endpoint(CompactString),
    /// Context/injection token, keyed by token name.
    Context(CompactString),
}

/// Mutable state scoped to exactly one analysis.
#[derive(Debug)]
pub struct AnalysisSession {
    /// Source file the analysis runs over; oracle queries carry it.
    pub file_path: String,
    ids: IdGenerator,
    resource_nodes: FxHashMap<ResourceKey, NodeId>,
    url_input: Option<NodeId>,
    url_output: Option<NodeId>,
    /// Bound variable name -> node that owns it.
    owners: FxHashMap<CompactString, NodeId>,
    /// Function variable name -> data node it is known to mutate.
    mutators: FxHashMap<CompactString, NodeId>,
    /// Handler variable name -> process node the assembler created for it.
    handler_processes: FxHashMap<CompactString, NodeId>,
    /// Atom definitions from the static scan, keyed by atom name.
    atoms: FxHashMap<CompactString, AtomDefinition>,
}

impl AnalysisSession {
    pub fn new(file_path: impl Into<String>, atoms: &[AtomDefinition]) -> Self {
        Self {
            file_path: file_path.into(),
            ids: IdGenerator::new(),
            resource_nodes: FxHashMap::default(),
            url_input: None,
            url_output: None,
            owners: FxHashMap::default(),
            mutators: FxHashMap::default(),
            handler_processes: FxHashMap::default(),
            atoms: atoms
                .iter()
                .map(|atom| (atom.name.clone(), atom.clone()))
                .collect(),
        }
    }

    /// Allocate the next node id for a kind. Per-prefix counters, reset per
    /// analysis by construction.
    #[inline]
    pub fn next_id(&mut self, kind: NodeKind) -> NodeId {
        NodeId::from(self.ids.next(kind.id_prefix()))
    }

    /// Node already bound to a resource key, if any.
    #[inline]
    pub fn resource_node(&self, key: &ResourceKey) -> Option<&NodeId> {
        self.resource_nodes.get(key)
    }

    /// Bind a resource key to its node.
    #[inline]
    pub fn bind_resource(&mut self, key: ResourceKey, id: NodeId) {
        self.resource_nodes.insert(key, id);
    }

    /// The shared "URL: Input" node, if an input-style navigation hook
    /// already created it.
    #[inline]
    pub fn url_input(&self) -> Option<&NodeId> {
        self.url_input.as_ref()
    }

    #[inline]
    pub fn set_url_input(&mut self, id: NodeId) {
        self.url_input = Some(id);
    }

    /// The shared "URL: Output" node, if a navigator already created it.
    #[inline]
    pub fn url_output(&self) -> Option<&NodeId> {
        self.url_output.as_ref()
    }

    #[inline]
    pub fn set_url_output(&mut self, id: NodeId) {
        self.url_output = Some(id);
    }

    /// Register `name` as owned by `node` so render-tree references resolve.
    #[inline]
    pub fn register_owner(&mut self, name: impl Into<CompactString>, node: NodeId) {
        self.owners.insert(name.into(), node);
    }

    #[inline]
    pub fn owner_of(&self, name: &str) -> Option<&NodeId> {
        self.owners.get(name)
    }

    /// Record that calling `name` mutates the data held by `node`.
    #[inline]
    pub fn register_mutator(&mut self, name: impl Into<CompactString>, node: NodeId) {
        self.mutators.insert(name.into(), node);
    }

    #[inline]
    pub fn mutated_by(&self, name: &str) -> Option<&NodeId> {
        self.mutators.get(name)
    }

    /// Process node the assembler created for a handler variable.
    #[inline]
    pub fn handler_process(&self, name: &str) -> Option<&NodeId> {
        self.handler_processes.get(name)
    }

    #[inline]
    pub fn register_handler_process(&mut self, name: impl Into<CompactString>, node: NodeId) {
        self.handler_processes.insert(name.into(), node);
    }

    /// Statically scanned atom definition, keyed by atom name.
    #[inline]
    pub fn atom(&self, name: &str) -> Option<&AtomDefinition> {
        self.atoms.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_binding() {
        let mut session = AnalysisSession::new("a.tsx", &[]);
        let id = session.next_id(NodeKind::DataStore);
        assert_eq!(id.as_str(), "store-1");

        let key = ResourceKey::Atom("countAtom".into());
        assert!(session.resource_node(&key).is_none());
        session.bind_resource(key.clone(), id.clone());
        assert_eq!(session.resource_node(&key), Some(&id));

        // Same name under a different kind is a different key
        let store_key = ResourceKey::Store("countAtom".into());
        assert!(session.resource_node(&store_key).is_none());
    }

    #[test]
    fn test_fresh_session_restarts_ids() {
        let mut first = AnalysisSession::new("a.tsx", &[]);
        first.next_id(NodeKind::ExternalInput);
        first.next_id(NodeKind::ExternalInput);

        let mut second = AnalysisSession::new("b.tsx", &[]);
        assert_eq!(second.next_id(NodeKind::ExternalInput).as_str(), "input-1");
    }

    #[test]
    fn test_fresh_session_has_no_url_singletons() {
        let mut first = AnalysisSession::new("a.tsx", &[]);
        let url = first.next_id(NodeKind::ExternalInput);
        first.set_url_input(url);
        assert!(first.url_input().is_some());

        let second = AnalysisSession::new("a.tsx", &[]);
        assert!(second.url_input().is_none());
        assert!(second.url_output().is_none());
    }

    #[test]
    fn test_atom_lookup() {
        let atoms = vec![AtomDefinition::derived("doubledAtom", vec!["countAtom".into()])];
        let session = AnalysisSession::new("a.tsx", &atoms);
        assert!(session.atom("doubledAtom").is_some_and(|a| a.derived));
        assert!(session.atom("countAtom").is_none());
    }
}
