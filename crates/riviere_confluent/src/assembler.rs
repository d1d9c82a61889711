//! Graph assembler.
//!
//! After dispatch, the rendered-output tree decides how the processor-made
//! nodes connect to what the user sees: display edges for reads, invocation
//! edges for event handlers, subgraphs for conditional and iterated blocks.
//!
//! The walk is an explicit-stack fold, never recursion, so adversarially
//! deep trees cannot blow the call stack. Output nodes for elements are
//! created lazily — an element only enters the graph once something actually
//! flows into or out of it.

use crate::session::AnalysisSession;
use riviere_amont::{AttrValue, ConditionalNode, ElementNode, ExprRef, IterationNode, RenderNode};
use riviere_delta::{DfdGraph, DfdNode, GraphError, NodeId, NodeKind};
use riviere_socle::{format_compact, BindingRole, CompactString, SmallVec, SourcePos};

/// Walk scope: subgraph nesting, the nearest ancestor element, and loop
/// bindings that shadow component scope.
#[derive(Debug, Clone, Default)]
struct Scope {
    /// Subgraph new nodes belong to.
    subgraph: Option<NodeId>,
    /// Innermost loop subgraph; nested iterations merge into it.
    loop_subgraph: Option<NodeId>,
    /// Nearest ancestor element, by stable key into `elements`.
    parent_element: Option<usize>,
    /// Loop-local names shadowing component bindings.
    shadowed: SmallVec<[CompactString; 4]>,
}

/// Per-element bookkeeping for lazy output-node creation.
#[derive(Debug)]
struct ElementSlot {
    label: CompactString,
    pos: Option<SourcePos>,
    subgraph: Option<NodeId>,
    node: Option<NodeId>,
}

/// One reference out of an expression, resolved to its owning node.
struct ResolvedRef {
    name: CompactString,
    owner: NodeId,
    role: BindingRole,
}

/// Assembles render-tree structure into the graph.
pub struct GraphAssembler<'a> {
    session: &'a mut AnalysisSession,
    elements: Vec<ElementSlot>,
}

impl<'a> GraphAssembler<'a> {
    pub fn new(session: &'a mut AnalysisSession) -> Self {
        Self {
            session,
            elements: Vec::new(),
        }
    }

    /// Walk the rendered-output tree and connect it to the graph.
    pub fn assemble(&mut self, graph: &mut DfdGraph, root: &RenderNode) -> Result<(), GraphError> {
        let mut stack: Vec<(&RenderNode, Scope)> = vec![(root, Scope::default())];

        while let Some((node, scope)) = stack.pop() {
            match node {
                RenderNode::Element(element) => {
                    self.visit_element(graph, element, &scope, &mut stack)?;
                }
                RenderNode::Text { .. } => {}
                RenderNode::Interpolation { expr } => {
                    self.visit_interpolation(graph, expr, &scope)?;
                }
                RenderNode::Conditional(conditional) => {
                    self.visit_conditional(graph, conditional, &scope, &mut stack)?;
                }
                RenderNode::Iteration(iteration) => {
                    self.visit_iteration(graph, iteration, &scope, &mut stack)?;
                }
            }
        }

        Ok(())
    }

    /// Resolve an expression's references against the session's owner map,
    /// skipping loop-shadowed names. The role comes from the owning node's
    /// binding record — classification is per variable, the usage site
    /// decides what the role means.
    fn resolve_refs(&self, graph: &DfdGraph, expr: &ExprRef, scope: &Scope) -> Vec<ResolvedRef> {
        let mut resolved = Vec::new();
        for name in &expr.refs {
            if scope.shadowed.contains(name) {
                continue;
            }
            let Some(owner) = self.session.owner_of(name) else {
                continue;
            };
            let Some(node) = graph.node(owner) else {
                continue;
            };
            let role = node
                .meta
                .binding(name)
                .map(|record| record.role)
                .unwrap_or(match node.kind {
                    NodeKind::Process => BindingRole::Function,
                    _ => BindingRole::Data,
                });
            resolved.push(ResolvedRef {
                name: name.clone(),
                owner: owner.clone(),
                role,
            });
        }
        resolved
    }

    /// Output node for an element slot, created on first use.
    fn element_node(
        &mut self,
        graph: &mut DfdGraph,
        slot_key: usize,
    ) -> Result<NodeId, GraphError> {
        let slot = &mut self.elements[slot_key];
        if let Some(id) = &slot.node {
            return Ok(id.clone());
        }
        let id = self.session.next_id(NodeKind::ExternalOutput);
        let mut node = DfdNode::new(id.clone(), slot.label.clone(), NodeKind::ExternalOutput);
        if let Some(pos) = slot.pos {
            node = node.with_pos(pos);
        }
        if let Some(subgraph) = &slot.subgraph {
            node = node.with_meta("subgraph", subgraph.as_str());
        }
        graph.add_node(node)?;
        self.elements[slot_key].node = Some(id.clone());
        Ok(id)
    }

    /// Process node for an event handler variable: reuse the owning node if
    /// it already is a process, otherwise create (and cache) one per handler.
    fn handler_node(
        &mut self,
        graph: &mut DfdGraph,
        handler: &ResolvedRef,
        scope: &Scope,
    ) -> Result<NodeId, GraphError> {
        if graph
            .node(&handler.owner)
            .is_some_and(|node| node.kind == NodeKind::Process)
        {
            return Ok(handler.owner.clone());
        }
        if let Some(id) = self.session.handler_process(&handler.name) {
            return Ok(id.clone());
        }
        let id = self.session.next_id(NodeKind::Process);
        let mut node = DfdNode::new(id.clone(), handler.name.clone(), NodeKind::Process);
        if let Some(subgraph) = &scope.subgraph {
            node = node.with_meta("subgraph", subgraph.as_str());
        }
        graph.add_node(node)?;
        self.session
            .register_handler_process(handler.name.clone(), id.clone());
        Ok(id)
    }

    fn visit_element<'t>(
        &mut self,
        graph: &mut DfdGraph,
        element: &'t ElementNode,
        scope: &Scope,
        stack: &mut Vec<(&'t RenderNode, Scope)>,
    ) -> Result<(), GraphError> {
        let slot_key = self.elements.len();
        self.elements.push(ElementSlot {
            label: format_compact!("<{}>", element.tag),
            pos: element.pos,
            subgraph: scope.subgraph.clone(),
            node: None,
        });

        for attr in &element.attrs {
            let AttrValue::Expr(expr) = &attr.value else {
                continue;
            };
            let resolved = self.resolve_refs(graph, expr, scope);

            if attr.is_event() {
                // Direct references and wrapper arrows surface the same
                // resolved names, so both produce the same edge shape.
                for handler in resolved.iter().filter(|r| r.role.is_function()) {
                    let element_id = self.element_node(graph, slot_key)?;
                    let process_id = self.handler_node(graph, handler, scope)?;
                    graph.add_edge(&element_id, &process_id, attr.name.clone())?;

                    if let Some(data) = self.session.mutated_by(&handler.name).cloned() {
                        if !graph.has_edge(&process_id, &data, "updates") {
                            graph.add_edge(&process_id, &data, "updates")?;
                        }
                    }
                    // a callback prop flows back out to whoever passed it
                    let notifies = graph
                        .node(&handler.owner)
                        .is_some_and(|n| n.kind == NodeKind::ExternalInput);
                    if notifies && !graph.has_edge(&process_id, &handler.owner, "notifies") {
                        graph.add_edge(&process_id, &handler.owner, "notifies")?;
                    }
                }
            } else {
                // plain value position: every resolvable reference is a read
                for reference in &resolved {
                    let element_id = self.element_node(graph, slot_key)?;
                    if !graph.has_edge(&reference.owner, &element_id, "value") {
                        graph.add_edge(&reference.owner, &element_id, "value")?;
                    }
                }
            }
        }

        let child_scope = Scope {
            parent_element: Some(slot_key),
            ..scope.clone()
        };
        for child in element.children.iter().rev() {
            stack.push((child, child_scope.clone()));
        }
        Ok(())
    }

    fn visit_interpolation(
        &mut self,
        graph: &mut DfdGraph,
        expr: &ExprRef,
        scope: &Scope,
    ) -> Result<(), GraphError> {
        let Some(slot_key) = scope.parent_element else {
            return Ok(());
        };
        let resolved = self.resolve_refs(graph, expr, scope);
        for reference in &resolved {
            let element_id = self.element_node(graph, slot_key)?;
            if !graph.has_edge(&reference.owner, &element_id, "display") {
                graph.add_edge(&reference.owner, &element_id, "display")?;
            }
        }
        Ok(())
    }

    fn visit_conditional<'t>(
        &mut self,
        graph: &mut DfdGraph,
        conditional: &'t ConditionalNode,
        scope: &Scope,
        stack: &mut Vec<(&'t RenderNode, Scope)>,
    ) -> Result<(), GraphError> {
        let resolved = self.resolve_refs(graph, &conditional.test, scope);

        let id = self.session.next_id(NodeKind::Subgraph);
        graph.add_subgraph(
            id.clone(),
            format_compact!("if: {}", conditional.test.source),
            scope.subgraph.clone(),
        )?;

        for reference in &resolved {
            graph.add_edge(&reference.owner, &id, "controls")?;
        }

        let child_scope = Scope {
            subgraph: Some(id),
            ..scope.clone()
        };
        for child in conditional
            .else_children
            .iter()
            .rev()
            .chain(conditional.then_children.iter().rev())
        {
            stack.push((child, child_scope.clone()));
        }
        Ok(())
    }

    fn visit_iteration<'t>(
        &mut self,
        graph: &mut DfdGraph,
        iteration: &'t IterationNode,
        scope: &Scope,
        stack: &mut Vec<(&'t RenderNode, Scope)>,
    ) -> Result<(), GraphError> {
        let resolved = self.resolve_refs(graph, &iteration.collection, scope);

        // Nested iteration blocks collapse into the enclosing loop subgraph:
        // the diagram models "this block runs N times", not nesting depth.
        let (loop_id, created) = match &scope.loop_subgraph {
            Some(id) => (id.clone(), false),
            None => {
                let id = self.session.next_id(NodeKind::Subgraph);
                graph.add_subgraph(
                    id.clone(),
                    format_compact!("loop: {}", iteration.collection.source),
                    scope.subgraph.clone(),
                )?;
                (id, true)
            }
        };

        for reference in &resolved {
            if !graph.has_edge(&reference.owner, &loop_id, "iterates") {
                graph.add_edge(&reference.owner, &loop_id, "iterates")?;
            }
        }

        let mut shadowed = scope.shadowed.clone();
        shadowed.extend(iteration.item_bindings.iter().cloned());
        let child_scope = Scope {
            subgraph: if created {
                Some(loop_id.clone())
            } else {
                scope.subgraph.clone()
            },
            loop_subgraph: Some(loop_id),
            parent_element: scope.parent_element,
            shadowed,
        };
        for child in iteration.children.iter().rev() {
            stack.push((child, child_scope.clone()));
        }
        Ok(())
    }
}
