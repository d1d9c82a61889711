//! Text rendering of a data-flow graph.
//!
//! A TOML-like, line-oriented format for CLI output, debugging and snapshot
//! tests. Section and entry order follows graph insertion order, so output is
//! deterministic for a given input.

use crate::graph::DfdGraph;

impl DfdGraph {
    /// Render the graph in the text format.
    pub fn to_text(&self) -> String {
        let mut output = String::with_capacity(2048);

        output.push_str("[graph]\n");
        output.push_str(&format!("component = \"{}\"\n", self.component));
        output.push_str(&format!("nodes = {}\n", self.nodes().len()));
        output.push_str(&format!("edges = {}\n", self.edges().len()));
        output.push('\n');

        if !self.nodes().is_empty() {
            output.push_str("[nodes]\n");
            for node in self.nodes() {
                output.push_str(&format!(
                    "  {} = {{ kind = \"{}\", label = \"{}\"",
                    node.id,
                    node.kind.as_str(),
                    node.label
                ));
                if !node.meta.bindings.is_empty() {
                    output.push_str(", bindings = [");
                    for (i, binding) in node.meta.bindings.iter().enumerate() {
                        if i > 0 {
                            output.push_str(", ");
                        }
                        output.push_str(&format!(
                            "{}:{}:{}",
                            binding.name,
                            binding.role.as_str(),
                            binding.access.as_str()
                        ));
                    }
                    output.push(']');
                }
                output.push_str(" }\n");
            }
            output.push('\n');
        }

        if !self.edges().is_empty() {
            output.push_str("[edges]\n");
            for edge in self.edges() {
                output.push_str(&format!(
                    "  {} -> {} [{}]\n",
                    edge.from, edge.to, edge.label
                ));
            }
            output.push('\n');
        }

        if !self.subgraphs().is_empty() {
            output.push_str("[subgraphs]\n");
            for sub in self.subgraphs() {
                match &sub.parent {
                    Some(parent) => output.push_str(&format!(
                        "  {} = {{ label = \"{}\", parent = \"{}\" }}\n",
                        sub.id, sub.label, parent
                    )),
                    None => output.push_str(&format!(
                        "  {} = {{ label = \"{}\" }}\n",
                        sub.id, sub.label
                    )),
                }
            }
        }

        output
    }
}

impl std::fmt::Display for DfdGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::DfdGraph;
    use crate::node::{BindingRecord, DfdNode, NodeId, NodeKind};

    #[test]
    fn test_text_rendering() {
        let mut graph = DfdGraph::new("Counter");
        let store = graph
            .add_node(
                DfdNode::new(NodeId::new("store-1"), "count", NodeKind::DataStore)
                    .with_binding(BindingRecord::read("count"))
                    .with_binding(BindingRecord::write("setCount")),
            )
            .unwrap();
        let output = graph
            .add_node(DfdNode::new(
                NodeId::new("output-1"),
                "<p>",
                NodeKind::ExternalOutput,
            ))
            .unwrap();
        graph.add_edge(&store, &output, "display").unwrap();

        insta::assert_snapshot!(graph.to_text().trim_end(), @r###"
        [graph]
        component = "Counter"
        nodes = 2
        edges = 1

        [nodes]
          store-1 = { kind = "data-store", label = "count", bindings = [count:data:r, setCount:function:w] }
          output-1 = { kind = "external-entity-output", label = "<p>" }

        [edges]
          store-1 -> output-1 [display]
        "###);
    }

    #[test]
    fn test_empty_graph_has_header_only() {
        let graph = DfdGraph::new("Empty");
        let text = graph.to_text();
        assert!(text.starts_with("[graph]\n"));
        assert!(!text.contains("[nodes]"));
        assert!(!text.contains("[edges]"));
    }
}
