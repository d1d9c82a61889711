//! End-to-end scenarios through the public facade.
//!
//! Each test drives the full pipeline the way an embedding editor would:
//! deserialized facts in, a validated graph out.

use riviere::amont::{
    AtomDefinition, AttrBinding, BindingForm, ComponentAnalysis, ElementNode, ExprRef, Framework,
    HookArg, HookInvocation, RenderNode,
};
use riviere::delta::{AccessFlags, NodeKind};
use riviere::DfdAnalyzer;
use riviere_socle::SourcePos;

#[tokio::test]
async fn custom_hook_verdicts_without_oracle() {
    // const { count, increment, decrement, reset } = useCounter()
    let analysis = ComponentAnalysis::new("Counter", "Counter.tsx", Framework::React).with_hooks(
        vec![HookInvocation::new("useCounter", SourcePos::new(2, 3)).with_bindings(
            BindingForm::ObjectPattern,
            vec![
                "count".into(),
                "increment".into(),
                "decrement".into(),
                "reset".into(),
            ],
        )],
    );

    let graph = DfdAnalyzer::new().analyze(&analysis, None, &[]).await.unwrap();

    let node = graph
        .nodes()
        .iter()
        .find(|n| n.label == "useCounter")
        .expect("custom hook node");
    assert_eq!(node.kind, NodeKind::DataStore);

    assert!(!node.meta.binding("count").unwrap().role.is_function());
    for verb in ["increment", "decrement", "reset"] {
        assert!(node.meta.binding(verb).unwrap().role.is_function(), "{verb}");
    }
}

#[tokio::test]
async fn split_atom_access_shares_one_node() {
    // useAtomValue(countAtom) + useSetAtom(countAtom)
    let analysis = ComponentAnalysis::new("Counter", "Counter.tsx", Framework::React).with_hooks(
        vec![
            HookInvocation::new("useAtomValue", SourcePos::new(2, 3))
                .with_single_binding("count")
                .with_args(vec![HookArg::Ident("countAtom".into())]),
            HookInvocation::new("useSetAtom", SourcePos::new(3, 3))
                .with_single_binding("setCount")
                .with_args(vec![HookArg::Ident("countAtom".into())]),
        ],
    );

    let graph = DfdAnalyzer::new()
        .analyze(&analysis, None, &[AtomDefinition::plain("countAtom")])
        .await
        .unwrap();

    let atoms: Vec<_> = graph
        .nodes()
        .iter()
        .filter(|n| n.label == "countAtom")
        .collect();
    assert_eq!(atoms.len(), 1);

    // both roles recorded on the one node
    let meta = &atoms[0].meta;
    assert_eq!(meta.access(), AccessFlags::READ | AccessFlags::WRITE);
    assert!(!meta.binding("count").unwrap().role.is_function());
    assert!(meta.binding("setCount").unwrap().role.is_function());
}

#[tokio::test]
async fn facts_arrive_as_json() {
    // the shape an out-of-process extractor hands over
    let facts = r#"{
        "name": "Greeting",
        "file_path": "Greeting.tsx",
        "framework": "react",
        "props": [{ "name": "user", "role_guess": "data" }],
        "hooks": [],
        "render_root": {
            "node": "element",
            "tag": "h1",
            "attrs": [],
            "children": [
                { "node": "interpolation", "expr": { "source": "user", "refs": ["user"] } }
            ]
        }
    }"#;

    let analysis: ComponentAnalysis = serde_json::from_str(facts).unwrap();
    let graph = DfdAnalyzer::new().analyze(&analysis, None, &[]).await.unwrap();

    let prop = graph.nodes().iter().find(|n| n.label == "user").unwrap();
    assert_eq!(prop.kind, NodeKind::ExternalInput);
    let h1 = graph.nodes().iter().find(|n| n.label == "<h1>").unwrap();
    assert!(graph.has_edge(&prop.id, &h1.id, "display"));
}

#[tokio::test]
async fn graph_serializes_with_stable_kind_names() {
    let analysis = ComponentAnalysis::new("Counter", "Counter.tsx", Framework::React)
        .with_hooks(vec![HookInvocation::new("useState", SourcePos::new(2, 3))
            .with_bindings(
                BindingForm::ArrayPattern,
                vec!["count".into(), "setCount".into()],
            )])
        .with_render_root(RenderNode::Element(
            ElementNode::new("button").with_attr(AttrBinding::expr(
                "onClick",
                ExprRef::new("() => setCount(count + 1)", vec!["setCount".into()]),
            )),
        ));

    let graph = DfdAnalyzer::new().analyze(&analysis, None, &[]).await.unwrap();
    let value: serde_json::Value = serde_json::to_value(&graph).unwrap();

    assert_eq!(value["component"], "Counter");
    let kinds: Vec<&str> = value["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"data-store"));
    assert!(kinds.contains(&"process"));
    assert!(kinds.contains(&"external-entity-output"));

    let edges = value["edges"].as_array().unwrap();
    assert!(edges
        .iter()
        .any(|e| e["label"] == "updates" && e["from"].as_str().unwrap().starts_with("process")));
}

#[tokio::test]
async fn text_rendering_is_stable() {
    let analysis = ComponentAnalysis::new("Counter", "Counter.tsx", Framework::React)
        .with_hooks(vec![HookInvocation::new("useState", SourcePos::new(2, 3))
            .with_bindings(
                BindingForm::ArrayPattern,
                vec!["count".into(), "setCount".into()],
            )])
        .with_render_root(RenderNode::Element(
            ElementNode::new("button").with_attr(AttrBinding::expr(
                "onClick",
                ExprRef::new("() => setCount(count + 1)", vec!["setCount".into()]),
            )),
        ));

    let graph = DfdAnalyzer::new().analyze(&analysis, None, &[]).await.unwrap();

    insta::assert_snapshot!(graph.to_text().trim_end(), @r###"
    [graph]
    component = "Counter"
    nodes = 3
    edges = 2

    [nodes]
      store-1 = { kind = "data-store", label = "count", bindings = [count:data:r, setCount:function:w] }
      output-1 = { kind = "external-entity-output", label = "<button>" }
      process-1 = { kind = "process", label = "setCount" }

    [edges]
      output-1 -> process-1 [onClick]
      process-1 -> store-1 [updates]
    "###);
}

#[tokio::test]
async fn doubly_nested_iteration_yields_one_loop() {
    let inner = RenderNode::Iteration(
        riviere::amont::IterationNode::new(ExprRef::new("row.cells", vec!["row".into()]))
            .with_item_bindings(vec!["cell".into()])
            .with_children(vec![RenderNode::Element(ElementNode::new("td"))]),
    );
    let analysis = ComponentAnalysis::new("Grid", "Grid.tsx", Framework::React)
        .with_hooks(vec![HookInvocation::new("useState", SourcePos::new(1, 1))
            .with_bindings(
                BindingForm::ArrayPattern,
                vec!["rows".into(), "setRows".into()],
            )])
        .with_render_root(RenderNode::Element(ElementNode::new("table").with_child(
            RenderNode::Iteration(
                riviere::amont::IterationNode::new(ExprRef::ident("rows"))
                    .with_item_bindings(vec!["row".into()])
                    .with_children(vec![inner]),
            ),
        )));

    let graph = DfdAnalyzer::new().analyze(&analysis, None, &[]).await.unwrap();
    assert_eq!(graph.subgraphs().len(), 1);
}
