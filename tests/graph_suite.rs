use std::collections::HashMap;
use std::path::Path;

use json_graph_viz::config::{BuildConfig, LayoutConfig};
use json_graph_viz::ir::{Graph, NodeKind, NodeLabel};
use json_graph_viz::layout::{Layout, NodeLayout};
use json_graph_viz::{GraphDump, Theme, build_graph, compute_layout};
use pretty_assertions::assert_eq;
use serde_json::Value;

// Keep this list explicit so new fixtures must be added intentionally.
const FIXTURES: [&str; 6] = [
    "basic.json",
    "arrays.json",
    "nested.json",
    "wide.json",
    "primitives.json",
    "empty_object.json",
];

fn load_fixture(name: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path).expect("fixture read failed");
    serde_json::from_str(&text).expect("fixture parse failed")
}

fn build_and_layout(value: &Value) -> (Graph, Layout) {
    let graph = build_graph(value, &BuildConfig::default());
    let layout = compute_layout(&graph, &LayoutConfig::default());
    (graph, layout)
}

/// Reference node count under the inline-and-skip policy: every object is a
/// node, every primitive/null that is not inlined as an object row is a
/// node, arrays contribute nothing of their own.
fn expected_node_count(value: &Value) -> usize {
    match value {
        Value::Array(items) => items.iter().map(expected_node_count).sum(),
        Value::Object(map) => {
            1 + map
                .values()
                .map(|prop| match prop {
                    Value::Object(inner) if !inner.is_empty() => expected_node_count(prop),
                    Value::Array(inner) if !inner.is_empty() => expected_node_count(prop),
                    _ => 0,
                })
                .sum::<usize>()
        }
        _ => 1,
    }
}

fn overlaps(a: &NodeLayout, b: &NodeLayout) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

#[test]
fn fixtures_satisfy_the_graph_invariants() {
    for fixture in FIXTURES {
        let value = load_fixture(fixture);
        let (graph, layout) = build_and_layout(&value);

        assert_eq!(
            graph.nodes.len(),
            expected_node_count(&value),
            "{fixture}: node count"
        );
        assert_eq!(layout.nodes.len(), graph.nodes.len(), "{fixture}");

        // handle indexes per source are exactly 0..count, in edge order
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for edge in &graph.edges {
            let next = seen.entry(edge.source.as_str()).or_insert(0);
            assert_eq!(
                edge.source_handle_index, *next,
                "{fixture}: handles of {} out of order",
                edge.source
            );
            *next += 1;
        }
        for node in &graph.nodes {
            let count = seen.get(node.id.as_str()).copied().unwrap_or(0);
            assert_eq!(
                node.outgoing_handle_count, count,
                "{fixture}: handle count of {}",
                node.id
            );
        }

        // exactly one incoming edge per non-root node, none for roots
        let mut incoming: HashMap<&str, usize> = HashMap::new();
        for edge in &graph.edges {
            *incoming.entry(edge.target.as_str()).or_insert(0) += 1;
        }
        for node in &graph.nodes {
            let count = incoming.get(node.id.as_str()).copied().unwrap_or(0);
            assert_eq!(count, usize::from(node.has_incoming_edge), "{fixture}");
        }
    }
}

#[test]
fn fixtures_satisfy_the_layout_invariants() {
    for fixture in FIXTURES {
        let value = load_fixture(fixture);
        let (_, layout) = build_and_layout(&value);

        for (i, a) in layout.nodes.iter().enumerate() {
            for b in layout.nodes.iter().skip(i + 1) {
                assert!(!overlaps(a, b), "{fixture}: {} overlaps {}", a.id, b.id);
            }
        }

        let by_id: HashMap<&str, &NodeLayout> = layout
            .nodes
            .iter()
            .map(|node| (node.id.as_str(), node))
            .collect();
        for edge in &layout.edges {
            let source = by_id[edge.source.as_str()];
            let target = by_id[edge.target.as_str()];
            assert!(
                source.x + source.width < target.x,
                "{fixture}: edge {} does not point rightward",
                edge.id
            );
        }

        for node in &layout.nodes {
            assert!(node.width >= 200.0 && node.width <= 350.0, "{fixture}");
            assert!(node.height >= 60.0, "{fixture}");
            assert!(node.x >= 0.0 && node.y >= 0.0, "{fixture}");
        }
    }
}

#[test]
fn rebuilds_are_bit_identical() {
    for fixture in FIXTURES {
        let value = load_fixture(fixture);
        let (first_graph, first_layout) = build_and_layout(&value);
        let (second_graph, second_layout) = build_and_layout(&value);

        let first_ids: Vec<&str> = first_graph.nodes.iter().map(|n| n.id.as_str()).collect();
        let second_ids: Vec<&str> = second_graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(first_ids, second_ids, "{fixture}");
        assert_eq!(first_graph.edges, second_graph.edges, "{fixture}");
        for (a, b) in first_layout.nodes.iter().zip(&second_layout.nodes) {
            assert_eq!(
                (a.x, a.y, a.width, a.height),
                (b.x, b.y, b.width, b.height),
                "{fixture}: {}",
                a.id
            );
        }
    }
}

#[test]
fn deep_fixture_forms_a_linear_chain() {
    let value = load_fixture("nested.json");
    let (graph, _) = build_and_layout(&value);
    assert_eq!(graph.nodes.len(), 10);
    assert_eq!(graph.edges.len(), 9);
    let labels: Vec<&str> = graph
        .edges
        .iter()
        .map(|edge| edge.label.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(labels, ["l1", "l2", "l3", "l4", "l5", "l6", "l7", "l8", "l9"]);
    assert!(graph.nodes.iter().all(|n| n.outgoing_handle_count <= 1));
}

#[test]
fn long_primitive_fixture_truncates() {
    let value = load_fixture("primitives.json");
    let (graph, _) = build_and_layout(&value);
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].kind, NodeKind::Primitive);
    let NodeLabel::Text { text, .. } = &graph.nodes[0].label else {
        panic!("primitive label must be text");
    };
    assert!(text.ends_with("..."));
    assert_eq!(text.chars().count(), 53);
}

#[test]
fn dump_round_trips_through_serde() {
    let value = load_fixture("wide.json");
    let (_, layout) = build_and_layout(&value);
    let dump = GraphDump::from_layout(&layout, &Theme::default());
    let json = serde_json::to_string(&dump).expect("dump serializes");
    let parsed: Value = serde_json::from_str(&json).expect("dump is valid JSON");
    assert_eq!(parsed["node_count"].as_u64(), Some(layout.nodes.len() as u64));
    assert_eq!(
        parsed["nodes"].as_array().map(Vec::len),
        Some(layout.nodes.len())
    );
}
