use std::collections::HashMap;

use serde_json::Value;

use crate::config::BuildConfig;
use crate::ir::{ColorClass, FieldRow, Graph, GraphEdge, JsonNode, NodeKind, NodeLabel, value_summary};

/// One pending traversal step. Frames live on an explicit heap stack so
/// nesting depth is bounded by memory, not by the native call stack.
struct WorkItem<'v> {
    value: &'v Value,
    parent: Option<String>,
    edge_label: Option<String>,
}

/// Mutable state scoped to a single build: the id counter plus the
/// per-parent child lists that back handle indexes. Discarded on return, so
/// repeated builds never interfere.
#[derive(Default)]
struct BuildContext {
    counter: usize,
    children: HashMap<String, Vec<String>>,
    nodes: Vec<JsonNode>,
    edges: Vec<GraphEdge>,
}

impl BuildContext {
    fn next_id(&mut self, parent: Option<&str>) -> String {
        let id = match parent {
            Some(parent) => format!("{parent}-{}", self.counter),
            None => format!("root-{}", self.counter),
        };
        self.counter += 1;
        id
    }

    /// Registers `id` as the next child of `parent` and returns the handle
    /// index it lands on: the child count recorded so far.
    fn register_child(&mut self, parent: &str, id: &str) -> usize {
        let siblings = self.children.entry(parent.to_string()).or_default();
        let index = siblings.len();
        siblings.push(id.to_string());
        index
    }
}

/// Builds the node/edge graph for a parsed JSON value. Total over all
/// well-formed values; never fails.
///
/// Arrays are transparent: an array work item re-dispatches its elements to
/// the array's logical parent with `[index]` appended to the carried edge
/// label, and allocates no node or id of its own. A top-level array therefore
/// produces multiple root nodes.
pub fn build_graph(json: &Value, config: &BuildConfig) -> Graph {
    let mut ctx = BuildContext::default();
    let mut stack = vec![WorkItem {
        value: json,
        parent: None,
        edge_label: None,
    }];

    // Depth-first preorder: children are pushed in reverse so pop order
    // matches key order, which fixes both id assignment and handle indexes.
    while let Some(item) = stack.pop() {
        if let Value::Array(items) = item.value {
            for (index, element) in items.iter().enumerate().rev() {
                stack.push(WorkItem {
                    value: element,
                    parent: item.parent.clone(),
                    edge_label: Some(extend_label(item.edge_label.as_deref(), index)),
                });
            }
            continue;
        }

        let id = ctx.next_id(item.parent.as_deref());
        if let Some(parent) = &item.parent {
            let source_handle_index = ctx.register_child(parent, &id);
            ctx.edges.push(GraphEdge {
                id: format!("e-{parent}-{id}"),
                source: parent.clone(),
                target: id.clone(),
                source_handle_index,
                label: item.edge_label.clone(),
            });
        }
        let has_incoming_edge = item.parent.is_some();

        match item.value {
            Value::Null => ctx.nodes.push(JsonNode {
                id,
                kind: NodeKind::Null,
                label: NodeLabel::Text {
                    text: "null".to_string(),
                    color: ColorClass::Null,
                },
                has_incoming_edge,
                outgoing_handle_count: 0,
            }),
            Value::Object(map) => {
                let mut rows = Vec::with_capacity(map.len());
                let mut pending = Vec::new();
                for (key, prop) in map {
                    rows.push(FieldRow {
                        key: key.clone(),
                        value: value_summary(prop),
                        color: ColorClass::of(prop),
                    });
                    if recurses(prop, config) {
                        pending.push(WorkItem {
                            value: prop,
                            parent: Some(id.clone()),
                            edge_label: Some(key.clone()),
                        });
                    }
                }
                for child in pending.into_iter().rev() {
                    stack.push(child);
                }
                ctx.nodes.push(JsonNode {
                    id,
                    kind: NodeKind::Object,
                    label: NodeLabel::Fields(rows),
                    has_incoming_edge,
                    outgoing_handle_count: 0,
                });
            }
            value => {
                let literal = value.to_string();
                ctx.nodes.push(JsonNode {
                    id,
                    kind: NodeKind::Primitive,
                    label: NodeLabel::Text {
                        text: truncate_literal(&literal, config.max_primitive_chars),
                        color: ColorClass::of(value),
                    },
                    has_incoming_edge,
                    outgoing_handle_count: 0,
                });
            }
        }
    }

    for node in &mut ctx.nodes {
        node.outgoing_handle_count = ctx.children.get(&node.id).map(Vec::len).unwrap_or(0);
    }

    Graph {
        nodes: ctx.nodes,
        edges: ctx.edges,
    }
}

/// Whether an object property gets its own subtree. Scalars and nulls are
/// always inlined; empty containers are inlined too unless the
/// always-recurse policy is configured.
fn recurses(value: &Value, config: &BuildConfig) -> bool {
    match value {
        Value::Object(map) => config.recurse_empty_containers || !map.is_empty(),
        Value::Array(items) => config.recurse_empty_containers || !items.is_empty(),
        _ => false,
    }
}

/// Appends `[index]` to the carried edge label, or starts one when traversal
/// enters a top-level array. Nested arrays keep extending the same chain.
fn extend_label(label: Option<&str>, index: usize) -> String {
    match label {
        Some(label) => format!("{label}[{index}]"),
        None => format!("[{index}]"),
    }
}

fn truncate_literal(literal: &str, max_chars: usize) -> String {
    if literal.chars().count() <= max_chars {
        return literal.to_string();
    }
    let mut out: String = literal.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
