mod ranking;
pub(crate) mod types;
pub use types::*;

use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::ir::{Graph, NodeLabel};

/// Computes a left-to-right layered layout for a built graph. Deterministic:
/// identical graphs and config produce identical coordinates.
///
/// Ranks go on the x axis (ancestors strictly left of descendants); within a
/// rank, nodes are ordered by median sweeps and stacked on the y axis with a
/// fixed gap, then pulled toward their neighbors' medians without ever
/// reintroducing overlap.
pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    if graph.nodes.is_empty() {
        return Layout::default();
    }

    let sizes: HashMap<String, (f32, f32)> = graph
        .nodes
        .iter()
        .map(|node| (node.id.clone(), estimate_size(&node.label, config)))
        .collect();
    let node_order: HashMap<String, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.clone(), idx))
        .collect();

    let ranks = ranking::compute_ranks(graph);
    let max_rank = ranks.values().copied().max().unwrap_or(0);
    let mut rank_nodes: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
    for node in &graph.nodes {
        rank_nodes[ranks[&node.id]].push(node.id.clone());
    }
    ranking::order_rank_nodes(&mut rank_nodes, &graph.edges, &node_order, config.order_passes);

    // Initial cross-axis stacking per rank.
    let mut centers: HashMap<String, f32> = HashMap::with_capacity(graph.nodes.len());
    for bucket in &rank_nodes {
        let mut cursor = 0.0f32;
        for id in bucket {
            let height = sizes[id].1;
            centers.insert(id.clone(), cursor + height / 2.0);
            cursor += height + config.node_spacing;
        }
    }

    let mut incoming: HashMap<String, Vec<String>> = HashMap::new();
    let mut outgoing: HashMap<String, Vec<String>> = HashMap::new();
    for edge in &graph.edges {
        incoming
            .entry(edge.target.clone())
            .or_default()
            .push(edge.source.clone());
        outgoing
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
    }

    for _ in 0..config.order_passes.max(1) {
        for rank in 1..rank_nodes.len() {
            place_rank(&rank_nodes[rank], &incoming, &sizes, &mut centers, config.node_spacing);
        }
        for rank in (0..rank_nodes.len().saturating_sub(1)).rev() {
            place_rank(&rank_nodes[rank], &outgoing, &sizes, &mut centers, config.node_spacing);
        }
    }

    // Main axis: each rank starts after the widest node of the preceding
    // rank plus the rank gap, so ranks never overlap whatever the content.
    let rank_widths: Vec<f32> = rank_nodes
        .iter()
        .map(|bucket| {
            bucket
                .iter()
                .map(|id| sizes[id].0)
                .fold(0.0f32, f32::max)
        })
        .collect();
    let mut rank_x: Vec<f32> = Vec::with_capacity(rank_nodes.len());
    let mut main_cursor = 0.0f32;
    for width in &rank_widths {
        rank_x.push(main_cursor);
        main_cursor += width + config.rank_spacing;
    }

    let min_top = graph
        .nodes
        .iter()
        .map(|node| centers[&node.id] - sizes[&node.id].1 / 2.0)
        .fold(f32::INFINITY, f32::min);

    let mut width = 0.0f32;
    let mut height = 0.0f32;
    let nodes: Vec<NodeLayout> = graph
        .nodes
        .iter()
        .map(|node| {
            let (node_width, node_height) = sizes[&node.id];
            let rank = ranks[&node.id];
            // center within the rank column, then convert to top-left
            let x = rank_x[rank] + (rank_widths[rank] - node_width) / 2.0;
            let y = centers[&node.id] - node_height / 2.0 - min_top;
            width = width.max(x + node_width);
            height = height.max(y + node_height);
            NodeLayout {
                id: node.id.clone(),
                kind: node.kind,
                label: node.label.clone(),
                has_incoming_edge: node.has_incoming_edge,
                outgoing_handle_count: node.outgoing_handle_count,
                x,
                y,
                width: node_width,
                height: node_height,
            }
        })
        .collect();

    Layout {
        nodes,
        edges: graph.edges.clone(),
        width,
        height,
    }
}

/// Estimates a node's box from its label content: one line for text labels,
/// one line per field row, width from the longest line's character count.
/// Widths clamp to a fixed band and heights have a floor so low-content
/// nodes stay legible and clickable.
pub fn estimate_size(label: &NodeLabel, config: &LayoutConfig) -> (f32, f32) {
    let (lines, longest) = match label {
        NodeLabel::Text { text, .. } => (1, text.chars().count()),
        NodeLabel::Fields(rows) => {
            let longest = rows
                .iter()
                .map(|row| row.key.chars().count() + row.value.chars().count() + 2)
                .max()
                .unwrap_or(0);
            (rows.len().max(1), longest)
        }
    };
    let width = (longest as f32 * config.char_width + config.width_padding)
        .clamp(config.min_node_width, config.max_node_width);
    let height =
        (lines as f32 * config.line_height + config.height_padding).max(config.min_node_height);
    (width, height)
}

/// Pulls each node of a bucket toward the median center of its neighbors in
/// the adjacent rank, walking the bucket in order and enforcing the minimum
/// vertical gap so the sweep can never produce an overlap.
fn place_rank(
    bucket: &[String],
    neighbors: &HashMap<String, Vec<String>>,
    sizes: &HashMap<String, (f32, f32)>,
    centers: &mut HashMap<String, f32>,
    spacing: f32,
) {
    let desired: Vec<f32> = bucket
        .iter()
        .map(|id| {
            neighbors
                .get(id)
                .and_then(|list| median_center(list, centers))
                .unwrap_or_else(|| centers[id])
        })
        .collect();
    let mut limit = f32::NEG_INFINITY;
    for (id, want) in bucket.iter().zip(desired) {
        let half = sizes[id].1 / 2.0;
        let center = if limit == f32::NEG_INFINITY {
            want
        } else {
            want.max(limit + half)
        };
        centers.insert(id.clone(), center);
        limit = center + half + spacing;
    }
}

fn median_center(ids: &[String], centers: &HashMap<String, f32>) -> Option<f32> {
    let mut values: Vec<f32> = ids
        .iter()
        .filter_map(|id| centers.get(id).copied())
        .collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) * 0.5
    })
}
