use std::collections::HashMap;

use crate::ir::{Graph, GraphEdge};

/// Assigns each node a rank such that every edge points to a strictly higher
/// rank. The builder emits nodes parent-first and never introduces
/// back-edges, so a single ordered pass over the edge list computes the
/// longest-path layering directly.
pub(super) fn compute_ranks(graph: &Graph) -> HashMap<String, usize> {
    let mut ranks: HashMap<String, usize> = HashMap::with_capacity(graph.nodes.len());
    for node in &graph.nodes {
        ranks.insert(node.id.clone(), 0);
    }
    for edge in &graph.edges {
        let base = ranks.get(&edge.source).copied().unwrap_or(0);
        debug_assert!(
            ranks.contains_key(&edge.target),
            "edge targets unknown node {}",
            edge.target
        );
        let entry = ranks.entry(edge.target.clone()).or_insert(0);
        *entry = (*entry).max(base + 1);
    }
    ranks
}

/// Reorders each rank bucket to reduce crossings between adjacent ranks:
/// alternating downward (incoming-neighbor) and upward (outgoing-neighbor)
/// median sweeps, with creation order as the deterministic tie-break.
pub(super) fn order_rank_nodes(
    rank_nodes: &mut [Vec<String>],
    edges: &[GraphEdge],
    node_order: &HashMap<String, usize>,
    passes: usize,
) {
    if rank_nodes.len() <= 1 {
        return;
    }
    let mut incoming: HashMap<String, Vec<String>> = HashMap::new();
    let mut outgoing: HashMap<String, Vec<String>> = HashMap::new();
    for edge in edges {
        outgoing
            .entry(edge.source.clone())
            .or_default()
            .push(edge.target.clone());
        incoming
            .entry(edge.target.clone())
            .or_default()
            .push(edge.source.clone());
    }

    let mut positions: HashMap<String, usize> = HashMap::new();
    let update_positions =
        |rank_nodes: &[Vec<String>], positions: &mut HashMap<String, usize>| {
            positions.clear();
            for bucket in rank_nodes {
                for (idx, node_id) in bucket.iter().enumerate() {
                    positions.insert(node_id.clone(), idx);
                }
            }
        };
    update_positions(rank_nodes, &mut positions);

    let sort_bucket = |bucket: &mut Vec<String>,
                       neighbors: &HashMap<String, Vec<String>>,
                       positions: &HashMap<String, usize>| {
        let current: HashMap<String, usize> = bucket
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        bucket.sort_by(|a, b| {
            let a_score = median_position(a, neighbors, positions, &current);
            let b_score = median_position(b, neighbors, positions, &current);
            match a_score.partial_cmp(&b_score) {
                Some(std::cmp::Ordering::Equal) | None => {
                    let a_pos = current.get(a).copied().unwrap_or(0);
                    let b_pos = current.get(b).copied().unwrap_or(0);
                    match a_pos.cmp(&b_pos) {
                        std::cmp::Ordering::Equal => node_order
                            .get(a)
                            .copied()
                            .unwrap_or(usize::MAX)
                            .cmp(&node_order.get(b).copied().unwrap_or(usize::MAX)),
                        other => other,
                    }
                }
                Some(ordering) => ordering,
            }
        });
    };

    for _ in 0..passes.max(1) {
        for rank in 1..rank_nodes.len() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &incoming, &positions);
            update_positions(rank_nodes, &mut positions);
        }
        for rank in (0..rank_nodes.len().saturating_sub(1)).rev() {
            if rank_nodes[rank].len() <= 1 {
                continue;
            }
            sort_bucket(&mut rank_nodes[rank], &outgoing, &positions);
            update_positions(rank_nodes, &mut positions);
        }
    }
}

pub(super) fn median_position(
    node_id: &str,
    neighbors: &HashMap<String, Vec<String>>,
    positions: &HashMap<String, usize>,
    current_positions: &HashMap<String, usize>,
) -> f32 {
    let Some(list) = neighbors.get(node_id) else {
        return *current_positions.get(node_id).unwrap_or(&0) as f32;
    };
    let mut values: Vec<f32> = list
        .iter()
        .filter_map(|neighbor| positions.get(neighbor).map(|pos| *pos as f32))
        .collect();
    if values.is_empty() {
        return *current_positions.get(node_id).unwrap_or(&0) as f32;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_graph;
    use crate::config::BuildConfig;
    use serde_json::json;

    #[test]
    fn ranks_increase_strictly_along_edges() {
        let graph = build_graph(
            &json!({"a": {"b": {"c": 1}}, "d": [1, {"e": 2}]}),
            &BuildConfig::default(),
        );
        let ranks = compute_ranks(&graph);
        for edge in &graph.edges {
            assert!(ranks[&edge.source] < ranks[&edge.target]);
        }
    }

    #[test]
    fn roots_sit_at_rank_zero() {
        let graph = build_graph(&json!([1, 2, 3]), &BuildConfig::default());
        let ranks = compute_ranks(&graph);
        assert!(ranks.values().all(|rank| *rank == 0));
    }

    #[test]
    fn ordering_keeps_buckets_as_permutations() {
        let graph = build_graph(
            &json!({"a": [1, 2, 3], "b": {"c": [4, 5]}, "d": {"e": 6}}),
            &BuildConfig::default(),
        );
        let ranks = compute_ranks(&graph);
        let max_rank = ranks.values().copied().max().unwrap_or(0);
        let node_order: HashMap<String, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.id.clone(), idx))
            .collect();
        let mut buckets: Vec<Vec<String>> = vec![Vec::new(); max_rank + 1];
        for node in &graph.nodes {
            buckets[ranks[&node.id]].push(node.id.clone());
        }
        let before: Vec<usize> = buckets.iter().map(Vec::len).collect();
        order_rank_nodes(&mut buckets, &graph.edges, &node_order, 4);
        let after: Vec<usize> = buckets.iter().map(Vec::len).collect();
        assert_eq!(before, after);
        for bucket in &buckets {
            let mut sorted = bucket.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), bucket.len());
        }
    }
}
