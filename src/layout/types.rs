use crate::ir::{GraphEdge, NodeKind, NodeLabel};

/// A node with its assigned geometry. `x`/`y` anchor the top-left corner,
/// which is how the rendering surface positions boxes.
#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub kind: NodeKind,
    pub label: NodeLabel,
    pub has_incoming_edge: bool,
    pub outgoing_handle_count: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub nodes: Vec<NodeLayout>,
    /// Edges pass through the layout unchanged.
    pub edges: Vec<GraphEdge>,
    pub width: f32,
    pub height: f32,
}
