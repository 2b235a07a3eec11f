use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::ir::{ColorClass, NodeLabel};
use crate::layout::Layout;
use crate::theme::Theme;

/// The full contract handed to the rendering surface: positioned nodes with
/// resolved colors and named connection handles, plus the pass-through edges
/// and the canvas extent.
#[derive(Debug, Serialize)]
pub struct GraphDump {
    pub width: f32,
    pub height: f32,
    pub node_count: usize,
    pub edge_count: usize,
    pub background: String,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: crate::ir::NodeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub has_incoming_edge: bool,
    pub outgoing_handle_count: usize,
    /// Present when the node has an incoming edge; the rendering surface
    /// draws exactly one target connection point for it.
    pub target_handle: Option<String>,
    /// One entry per direct child, in handle-index order.
    pub source_handles: Vec<String>,
    pub label: LabelDump,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LabelDump {
    Text {
        text: String,
        color_class: ColorClass,
        color: String,
    },
    Fields {
        rows: Vec<RowDump>,
    },
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub key: String,
    pub value: String,
    pub color_class: ColorClass,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    pub source_handle_index: usize,
    pub label: Option<String>,
    pub color: String,
}

impl GraphDump {
    pub fn from_layout(layout: &Layout, theme: &Theme) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: node.kind,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                has_incoming_edge: node.has_incoming_edge,
                outgoing_handle_count: node.outgoing_handle_count,
                target_handle: node
                    .has_incoming_edge
                    .then(|| format!("{}-target", node.id)),
                source_handles: (0..node.outgoing_handle_count)
                    .map(|index| format!("{}-source-{index}", node.id))
                    .collect(),
                label: match &node.label {
                    NodeLabel::Text { text, color } => LabelDump::Text {
                        text: text.clone(),
                        color_class: *color,
                        color: theme.color_for(*color).to_string(),
                    },
                    NodeLabel::Fields(rows) => LabelDump::Fields {
                        rows: rows
                            .iter()
                            .map(|row| RowDump {
                                key: row.key.clone(),
                                value: row.value.clone(),
                                color_class: row.color,
                                color: theme.color_for(row.color).to_string(),
                            })
                            .collect(),
                    },
                },
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                source_handle: format!("{}-source-{}", edge.source, edge.source_handle_index),
                target_handle: format!("{}-target", edge.target),
                source_handle_index: edge.source_handle_index,
                label: edge.label.clone(),
                color: theme.edge_color.clone(),
            })
            .collect();

        GraphDump {
            width: layout.width,
            height: layout.height,
            node_count: layout.nodes.len(),
            edge_count: layout.edges.len(),
            background: theme.background.clone(),
            nodes,
            edges,
        }
    }
}

pub fn write_graph_dump(path: &Path, dump: &GraphDump, pretty: bool) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(writer, dump)?;
    } else {
        serde_json::to_writer(writer, dump)?;
    }
    Ok(())
}
