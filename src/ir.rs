use serde::Serialize;
use serde_json::Value;

/// How a node renders: a single box for nulls and primitives, a row-per-field
/// box for objects. Arrays never materialize as nodes (see `builder`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Null,
    Primitive,
    Object,
}

/// Semantic color class of a value. The core only ever tags values with one
/// of these; concrete colors are resolved by `Theme` at the dump boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Null,
    String,
    Number,
    Container,
}

impl ColorClass {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(_) => Self::String,
            Value::Number(_) | Value::Bool(_) => Self::Number,
            Value::Object(_) | Value::Array(_) => Self::Container,
        }
    }
}

/// Inline rendering of a value as it appears in an object field row.
/// Containers collapse to a count summary; everything else is the JSON
/// literal form.
pub fn value_summary(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(map) => format!("{{{} keys}}", map.len()),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub key: String,
    pub value: String,
    pub color: ColorClass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeLabel {
    Text { text: String, color: ColorClass },
    Fields(Vec<FieldRow>),
}

#[derive(Debug, Clone)]
pub struct JsonNode {
    pub id: String,
    pub kind: NodeKind,
    pub label: NodeLabel,
    pub has_incoming_edge: bool,
    /// One source handle per direct graph child, indexed `0..count` in
    /// first-discovery order. Inlined scalar rows do not count.
    pub outgoing_handle_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Position among the source node's children at discovery time. Must
    /// match the order the rendering surface lays out its source handles.
    pub source_handle_index: usize,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<JsonNode>,
    pub edges: Vec<GraphEdge>,
}
