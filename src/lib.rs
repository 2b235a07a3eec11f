pub mod builder;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod graph_dump;
pub mod ir;
pub mod layout;
pub mod parser;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use builder::build_graph;
pub use config::{Config, load_config};
pub use error::ParseError;
pub use graph_dump::GraphDump;
pub use ir::Graph;
pub use layout::{Layout, compute_layout};
pub use theme::Theme;

/// Full pipeline: text → parsed value → graph → positioned layout.
///
/// Whitespace-only input (after unwrapping any Markdown fence) yields an
/// empty layout rather than a parse error, matching an empty editor.
pub fn visualize(text: &str, config: &Config) -> Result<Layout, ParseError> {
    let payload = parser::strip_code_fence(text);
    if payload.trim().is_empty() {
        return Ok(Layout::default());
    }
    let value = if config.repair {
        parser::parse_with_repair(payload)?
    } else {
        parser::parse_json(payload)?
    };
    let graph = build_graph(&value, &config.build);
    Ok(compute_layout(&graph, &config.layout))
}
