use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Primitive literals longer than this render truncated with a trailing
    /// ellipsis.
    pub max_primitive_chars: usize,
    /// `false` (default): empty `{}`/`[]` property values render inline and
    /// do not recurse. `true`: they recurse like any other container.
    pub recurse_empty_containers: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_primitive_chars: 50,
            recurse_empty_containers: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical gap between nodes in the same rank.
    pub node_spacing: f32,
    /// Horizontal gap between adjacent ranks.
    pub rank_spacing: f32,
    pub min_node_width: f32,
    pub max_node_width: f32,
    /// Estimated width of one character of label text.
    pub char_width: f32,
    pub width_padding: f32,
    /// Estimated height of one label line / field row.
    pub line_height: f32,
    pub height_padding: f32,
    pub min_node_height: f32,
    /// Median ordering sweep count.
    pub order_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 80.0,
            rank_spacing: 150.0,
            min_node_width: 200.0,
            max_node_width: 350.0,
            char_width: 7.5,
            width_padding: 40.0,
            line_height: 24.0,
            height_padding: 30.0,
            min_node_height: 60.0,
            order_passes: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Attempt the one-shot repair pass on parse failure.
    pub repair: bool,
    pub build: BuildConfig,
    pub layout: LayoutConfig,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repair: true,
            build: BuildConfig::default(),
            layout: LayoutConfig::default(),
            theme: Theme::default(),
        }
    }
}

// Config-file mirror: every field optional, merged over defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    repair: Option<bool>,
    build: Option<BuildConfigFile>,
    layout: Option<LayoutConfigFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildConfigFile {
    max_primitive_chars: Option<usize>,
    recurse_empty_containers: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    node_spacing: Option<f32>,
    rank_spacing: Option<f32>,
    min_node_width: Option<f32>,
    max_node_width: Option<f32>,
    char_width: Option<f32>,
    width_padding: Option<f32>,
    line_height: Option<f32>,
    height_padding: Option<f32>,
    min_node_height: Option<f32>,
    order_passes: Option<usize>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "light" {
            config.theme = Theme::light();
        } else if theme_name == "dark" {
            config.theme = Theme::dark();
        }
    }
    if let Some(repair) = parsed.repair {
        config.repair = repair;
    }
    if let Some(build) = parsed.build {
        if let Some(v) = build.max_primitive_chars {
            config.build.max_primitive_chars = v;
        }
        if let Some(v) = build.recurse_empty_containers {
            config.build.recurse_empty_containers = v;
        }
    }
    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.node_spacing {
            config.layout.node_spacing = v;
        }
        if let Some(v) = layout.rank_spacing {
            config.layout.rank_spacing = v;
        }
        if let Some(v) = layout.min_node_width {
            config.layout.min_node_width = v;
        }
        if let Some(v) = layout.max_node_width {
            config.layout.max_node_width = v;
        }
        if let Some(v) = layout.char_width {
            config.layout.char_width = v;
        }
        if let Some(v) = layout.width_padding {
            config.layout.width_padding = v;
        }
        if let Some(v) = layout.line_height {
            config.layout.line_height = v;
        }
        if let Some(v) = layout.height_padding {
            config.layout.height_padding = v;
        }
        if let Some(v) = layout.min_node_height {
            config.layout.min_node_height = v;
        }
        if let Some(v) = layout.order_passes {
            config.layout.order_passes = v;
        }
    }

    Ok(config)
}
