use json_graph_viz::{Config, GraphDump, Theme, visualize};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisualizeOptions {
    theme: Option<String>,
    repair: Option<bool>,
    recurse_empty_containers: Option<bool>,
}

fn build_config(options: VisualizeOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("light") {
        config.theme = Theme::light();
    }
    if let Some(repair) = options.repair {
        config.repair = repair;
    }
    if let Some(recurse) = options.recurse_empty_containers {
        config.build.recurse_empty_containers = recurse;
    }
    config
}

#[wasm_bindgen]
pub fn visualize_json(text: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<VisualizeOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        VisualizeOptions::default()
    };

    let config = build_config(options);
    let layout = visualize(text, &config).map_err(|error| JsValue::from_str(&error.to_string()))?;
    let dump = GraphDump::from_layout(&layout, &config.theme);
    serde_json::to_string(&dump).map_err(|error| JsValue::from_str(&error.to_string()))
}
