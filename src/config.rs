use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 80.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub width: f32,
    pub grid: f32,
    pub handle_size: f32,
    pub edge_hit_width: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            grid: 20.0,
            handle_size: 12.0,
            edge_hit_width: 20.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutingConfig {
    pub tangent: f32,
    pub hit_samples: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            tangent: 60.0,
            hit_samples: 24,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub canvas_width: f32,
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    pub top_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 80.0,
            canvas_width: 1200.0,
            horizontal_gap: 60.0,
            vertical_gap: 120.0,
            top_margin: 100.0,
        }
    }
}

impl LayoutConfig {
    pub fn center_x(&self) -> f32 {
        self.canvas_width / 2.0
    }

    pub fn row_height(&self) -> f32 {
        self.node_height + self.vertical_gap
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub node: NodeConfig,
    pub canvas: CanvasConfig,
    pub routing: RoutingConfig,
    pub layout: LayoutGaps,
}

/// Layout spacing as it appears in config files. Node and canvas sizes come
/// from their own sections so the two never drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutGaps {
    pub horizontal_gap: f32,
    pub vertical_gap: f32,
    pub top_margin: f32,
}

impl Default for LayoutGaps {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            horizontal_gap: layout.horizontal_gap,
            vertical_gap: layout.vertical_gap,
            top_margin: layout.top_margin,
        }
    }
}

impl Config {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            node_width: self.node.width,
            node_height: self.node.height,
            canvas_width: self.canvas.width,
            horizontal_gap: self.layout.horizontal_gap,
            vertical_gap: self.layout.vertical_gap,
            top_margin: self.layout.top_margin,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("node.width", self.node.width),
            ("node.height", self.node.height),
            ("canvas.width", self.canvas.width),
            ("canvas.grid", self.canvas.grid),
            ("canvas.handleSize", self.canvas.handle_size),
            ("canvas.edgeHitWidth", self.canvas.edge_hit_width),
            ("routing.tangent", self.routing.tangent),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        let non_negative = [
            ("layout.horizontalGap", self.layout.horizontal_gap),
            ("layout.verticalGap", self.layout.vertical_gap),
            ("layout.topMargin", self.layout.top_margin),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.routing.hit_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        Ok(())
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let config = parse_config(&contents)?;
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = serde_json::from_str(contents)?;
    config.validate()?;
    Ok(config)
}
