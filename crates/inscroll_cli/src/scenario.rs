//! Scenario file format
//!
//! A scenario describes a headless document, the component options, and a
//! list of steps to replay:
//!
//! ```toml
//! name = "feed"
//! anchor = "list"
//!
//! [window]
//! width = 800
//! height = 600
//!
//! [options]
//! scroll_window = false
//! container = "#feed"
//! from_root = true
//!
//! [[node]]
//! id = "feed"
//! overflow_y = "auto"
//! height = 600
//! scroll_height = 3000
//!
//! [[node]]
//! id = "list"
//! parent = "feed"
//! tag = "ul"
//! height = 3000
//!
//! [[step]]
//! action = "scroll"
//! target = "feed"
//! y = 1900
//!
//! [[step]]
//! action = "advance"
//! ms = 150
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use inscroll_core::InfiniteScrollOptions;
use serde::{Deserialize, Serialize};

/// Target name that refers to the window instead of a node
pub const WINDOW_TARGET: &str = "window";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Id of the node the component is attached to
    pub anchor: String,
    #[serde(default)]
    pub window: WindowSpec,
    /// Total document size, defaults to the window size
    #[serde(default)]
    pub document: Option<SizeSpec>,
    #[serde(default)]
    pub options: InfiniteScrollOptions,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeDef>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("scenario")
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WindowSpec {
    #[serde(default = "default_window_width")]
    pub width: f64,
    #[serde(default = "default_window_height")]
    pub height: f64,
    /// Simulate an environment without a window
    #[serde(default = "default_true")]
    pub present: bool,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            present: true,
        }
    }
}

fn default_window_width() -> f64 {
    1024.0
}

fn default_window_height() -> f64 {
    768.0
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SizeSpec {
    pub width: f64,
    pub height: f64,
}

/// One document node
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDef {
    pub id: String,
    /// Parent node id, the document root when absent
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub overflow_x: Option<String>,
    #[serde(default)]
    pub overflow_y: Option<String>,
    /// Visible size
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Content size, defaults to the visible size
    #[serde(default)]
    pub scroll_width: Option<f64>,
    #[serde(default)]
    pub scroll_height: Option<f64>,
    /// Document position
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

fn default_tag() -> String {
    "div".to_string()
}

/// A replayed interaction
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Scroll a surface to an absolute position
    Scroll {
        #[serde(default = "window_target")]
        target: String,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    /// Resize the window or an element
    Resize {
        #[serde(default = "window_target")]
        target: String,
        width: f64,
        height: f64,
    },
    /// Move the virtual clock forward
    Advance { ms: u64 },
    /// Append content: extend the target's content on the active axis
    ///
    /// For the window this grows the anchor and the document.
    Grow {
        #[serde(default = "window_target")]
        target: String,
        by: f64,
    },
    /// Evaluate immediately, outside the throttle
    Check,
    /// Apply changed component options
    Update { options: InfiniteScrollOptions },
}

fn window_target() -> String {
    WINDOW_TARGET.to_string()
}
