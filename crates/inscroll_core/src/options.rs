//! Component options and defaults
//!
//! [`InfiniteScrollOptions`] is the partial, serializable form: every field is
//! optional so it can describe injected defaults, a config file, or a set of
//! changed inputs. [`InfiniteScrollSettings`] is the fully resolved form a
//! component holds.
//!
//! ```toml
//! distance = 1.0
//! throttle = 300
//! container = ".feed"
//! scroll_window = false
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{
    ScrollConfiguration, DEFAULT_DOWN_DISTANCE, DEFAULT_THROTTLE_MS, DEFAULT_UP_DISTANCE,
};
use crate::error::{ConfigError, Result};
use crate::surface::{NodeId, ScrollContainer};

/// Partial set of infinite scroll options
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InfiniteScrollOptions {
    #[serde(
        alias = "infiniteScrollDistance",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance: Option<f64>,
    #[serde(
        alias = "infiniteScrollUpDistance",
        skip_serializing_if = "Option::is_none"
    )]
    pub up_distance: Option<f64>,
    #[serde(
        alias = "infiniteScrollThrottle",
        skip_serializing_if = "Option::is_none"
    )]
    pub throttle: Option<u64>,
    #[serde(
        alias = "infiniteScrollDisabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub disabled: Option<bool>,
    #[serde(
        alias = "infiniteScrollContainer",
        skip_serializing_if = "Option::is_none"
    )]
    pub container: Option<ScrollContainer>,
    #[serde(alias = "scrollWindow", skip_serializing_if = "Option::is_none")]
    pub scroll_window: Option<bool>,
    #[serde(alias = "immediateCheck", skip_serializing_if = "Option::is_none")]
    pub immediate_check: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<bool>,
    #[serde(alias = "alwaysCallback", skip_serializing_if = "Option::is_none")]
    pub always_callback: Option<bool>,
    #[serde(alias = "fromRoot", skip_serializing_if = "Option::is_none")]
    pub from_root: Option<bool>,
}

impl InfiniteScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize options to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Combine two option sets, fields present in `overrides` win
    pub fn merge(&self, overrides: &InfiniteScrollOptions) -> InfiniteScrollOptions {
        InfiniteScrollOptions {
            distance: overrides.distance.or(self.distance),
            up_distance: overrides.up_distance.or(self.up_distance),
            throttle: overrides.throttle.or(self.throttle),
            disabled: overrides.disabled.or(self.disabled),
            container: overrides
                .container
                .clone()
                .or_else(|| self.container.clone()),
            scroll_window: overrides.scroll_window.or(self.scroll_window),
            immediate_check: overrides.immediate_check.or(self.immediate_check),
            horizontal: overrides.horizontal.or(self.horizontal),
            always_callback: overrides.always_callback.or(self.always_callback),
            from_root: overrides.from_root.or(self.from_root),
        }
    }

    /// Check distances are usable
    ///
    /// Invalid distances are tolerated at runtime (the direction never fires),
    /// this exists for callers that want to reject them up front.
    pub fn validate(&self) -> Result<()> {
        check_distance("distance", self.distance)?;
        check_distance("up_distance", self.up_distance)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == InfiniteScrollOptions::default()
    }

    // Builder setters, mostly used for change sets and tests

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_up_distance(mut self, up_distance: f64) -> Self {
        self.up_distance = Some(up_distance);
        self
    }

    pub fn with_throttle(mut self, throttle: u64) -> Self {
        self.throttle = Some(throttle);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn with_container(mut self, container: impl Into<ScrollContainer>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_scroll_window(mut self, scroll_window: bool) -> Self {
        self.scroll_window = Some(scroll_window);
        self
    }

    pub fn with_immediate_check(mut self, immediate_check: bool) -> Self {
        self.immediate_check = Some(immediate_check);
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = Some(horizontal);
        self
    }

    pub fn with_always_callback(mut self, always_callback: bool) -> Self {
        self.always_callback = Some(always_callback);
        self
    }

    pub fn with_from_root(mut self, from_root: bool) -> Self {
        self.from_root = Some(from_root);
        self
    }
}

fn check_distance(field: &'static str, value: Option<f64>) -> Result<()> {
    match value {
        Some(value) if !(value.is_finite() && value >= 0.0) => {
            Err(ConfigError::InvalidDistance { field, value })
        }
        _ => Ok(()),
    }
}

/// Fully resolved component options
#[derive(Clone, Debug, PartialEq)]
pub struct InfiniteScrollSettings {
    pub distance: f64,
    pub up_distance: f64,
    pub throttle: u64,
    pub disabled: bool,
    pub container: Option<ScrollContainer>,
    pub scroll_window: bool,
    pub immediate_check: bool,
    pub horizontal: bool,
    pub always_callback: bool,
    pub from_root: bool,
}

impl Default for InfiniteScrollSettings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DOWN_DISTANCE,
            up_distance: DEFAULT_UP_DISTANCE,
            throttle: DEFAULT_THROTTLE_MS,
            disabled: false,
            container: None,
            scroll_window: true,
            immediate_check: false,
            horizontal: false,
            always_callback: false,
            from_root: false,
        }
    }
}

impl InfiniteScrollSettings {
    /// Defaults overridden by the fields present in `options`
    pub fn from_options(options: &InfiniteScrollOptions) -> Self {
        let mut settings = Self::default();
        settings.apply(options);
        settings
    }

    /// Overwrite every field present in `options`
    pub fn apply(&mut self, options: &InfiniteScrollOptions) {
        if let Some(distance) = options.distance {
            self.distance = distance;
        }
        if let Some(up_distance) = options.up_distance {
            self.up_distance = up_distance;
        }
        if let Some(throttle) = options.throttle {
            self.throttle = throttle;
        }
        if let Some(disabled) = options.disabled {
            self.disabled = disabled;
        }
        if let Some(container) = &options.container {
            self.container = Some(container.clone());
        }
        if let Some(scroll_window) = options.scroll_window {
            self.scroll_window = scroll_window;
        }
        if let Some(immediate_check) = options.immediate_check {
            self.immediate_check = immediate_check;
        }
        if let Some(horizontal) = options.horizontal {
            self.horizontal = horizontal;
        }
        if let Some(always_callback) = options.always_callback {
            self.always_callback = always_callback;
        }
        if let Some(from_root) = options.from_root {
            self.from_root = from_root;
        }
    }

    /// The complete option set these settings represent
    pub fn to_options(&self) -> InfiniteScrollOptions {
        InfiniteScrollOptions {
            distance: Some(self.distance),
            up_distance: Some(self.up_distance),
            throttle: Some(self.throttle),
            disabled: Some(self.disabled),
            container: self.container.clone(),
            scroll_window: Some(self.scroll_window),
            immediate_check: Some(self.immediate_check),
            horizontal: Some(self.horizontal),
            always_callback: Some(self.always_callback),
            from_root: Some(self.from_root),
        }
    }

    /// Scroller configuration anchored at `element`
    pub fn to_configuration(&self, element: NodeId) -> ScrollConfiguration {
        ScrollConfiguration {
            element,
            scroll_container: self.container.clone(),
            scroll_window: self.scroll_window,
            from_root: self.from_root,
            horizontal: self.horizontal,
            down_distance: self.distance,
            up_distance: self.up_distance,
            throttle: self.throttle,
            disable: self.disabled,
            always_callback: self.always_callback,
        }
    }
}
