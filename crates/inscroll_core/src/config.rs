//! Per-setup scroller configuration

use crate::geometry::{Axis, Thresholds};
use crate::surface::{NodeId, ScrollContainer};

/// Default down distance, in visible-extent units
pub const DEFAULT_DOWN_DISTANCE: f64 = 2.0;
/// Default up distance, in visible-extent units
pub const DEFAULT_UP_DISTANCE: f64 = 1.5;
/// Default throttle window in milliseconds
pub const DEFAULT_THROTTLE_MS: u64 = 150;

/// Configuration for one scroller instance.
///
/// Built once per setup cycle and never mutated afterwards; reconfiguring
/// means tearing the scroller down and creating a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollConfiguration {
    /// Anchor node used to find ancestor surfaces and measure content
    pub element: NodeId,
    /// Explicit scroll container, takes priority over `scroll_window`
    pub scroll_container: Option<ScrollContainer>,
    /// Use the window as the surface when no container is given
    pub scroll_window: bool,
    /// Search from the document root instead of the anchor
    pub from_root: bool,
    /// Track width/scrollLeft instead of height/scrollTop
    pub horizontal: bool,
    /// Down trigger distance in visible-extent units
    pub down_distance: f64,
    /// Up trigger distance in visible-extent units
    pub up_distance: f64,
    /// Minimum interval between evaluations (ms)
    pub throttle: u64,
    /// Attach no listeners at all
    pub disable: bool,
    /// Fire on every qualifying tick
    pub always_callback: bool,
}

impl ScrollConfiguration {
    /// Window-scrolling configuration with default distances
    pub fn new(element: NodeId) -> Self {
        Self {
            element,
            scroll_container: None,
            scroll_window: true,
            from_root: false,
            horizontal: false,
            down_distance: DEFAULT_DOWN_DISTANCE,
            up_distance: DEFAULT_UP_DISTANCE,
            throttle: DEFAULT_THROTTLE_MS,
            disable: false,
            always_callback: false,
        }
    }

    pub fn axis(&self) -> Axis {
        Axis::from_horizontal(self.horizontal)
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.down_distance, self.up_distance)
    }

    /// Set an explicit scroll container.
    pub fn with_container(mut self, container: impl Into<ScrollContainer>) -> Self {
        self.scroll_container = Some(container.into());
        self
    }

    /// Enable or disable window scrolling.
    pub fn with_scroll_window(mut self, scroll_window: bool) -> Self {
        self.scroll_window = scroll_window;
        self
    }

    /// Enable or disable root-relative search.
    pub fn with_from_root(mut self, from_root: bool) -> Self {
        self.from_root = from_root;
        self
    }

    /// Track the horizontal axis.
    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// Set both trigger distances.
    pub fn with_distances(mut self, down: f64, up: f64) -> Self {
        self.down_distance = down;
        self.up_distance = up;
        self
    }

    /// Set the throttle window.
    pub fn with_throttle(mut self, throttle_ms: u64) -> Self {
        self.throttle = throttle_ms;
        self
    }

    /// Disable the scroller.
    pub fn with_disable(mut self, disable: bool) -> Self {
        self.disable = disable;
        self
    }

    /// Fire on every qualifying tick.
    pub fn with_always_callback(mut self, always_callback: bool) -> Self {
        self.always_callback = always_callback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn node() -> NodeId {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        nodes.insert(())
    }

    #[test]
    fn test_defaults() {
        let config = ScrollConfiguration::new(node());

        assert!(config.scroll_window);
        assert!(!config.disable);
        assert_eq!(config.throttle, 150);
        assert_eq!(config.thresholds(), Thresholds::new(2.0, 1.5));
        assert_eq!(config.axis(), Axis::Vertical);
    }

    #[test]
    fn test_builders() {
        let config = ScrollConfiguration::new(node())
            .with_container(".feed")
            .with_horizontal(true)
            .with_distances(1.0, 0.5)
            .with_throttle(0)
            .with_always_callback(true);

        assert_eq!(
            config.scroll_container,
            Some(ScrollContainer::Selector(".feed".into()))
        );
        assert_eq!(config.axis(), Axis::Horizontal);
        assert_eq!(config.thresholds(), Thresholds::new(1.0, 0.5));
        assert_eq!(config.throttle, 0);
        assert!(config.always_callback);
    }
}
