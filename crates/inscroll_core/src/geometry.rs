//! Distance-to-edge geometry
//!
//! Pure functions that classify a single measurement of a scroll surface.
//! Thresholds are expressed in visible-extent units: a down distance of `2.0`
//! means "within two viewport heights of the bottom edge".
//!
//! ```text
//!  0 ┬──────────────┐  ┐
//!    │              │  │ remaining_up = scroll_offset
//!    ├──────────────┤  ┘
//!    │   visible    │
//!    ├──────────────┤  ┐
//!    │              │  │ remaining_down = total - (offset + visible)
//!    └──────────────┘  ┘ total_extent
//! ```

use serde::{Deserialize, Serialize};

/// Scroll axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Height / scrollTop
    #[default]
    Vertical,
    /// Width / scrollLeft
    Horizontal,
}

impl Axis {
    pub fn from_horizontal(horizontal: bool) -> Self {
        if horizontal {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    pub fn is_horizontal(self) -> bool {
        self == Axis::Horizontal
    }

    /// Pick the component of an `(x, y)` pair that belongs to this axis
    pub fn select<T>(self, pair: (T, T)) -> T {
        match self {
            Axis::Horizontal => pair.0,
            Axis::Vertical => pair.1,
        }
    }
}

/// Measurement of a scroll surface along the active axis
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisMetrics {
    /// Distance scrolled from the start edge
    pub scroll_offset: f64,
    /// Size of the visible region
    pub visible_extent: f64,
    /// Total size of the scrollable content
    pub total_extent: f64,
}

impl AxisMetrics {
    pub fn new(scroll_offset: f64, visible_extent: f64, total_extent: f64) -> Self {
        Self {
            scroll_offset,
            visible_extent,
            total_extent,
        }
    }

    /// Distance left before the end edge is visible
    pub fn remaining_down(&self) -> f64 {
        self.total_extent - (self.scroll_offset + self.visible_extent)
    }

    /// Distance left before the start edge is visible
    pub fn remaining_up(&self) -> f64 {
        self.scroll_offset
    }

    /// Position of the far edge of the visible region
    pub fn scrolled_until_now(&self) -> f64 {
        self.scroll_offset + self.visible_extent
    }

    fn is_measurable(&self) -> bool {
        self.visible_extent > 0.0
            && self.visible_extent.is_finite()
            && self.scroll_offset.is_finite()
            && self.total_extent.is_finite()
    }
}

/// Trigger distances in visible-extent units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub down: f64,
    pub up: f64,
}

impl Thresholds {
    pub fn new(down: f64, up: f64) -> Self {
        Self { down, up }
    }

    /// Absolute down threshold for a visible extent, `None` if it can never fire
    pub fn down_px(&self, visible_extent: f64) -> Option<f64> {
        scaled(self.down, visible_extent)
    }

    /// Absolute up threshold for a visible extent, `None` if it can never fire
    pub fn up_px(&self, visible_extent: f64) -> Option<f64> {
        scaled(self.up, visible_extent)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(2.0, 1.5)
    }
}

fn scaled(distance: f64, visible_extent: f64) -> Option<f64> {
    // Negative or non-finite distances disable the direction entirely
    if distance.is_finite() && distance >= 0.0 {
        Some(distance * visible_extent)
    } else {
        None
    }
}

/// Classification of a single tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Within the trigger zone of the end edge
    Down,
    /// Within the trigger zone of the start edge
    Up,
    /// Outside both trigger zones, or unmeasurable
    #[default]
    None,
}

impl Trigger {
    pub fn is_triggered(self) -> bool {
        self != Trigger::None
    }
}

/// Full result of evaluating one measurement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub trigger: Trigger,
    pub remaining_down: f64,
    pub remaining_up: f64,
}

/// Evaluate a measurement against the configured thresholds
///
/// Down is checked first, so content shorter than both trigger zones
/// combined always classifies as [`Trigger::Down`]. A collapsed surface
/// (zero visible extent) never triggers.
pub fn evaluate(metrics: &AxisMetrics, thresholds: &Thresholds) -> Evaluation {
    let remaining_down = metrics.remaining_down();
    let remaining_up = metrics.remaining_up();

    let trigger = if !metrics.is_measurable() {
        Trigger::None
    } else if thresholds
        .down_px(metrics.visible_extent)
        .is_some_and(|threshold| remaining_down <= threshold)
    {
        Trigger::Down
    } else if thresholds
        .up_px(metrics.visible_extent)
        .is_some_and(|threshold| remaining_up <= threshold)
    {
        Trigger::Up
    } else {
        Trigger::None
    };

    Evaluation {
        trigger,
        remaining_down,
        remaining_up,
    }
}

/// Shorthand for [`evaluate`] when only the classification matters
pub fn classify(
    scroll_offset: f64,
    visible_extent: f64,
    total_extent: f64,
    thresholds: &Thresholds,
) -> Trigger {
    evaluate(
        &AxisMetrics::new(scroll_offset, visible_extent, total_extent),
        thresholds,
    )
    .trigger
}
