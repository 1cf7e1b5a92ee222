//! Scroll actions emitted to subscribers

use crate::geometry::{AxisMetrics, Evaluation, Trigger};

/// Direction of an emitted scroll action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Down,
    Up,
}

impl ScrollDirection {
    /// Direction for a trigger, `None` for [`Trigger::None`]
    pub fn from_trigger(trigger: Trigger) -> Option<Self> {
        match trigger {
            Trigger::Down => Some(ScrollDirection::Down),
            Trigger::Up => Some(ScrollDirection::Up),
            Trigger::None => None,
        }
    }
}

impl std::fmt::Display for ScrollDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrollDirection::Down => f.write_str("down"),
            ScrollDirection::Up => f.write_str("up"),
        }
    }
}

/// Measurements attached to an emitted action
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollPayload {
    /// Far edge of the visible region (offset + visible extent)
    pub current_scroll_position: f64,
    pub scroll_offset: f64,
    pub visible_extent: f64,
    pub total_extent: f64,
    pub remaining_down: f64,
    pub remaining_up: f64,
}

impl ScrollPayload {
    pub fn from_evaluation(metrics: &AxisMetrics, evaluation: &Evaluation) -> Self {
        Self {
            current_scroll_position: metrics.scrolled_until_now(),
            scroll_offset: metrics.scroll_offset,
            visible_extent: metrics.visible_extent,
            total_extent: metrics.total_extent,
            remaining_down: evaluation.remaining_down,
            remaining_up: evaluation.remaining_up,
        }
    }
}

/// A single emission of the scroll engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAction {
    pub direction: ScrollDirection,
    pub payload: ScrollPayload,
}

impl ScrollAction {
    pub fn new(direction: ScrollDirection, payload: ScrollPayload) -> Self {
        Self { direction, payload }
    }

    pub fn is_down(&self) -> bool {
        self.direction == ScrollDirection::Down
    }

    pub fn is_up(&self) -> bool {
        self.direction == ScrollDirection::Up
    }
}
