//! Repeated-fire suppression
//!
//! Without `always_callback`, a direction fires once per visit to its trigger
//! zone. The guard re-arms when a tick lands outside both zones, when the
//! direction flips, when the content extent changes (new items were loaded),
//! or when it is reset explicitly (resize, teardown).

use crate::action::ScrollDirection;
use crate::geometry::Trigger;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fired {
    direction: ScrollDirection,
    total_extent: f64,
}

/// Tracks the last fired direction of one scroller
#[derive(Clone, Debug, Default)]
pub struct FireGuard {
    last: Option<Fired>,
}

impl FireGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a classified tick should be emitted
    ///
    /// Returns the direction to emit, recording it as the last fired one.
    pub fn admit(
        &mut self,
        trigger: Trigger,
        total_extent: f64,
        always_callback: bool,
    ) -> Option<ScrollDirection> {
        let Some(direction) = ScrollDirection::from_trigger(trigger) else {
            // Scrolled away from both edges
            self.last = None;
            return None;
        };

        if !always_callback && self.is_repeat(direction, total_extent) {
            return None;
        }

        self.last = Some(Fired {
            direction,
            total_extent,
        });
        Some(direction)
    }

    fn is_repeat(&self, direction: ScrollDirection, total_extent: f64) -> bool {
        self.last.is_some_and(|fired| {
            fired.direction == direction && fired.total_extent == total_extent
        })
    }

    /// Forget the last fired direction
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn last_fired(&self) -> Option<ScrollDirection> {
        self.last.map(|fired| fired.direction)
    }
}
