//! The `InfiniteScroll` component
//!
//! Wraps one [`Scroller`] subscription per setup cycle and re-exposes its
//! actions as two notifications, `scrolled` (near the end) and `scrolled_up`
//! (near the start).
//!
//! # Lifecycle
//!
//! ```text
//! with_defaults / with_options   settings only, nothing attached
//!     ↓ mount()
//! setup (unless disabled)
//!     ↓ update(changes)          container, disabled or distance changed:
//!                                teardown, then setup again if enabled
//!     ↓ unmount() / drop
//! teardown
//! ```

use std::rc::Rc;

use inscroll_core::{
    InfiniteScrollOptions, InfiniteScrollSettings, NodeId, ScrollAction, ScrollDirection,
    ScrollPayload, ScrollSurface,
};
use inscroll_platform::SharedHost;
use inscroll_runtime::{ScrollSubscription, Scroller, ScrollerStats};
use tracing::debug;

use crate::emitter::{Emitter, HandlerId};

pub struct InfiniteScroll {
    host: SharedHost,
    element: NodeId,
    settings: InfiniteScrollSettings,
    /// Window capability, probed once at construction
    has_window: bool,
    mounted: bool,
    subscription: Option<ScrollSubscription>,
    scrolled: Rc<Emitter<ScrollPayload>>,
    scrolled_up: Rc<Emitter<ScrollPayload>>,
}

impl InfiniteScroll {
    /// Component anchored at `element` with the built-in defaults
    pub fn new(host: SharedHost, element: NodeId) -> Self {
        Self::with_defaults(host, element, &InfiniteScrollOptions::default())
    }

    /// Component with injected default options
    ///
    /// Fields missing from `defaults` keep their built-in value.
    pub fn with_defaults(
        host: SharedHost,
        element: NodeId,
        defaults: &InfiniteScrollOptions,
    ) -> Self {
        let has_window = host.has_window();
        Self {
            host,
            element,
            settings: InfiniteScrollSettings::from_options(defaults),
            has_window,
            mounted: false,
            subscription: None,
            scrolled: Rc::new(Emitter::new()),
            scrolled_up: Rc::new(Emitter::new()),
        }
    }

    /// Initial option values, applied before mounting
    pub fn with_options(mut self, options: &InfiniteScrollOptions) -> Self {
        self.settings.apply(options);
        self
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn settings(&self) -> &InfiniteScrollSettings {
        &self.settings
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a scroller is attached to a surface
    pub fn is_listening(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(ScrollSubscription::is_listening)
    }

    pub fn surface(&self) -> Option<ScrollSurface> {
        self.subscription.as_ref().and_then(|s| s.surface())
    }

    /// Counters of the current setup cycle
    pub fn stats(&self) -> Option<ScrollerStats> {
        self.subscription.as_ref().map(ScrollSubscription::stats)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    pub fn scrolled(&self) -> &Emitter<ScrollPayload> {
        &self.scrolled
    }

    pub fn scrolled_up(&self) -> &Emitter<ScrollPayload> {
        &self.scrolled_up
    }

    /// Observe the "near the end" notification
    pub fn on_scrolled<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&ScrollPayload) + 'static,
    {
        self.scrolled.on(handler)
    }

    /// Observe the "near the start" notification
    pub fn on_scrolled_up<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&ScrollPayload) + 'static,
    {
        self.scrolled_up.on(handler)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attach to the document, called once the anchor element exists
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if !self.settings.disabled {
            self.setup();
        }
    }

    /// Apply changed option values
    ///
    /// Before mounting, changes only update the settings. After mounting, a
    /// change of `container`, `disabled` or `distance` tears the scroller down
    /// and sets it up again unless the component ends up disabled. A distance
    /// change always sets up again, and a disabled scroller stays inert. Other
    /// options take effect on the next setup.
    pub fn update(&mut self, changes: &InfiniteScrollOptions) {
        if !self.mounted {
            self.settings.apply(changes);
            return;
        }

        let container_changed = changes
            .container
            .as_ref()
            .is_some_and(|container| self.settings.container.as_ref() != Some(container));
        let disabled_changed = changes
            .disabled
            .is_some_and(|disabled| disabled != self.settings.disabled);
        let distance_changed = changes
            .distance
            .is_some_and(|distance| distance.to_bits() != self.settings.distance.to_bits());

        self.settings.apply(changes);

        if !(container_changed || disabled_changed || distance_changed) {
            return;
        }

        debug!(
            container_changed,
            disabled_changed, distance_changed, "Infinite scroll options changed"
        );
        self.destroy();
        if !self.settings.disabled || distance_changed {
            self.setup();
        }
    }

    /// Evaluate the current position right away, outside the throttle
    pub fn check_now(&self) {
        if let Some(subscription) = &self.subscription {
            subscription.check_now();
        }
    }

    /// Detach from the document
    pub fn unmount(&mut self) {
        self.destroy();
        self.mounted = false;
    }

    fn setup(&mut self) {
        if !self.has_window {
            debug!("No window available, infinite scroll stays idle");
            return;
        }

        let config = self.settings.to_configuration(self.element);
        let scrolled = Rc::clone(&self.scrolled);
        let scrolled_up = Rc::clone(&self.scrolled_up);

        let subscription = Scroller::new(Rc::clone(&self.host), config).subscribe(
            move |action: ScrollAction| {
                let emitter = match action.direction {
                    ScrollDirection::Down => &scrolled,
                    ScrollDirection::Up => &scrolled_up,
                };
                if emitter.has_observers() {
                    emitter.emit(&action.payload);
                }
            },
        );

        if self.settings.immediate_check {
            subscription.check_now();
        }
        self.subscription = Some(subscription);
    }

    fn destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl Drop for InfiniteScroll {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for InfiniteScroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfiniteScroll")
            .field("element", &self.element)
            .field("settings", &self.settings)
            .field("mounted", &self.mounted)
            .field("subscription", &self.subscription)
            .finish()
    }
}
