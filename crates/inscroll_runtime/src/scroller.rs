//! The scroller: listens to a surface and emits scroll actions
//!
//! A [`Scroller`] is a lazy description of the work; nothing happens until
//! [`Scroller::subscribe`] is called. Each subscription resolves its own
//! surface, attaches its own listeners, and lives until it is unsubscribed or
//! dropped, so a scroller can be subscribed again after a teardown.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use inscroll_core::{
    evaluate, Axis, AxisMetrics, FireGuard, ScrollAction, ScrollConfiguration, ScrollDirection,
    ScrollPayload, ScrollSurface, Thresholds,
};
use inscroll_platform::{HostError, ListenerCallback, ListenerId, ListenerKind, SharedHost};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::error::ResolveError;
use crate::resolve::resolve_surface;
use crate::throttle::{Throttle, ThrottleDecision};

/// Subscriber callback
type ActionCallback = Box<dyn FnMut(ScrollAction)>;

/// Counters for one subscription
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollerStats {
    /// Raw scroll/resize events received
    pub events: u64,
    /// Geometry evaluations that ran
    pub evaluations: u64,
    /// Evaluations skipped because the surface could not be measured
    pub skipped: u64,
    /// Actions pushed to the subscriber
    pub emissions: u64,
}

/// Lazy, restartable source of [`ScrollAction`]s
#[derive(Clone)]
pub struct Scroller {
    host: SharedHost,
    config: ScrollConfiguration,
}

impl Scroller {
    pub fn new(host: SharedHost, config: ScrollConfiguration) -> Self {
        Self { host, config }
    }

    /// Alias of [`Scroller::new`]
    pub fn create(host: SharedHost, config: ScrollConfiguration) -> Self {
        Self::new(host, config)
    }

    pub fn config(&self) -> &ScrollConfiguration {
        &self.config
    }

    /// Start listening and push every emitted action to `callback`
    ///
    /// Never fails: configurations that cannot be honored produce an inert
    /// subscription that can still be disposed.
    pub fn subscribe<F>(&self, callback: F) -> ScrollSubscription
    where
        F: FnMut(ScrollAction) + 'static,
    {
        let inner = Rc::new(ScrollerInner {
            host: Rc::clone(&self.host),
            axis: self.config.axis(),
            thresholds: self.config.thresholds(),
            throttle: Throttle::new(self.config.throttle),
            config: self.config.clone(),
            surface: Cell::new(None),
            listeners: RefCell::new(SmallVec::new()),
            guard: RefCell::new(FireGuard::new()),
            callback: RefCell::new(Some(Box::new(callback))),
            queue: RefCell::new(VecDeque::new()),
            disposed: Cell::new(false),
            stats: Cell::new(ScrollerStats::default()),
        });
        inner.attach();
        ScrollSubscription { inner }
    }
}

impl std::fmt::Debug for Scroller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scroller")
            .field("config", &self.config)
            .finish()
    }
}

/// Create a scroller and subscribe `callback` to it in one step
pub fn create_scroller<F>(
    host: SharedHost,
    config: ScrollConfiguration,
    callback: F,
) -> ScrollSubscription
where
    F: FnMut(ScrollAction) + 'static,
{
    Scroller::new(host, config).subscribe(callback)
}

// ============================================================================
// Subscription
// ============================================================================

/// Handle to a running scroller
///
/// Dropping the handle disposes it.
pub struct ScrollSubscription {
    inner: Rc<ScrollerInner>,
}

impl ScrollSubscription {
    /// Remove all listeners and cancel any pending evaluation
    ///
    /// Safe to call repeatedly, and from inside the subscriber callback.
    pub fn unsubscribe(&self) {
        self.inner.dispose();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Whether listeners are attached to a resolved surface
    pub fn is_listening(&self) -> bool {
        !self.is_closed() && self.inner.surface.get().is_some()
    }

    /// The resolved surface, `None` when inert or disposed
    pub fn surface(&self) -> Option<ScrollSurface> {
        self.inner.surface.get()
    }

    /// Evaluate right now, bypassing the throttle window
    pub fn check_now(&self) {
        self.inner.tick();
    }

    pub fn last_fired(&self) -> Option<ScrollDirection> {
        self.inner.guard.borrow().last_fired()
    }

    pub fn stats(&self) -> ScrollerStats {
        self.inner.stats.get()
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.inner.dispose();
    }
}

impl std::fmt::Debug for ScrollSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSubscription")
            .field("surface", &self.surface())
            .field("closed", &self.is_closed())
            .field("stats", &self.stats())
            .finish()
    }
}

// ============================================================================
// Internal State
// ============================================================================

struct ScrollerInner {
    host: SharedHost,
    config: ScrollConfiguration,
    axis: Axis,
    thresholds: Thresholds,
    surface: Cell<Option<ScrollSurface>>,
    listeners: RefCell<SmallVec<[ListenerId; 3]>>,
    throttle: Throttle,
    guard: RefCell<FireGuard>,
    callback: RefCell<Option<ActionCallback>>,
    /// Actions waiting for the subscriber, filled by re-entrant ticks
    queue: RefCell<VecDeque<ScrollAction>>,
    disposed: Cell<bool>,
    stats: Cell<ScrollerStats>,
}

impl ScrollerInner {
    fn attach(self: &Rc<Self>) {
        let surface = match resolve_surface(self.host.as_ref(), &self.config) {
            Ok(surface) => surface,
            Err(ResolveError::Disabled) => {
                debug!("Infinite scroll disabled, no listeners attached");
                return;
            }
            Err(err) => {
                warn!("Infinite scroll inactive: {}", err);
                return;
            }
        };

        let mut targets: SmallVec<[(ScrollSurface, ListenerKind); 3]> = SmallVec::new();
        targets.push((surface, ListenerKind::Scroll));
        if self.host.has_window() {
            targets.push((ScrollSurface::Window, ListenerKind::Resize));
        }
        if !surface.is_window() {
            targets.push((surface, ListenerKind::Resize));
        }

        for (target, kind) in targets {
            let weak = Rc::downgrade(self);
            let callback: ListenerCallback = Rc::new(move |kind| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_event(kind);
                }
            });

            match self.host.add_listener(target, kind, callback) {
                Ok(id) => self.listeners.borrow_mut().push(id),
                Err(err) => {
                    warn!("Infinite scroll inactive: {}", ResolveError::from(err));
                    self.remove_listeners();
                    return;
                }
            }
        }

        self.surface.set(Some(surface));
        debug!(
            ?surface,
            axis = ?self.axis,
            throttle = self.throttle.window_ms(),
            "Scroller attached"
        );
    }

    fn on_event(self: &Rc<Self>, kind: ListenerKind) {
        if self.disposed.get() {
            return;
        }
        self.bump(|stats| stats.events += 1);

        if kind == ListenerKind::Resize {
            self.guard.borrow_mut().reset();
        }

        let weak = Rc::downgrade(self);
        let decision = self.throttle.request(self.host.as_ref(), move || {
            if let Some(inner) = weak.upgrade() {
                inner.throttle.complete();
                inner.tick();
            }
        });

        match decision {
            ThrottleDecision::Immediate => self.tick(),
            ThrottleDecision::Scheduled => trace!(?kind, "Evaluation scheduled"),
            ThrottleDecision::Collapsed => trace!(?kind, "Event collapsed into open window"),
        }
    }

    fn tick(&self) {
        if self.disposed.get() {
            return;
        }
        let Some(surface) = self.surface.get() else {
            return;
        };
        self.bump(|stats| stats.evaluations += 1);

        let metrics = match self.measure(surface) {
            Ok(metrics) => metrics,
            Err(err) => {
                debug!("Skipping scroll tick: {}", err);
                self.bump(|stats| stats.skipped += 1);
                return;
            }
        };

        let evaluation = evaluate(&metrics, &self.thresholds);
        trace!(
            offset = metrics.scroll_offset,
            visible = metrics.visible_extent,
            total = metrics.total_extent,
            trigger = ?evaluation.trigger,
            "Scroll tick"
        );

        let admitted = self.guard.borrow_mut().admit(
            evaluation.trigger,
            metrics.total_extent,
            self.config.always_callback,
        );
        if let Some(direction) = admitted {
            let payload = ScrollPayload::from_evaluation(&metrics, &evaluation);
            self.emit(ScrollAction::new(direction, payload));
        }
    }

    fn measure(&self, surface: ScrollSurface) -> Result<AxisMetrics, HostError> {
        let raw = self.host.surface_metrics(surface, self.axis)?;
        let total_extent = match surface {
            // Window scrolling measures up to the end of the anchor element
            ScrollSurface::Window => self.host.node_extent(self.config.element, self.axis)?.end(),
            ScrollSurface::Element(_) => raw.scroll_extent,
        };
        Ok(AxisMetrics::new(
            raw.scroll_offset,
            raw.client_extent,
            total_extent,
        ))
    }

    fn emit(&self, action: ScrollAction) {
        self.queue.borrow_mut().push_back(action);

        // Taken out for the call so the subscriber may re-enter the scroller.
        // A re-entrant emit finds the slot empty and leaves its action for
        // the outer call to deliver.
        let Some(mut callback) = self.callback.borrow_mut().take() else {
            trace!("Queued re-entrant scroll action");
            return;
        };

        while !self.disposed.get() {
            let Some(action) = self.queue.borrow_mut().pop_front() else {
                break;
            };
            self.bump(|stats| stats.emissions += 1);
            callback(action);
        }

        if !self.disposed.get() {
            let mut slot = self.callback.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    fn remove_listeners(&self) {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for id in listeners {
            self.host.remove_listener(id);
        }
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }

        self.remove_listeners();
        self.throttle.cancel(self.host.as_ref());
        self.guard.borrow_mut().reset();
        self.surface.set(None);
        self.queue.borrow_mut().clear();
        let callback = self.callback.borrow_mut().take();
        drop(callback);

        debug!(stats = ?self.stats.get(), "Scroller disposed");
    }

    fn bump(&self, update: impl FnOnce(&mut ScrollerStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inscroll_core::NodeId;
    use inscroll_platform::headless::{HeadlessHost, NodeSpec};

    /// Window 800x200 over a 1000px tall list
    struct Page {
        host: Rc<HeadlessHost>,
        list: NodeId,
        feed: NodeId,
        actions: Rc<RefCell<Vec<ScrollAction>>>,
    }

    impl Page {
        fn new() -> Self {
            let host = Rc::new(HeadlessHost::with_window_size(800.0, 200.0));
            host.set_document_size(800.0, 1000.0);
            let list = host.append(
                host.root(),
                NodeSpec::new("ul").id("list").client_size(800.0, 1000.0),
            );
            let feed = host.append(
                host.root(),
                NodeSpec::new("div")
                    .id("feed")
                    .overflow_y_auto()
                    .overflow_x_auto()
                    .client_size(200.0, 200.0)
                    .scroll_size(1000.0, 1000.0),
            );
            Self {
                host,
                list,
                feed,
                actions: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn shared(&self) -> SharedHost {
            self.host.clone()
        }

        fn subscribe(&self, config: ScrollConfiguration) -> ScrollSubscription {
            let sink = Rc::clone(&self.actions);
            Scroller::new(self.shared(), config)
                .subscribe(move |action| sink.borrow_mut().push(action))
        }

        fn window_config(&self) -> ScrollConfiguration {
            ScrollConfiguration::new(self.list).with_throttle(0)
        }

        fn feed_config(&self) -> ScrollConfiguration {
            ScrollConfiguration::new(self.list)
                .with_container(self.feed)
                .with_throttle(0)
        }

        fn directions(&self) -> Vec<ScrollDirection> {
            self.actions.borrow().iter().map(|a| a.direction).collect()
        }

        fn scroll_window(&self, y: f64) {
            self.host.scroll_to(ScrollSurface::Window, 0.0, y);
        }

        fn scroll_feed(&self, y: f64) {
            self.host.scroll_to(ScrollSurface::Element(self.feed), 0.0, y);
        }
    }

    #[test]
    fn test_disabled_never_emits() {
        let page = Page::new();
        let subscription = page.subscribe(page.window_config().with_disable(true));

        assert!(!subscription.is_listening());
        assert_eq!(page.host.listener_count(), 0);

        for y in [0.0, 450.0, 800.0] {
            page.scroll_window(y);
            subscription.check_now();
        }
        page.host.resize_window(800.0, 100.0);
        assert!(page.actions.borrow().is_empty());

        subscription.unsubscribe();
        assert!(subscription.is_closed());
    }

    #[test]
    fn test_window_down_threshold() {
        let page = Page::new();
        // Keep the top edge out of reach
        let _subscription = page.subscribe(page.window_config().with_distances(2.0, 0.0));

        // remaining 1000 - 550 = 450 > 400
        page.scroll_window(350.0);
        assert!(page.actions.borrow().is_empty());

        // remaining 1000 - 650 = 350 <= 400
        page.scroll_window(450.0);
        assert_eq!(page.directions(), vec![ScrollDirection::Down]);

        let payload = page.actions.borrow()[0].payload;
        assert_eq!(payload.remaining_down, 350.0);
        assert_eq!(payload.current_scroll_position, 650.0);
        assert_eq!(payload.total_extent, 1000.0);
    }

    #[test]
    fn test_window_total_is_anchor_end() {
        let page = Page::new();
        // Anchor ends at 1200 while the document is taller
        page.host.set_document_size(800.0, 3000.0);
        page.host.set_offset(page.list, 0.0, 200.0);
        let _subscription = page.subscribe(page.window_config().with_distances(1.0, 0.0));

        // remaining 1200 - 700 = 500 > 200
        page.scroll_window(500.0);
        assert!(page.actions.borrow().is_empty());

        // remaining 1200 - 1000 = 200 <= 200
        page.scroll_window(800.0);
        assert_eq!(page.directions(), vec![ScrollDirection::Down]);
        assert_eq!(page.actions.borrow()[0].payload.total_extent, 1200.0);
    }

    #[test]
    fn test_element_up_threshold() {
        let page = Page::new();
        page.host.set_scroll_size(page.feed, 200.0, 5000.0);
        let _subscription = page.subscribe(page.feed_config().with_distances(2.0, 1.5));

        page.scroll_feed(350.0);
        assert!(page.actions.borrow().is_empty());

        page.scroll_feed(250.0);
        assert_eq!(page.directions(), vec![ScrollDirection::Up]);
        assert_eq!(page.actions.borrow()[0].payload.remaining_up, 250.0);
    }

    #[test]
    fn test_down_takes_precedence() {
        let page = Page::new();
        page.host.set_scroll_size(page.feed, 200.0, 300.0);
        let _subscription = page.subscribe(page.feed_config());

        page.scroll_feed(50.0);
        assert_eq!(page.directions(), vec![ScrollDirection::Down]);
    }

    #[test]
    fn test_collapsed_surface_never_triggers() {
        let page = Page::new();
        page.host.set_client_size(page.feed, 200.0, 0.0);
        let subscription =
            page.subscribe(page.feed_config().with_always_callback(true));

        page.scroll_feed(900.0);
        page.scroll_feed(0.0);
        subscription.check_now();

        assert!(page.actions.borrow().is_empty());
        assert_eq!(subscription.stats().evaluations, 3);
    }

    #[test]
    fn test_repeat_suppressed_without_always_callback() {
        let page = Page::new();
        let subscription = page.subscribe(page.feed_config().with_distances(2.0, 0.0));

        page.scroll_feed(500.0);
        page.scroll_feed(600.0);
        assert_eq!(page.directions(), vec![ScrollDirection::Down]);
        assert_eq!(subscription.last_fired(), Some(ScrollDirection::Down));
    }

    #[test]
    fn test_always_callback_fires_every_tick() {
        let page = Page::new();
        let _subscription = page.subscribe(
            page.feed_config()
                .with_distances(2.0, 0.0)
                .with_always_callback(true),
        );

        page.scroll_feed(500.0);
        page.scroll_feed(600.0);
        assert_eq!(
            page.directions(),
            vec![ScrollDirection::Down, ScrollDirection::Down]
        );
    }

    #[test]
    fn test_scroll_away_rearms() {
        let page = Page::new();
        let _subscription = page.subscribe(page.feed_config().with_distances(2.0, 0.0));

        page.scroll_feed(500.0);
        // remaining 1000 - 300 = 700 > 400
        page.scroll_feed(100.0);
        page.scroll_feed(500.0);

        assert_eq!(
            page.directions(),
            vec![ScrollDirection::Down, ScrollDirection::Down]
        );
    }

    #[test]
    fn test_resize_rearms() {
        let page = Page::new();
        let _subscription = page.subscribe(page.feed_config().with_distances(2.0, 0.0));

        page.scroll_feed(500.0);
        page.host.resize_window(1024.0, 768.0);

        assert_eq!(
            page.directions(),
            vec![ScrollDirection::Down, ScrollDirection::Down]
        );
    }

    #[test]
    fn test_content_growth_rearms() {
        let page = Page::new();
        let _subscription = page.subscribe(page.feed_config().with_distances(2.0, 0.0));

        page.scroll_feed(700.0);
        page.host.set_scroll_size(page.feed, 200.0, 1200.0);
        // remaining 1200 - 1000 = 200, still near the end but with new content
        page.scroll_feed(800.0);

        assert_eq!(
            page.directions(),
            vec![ScrollDirection::Down, ScrollDirection::Down]
        );
    }

    #[test]
    fn test_horizontal_axis() {
        let page = Page::new();
        page.host.set_scroll_size(page.feed, 1000.0, 200.0);
        let _subscription = page.subscribe(
            page.feed_config()
                .with_horizontal(true)
                .with_distances(1.0, 0.0),
        );

        // remaining 1000 - 700 = 300 > 200
        page.host
            .scroll_to(ScrollSurface::Element(page.feed), 500.0, 0.0);
        assert!(page.actions.borrow().is_empty());

        page.host
            .scroll_to(ScrollSurface::Element(page.feed), 650.0, 0.0);
        assert_eq!(page.directions(), vec![ScrollDirection::Down]);
        assert_eq!(page.actions.borrow()[0].payload.scroll_offset, 650.0);
    }

    #[test]
    fn test_unsubscribe_cancels_pending_evaluation() {
        let page = Page::new();
        let subscription = page.subscribe(page.feed_config().with_throttle(150));

        page.scroll_feed(700.0);
        assert_eq!(page.host.pending_timers(), 1);

        subscription.unsubscribe();
        assert_eq!(page.host.pending_timers(), 0);
        assert_eq!(page.host.listener_count(), 0);

        page.host.advance(500);
        page.scroll_feed(800.0);
        assert!(page.actions.borrow().is_empty());
    }

    #[test]
    fn test_queued_event_after_dispose_is_ignored() {
        let page = Page::new();
        let actions = Rc::new(RefCell::new(Vec::new()));

        // The first subscriber disposes the second while the host is
        // dispatching one event to both
        let second: Rc<RefCell<Option<ScrollSubscription>>> = Rc::new(RefCell::new(None));
        let victim = Rc::clone(&second);
        let _first = Scroller::new(page.shared(), page.feed_config()).subscribe(move |_| {
            if let Some(subscription) = victim.borrow().as_ref() {
                subscription.unsubscribe();
            }
        });
        let sink = Rc::clone(&actions);
        *second.borrow_mut() = Some(
            Scroller::new(page.shared(), page.feed_config())
                .subscribe(move |action| sink.borrow_mut().push(action)),
        );

        page.scroll_feed(700.0);

        assert!(actions.borrow().is_empty());
        let second = second.borrow();
        let second = second.as_ref().unwrap();
        assert!(second.is_closed());
        assert_eq!(second.stats().events, 0);
    }

    #[test]
    fn test_unsubscribe_from_callback() {
        let page = Page::new();
        let handle: Rc<RefCell<Option<ScrollSubscription>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let own = Rc::clone(&handle);
        let counter = Rc::clone(&count);
        let subscription = Scroller::new(
            page.shared(),
            page.feed_config().with_always_callback(true),
        )
        .subscribe(move |_| {
            counter.set(counter.get() + 1);
            if let Some(subscription) = own.borrow().as_ref() {
                subscription.unsubscribe();
            }
        });
        *handle.borrow_mut() = Some(subscription);

        page.scroll_feed(700.0);
        page.scroll_feed(800.0);

        assert_eq!(count.get(), 1);
        assert_eq!(page.host.listener_count(), 0);
    }

    #[test]
    fn test_check_now_from_callback_delivers_after_return() {
        let page = Page::new();
        let handle: Rc<RefCell<Option<ScrollSubscription>>> = Rc::new(RefCell::new(None));
        let totals = Rc::new(RefCell::new(Vec::new()));

        // The subscriber loads more content, then asks for a fresh check
        let own = Rc::clone(&handle);
        let seen = Rc::clone(&totals);
        let host = Rc::clone(&page.host);
        let feed = page.feed;
        let config = page.feed_config().with_distances(2.0, 0.0);
        let subscription = Scroller::new(page.shared(), config).subscribe(move |action| {
            seen.borrow_mut().push(action.payload.total_extent);
            if seen.borrow().len() == 1 {
                host.set_scroll_size(feed, 200.0, 1100.0);
                if let Some(subscription) = own.borrow().as_ref() {
                    subscription.check_now();
                }
                // Not delivered while the callback is still running
                assert_eq!(seen.borrow().len(), 1);
            }
        });
        *handle.borrow_mut() = Some(subscription);

        // remaining 1000 - 900 = 100
        page.scroll_feed(700.0);
        assert_eq!(*totals.borrow(), vec![1000.0, 1100.0]);

        // Same direction at the grown total is now a repeat
        page.scroll_feed(820.0);
        assert_eq!(totals.borrow().len(), 2);

        let handle = handle.borrow();
        let subscription = handle.as_ref().unwrap();
        assert_eq!(subscription.stats().emissions, 2);
        assert_eq!(subscription.last_fired(), Some(ScrollDirection::Down));
        subscription.unsubscribe();
    }

    #[test]
    fn test_unsubscribe_is_idempotent_and_drop_disposes() {
        let page = Page::new();
        let subscription = page.subscribe(page.feed_config());
        assert!(page.host.listener_count() > 0);

        subscription.unsubscribe();
        subscription.unsubscribe();
        assert_eq!(page.host.listener_count(), 0);

        {
            let _scoped = page.subscribe(page.feed_config());
            assert!(page.host.listener_count() > 0);
        }
        assert_eq!(page.host.listener_count(), 0);
    }

    #[test]
    fn test_throttle_collapses_events() {
        let page = Page::new();
        let subscription = page.subscribe(
            page.feed_config()
                .with_throttle(150)
                .with_always_callback(true),
        );

        for step in 0..10 {
            page.scroll_feed(600.0 + step as f64 * 10.0);
            page.host.advance(10);
        }
        assert_eq!(subscription.stats().evaluations, 0);

        page.host.advance(100);
        assert_eq!(subscription.stats().events, 10);
        assert_eq!(subscription.stats().evaluations, 1);
        assert_eq!(page.actions.borrow().len(), 1);
        // Sampled at the window boundary, after the last event
        assert_eq!(page.actions.borrow()[0].payload.scroll_offset, 690.0);
    }

    #[test]
    fn test_throttle_spaced_events() {
        let page = Page::new();
        let subscription = page.subscribe(
            page.feed_config()
                .with_throttle(150)
                .with_always_callback(true),
        );

        for step in 0..4 {
            page.scroll_feed(600.0 + step as f64 * 10.0);
            page.host.advance(200);
        }

        assert_eq!(subscription.stats().evaluations, 4);
        assert_eq!(page.actions.borrow().len(), 4);
    }

    #[test]
    fn test_check_now_bypasses_throttle() {
        let page = Page::new();
        page.host
            .scroll_to(ScrollSurface::Element(page.feed), 0.0, 800.0);
        let subscription = page.subscribe(page.feed_config().with_throttle(1000));

        subscription.check_now();
        assert_eq!(page.directions(), vec![ScrollDirection::Down]);
        assert_eq!(page.host.pending_timers(), 0);
    }

    #[test]
    fn test_detached_surface_skips_ticks() {
        let page = Page::new();
        let subscription = page.subscribe(page.feed_config());

        page.host.detach(page.feed);
        page.scroll_feed(700.0);

        assert!(page.actions.borrow().is_empty());
        assert!(subscription.is_listening());
        assert_eq!(subscription.stats().skipped, 1);
    }

    #[test]
    fn test_unresolvable_container_is_inert() {
        let page = Page::new();
        let subscription = page.subscribe(page.window_config().with_container("#missing"));

        assert!(!subscription.is_listening());
        assert_eq!(subscription.surface(), None);
        assert_eq!(page.host.listener_count(), 0);

        page.scroll_window(800.0);
        subscription.check_now();
        assert!(page.actions.borrow().is_empty());
    }

    #[test]
    fn test_negative_distances_never_fire() {
        let page = Page::new();
        let _subscription = page.subscribe(page.feed_config().with_distances(-1.0, -2.0));

        page.scroll_feed(800.0);
        page.scroll_feed(0.0);
        assert!(page.actions.borrow().is_empty());
    }

    #[test]
    fn test_no_window_environment() {
        let host = Rc::new(HeadlessHost::without_window());
        let list = host.append(host.root(), NodeSpec::new("ul"));
        let shared: SharedHost = host.clone();

        let subscription =
            Scroller::new(shared, ScrollConfiguration::new(list)).subscribe(|_| {});
        assert!(!subscription.is_listening());
    }

    #[test]
    fn test_scroller_is_restartable() {
        let page = Page::new();
        let sink = Rc::clone(&page.actions);
        let scroller = Scroller::create(page.shared(), page.feed_config());

        let first = scroller.subscribe({
            let sink = Rc::clone(&sink);
            move |action| sink.borrow_mut().push(action)
        });
        page.scroll_feed(800.0);
        first.unsubscribe();

        let _second = scroller.subscribe(move |action| sink.borrow_mut().push(action));
        // Fresh guard: the same position fires again
        page.scroll_feed(800.0);

        assert_eq!(page.actions.borrow().len(), 2);
    }

    #[test]
    fn test_create_scroller_subscribes() {
        let page = Page::new();
        let sink = Rc::clone(&page.actions);
        let subscription = create_scroller(page.shared(), page.feed_config(), move |action| {
            sink.borrow_mut().push(action)
        });

        page.scroll_feed(800.0);
        assert_eq!(page.directions(), vec![ScrollDirection::Down]);
        drop(subscription);
        assert_eq!(page.host.listener_count(), 0);
    }

    #[test]
    fn test_window_surface_listeners() {
        let page = Page::new();
        let subscription = page.subscribe(page.window_config());

        assert_eq!(subscription.surface(), Some(ScrollSurface::Window));
        // Scroll + resize, both on the window
        assert_eq!(page.host.listener_count_for(ScrollSurface::Window), 2);

        let subscription = page.subscribe(page.feed_config());
        assert_eq!(
            subscription.surface(),
            Some(ScrollSurface::Element(page.feed))
        );
        assert_eq!(
            page.host
                .listener_count_for(ScrollSurface::Element(page.feed)),
            2
        );
    }
}
