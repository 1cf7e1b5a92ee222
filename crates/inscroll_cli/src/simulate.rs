//! Scenario replay on the headless host

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use inscroll_app::InfiniteScroll;
use inscroll_core::{
    Axis, InfiniteScrollOptions, NodeId, ScrollDirection, ScrollPayload, ScrollSurface,
};
use inscroll_platform::headless::{HeadlessHost, NodeSpec, Overflow};
use inscroll_platform::{ScrollHost, SharedHost};
use inscroll_runtime::ScrollerStats;
use tracing::{debug, info};

use crate::scenario::{NodeDef, Scenario, Step, WINDOW_TARGET};

/// One notification observed during a replay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Notification {
    /// Virtual time in milliseconds
    pub at: u64,
    pub direction: ScrollDirection,
    pub payload: ScrollPayload,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.direction {
            ScrollDirection::Down => "scrolled",
            ScrollDirection::Up => "scrolled_up",
        };
        write!(
            f,
            "[{:>6}ms] {:<11} position={} offset={} visible={} total={} remaining_down={} remaining_up={}",
            self.at,
            name,
            self.payload.current_scroll_position,
            self.payload.scroll_offset,
            self.payload.visible_extent,
            self.payload.total_extent,
            self.payload.remaining_down,
            self.payload.remaining_up,
        )
    }
}

type Log = Rc<RefCell<Vec<Notification>>>;

/// A mounted component on a headless document built from a scenario
pub struct Simulation {
    host: Rc<HeadlessHost>,
    nodes: HashMap<String, NodeId>,
    anchor: NodeId,
    component: InfiniteScroll,
    log: Log,
}

impl Simulation {
    /// Build the document and mount the component
    ///
    /// `defaults` play the role of injected default options; the scenario's
    /// own options win over them.
    pub fn new(scenario: &Scenario, defaults: &InfiniteScrollOptions) -> Result<Self> {
        let host = Rc::new(if scenario.window.present {
            HeadlessHost::with_window_size(scenario.window.width, scenario.window.height)
        } else {
            HeadlessHost::without_window()
        });

        let nodes = build_document(&host, scenario)?;
        let anchor = *nodes
            .get(&scenario.anchor)
            .with_context(|| format!("Anchor node '{}' is not defined", scenario.anchor))?;

        let shared: SharedHost = host.clone();
        let mut component = InfiniteScroll::with_defaults(shared, anchor, defaults)
            .with_options(&scenario.options);

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        for direction in [ScrollDirection::Down, ScrollDirection::Up] {
            let log = Rc::clone(&log);
            let clock = Rc::downgrade(&host);
            let handler = move |payload: &ScrollPayload| {
                let at = clock.upgrade().map(|host| host.now()).unwrap_or_default();
                log.borrow_mut().push(Notification {
                    at,
                    direction,
                    payload: *payload,
                });
            };
            match direction {
                ScrollDirection::Down => component.on_scrolled(handler),
                ScrollDirection::Up => component.on_scrolled_up(handler),
            };
        }

        component.mount();
        info!(
            surface = ?component.surface(),
            listening = component.is_listening(),
            "Mounted {}",
            scenario.display_name()
        );

        Ok(Self {
            host,
            nodes,
            anchor,
            component,
            log,
        })
    }

    pub fn component(&self) -> &InfiniteScroll {
        &self.component
    }

    pub fn stats(&self) -> Option<ScrollerStats> {
        self.component.stats()
    }

    /// Notifications observed so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.log.borrow().clone()
    }

    /// Replay one step, returning the notifications it produced
    pub fn step(&mut self, step: &Step) -> Result<Vec<Notification>> {
        let before = self.log.borrow().len();
        debug!(?step, at = self.host.now(), "Step");

        match step {
            Step::Scroll { target, x, y } => {
                let surface = self.surface(target)?;
                self.host.scroll_to(surface, *x, *y);
            }
            Step::Resize {
                target,
                width,
                height,
            } => match self.surface(target)? {
                ScrollSurface::Window => self.host.resize_window(*width, *height),
                ScrollSurface::Element(node) => self.host.resize_element(node, *width, *height),
            },
            Step::Advance { ms } => self.host.advance(*ms),
            Step::Grow { target, by } => {
                let surface = self.surface(target)?;
                self.grow(surface, *by)?;
            }
            Step::Check => self.component.check_now(),
            Step::Update { options } => self.component.update(options),
        }

        Ok(self.log.borrow()[before..].to_vec())
    }

    fn surface(&self, target: &str) -> Result<ScrollSurface> {
        if target == WINDOW_TARGET {
            return Ok(ScrollSurface::Window);
        }
        self.nodes
            .get(target)
            .map(|node| ScrollSurface::Element(*node))
            .with_context(|| format!("Unknown step target '{}'", target))
    }

    fn axis(&self) -> Axis {
        Axis::from_horizontal(self.component.settings().horizontal)
    }

    /// Extend content on the active axis without dispatching anything
    fn grow(&self, surface: ScrollSurface, by: f64) -> Result<()> {
        let axis = self.axis();
        let size = |surface: ScrollSurface| -> Result<(f64, f64)> {
            Ok((
                self.host.surface_metrics(surface, Axis::Horizontal)?.scroll_extent,
                self.host.surface_metrics(surface, Axis::Vertical)?.scroll_extent,
            ))
        };

        match surface {
            ScrollSurface::Element(node) => {
                let (width, height) = extend(size(surface)?, axis, by);
                self.host.set_scroll_size(node, width, height);
            }
            ScrollSurface::Window => {
                // The anchor's end is the bottom edge in window mode
                let anchor = (
                    self.host.node_extent(self.anchor, Axis::Horizontal)?.extent,
                    self.host.node_extent(self.anchor, Axis::Vertical)?.extent,
                );
                let (width, height) = extend(anchor, axis, by);
                self.host.set_client_size(self.anchor, width, height);

                let (width, height) = extend(size(surface)?, axis, by);
                self.host.set_document_size(width, height);
            }
        }
        Ok(())
    }
}

fn extend((width, height): (f64, f64), axis: Axis, by: f64) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (width + by, height),
        Axis::Vertical => (width, height + by),
    }
}

fn build_document(host: &HeadlessHost, scenario: &Scenario) -> Result<HashMap<String, NodeId>> {
    if let Some(document) = scenario.document {
        host.set_document_size(document.width, document.height);
    }

    let mut nodes: HashMap<String, NodeId> = HashMap::new();
    for def in &scenario.nodes {
        if def.id == WINDOW_TARGET {
            bail!("Node id '{}' is reserved", WINDOW_TARGET);
        }
        if nodes.contains_key(&def.id) {
            bail!("Duplicate node id '{}'", def.id);
        }

        let parent = match &def.parent {
            Some(parent) => *nodes.get(parent).with_context(|| {
                format!(
                    "Parent '{}' of node '{}' must be defined before it",
                    parent, def.id
                )
            })?,
            None => host.root(),
        };

        let node = host.append(parent, node_spec(def)?);
        nodes.insert(def.id.clone(), node);
    }

    Ok(nodes)
}

fn node_spec(def: &NodeDef) -> Result<NodeSpec> {
    let mut spec = NodeSpec::new(def.tag.as_str())
        .id(def.id.as_str())
        .client_size(def.width, def.height)
        .offset(def.x, def.y);

    for class in &def.classes {
        spec = spec.class(class.as_str());
    }
    if let Some(overflow) = &def.overflow_x {
        spec = spec.overflow_x(parse_overflow(overflow, &def.id)?);
    }
    if let Some(overflow) = &def.overflow_y {
        spec = spec.overflow_y(parse_overflow(overflow, &def.id)?);
    }
    if def.scroll_width.is_some() || def.scroll_height.is_some() {
        spec = spec.scroll_size(
            def.scroll_width.unwrap_or(def.width),
            def.scroll_height.unwrap_or(def.height),
        );
    }
    Ok(spec)
}

fn parse_overflow(value: &str, node: &str) -> Result<Overflow> {
    Overflow::parse(value)
        .with_context(|| format!("Invalid overflow '{}' on node '{}'", value, node))
}
