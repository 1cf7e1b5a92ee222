//! Headless host
//!
//! An in-memory document with a window, listener registry, and a virtual
//! clock. Events and timers only happen when the owner drives them, which
//! makes scroll sessions fully deterministic.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use inscroll_core::ScrollSurface;
//! use inscroll_platform::headless::HeadlessHost;
//! use inscroll_platform::{ListenerKind, ScrollHost};
//!
//! let host = HeadlessHost::new();
//! host.set_document_size(1024.0, 3000.0);
//!
//! let seen = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&seen);
//! host.add_listener(
//!     ScrollSurface::Window,
//!     ListenerKind::Scroll,
//!     Rc::new(move |_| counter.set(counter.get() + 1)),
//! )
//! .unwrap();
//!
//! host.scroll_to(ScrollSurface::Window, 0.0, 500.0);
//! assert_eq!(seen.get(), 1);
//! ```

use std::cell::RefCell;

use inscroll_core::{Axis, NodeId, ScrollSurface};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::error::{HostError, Result};
use crate::host::{
    ListenerCallback, ListenerId, ListenerKind, NodeExtent, ScrollHost, SurfaceMetrics,
    TimerCallback, TimerId,
};

/// Default window inner size
pub const DEFAULT_WINDOW_SIZE: (f64, f64) = (1024.0, 768.0);

// ============================================================================
// Node Description
// ============================================================================

/// CSS overflow behavior on one axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether this overflow value lets the user scroll
    pub fn allows_scroll(self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }

    /// Parse a CSS overflow keyword
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "visible" => Some(Overflow::Visible),
            "hidden" | "clip" => Some(Overflow::Hidden),
            "auto" => Some(Overflow::Auto),
            "scroll" => Some(Overflow::Scroll),
            _ => None,
        }
    }
}

/// Description of a node to append to the document
#[derive(Clone, Debug)]
pub struct NodeSpec {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    overflow: (Overflow, Overflow),
    client_size: (f64, f64),
    scroll_size: Option<(f64, f64)>,
    offset: (f64, f64),
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            id: None,
            classes: SmallVec::new(),
            overflow: (Overflow::Visible, Overflow::Visible),
            client_size: (0.0, 0.0),
            scroll_size: None,
            offset: (0.0, 0.0),
        }
    }

    /// Set the id attribute
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set horizontal overflow
    pub fn overflow_x(mut self, overflow: Overflow) -> Self {
        self.overflow.0 = overflow;
        self
    }

    /// Set vertical overflow
    pub fn overflow_y(mut self, overflow: Overflow) -> Self {
        self.overflow.1 = overflow;
        self
    }

    /// Shorthand for `overflow_x(Overflow::Auto)`
    pub fn overflow_x_auto(self) -> Self {
        self.overflow_x(Overflow::Auto)
    }

    /// Shorthand for `overflow_y(Overflow::Auto)`
    pub fn overflow_y_auto(self) -> Self {
        self.overflow_y(Overflow::Auto)
    }

    /// Visible size of the node
    pub fn client_size(mut self, width: f64, height: f64) -> Self {
        self.client_size = (width, height);
        self
    }

    /// Size of the node's content (defaults to the client size)
    pub fn scroll_size(mut self, width: f64, height: f64) -> Self {
        self.scroll_size = Some((width, height));
        self
    }

    /// Document-relative position of the node
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = (x, y);
        self
    }
}

// ============================================================================
// Document State
// ============================================================================

struct Node {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 2]>,
    overflow: (Overflow, Overflow),
    client_size: (f64, f64),
    scroll_size: (f64, f64),
    scroll: (f64, f64),
    offset: (f64, f64),
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    attached: bool,
}

impl Node {
    fn from_spec(spec: NodeSpec, parent: Option<NodeId>, attached: bool) -> Self {
        Self {
            scroll_size: spec.scroll_size.unwrap_or(spec.client_size),
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            overflow: spec.overflow,
            client_size: spec.client_size,
            scroll: (0.0, 0.0),
            offset: spec.offset,
            parent,
            children: SmallVec::new(),
            attached,
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.tag == *tag,
        }
    }
}

struct WindowState {
    inner_size: (f64, f64),
    scroll: (f64, f64),
}

struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    ids: FxHashMap<String, NodeId>,
    window: Option<WindowState>,
}

impl Document {
    fn new(window: Option<WindowState>) -> Self {
        let size = window
            .as_ref()
            .map(|w| w.inner_size)
            .unwrap_or(DEFAULT_WINDOW_SIZE);
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::from_spec(
            NodeSpec::new("html").client_size(size.0, size.1),
            None,
            true,
        ));
        Self {
            nodes,
            root,
            ids: FxHashMap::default(),
            window,
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(HostError::UnknownNode(id))
    }

    fn attached_node(&self, id: NodeId) -> Result<&Node> {
        let node = self.node(id)?;
        if node.attached {
            Ok(node)
        } else {
            Err(HostError::Detached(id))
        }
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn set_attached(&mut self, id: NodeId, attached: bool) {
        let mut stack: SmallVec<[NodeId; 8]> = SmallVec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current) {
                node.attached = attached;
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Depth-first search in document order
    fn find_first(&self, start: NodeId, include_start: bool, selector: &Selector) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = Vec::new();
        if include_start {
            stack.push(start);
        } else if let Some(node) = self.nodes.get(start) {
            stack.extend(node.children.iter().rev().copied());
        }

        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if node.attached && node.matches(selector) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }
}

/// The selector forms the headless document understands
#[derive(Debug, PartialEq)]
enum Selector {
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        let valid = |name: &str| {
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        if let Some(id) = selector.strip_prefix('#') {
            valid(id).then(|| Selector::Id(id.to_string()))
        } else if let Some(class) = selector.strip_prefix('.') {
            valid(class).then(|| Selector::Class(class.to_string()))
        } else {
            valid(selector).then(|| Selector::Tag(selector.to_ascii_lowercase()))
        }
    }
}

// ============================================================================
// Listeners and Timers
// ============================================================================

struct ListenerEntry {
    target: ScrollSurface,
    kind: ListenerKind,
    callback: ListenerCallback,
}

struct PendingTimer {
    due: u64,
    seq: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct Clock {
    now: u64,
    seq: u64,
    pending: SlotMap<TimerId, PendingTimer>,
}

impl Clock {
    fn next_due(&self, until: u64) -> Option<TimerId> {
        self.pending
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(id, _)| id)
    }
}

// ============================================================================
// Headless Host
// ============================================================================

/// In-memory host with a virtual clock
pub struct HeadlessHost {
    document: RefCell<Document>,
    listeners: RefCell<SlotMap<ListenerId, ListenerEntry>>,
    clock: RefCell<Clock>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// Create a host with a window of the default size
    pub fn new() -> Self {
        Self::with_window_size(DEFAULT_WINDOW_SIZE.0, DEFAULT_WINDOW_SIZE.1)
    }

    /// Create a host with a window of the given inner size
    pub fn with_window_size(width: f64, height: f64) -> Self {
        Self::from_document(Document::new(Some(WindowState {
            inner_size: (width, height),
            scroll: (0.0, 0.0),
        })))
    }

    /// Create a host without a window (non-interactive environment)
    pub fn without_window() -> Self {
        Self::from_document(Document::new(None))
    }

    fn from_document(document: Document) -> Self {
        Self {
            document: RefCell::new(document),
            listeners: RefCell::new(SlotMap::with_key()),
            clock: RefCell::new(Clock::default()),
        }
    }

    // =========================================================================
    // Document Construction
    // =========================================================================

    /// The document root (`html`)
    pub fn root(&self) -> NodeId {
        self.document.borrow().root
    }

    /// Append a node under `parent`
    ///
    /// Unknown parents produce a detached node.
    pub fn append(&self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let mut doc = self.document.borrow_mut();
        let parent_attached = doc.nodes.get(parent).map(|p| p.attached);
        let id_attr = spec.id.clone();

        let node = Node::from_spec(
            spec,
            parent_attached.map(|_| parent),
            parent_attached.unwrap_or(false),
        );
        let id = doc.nodes.insert(node);

        if let Some(parent_node) = doc.nodes.get_mut(parent) {
            parent_node.children.push(id);
        }
        if let Some(id_attr) = id_attr {
            doc.ids.entry(id_attr).or_insert(id);
        }
        id
    }

    /// Remove a node (and its subtree) from the document
    ///
    /// The handles stay valid; queries against them report `Detached`.
    pub fn detach(&self, node: NodeId) {
        let mut doc = self.document.borrow_mut();
        let Some(parent) = doc.nodes.get_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent_node) = doc.nodes.get_mut(parent) {
            parent_node.children.retain(|child| *child != node);
        }
        doc.set_attached(node, false);
    }

    /// Set the document's total scroll size
    pub fn set_document_size(&self, width: f64, height: f64) {
        let root = self.root();
        self.set_scroll_size(root, width, height);
    }

    /// Set a node's content size without dispatching anything
    pub fn set_scroll_size(&self, node: NodeId, width: f64, height: f64) {
        if let Some(node) = self.document.borrow_mut().nodes.get_mut(node) {
            node.scroll_size = (width, height);
        }
    }

    /// Set a node's visible size without dispatching anything
    pub fn set_client_size(&self, node: NodeId, width: f64, height: f64) {
        if let Some(node) = self.document.borrow_mut().nodes.get_mut(node) {
            node.client_size = (width, height);
        }
    }

    /// Set a node's document position
    pub fn set_offset(&self, node: NodeId, x: f64, y: f64) {
        if let Some(node) = self.document.borrow_mut().nodes.get_mut(node) {
            node.offset = (x, y);
        }
    }

    /// Change a node's overflow on both axes
    pub fn set_overflow(&self, node: NodeId, x: Overflow, y: Overflow) {
        if let Some(node) = self.document.borrow_mut().nodes.get_mut(node) {
            node.overflow = (x, y);
        }
    }

    // =========================================================================
    // Driving Events
    // =========================================================================

    /// Scroll a surface to an absolute offset and dispatch a scroll event
    ///
    /// Offsets are clamped to the scrollable range, like a browser would.
    pub fn scroll_to(&self, surface: ScrollSurface, x: f64, y: f64) {
        {
            let mut doc = self.document.borrow_mut();
            let root = doc.root;
            let (client, content) = match surface {
                ScrollSurface::Window => {
                    let Some(window) = doc.window.as_ref() else {
                        return;
                    };
                    let inner = window.inner_size;
                    let content = doc.nodes.get(root).map(|n| n.scroll_size).unwrap_or(inner);
                    (inner, content)
                }
                ScrollSurface::Element(node) => match doc.nodes.get(node) {
                    Some(node) => (node.client_size, node.scroll_size),
                    None => return,
                },
            };

            let clamp = |value: f64, client: f64, content: f64| {
                value.clamp(0.0, (content - client).max(0.0))
            };
            let scroll = (
                clamp(x, client.0, content.0),
                clamp(y, client.1, content.1),
            );

            match surface {
                ScrollSurface::Window => {
                    if let Some(window) = doc.window.as_mut() {
                        window.scroll = scroll;
                    }
                }
                ScrollSurface::Element(node) => {
                    if let Some(node) = doc.nodes.get_mut(node) {
                        node.scroll = scroll;
                    }
                }
            }
        }
        self.dispatch(surface, ListenerKind::Scroll);
    }

    /// Scroll a surface by a relative amount and dispatch a scroll event
    pub fn scroll_by(&self, surface: ScrollSurface, dx: f64, dy: f64) {
        let (x, y) = self.scroll_offset(surface);
        self.scroll_to(surface, x + dx, y + dy);
    }

    /// Current scroll offset of a surface, zero if unknown
    pub fn scroll_offset(&self, surface: ScrollSurface) -> (f64, f64) {
        let doc = self.document.borrow();
        match surface {
            ScrollSurface::Window => doc.window.as_ref().map(|w| w.scroll),
            ScrollSurface::Element(node) => doc.nodes.get(node).map(|n| n.scroll),
        }
        .unwrap_or_default()
    }

    /// Change the window's inner size and dispatch a resize event
    pub fn resize_window(&self, width: f64, height: f64) {
        {
            let mut doc = self.document.borrow_mut();
            let Some(window) = doc.window.as_mut() else {
                return;
            };
            window.inner_size = (width, height);
        }
        self.dispatch(ScrollSurface::Window, ListenerKind::Resize);
    }

    /// Change an element's visible size and dispatch a resize event on it
    pub fn resize_element(&self, node: NodeId, width: f64, height: f64) {
        self.set_client_size(node, width, height);
        self.dispatch(ScrollSurface::Element(node), ListenerKind::Resize);
    }

    /// Invoke every listener registered for `kind` on `target`
    ///
    /// Returns the number of callbacks invoked.
    pub fn dispatch(&self, target: ScrollSurface, kind: ListenerKind) -> usize {
        // Collect first: callbacks may add or remove listeners
        let callbacks: Vec<ListenerCallback> = self
            .listeners
            .borrow()
            .values()
            .filter(|entry| entry.target == target && entry.kind == kind)
            .map(|entry| entry.callback.clone())
            .collect();

        tracing::trace!(?target, ?kind, listeners = callbacks.len(), "dispatch");

        for callback in &callbacks {
            callback(kind);
        }
        callbacks.len()
    }

    /// Advance the virtual clock, firing due timers in order
    ///
    /// Timers scheduled by callbacks run in the same call if they fall due
    /// before the new time.
    pub fn advance(&self, ms: u64) {
        let until = self.clock.borrow().now + ms;

        loop {
            let timer = {
                let mut clock = self.clock.borrow_mut();
                let Some(id) = clock.next_due(until) else {
                    break;
                };
                let Some(timer) = clock.pending.remove(id) else {
                    break;
                };
                clock.now = timer.due;
                timer
            };
            (timer.callback)();
        }

        self.clock.borrow_mut().now = until;
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of timers waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.clock.borrow().pending.len()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of listeners registered on a surface
    pub fn listener_count_for(&self, target: ScrollSurface) -> usize {
        self.listeners
            .borrow()
            .values()
            .filter(|entry| entry.target == target)
            .count()
    }
}

impl ScrollHost for HeadlessHost {
    fn has_window(&self) -> bool {
        self.document.borrow().window.is_some()
    }

    fn document_root(&self) -> Option<NodeId> {
        Some(self.document.borrow().root)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.document.borrow().nodes.get(node)?.parent
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.document
            .borrow()
            .nodes
            .get(node)
            .is_some_and(|n| n.attached)
    }

    fn is_scrollable(&self, node: NodeId, axis: Axis) -> bool {
        self.document
            .borrow()
            .nodes
            .get(node)
            .is_some_and(|n| axis.select(n.overflow).allows_scroll())
    }

    fn query_selector(&self, scope: Option<NodeId>, selector: &str) -> Option<NodeId> {
        let Some(parsed) = Selector::parse(selector) else {
            tracing::debug!("Unsupported selector '{}'", selector);
            return None;
        };
        let doc = self.document.borrow();

        if let Selector::Id(id) = &parsed {
            let node = *doc.ids.get(id)?;
            let in_scope = match scope {
                Some(scope) => doc.is_descendant(node, scope),
                None => true,
            };
            if in_scope && doc.nodes.get(node).is_some_and(|n| n.attached) {
                return Some(node);
            }
            // Index only keeps the first node per id, fall back to a walk
        }

        match scope {
            Some(scope) => doc.find_first(scope, false, &parsed),
            None => doc.find_first(doc.root, true, &parsed),
        }
    }

    fn surface_metrics(&self, surface: ScrollSurface, axis: Axis) -> Result<SurfaceMetrics> {
        let doc = self.document.borrow();
        match surface {
            ScrollSurface::Window => {
                let window = doc.window.as_ref().ok_or(HostError::NoWindow)?;
                let client_extent = axis.select(window.inner_size);
                let document_extent = axis.select(doc.node(doc.root)?.scroll_size);
                Ok(SurfaceMetrics {
                    scroll_offset: axis.select(window.scroll),
                    client_extent,
                    scroll_extent: document_extent.max(client_extent),
                })
            }
            ScrollSurface::Element(id) => {
                let node = doc.attached_node(id)?;
                Ok(SurfaceMetrics {
                    scroll_offset: axis.select(node.scroll),
                    client_extent: axis.select(node.client_size),
                    scroll_extent: axis.select(node.scroll_size),
                })
            }
        }
    }

    fn node_extent(&self, node: NodeId, axis: Axis) -> Result<NodeExtent> {
        let doc = self.document.borrow();
        let node = doc.attached_node(node)?;
        Ok(NodeExtent {
            offset: axis.select(node.offset),
            extent: axis.select(node.client_size),
        })
    }

    fn add_listener(
        &self,
        target: ScrollSurface,
        kind: ListenerKind,
        callback: ListenerCallback,
    ) -> Result<ListenerId> {
        {
            let doc = self.document.borrow();
            match target {
                ScrollSurface::Window if doc.window.is_none() => return Err(HostError::NoWindow),
                ScrollSurface::Element(node) => {
                    doc.node(node)?;
                }
                ScrollSurface::Window => {}
            }
        }

        Ok(self.listeners.borrow_mut().insert(ListenerEntry {
            target,
            kind,
            callback,
        }))
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }

    fn set_timeout(&self, delay_ms: u64, callback: TimerCallback) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        clock.seq += 1;
        let timer = PendingTimer {
            due: clock.now + delay_ms,
            seq: clock.seq,
            callback,
        };
        clock.pending.insert(timer)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.clock.borrow_mut().pending.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn feed(host: &HeadlessHost) -> NodeId {
        host.append(
            host.root(),
            NodeSpec::new("div")
                .id("feed")
                .class("list")
                .overflow_y_auto()
                .client_size(300.0, 400.0)
                .scroll_size(300.0, 2000.0),
        )
    }

    #[test]
    fn test_query_selector_forms() {
        let host = HeadlessHost::new();
        let feed = feed(&host);
        let item = host.append(feed, NodeSpec::new("LI").class("item"));

        assert_eq!(host.query_selector(None, "#feed"), Some(feed));
        assert_eq!(host.query_selector(None, ".list"), Some(feed));
        assert_eq!(host.query_selector(None, "li"), Some(item));
        assert_eq!(host.query_selector(None, "html"), Some(host.root()));
        assert_eq!(host.query_selector(None, "#missing"), None);
        assert_eq!(host.query_selector(None, "div > li"), None);
        assert_eq!(host.query_selector(None, ""), None);
    }

    #[test]
    fn test_query_selector_scope_excludes_outside_nodes() {
        let host = HeadlessHost::new();
        let sidebar = host.append(host.root(), NodeSpec::new("aside").class("panel"));
        let feed = feed(&host);
        let inner = host.append(feed, NodeSpec::new("div").class("panel"));

        assert_eq!(host.query_selector(Some(feed), ".panel"), Some(inner));
        assert_eq!(host.query_selector(None, ".panel"), Some(sidebar));
        // Scope itself never matches
        assert_eq!(host.query_selector(Some(feed), "#feed"), None);
    }

    #[test]
    fn test_query_selector_document_order() {
        let host = HeadlessHost::new();
        let first = host.append(host.root(), NodeSpec::new("section"));
        let nested = host.append(first, NodeSpec::new("div").class("target"));
        host.append(host.root(), NodeSpec::new("div").class("target"));

        assert_eq!(host.query_selector(None, ".target"), Some(nested));
    }

    #[test]
    fn test_element_metrics() {
        let host = HeadlessHost::new();
        let feed = feed(&host);
        let surface = ScrollSurface::Element(feed);

        host.scroll_to(surface, 0.0, 700.0);
        let metrics = host.surface_metrics(surface, Axis::Vertical).unwrap();

        assert_eq!(metrics.scroll_offset, 700.0);
        assert_eq!(metrics.client_extent, 400.0);
        assert_eq!(metrics.scroll_extent, 2000.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let host = HeadlessHost::new();
        let feed = feed(&host);
        let surface = ScrollSurface::Element(feed);

        host.scroll_to(surface, 0.0, 5000.0);
        assert_eq!(host.scroll_offset(surface), (0.0, 1600.0));

        host.scroll_by(surface, 0.0, -2000.0);
        assert_eq!(host.scroll_offset(surface), (0.0, 0.0));
    }

    #[test]
    fn test_window_metrics() {
        let host = HeadlessHost::with_window_size(800.0, 600.0);
        host.set_document_size(800.0, 2400.0);
        host.scroll_to(ScrollSurface::Window, 0.0, 300.0);

        let metrics = host
            .surface_metrics(ScrollSurface::Window, Axis::Vertical)
            .unwrap();
        assert_eq!(metrics.scroll_offset, 300.0);
        assert_eq!(metrics.client_extent, 600.0);
        assert_eq!(metrics.scroll_extent, 2400.0);
    }

    #[test]
    fn test_detached_node() {
        let host = HeadlessHost::new();
        let feed = feed(&host);
        let child = host.append(feed, NodeSpec::new("div").id("child"));

        host.detach(feed);

        assert!(!host.is_attached(feed));
        assert!(!host.is_attached(child));
        assert_eq!(host.parent(feed), None);
        assert_eq!(host.query_selector(None, "#child"), None);
        assert_eq!(
            host.surface_metrics(ScrollSurface::Element(feed), Axis::Vertical),
            Err(HostError::Detached(feed))
        );
    }

    #[test]
    fn test_no_window() {
        let host = HeadlessHost::without_window();

        assert!(!host.has_window());
        assert_eq!(
            host.surface_metrics(ScrollSurface::Window, Axis::Vertical),
            Err(HostError::NoWindow)
        );
        assert!(host
            .add_listener(ScrollSurface::Window, ListenerKind::Scroll, Rc::new(|_| {}))
            .is_err());
    }

    #[test]
    fn test_listeners_by_kind_and_target() {
        let host = HeadlessHost::new();
        let feed = feed(&host);
        let scrolls = Rc::new(Cell::new(0));
        let resizes = Rc::new(Cell::new(0));

        let s = Rc::clone(&scrolls);
        let id = host
            .add_listener(
                ScrollSurface::Element(feed),
                ListenerKind::Scroll,
                Rc::new(move |_| s.set(s.get() + 1)),
            )
            .unwrap();
        let r = Rc::clone(&resizes);
        host.add_listener(
            ScrollSurface::Window,
            ListenerKind::Resize,
            Rc::new(move |_| r.set(r.get() + 1)),
        )
        .unwrap();

        host.scroll_to(ScrollSurface::Element(feed), 0.0, 10.0);
        host.scroll_to(ScrollSurface::Window, 0.0, 10.0);
        host.resize_window(640.0, 480.0);
        assert_eq!(scrolls.get(), 1);
        assert_eq!(resizes.get(), 1);

        host.remove_listener(id);
        host.scroll_to(ScrollSurface::Element(feed), 0.0, 20.0);
        assert_eq!(scrolls.get(), 1);
        assert_eq!(host.listener_count(), 1);
    }

    #[test]
    fn test_timers_fire_in_order() {
        let host = HeadlessHost::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(30, "c"), (10, "a"), (20, "b"), (10, "a2")] {
            let log = Rc::clone(&log);
            host.set_timeout(delay, Box::new(move || log.borrow_mut().push(label)));
        }

        host.advance(15);
        assert_eq!(*log.borrow(), vec!["a", "a2"]);
        assert_eq!(host.now(), 15);

        host.advance(100);
        assert_eq!(*log.borrow(), vec!["a", "a2", "b", "c"]);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_clear_timeout() {
        let host = HeadlessHost::new();
        let fired = Rc::new(Cell::new(false));
        let f = Rc::clone(&fired);

        let id = host.set_timeout(10, Box::new(move || f.set(true)));
        host.clear_timeout(id);
        host.advance(50);

        assert!(!fired.get());
    }

    #[test]
    fn test_timer_scheduled_from_timer() {
        let host = Rc::new(HeadlessHost::new());
        let fired_at = Rc::new(Cell::new(0));

        let inner_host = Rc::clone(&host);
        let record = Rc::clone(&fired_at);
        host.set_timeout(
            10,
            Box::new(move || {
                let clock = Rc::clone(&inner_host);
                let record = Rc::clone(&record);
                inner_host.set_timeout(5, Box::new(move || record.set(clock.now())));
            }),
        );

        host.advance(20);
        assert_eq!(fired_at.get(), 15);
    }

    #[test]
    fn test_overflow_parse() {
        assert_eq!(Overflow::parse("auto"), Some(Overflow::Auto));
        assert_eq!(Overflow::parse(" Scroll "), Some(Overflow::Scroll));
        assert_eq!(Overflow::parse("clip"), Some(Overflow::Hidden));
        assert_eq!(Overflow::parse("sideways"), None);
        assert!(!Overflow::Hidden.allows_scroll());
    }
}
