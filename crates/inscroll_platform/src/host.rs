//! The host trait the scroll engine runs against

use std::rc::Rc;

use inscroll_core::{Axis, NodeId, ScrollSurface};
use slotmap::new_key_type;

use crate::error::Result;

new_key_type! {
    /// Handle to a registered scroll/resize listener
    pub struct ListenerId;
    /// Handle to a pending timer
    pub struct TimerId;
}

/// Callback invoked for every scroll or resize event
///
/// Uses Rc since the UI is single-threaded.
pub type ListenerCallback = Rc<dyn Fn(ListenerKind)>;

/// One-shot timer callback
pub type TimerCallback = Box<dyn FnOnce()>;

/// Shared handle to a host
pub type SharedHost = Rc<dyn ScrollHost>;

/// Kind of event a listener subscribes to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Scroll,
    Resize,
}

/// Raw scroll metrics of a surface along one axis
///
/// For an element these are scrollTop/clientHeight/scrollHeight (or the
/// horizontal equivalents); for the window they are the page offset and the
/// inner size, with `scroll_extent` being the document's scroll size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceMetrics {
    pub scroll_offset: f64,
    pub client_extent: f64,
    pub scroll_extent: f64,
}

/// Position and size of a node along one axis, relative to the document start
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeExtent {
    pub offset: f64,
    pub extent: f64,
}

impl NodeExtent {
    /// Document position of the node's end edge
    pub fn end(&self) -> f64 {
        self.offset + self.extent
    }
}

/// Environment primitives consumed by the scroll engine
///
/// Every method takes `&self`: hosts use interior mutability so callbacks can
/// re-enter them while an event is being dispatched.
pub trait ScrollHost {
    /// Whether a windowing system is present
    fn has_window(&self) -> bool;

    /// The document's root node, if there is a document
    fn document_root(&self) -> Option<NodeId>;

    /// Parent of a node, `None` for the root or detached nodes
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether the node is currently part of the document
    fn is_attached(&self, node: NodeId) -> bool;

    /// Whether the node's overflow allows scrolling on `axis`
    fn is_scrollable(&self, node: NodeId, axis: Axis) -> bool;

    /// First match for `selector` among the descendants of `scope`
    ///
    /// With no scope, the whole document (root included) is searched.
    fn query_selector(&self, scope: Option<NodeId>, selector: &str) -> Option<NodeId>;

    /// Scroll metrics of a surface
    fn surface_metrics(&self, surface: ScrollSurface, axis: Axis) -> Result<SurfaceMetrics>;

    /// Document-relative position and size of a node
    fn node_extent(&self, node: NodeId, axis: Axis) -> Result<NodeExtent>;

    /// Register a listener for `kind` events on `target`
    fn add_listener(
        &self,
        target: ScrollSurface,
        kind: ListenerKind,
        callback: ListenerCallback,
    ) -> Result<ListenerId>;

    /// Remove a listener; unknown ids are ignored
    fn remove_listener(&self, id: ListenerId);

    /// Run `callback` once after `delay_ms` milliseconds
    fn set_timeout(&self, delay_ms: u64, callback: TimerCallback) -> TimerId;

    /// Cancel a pending timer; unknown or fired ids are ignored
    fn clear_timeout(&self, id: TimerId);
}
