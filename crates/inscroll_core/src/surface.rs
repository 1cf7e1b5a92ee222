//! Scroll surface identity
//!
//! Nodes are opaque handles handed out by the host. The engine never looks
//! inside them; it only passes them back to the host for queries.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key};

new_key_type! {
    /// Handle to a node in the host's document tree
    pub struct NodeId;
}

impl NodeId {
    /// Convert to a raw u64 representation
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Create from a raw u64 representation
    ///
    /// The raw value must have been created by `to_raw()` from a valid NodeId.
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// The region whose scroll position is tracked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScrollSurface {
    /// The window / viewport
    Window,
    /// A scrollable element
    Element(NodeId),
}

impl ScrollSurface {
    pub fn is_window(&self) -> bool {
        matches!(self, ScrollSurface::Window)
    }

    /// The element behind this surface, if any
    pub fn node(&self) -> Option<NodeId> {
        match self {
            ScrollSurface::Window => None,
            ScrollSurface::Element(node) => Some(*node),
        }
    }
}

/// An explicitly supplied scroll container
///
/// Either a node the caller already holds, or a selector the host resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrollContainer {
    Selector(String),
    Node(NodeId),
}

impl From<NodeId> for ScrollContainer {
    fn from(node: NodeId) -> Self {
        ScrollContainer::Node(node)
    }
}

impl From<&str> for ScrollContainer {
    fn from(selector: &str) -> Self {
        ScrollContainer::Selector(selector.to_string())
    }
}

impl From<String> for ScrollContainer {
    fn from(selector: String) -> Self {
        ScrollContainer::Selector(selector)
    }
}

impl std::fmt::Display for ScrollContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrollContainer::Selector(selector) => write!(f, "{selector}"),
            ScrollContainer::Node(node) => write!(f, "node#{}", node.to_raw()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_node_id_raw_roundtrip() {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let id = nodes.insert(());
        assert_eq!(NodeId::from_raw(id.to_raw()), id);
    }

    #[test]
    fn test_surface_node() {
        let mut nodes: SlotMap<NodeId, ()> = SlotMap::with_key();
        let id = nodes.insert(());

        assert!(ScrollSurface::Window.is_window());
        assert_eq!(ScrollSurface::Window.node(), None);
        assert_eq!(ScrollSurface::Element(id).node(), Some(id));
    }

    #[test]
    fn test_container_from_selector() {
        let container = ScrollContainer::from(".feed");
        assert_eq!(container, ScrollContainer::Selector(".feed".into()));
        assert_eq!(container.to_string(), ".feed");
    }
}
