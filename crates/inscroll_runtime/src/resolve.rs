//! Scroll surface resolution
//!
//! Priority order:
//!
//! 1. disabled: nothing
//! 2. explicit container (node, or selector resolved by the host)
//! 3. the window, when `scroll_window` is set
//! 4. the nearest ancestor (anchor included) that scrolls on the active axis,
//!    or the outermost one when searching from the root

use inscroll_core::{NodeId, ScrollConfiguration, ScrollContainer, ScrollSurface};
use inscroll_platform::ScrollHost;
use smallvec::SmallVec;

use crate::error::ResolveError;

/// Resolve the single surface a scroller will track
pub fn resolve_surface(
    host: &dyn ScrollHost,
    config: &ScrollConfiguration,
) -> Result<ScrollSurface, ResolveError> {
    if config.disable {
        return Err(ResolveError::Disabled);
    }

    if let Some(container) = &config.scroll_container {
        return resolve_container(host, config, container).map(ScrollSurface::Element);
    }

    if config.scroll_window {
        return if host.has_window() {
            Ok(ScrollSurface::Window)
        } else {
            Err(ResolveError::EnvironmentUnavailable)
        };
    }

    resolve_ancestor(host, config).map(ScrollSurface::Element)
}

fn resolve_container(
    host: &dyn ScrollHost,
    config: &ScrollConfiguration,
    container: &ScrollContainer,
) -> Result<NodeId, ResolveError> {
    let node = match container {
        ScrollContainer::Node(node) => Some(*node),
        ScrollContainer::Selector(selector) => {
            // Root search looks at the whole document, otherwise only inside the anchor
            let scope = (!config.from_root).then_some(config.element);
            host.query_selector(scope, selector)
        }
    };

    node.filter(|node| host.is_attached(*node))
        .ok_or_else(|| ResolveError::ContainerNotFound(container.clone()))
}

fn resolve_ancestor(
    host: &dyn ScrollHost,
    config: &ScrollConfiguration,
) -> Result<NodeId, ResolveError> {
    if !host.is_attached(config.element) {
        return Err(ResolveError::AnchorDetached(config.element));
    }

    let axis = config.axis();
    let mut chain: SmallVec<[NodeId; 8]> = SmallVec::new();
    let root = host.document_root();
    let mut current = Some(config.element);
    while let Some(node) = current {
        // The document root scrolls with the window
        if Some(node) == root {
            break;
        }
        chain.push(node);
        current = host.parent(node);
    }

    let found = if config.from_root {
        chain
            .iter()
            .rev()
            .find(|node| host.is_scrollable(**node, axis))
    } else {
        chain.iter().find(|node| host.is_scrollable(**node, axis))
    };

    found.copied().ok_or(ResolveError::NoScrollableAncestor)
}
