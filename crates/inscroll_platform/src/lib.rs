//! Inscroll Host Abstraction Layer
//!
//! The scroll engine never touches a document directly. Everything it needs
//! from its environment goes through the [`ScrollHost`] trait:
//!
//! - **Capability probe**: is there a window at all
//! - **Tree queries**: parents, selectors, attachment, overflow
//! - **Measurement**: scroll offset, visible extent, content extent
//! - **Listeners**: scroll and resize callbacks on a surface
//! - **Timers**: one-shot callbacks used for throttling
//!
//! All hosts are single-threaded. Callbacks are `Rc` based and run on the UI
//! thread; a host must not hold internal borrows while invoking them, since
//! callbacks re-enter the host to measure and schedule.
//!
//! # Host Implementations
//!
//! - [`headless::HeadlessHost`] - in-memory document with a virtual clock
//!
//! # Example
//!
//! ```rust
//! use inscroll_core::{Axis, ScrollSurface};
//! use inscroll_platform::headless::{HeadlessHost, NodeSpec};
//! use inscroll_platform::ScrollHost;
//!
//! let host = HeadlessHost::new();
//! let feed = host.append(
//!     host.root(),
//!     NodeSpec::new("div").id("feed").overflow_y_auto().client_size(300.0, 400.0).scroll_size(300.0, 2000.0),
//! );
//!
//! assert!(host.is_scrollable(feed, Axis::Vertical));
//! assert_eq!(host.query_selector(None, "#feed"), Some(feed));
//!
//! let metrics = host.surface_metrics(ScrollSurface::Element(feed), Axis::Vertical).unwrap();
//! assert_eq!(metrics.scroll_extent, 2000.0);
//! ```

mod error;
mod host;

#[cfg(feature = "headless")]
pub mod headless;

pub use error::{HostError, Result};
pub use host::{
    ListenerCallback, ListenerId, ListenerKind, NodeExtent, ScrollHost, SharedHost,
    SurfaceMetrics, TimerCallback, TimerId,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{HostError, Result};
    pub use crate::host::{
        ListenerCallback, ListenerId, ListenerKind, NodeExtent, ScrollHost, SharedHost,
        SurfaceMetrics, TimerCallback, TimerId,
    };
}
