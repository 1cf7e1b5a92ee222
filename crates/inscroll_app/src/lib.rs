//! Inscroll App
//!
//! Component-level binding of the scroll engine. An [`InfiniteScroll`] holds
//! the resolved options, owns the scroller of the current setup cycle, and
//! notifies its observers through two emitters.
//!
//! # Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use inscroll_app::InfiniteScroll;
//! use inscroll_core::{InfiniteScrollOptions, ScrollSurface};
//! use inscroll_platform::headless::{HeadlessHost, NodeSpec};
//! use inscroll_platform::SharedHost;
//!
//! let host = Rc::new(HeadlessHost::with_window_size(800.0, 200.0));
//! let list = host.append(host.root(), NodeSpec::new("ul").client_size(800.0, 1000.0));
//! host.set_document_size(800.0, 1000.0);
//!
//! let shared: SharedHost = host.clone();
//! let mut infinite = InfiniteScroll::new(shared, list)
//!     .with_options(&InfiniteScrollOptions::new().with_throttle(0));
//!
//! let loads = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&loads);
//! infinite.on_scrolled(move |_| counter.set(counter.get() + 1));
//! infinite.mount();
//!
//! host.scroll_to(ScrollSurface::Window, 0.0, 500.0);
//! assert_eq!(loads.get(), 1);
//! ```

mod component;
pub mod emitter;


pub use component::InfiniteScroll;
pub use emitter::{Emitter, Handler, HandlerId};

pub use inscroll_core::{InfiniteScrollOptions, InfiniteScrollSettings, ScrollPayload};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::component::InfiniteScroll;
    pub use crate::emitter::{Emitter, HandlerId};

    pub use inscroll_core::{
        Axis, InfiniteScrollOptions, InfiniteScrollSettings, NodeId, ScrollContainer,
        ScrollDirection, ScrollPayload, ScrollSurface,
    };
    pub use inscroll_platform::{ScrollHost, SharedHost};
}
