//! Inscroll Runtime
//!
//! Runs the scroll-tracking engine on top of a [`ScrollHost`]:
//!
//! ```text
//! ScrollConfiguration
//!     ↓ resolve_surface (container → window → scrollable ancestor)
//! Listeners (scroll + resize)
//!     ↓ Throttle (one pending window at a time)
//! Tick → measure → geometry::evaluate → FireGuard
//!     ↓
//! ScrollAction → subscriber callback
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use inscroll_core::{ScrollConfiguration, ScrollSurface};
//! use inscroll_platform::headless::{HeadlessHost, NodeSpec};
//! use inscroll_platform::SharedHost;
//! use inscroll_runtime::Scroller;
//!
//! let host = Rc::new(HeadlessHost::with_window_size(800.0, 200.0));
//! let list = host.append(host.root(), NodeSpec::new("ul").client_size(800.0, 1000.0));
//! host.set_document_size(800.0, 1000.0);
//!
//! let actions = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&actions);
//!
//! let shared: SharedHost = host.clone();
//! let subscription = Scroller::new(shared, ScrollConfiguration::new(list).with_throttle(0))
//!     .subscribe(move |action| sink.borrow_mut().push(action));
//!
//! host.scroll_to(ScrollSurface::Window, 0.0, 450.0);
//! assert_eq!(actions.borrow().len(), 1);
//!
//! subscription.unsubscribe();
//! ```
//!
//! [`ScrollHost`]: inscroll_platform::ScrollHost

mod error;
pub mod resolve;
pub mod scroller;
pub mod throttle;

pub use error::ResolveError;
pub use resolve::resolve_surface;
pub use scroller::{create_scroller, ScrollSubscription, Scroller, ScrollerStats};
pub use throttle::{Throttle, ThrottleDecision};
