//! Inscroll Core
//!
//! This crate provides the host-independent pieces of the infinite scroll engine:
//!
//! - **Geometry**: distance-to-edge computation and trigger classification
//! - **Configuration**: the immutable per-setup [`ScrollConfiguration`]
//! - **Options**: serializable component options with explicit-wins merging
//! - **Fire Guard**: repeated-fire suppression between qualifying ticks
//! - **Actions**: the [`ScrollAction`] values pushed to subscribers
//!
//! # Example
//!
//! ```rust
//! use inscroll_core::geometry::{evaluate, AxisMetrics, Thresholds, Trigger};
//!
//! let metrics = AxisMetrics::new(450.0, 200.0, 1000.0);
//! let thresholds = Thresholds::new(2.0, 1.5);
//!
//! // 1000 - (450 + 200) = 350 remaining, threshold is 2 * 200 = 400
//! assert_eq!(evaluate(&metrics, &thresholds).trigger, Trigger::Down);
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod geometry;
pub mod guard;
pub mod options;
pub mod surface;

pub use action::{ScrollAction, ScrollDirection, ScrollPayload};
pub use config::ScrollConfiguration;
pub use error::{ConfigError, Result};
pub use geometry::{classify, evaluate, Axis, AxisMetrics, Evaluation, Thresholds, Trigger};
pub use guard::FireGuard;
pub use options::{InfiniteScrollOptions, InfiniteScrollSettings};
pub use surface::{NodeId, ScrollContainer, ScrollSurface};
