//! Surface resolution errors
//!
//! None of these reach the subscriber. The scroller logs them and stays inert.

use inscroll_core::{NodeId, ScrollContainer};
use inscroll_platform::HostError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The configuration disables the scroller
    #[error("Scroller is disabled")]
    Disabled,

    /// No windowing system in this environment
    #[error("No window available")]
    EnvironmentUnavailable,

    /// An explicit container did not resolve to a surface
    #[error("Scroll container not found: {0}")]
    ContainerNotFound(ScrollContainer),

    /// The anchor element is not part of the document
    #[error("Anchor element is detached: {0:?}")]
    AnchorDetached(NodeId),

    /// Neither the anchor nor any ancestor scrolls on the active axis
    #[error("No scrollable ancestor found")]
    NoScrollableAncestor,

    /// The host rejected a listener
    #[error("Failed to attach listener: {0}")]
    Host(#[from] HostError),
}
