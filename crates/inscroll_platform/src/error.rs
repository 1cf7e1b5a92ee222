//! Host error types

use inscroll_core::NodeId;
use thiserror::Error;

/// Host-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// The node handle is not known to this host
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    /// The node exists but is not part of the document
    #[error("Node is detached from the document: {0:?}")]
    Detached(NodeId),

    /// No window is available in this environment
    #[error("No window available")]
    NoWindow,
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
