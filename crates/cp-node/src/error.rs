//! Registry construction errors.

use thiserror::Error;

use cp_core::NodeId;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("{0} is not a registered node")]
    Unknown(NodeId),

    #[error("internet link {a} <-> {b} requires two ground terminals")]
    InternetLinkNotGround { a: NodeId, b: NodeId },

    #[error("node {id}: {what} must be finite and non-negative")]
    BadRadius { id: NodeId, what: &'static str },
}

pub type NodeResult<T> = Result<T, NodeError>;
