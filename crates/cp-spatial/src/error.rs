//! Spatial-subsystem error type.

use thiserror::Error;

use cp_core::{NodeId, SimTime};

/// Errors produced by `cp-spatial`.  All of them are fatal to a run: a
/// mis-mapped id would corrupt every contact derived from it.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("spatial index holds {indexed} entries but the registry has {registered} nodes")]
    IndexInconsistency { indexed: usize, registered: usize },

    #[error("spatial index returned slot {slot}, which maps to no registered node")]
    IdRemap { slot: usize },

    #[error("{0} is not registered")]
    UnknownNode(NodeId),

    #[error("spatial index was built for {built:?} but queried at {now}")]
    StaleIndex { built: Option<SimTime>, now: SimTime },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
