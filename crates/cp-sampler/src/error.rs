use thiserror::Error;

use cp_core::{CpError, SimTime};
use cp_spatial::SpatialError;

/// Fatal engine errors.  Probe failures never appear here: they are logged
/// and the affected pair is skipped for the tick.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("invalid run setup: {0}")]
    Config(#[from] CpError),

    #[error("spatial index inconsistency: {0}")]
    Spatial(#[from] SpatialError),

    #[error("tick {now} is not after the previous tick {last}")]
    OutOfOrder { now: SimTime, last: SimTime },

    #[error("tick {now} is at or past the run limit {limit}")]
    PastLimit { now: SimTime, limit: SimTime },
}

pub type SamplerResult<T> = Result<T, SamplerError>;
