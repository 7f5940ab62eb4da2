//! Probe error type.

use thiserror::Error;

use cp_core::NodeId;

/// A probe could not be carried out.  Callers treat this as "no data" for the
/// pair and tick: logged and skipped, never fatal.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("cannot synthesize a transmission from {tx}: {reason}")]
    Transmission { tx: NodeId, reason: String },

    #[error("radio medium failure: {0}")]
    Medium(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;
