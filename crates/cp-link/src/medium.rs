//! The `RadioMedium` trait: the physical layer a probe is evaluated against.
//!
//! The medium is an external collaborator: it knows antennas, path loss and
//! noise.  The oracle only sequences its calls and stores the results.

use cp_core::{NodeId, SimTime};

use crate::ProbeResult;

/// A zero-content frame of a given size.
#[derive(Clone, Debug, PartialEq)]
pub struct Packet {
    pub bits: u64,
}

/// A frame leaving a transmitter.
#[derive(Clone, Debug, PartialEq)]
pub struct Transmission {
    pub tx:       NodeId,
    pub bits:     u64,
    pub start:    SimTime,
    /// Time on the wire.
    pub duration: SimTime,
    pub power_w:  f64,
}

impl Transmission {
    #[inline]
    pub fn end(&self) -> SimTime {
        self.start + self.duration
    }
}

/// A transmission as it reaches one receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrival {
    pub tx:         NodeId,
    pub rx:         NodeId,
    pub start:      SimTime,
    pub end:        SimTime,
    pub distance_m: f64,
}

/// The receiver's listening window for the wanted arrival.
#[derive(Clone, Debug, PartialEq)]
pub struct Listening {
    pub rx:    NodeId,
    pub start: SimTime,
    pub end:   SimTime,
}

impl Listening {
    /// `true` if `arrival` overlaps the window by any non-empty span.
    #[inline]
    pub fn overlaps(&self, arrival: &Arrival) -> bool {
        arrival.start < self.end && self.start < arrival.end
    }
}

/// Received power of one arrival.
#[derive(Clone, Debug, PartialEq)]
pub struct Reception {
    pub power_w:   f64,
    /// The receiver would lock onto this signal (above sensitivity).
    pub attempted: bool,
}

/// Background noise plus every overlapping interferer, in watts.
#[derive(Clone, Debug, PartialEq)]
pub struct Noise {
    pub power_w: f64,
}

/// Signal to interference-plus-noise ratio (linear).
#[derive(Clone, Debug, PartialEq)]
pub struct Snir {
    pub ratio: f64,
}

impl Snir {
    pub fn db(&self) -> f64 {
        10.0 * self.ratio.log10()
    }
}

/// Final reception decision.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub successful: bool,
}

/// Physical-layer model queried by [`FeasibilityOracle`][crate::FeasibilityOracle].
pub trait RadioMedium {
    /// Build the transmission of a `bits`-sized frame from `tx` at `start`.
    ///
    /// Errors mean the medium cannot model this transmitter at all.
    fn transmit(&self, tx: NodeId, bits: u64, start: SimTime) -> ProbeResult<Transmission>;

    /// Propagate `transmission` to `rx`.  `None` when reception is not
    /// physically possible (out of range, blocked line of sight).
    fn propagate(&self, transmission: &Transmission, rx: NodeId) -> Option<Arrival>;

    /// Power of `arrival` at its receiver and whether reception is attempted.
    fn receive(&self, transmission: &Transmission, arrival: &Arrival) -> Reception;

    /// Receiver background noise, in watts.
    fn noise_floor_w(&self, rx: NodeId) -> f64;

    /// `true` if `rx` decodes a frame at `snir`.
    fn is_decodable(&self, rx: NodeId, snir: &Snir) -> bool;
}
