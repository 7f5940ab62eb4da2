//! Friis free-space reference medium.
//!
//! Deliberately simple: isotropic-plus-gain antennas, free-space path loss,
//! a spherical Earth blocking line of sight, linear addition of interferer
//! power onto the receiver noise floor.
//!
//! ```text
//! FSPL(dB) = 20·log10(4π·d·f / c)
//! Prx(dBm) = Ptx + Gtx + Grx − FSPL
//! ```

use std::collections::HashMap;
use std::f64::consts::PI;

use cp_core::{NodeId, Position, SimTime};
use cp_node::NodeRegistry;

use crate::medium::{Arrival, RadioMedium, Reception, Snir, Transmission};
use crate::{ProbeError, ProbeResult};

/// Speed of light in m/s.
pub const C_M_S: f64 = 299_792_458.0;

/// Line-of-sight clearance tolerance above the Earth's surface, metres.
const GRAZING_TOLERANCE_M: f64 = 1.0;

/// Radio parameters of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct RadioProfile {
    pub tx_power_dbm:      f64,
    pub antenna_gain_dbi:  f64,
    pub frequency_hz:      f64,
    pub bitrate_bps:       u64,
    /// Minimum received power for the receiver to attempt decoding.
    pub sensitivity_dbm:   f64,
    /// Minimum SNIR for a successful decode.
    pub snir_threshold_db: f64,
    pub noise_floor_dbm:   f64,
    /// Hard cut-off regardless of link budget.
    pub max_range_m:       f64,
}

impl Default for RadioProfile {
    /// S-band inter-satellite terminal: 10 W, 20 dBi, 1 Mbit/s.
    fn default() -> Self {
        Self {
            tx_power_dbm:      40.0,
            antenna_gain_dbi:  20.0,
            frequency_hz:      2.2e9,
            bitrate_bps:       1_000_000,
            sensitivity_dbm:   -125.0,
            snir_threshold_db: 4.0,
            noise_floor_dbm:   -130.0,
            max_range_m:       5_000_000.0,
        }
    }
}

#[inline]
fn dbm_to_w(dbm: f64) -> f64 {
    10f64.powf((dbm - 30.0) / 10.0)
}

#[inline]
fn w_to_dbm(w: f64) -> f64 {
    10.0 * w.log10() + 30.0
}

/// Free-space path loss in dB.
pub fn fspl_db(distance_m: f64, frequency_hz: f64) -> f64 {
    20.0 * (4.0 * PI * distance_m.max(1.0) * frequency_hz / C_M_S).log10()
}

/// `true` if the segment `a`–`b` stays above the Earth's surface.
pub fn line_of_sight(a: Position, b: Position) -> bool {
    let (dx, dy, dz) = (b.x - a.x, b.y - a.y, b.z - a.z);
    let len_sq = dx * dx + dy * dy + dz * dz;
    if len_sq == 0.0 {
        return true;
    }
    // Closest point of the segment to the Earth's centre.
    let t = (-(a.x * dx + a.y * dy + a.z * dz) / len_sq).clamp(0.0, 1.0);
    let closest = Position::new(a.x + t * dx, a.y + t * dy, a.z + t * dz);
    closest.distance_m(Position::default()) >= Position::EARTH_RADIUS_M - GRAZING_TOLERANCE_M
}

/// [`RadioMedium`] over a node registry with per-node [`RadioProfile`]s.
pub struct FreeSpaceMedium<R: NodeRegistry> {
    registry: R,
    default:  RadioProfile,
    profiles: HashMap<NodeId, RadioProfile>,
}

impl<R: NodeRegistry> FreeSpaceMedium<R> {
    pub fn new(registry: R, default: RadioProfile) -> Self {
        Self { registry, default, profiles: HashMap::new() }
    }

    /// Override the profile of one node.
    pub fn with_profile(mut self, id: NodeId, profile: RadioProfile) -> Self {
        self.profiles.insert(id, profile);
        self
    }

    pub fn profile(&self, id: NodeId) -> &RadioProfile {
        self.profiles.get(&id).unwrap_or(&self.default)
    }
}

impl<R: NodeRegistry> RadioMedium for FreeSpaceMedium<R> {
    fn transmit(&self, tx: NodeId, bits: u64, start: SimTime) -> ProbeResult<Transmission> {
        if self.registry.slot_of(tx).is_none() {
            return Err(ProbeError::Transmission { tx, reason: "not registered".into() });
        }
        let p = self.profile(tx);
        if p.bitrate_bps == 0 {
            return Err(ProbeError::Transmission { tx, reason: "zero bitrate".into() });
        }
        let nanos = (bits as u128 * 1_000_000_000).div_ceil(p.bitrate_bps as u128);
        let duration = u64::try_from(nanos)
            .map(SimTime)
            .map_err(|_| ProbeError::Transmission { tx, reason: "frame too long".into() })?;
        Ok(Transmission {
            tx,
            bits,
            start,
            duration,
            power_w: dbm_to_w(p.tx_power_dbm),
        })
    }

    fn propagate(&self, transmission: &Transmission, rx: NodeId) -> Option<Arrival> {
        self.registry.slot_of(rx)?;
        let a = self.registry.position(transmission.tx, transmission.start);
        let b = self.registry.position(rx, transmission.start);
        let distance_m = a.distance_m(b);

        let reach = self.profile(transmission.tx).max_range_m.min(self.profile(rx).max_range_m);
        if distance_m > reach || !line_of_sight(a, b) {
            return None;
        }

        let delay = SimTime::from_secs_f64(distance_m / C_M_S);
        Some(Arrival {
            tx: transmission.tx,
            rx,
            start: transmission.start + delay,
            end: transmission.end() + delay,
            distance_m,
        })
    }

    fn receive(&self, transmission: &Transmission, arrival: &Arrival) -> Reception {
        let txp = self.profile(transmission.tx);
        let rxp = self.profile(arrival.rx);
        let power_dbm = w_to_dbm(transmission.power_w) + txp.antenna_gain_dbi
            + rxp.antenna_gain_dbi
            - fspl_db(arrival.distance_m, txp.frequency_hz);
        Reception {
            power_w:   dbm_to_w(power_dbm),
            attempted: power_dbm >= rxp.sensitivity_dbm,
        }
    }

    fn noise_floor_w(&self, rx: NodeId) -> f64 {
        dbm_to_w(self.profile(rx).noise_floor_dbm)
    }

    fn is_decodable(&self, rx: NodeId, snir: &Snir) -> bool {
        snir.db() >= self.profile(rx).snir_threshold_db
    }
}
