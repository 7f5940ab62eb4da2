//! Node kinematics.
//!
//! Orbit propagation is not this crate's concern; `Motion` only covers the two
//! shapes needed to drive a plan run end to end: a fixed Earth-fixed point and
//! an ideal circular orbit.

use std::f64::consts::TAU;

use cp_core::{Position, SimTime};

/// How a node's position evolves with simulation time.
#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    /// Stationary point (ground terminals).
    Fixed(Position),

    /// Circular orbit around the Earth's centre.
    CircularOrbit {
        /// Distance from the Earth's centre, metres.
        radius_m:        f64,
        inclination_rad: f64,
        /// Right ascension of the ascending node.
        raan_rad:        f64,
        /// Argument of latitude at `t = 0`.
        phase_rad:       f64,
        /// Orbital period.
        period:          SimTime,
    },
}

impl Motion {
    /// Position at simulation time `now`.
    pub fn position_at(&self, now: SimTime) -> Position {
        match *self {
            Motion::Fixed(p) => p,
            Motion::CircularOrbit { radius_m, inclination_rad, raan_rad, phase_rad, period } => {
                let turns = if period.is_zero() {
                    0.0
                } else {
                    now.as_secs_f64() / period.as_secs_f64()
                };
                let u = phase_rad + TAU * turns;

                // In-plane position, then rotate by inclination and RAAN.
                let (xp, yp) = (radius_m * u.cos(), radius_m * u.sin());
                let (ci, si) = (inclination_rad.cos(), inclination_rad.sin());
                let (co, so) = (raan_rad.cos(), raan_rad.sin());
                Position::new(
                    xp * co - yp * ci * so,
                    xp * so + yp * ci * co,
                    yp * si,
                )
            }
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Motion::Fixed(_))
    }
}
