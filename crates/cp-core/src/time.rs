//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing integer count of nanoseconds since the
//! start of the run.  Integer time keeps interval arithmetic exact: merging
//! two plan entries never depends on floating-point rounding.
//!
//! Human-readable durations (`"10s"`, `"1h 30min"`, `"2.5ms"`) are parsed by
//! [`parse_duration`].  Picosecond terms are accepted as long as the total
//! lands on a whole nanosecond.

use std::fmt;

use crate::{CpError, CpResult};

const NANOS_PER_SEC: u64 = 1_000_000_000;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation instant (or a span, when used as a duration).
///
/// Stored as `u64` nanoseconds: enough for ~584 years of simulated time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub const fn from_secs(secs: u64) -> SimTime {
        SimTime(secs * NANOS_PER_SEC)
    }

    #[inline]
    pub const fn from_millis(ms: u64) -> SimTime {
        SimTime(ms * 1_000_000)
    }

    #[inline]
    pub const fn from_nanos(ns: u64) -> SimTime {
        SimTime(ns)
    }

    /// Convert fractional seconds, rounding to the nearest nanosecond.
    /// Negative and non-finite inputs clamp to zero.
    pub fn from_secs_f64(secs: f64) -> SimTime {
        if !secs.is_finite() || secs <= 0.0 {
            return SimTime::ZERO;
        }
        SimTime((secs * NANOS_PER_SEC as f64).round() as u64)
    }

    #[inline]
    pub fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC as f64
    }

    /// Whole seconds, rounded up.  `SimTime(1)` → 1, `SimTime::ZERO` → 0.
    #[inline]
    pub fn secs_ceil(self) -> u64 {
        self.0.div_ceil(NANOS_PER_SEC)
    }

    #[inline]
    pub fn saturating_sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_sub(rhs.0))
    }

    #[inline]
    pub fn saturating_add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: SimTime) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for SimTime {
    type Output = SimTime;
    #[inline]
    fn sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 - rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_secs_f64())
    }
}

// ── Duration parsing ──────────────────────────────────────────────────────────

/// Picoseconds per unit suffix.  Longest suffixes first so `ms` is not read
/// as `m` + `s` and `min` wins over `ms`.
const UNITS: &[(&str, u128)] = &[
    ("min", 60_000_000_000_000),
    ("ms", 1_000_000_000),
    ("us", 1_000_000),
    ("ns", 1_000),
    ("ps", 1),
    ("s", 1_000_000_000_000),
    ("h", 3_600_000_000_000_000),
    ("d", 86_400_000_000_000_000),
];

/// Parse a human-readable duration such as `"10s"`, `"1h 30min"` or `"2.5ms"`.
///
/// Grammar: one or more `<decimal><unit>` terms, optionally separated by
/// whitespace.  Units: `d`, `h`, `min`, `s`, `ms`, `us`, `ns`, `ps`.
///
/// # Errors
///
/// [`CpError::Duration`] for an empty string, a missing or unknown unit, a
/// malformed number, overflow, or a total that is not a whole nanosecond.
pub fn parse_duration(input: &str) -> CpResult<SimTime> {
    let fail = |reason: &str| CpError::Duration {
        input:  input.to_owned(),
        reason: reason.to_owned(),
    };

    let mut rest = input.trim();
    if rest.is_empty() {
        return Err(fail("empty duration"));
    }

    let mut total_ps: u128 = 0;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return Err(fail("expected a number"));
        }
        let (number, tail) = rest.split_at(num_len);

        let (unit, unit_ps) = UNITS
            .iter()
            .find(|(suffix, _)| tail.starts_with(suffix))
            .ok_or_else(|| fail("missing or unknown unit (expected d, h, min, s, ms, us, ns, ps)"))?;

        total_ps = total_ps
            .checked_add(term_ps(number, *unit_ps).ok_or_else(|| fail("malformed or inexact number"))?)
            .ok_or_else(|| fail("duration overflows"))?;

        rest = tail[unit.len()..].trim_start();
    }

    if total_ps % 1_000 != 0 {
        return Err(fail("resolution below one nanosecond"));
    }
    u64::try_from(total_ps / 1_000)
        .map(SimTime)
        .map_err(|_| fail("duration overflows"))
}

/// `number * unit_ps` computed exactly from the decimal string.
fn term_ps(number: &str, unit_ps: u128) -> Option<u128> {
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if frac_part.contains('.') {
        return None;
    }

    let int: u128 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
    let mut value = int.checked_mul(unit_ps)?;

    if !frac_part.is_empty() {
        let frac: u128 = frac_part.parse().ok()?;
        let scale = 10u128.checked_pow(frac_part.len() as u32)?;
        let scaled = frac.checked_mul(unit_ps)?;
        if scaled % scale != 0 {
            return None;
        }
        value = value.checked_add(scaled / scale)?;
    }
    Some(value)
}
