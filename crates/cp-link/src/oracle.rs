//! Link Feasibility Oracle: the probe sequence over a [`RadioMedium`].

use tracing::trace;

use cp_core::{NodeId, SimTime};

use crate::arena::{ProbeArena, ProbeLedger};
use crate::medium::{Decision, Listening, Noise, Packet, RadioMedium, Snir};
use crate::ProbeResult;

// ── LinkVerdict ───────────────────────────────────────────────────────────────

/// Outcome of one probe.
///
/// | possible | attempted | successful | meaning                                   |
/// |----------|-----------|------------|-------------------------------------------|
/// | false    | false     | false      | out of range / no line of sight: no data  |
/// | true     | false     | false      | reached the receiver below sensitivity    |
/// | true     | true      | false      | in range, link budget insufficient        |
/// | true     | true      | true       | frame decoded                             |
#[derive(Clone, Debug, PartialEq)]
pub struct LinkVerdict {
    pub possible:          bool,
    pub attempted:         bool,
    pub successful:        bool,
    /// Bits per second achieved on the wire (floor).  Set when attempted.
    pub bitrate:           Option<u64>,
    /// Propagation delay rounded up to whole seconds, at least one second.
    /// Set when attempted.
    pub propagation_delay: Option<SimTime>,
    /// Transmitter–receiver distance at the probe instant.  Set when possible.
    pub distance_m:        Option<f64>,
}

impl LinkVerdict {
    /// Verdict for a pair the medium cannot connect at all.
    pub const NOT_POSSIBLE: LinkVerdict = LinkVerdict {
        possible:          false,
        attempted:         false,
        successful:        false,
        bitrate:           None,
        propagation_delay: None,
        distance_m:        None,
    };

    /// Reception was attempted but failed: the case a disabled contact
    /// interval records.
    #[inline]
    pub fn failed_attempt(&self) -> bool {
        self.attempted && !self.successful
    }

    /// Interference predicate: the frame could reach the receiver but did not
    /// decode.
    #[inline]
    pub fn interfered(&self) -> bool {
        self.possible && !self.successful
    }

    /// Propagation delay in whole seconds (minimum 1).
    pub fn range_secs(&self) -> Option<u64> {
        self.propagation_delay.map(|d| d.secs_ceil().max(1))
    }
}

/// Round a raw propagation delay up to whole seconds, promoting zero to one.
pub fn round_delay(raw: SimTime) -> SimTime {
    SimTime::from_secs(raw.secs_ceil().max(1))
}

/// Bits per second for `bits` sent over `duration` (floor).  A zero duration
/// reports `u64::MAX`.
pub fn wire_bitrate(bits: u64, duration: SimTime) -> u64 {
    if duration.is_zero() {
        return u64::MAX;
    }
    let bps = bits as u128 * 1_000_000_000 / duration.as_nanos() as u128;
    u64::try_from(bps).unwrap_or(u64::MAX)
}

// ── LinkOracle ────────────────────────────────────────────────────────────────

/// Decide reception for an ordered pair under a set of simultaneous
/// interferers.
///
/// Implemented by [`FeasibilityOracle`]; tests substitute scripted oracles.
pub trait LinkOracle {
    fn probe(
        &self,
        tx:          NodeId,
        rx:          NodeId,
        interferers: &[NodeId],
        probe_bits:  u64,
        now:         SimTime,
    ) -> ProbeResult<LinkVerdict>;
}

macro_rules! forward_oracle {
    ($($ptr:ty),*) => {$(
        impl<T: LinkOracle + ?Sized> LinkOracle for $ptr {
            fn probe(
                &self,
                tx:          NodeId,
                rx:          NodeId,
                interferers: &[NodeId],
                probe_bits:  u64,
                now:         SimTime,
            ) -> ProbeResult<LinkVerdict> {
                (**self).probe(tx, rx, interferers, probe_bits, now)
            }
        }
    )*};
}

forward_oracle!(&T, std::sync::Arc<T>, std::rc::Rc<T>);

// ── FeasibilityOracle ─────────────────────────────────────────────────────────

/// [`LinkOracle`] that synthesizes a full physical-layer exchange on a
/// [`RadioMedium`] inside a per-probe [`ProbeArena`].
pub struct FeasibilityOracle<M: RadioMedium> {
    medium: M,
    ledger: ProbeLedger,
}

impl<M: RadioMedium> FeasibilityOracle<M> {
    pub fn new(medium: M) -> Self {
        Self { medium, ledger: ProbeLedger::new() }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Allocation counters across every probe so far.
    pub fn ledger(&self) -> &ProbeLedger {
        &self.ledger
    }
}

impl<M: RadioMedium> LinkOracle for FeasibilityOracle<M> {
    fn probe(
        &self,
        tx:          NodeId,
        rx:          NodeId,
        interferers: &[NodeId],
        probe_bits:  u64,
        now:         SimTime,
    ) -> ProbeResult<LinkVerdict> {
        let mut arena = ProbeArena::new(&self.ledger);

        // ── Wanted signal ─────────────────────────────────────────────────
        let packet = arena.alloc(Packet { bits: probe_bits });
        let bits = arena[packet].bits;
        let tr = arena.alloc(self.medium.transmit(tx, bits, now)?);

        let Some(arrival) = self.medium.propagate(&arena[tr], rx) else {
            trace!(%tx, %rx, "probe: reception not possible");
            return Ok(LinkVerdict::NOT_POSSIBLE);
        };
        let arrival = arena.alloc(arrival);
        let distance_m = arena[arrival].distance_m;

        let listening = arena.alloc(Listening {
            rx,
            start: arena[arrival].start,
            end:   arena[arrival].end,
        });
        let reception = arena.alloc(self.medium.receive(&arena[tr], &arena[arrival]));

        if !arena[reception].attempted {
            trace!(%tx, %rx, "probe: below sensitivity");
            return Ok(LinkVerdict {
                possible: true,
                distance_m: Some(distance_m),
                ..LinkVerdict::NOT_POSSIBLE
            });
        }

        // ── Interference ──────────────────────────────────────────────────
        let mut interference_w = 0.0;
        for &other in interferers {
            if other == tx || other == rx {
                continue;
            }
            let itr = arena.alloc(self.medium.transmit(other, bits, now)?);
            let Some(iarr) = self.medium.propagate(&arena[itr], rx) else {
                continue;
            };
            let iarr = arena.alloc(iarr);
            if !arena[listening].overlaps(&arena[iarr]) {
                continue;
            }
            let irec = arena.alloc(self.medium.receive(&arena[itr], &arena[iarr]));
            interference_w += arena[irec].power_w;
        }

        // ── Decision ──────────────────────────────────────────────────────
        let noise = arena.alloc(Noise { power_w: self.medium.noise_floor_w(rx) + interference_w });
        let snir = arena.alloc(Snir { ratio: arena[reception].power_w / arena[noise].power_w });
        let decision = arena.alloc(Decision { successful: self.medium.is_decodable(rx, &arena[snir]) });

        let verdict = LinkVerdict {
            possible:          true,
            attempted:         true,
            successful:        arena[decision].successful,
            bitrate:           Some(wire_bitrate(bits, arena[tr].duration)),
            propagation_delay: Some(round_delay(arena[arrival].start - arena[tr].start)),
            distance_m:        Some(distance_m),
        };
        trace!(
            %tx, %rx,
            interferers = interferers.len(),
            snir_db = arena[snir].db(),
            successful = verdict.successful,
            objects = arena.len(),
            "probe",
        );
        Ok(verdict)
    }
}
