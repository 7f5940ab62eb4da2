//! `cp-link`: link feasibility probing.
//!
//! A probe answers one question: if `tx` sent a frame to `rx` right now while
//! a given set of other nodes also transmitted, would `rx` decode it?
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`medium`]     | `RadioMedium` trait and the physical-layer value types     |
//! | [`arena`]      | `ProbeArena` (per-probe scratch storage), `ProbeLedger`    |
//! | [`oracle`]     | `LinkOracle` trait, `FeasibilityOracle`, `LinkVerdict`     |
//! | [`free_space`] | `FreeSpaceMedium`, `RadioProfile` (Friis reference model)  |
//! | [`error`]      | `ProbeError`, `ProbeResult<T>`                             |
//!
//! # Probe lifetime
//!
//! Every physical-layer object a probe creates (packet, transmissions,
//! arrivals, listening window, receptions, noise, SNIR, decision) lives in a
//! [`ProbeArena`] local to that probe call.  The arena is dropped on every
//! exit path, so nothing a probe synthesizes can outlive it.

pub mod arena;
pub mod error;
pub mod free_space;
pub mod medium;
pub mod oracle;

#[cfg(test)]
mod tests;

pub use arena::{Handle, ProbeArena, ProbeLedger};
pub use error::{ProbeError, ProbeResult};
pub use free_space::{FreeSpaceMedium, RadioProfile};
pub use medium::{Arrival, Decision, Listening, Noise, Packet, RadioMedium, Reception, Snir, Transmission};
pub use oracle::{FeasibilityOracle, LinkOracle, LinkVerdict};
