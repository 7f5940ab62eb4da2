//! `cp-sampler`: the per-tick sampling engine.
//!
//! # Tick
//!
//! ```text
//! for now in 0, Δ, 2Δ, … < simTimeLimit:
//!   ① Rebuild:   spatial index at every node's position for `now`.
//!   ② Contacts:  for each transmitter, probe candidate receivers inside its
//!                 comm radius; merge one sample per pair into the store.
//!   ③ Interfere: (buildInterferencePlan) for each working contact, probe
//!                 candidate interferers near the receiver:
//!                   single        → one probe per interferer
//!                   combinatorial → subset search with domination pruning
//! export: loopbacks + internet links + enabled store entries
//! ```
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | FxHash for the per-tick transmitter set.               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cp_sampler::{NoopObserver, PlanEngineBuilder};
//!
//! let mut engine = PlanEngineBuilder::new(config, registry, oracle).build()?;
//! let plan = engine.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod contact;
pub mod engine;
pub mod error;
pub mod interference;
pub mod observer;
pub mod search;


pub use builder::PlanEngineBuilder;
pub use contact::{ContactSampler, ContactSweep, LinkKind, WorkingContact};
pub use engine::PlanEngine;
pub use error::{SamplerError, SamplerResult};
pub use interference::InterferenceSampler;
pub use observer::{NoopObserver, PlanObserver, TickStats};
pub use search::search;
