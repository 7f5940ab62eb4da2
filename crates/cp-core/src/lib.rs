//! `cp-core`: foundational types for the contact-plan synthesizer.
//!
//! This crate is a dependency of every other `cp-*` crate.  It has no `cp-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`ids`]     | `NodeId` (one-based plan identifier)                    |
//! | [`geo`]     | `Position` (Earth-centred Cartesian, metres)            |
//! | [`time`]    | `SimTime`, `parse_duration`                             |
//! | [`config`]  | `PlanConfig`, `PlanConfigFile`                          |
//! | [`error`]   | `CpError`, `CpResult`                                   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PlanConfig, PlanConfigFile};
pub use error::{CpError, CpResult};
pub use geo::Position;
pub use ids::NodeId;
pub use time::{SimTime, parse_duration};
