//! `cp-spatial`: spatial indexing and candidate pruning.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`index`]  | `SpatialIndex` trait, `RTreeIndex` (rstar, zero-based slots) |
//! | [`pruner`] | `CandidatePruner`, `Candidate` (one-based plan ids)          |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! The index speaks in zero-based registry slots.  The pruner is the only
//! place that converts them to plan identifiers.

pub mod error;
pub mod index;
pub mod pruner;


pub use error::{SpatialError, SpatialResult};
pub use index::{RTreeIndex, SpatialIndex};
pub use pruner::{Candidate, CandidatePruner};
