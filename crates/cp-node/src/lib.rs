//! `cp-node`: the node registry.
//!
//! The sampling engine never reaches for a process-wide registry; it is handed
//! something implementing [`NodeRegistry`] at construction time.  This crate
//! defines that contract and ships [`NodeTable`], a structure-of-arrays
//! implementation built with [`NodeTableBuilder`].
//!
//! | Module       | Contents                                       |
//! |--------------|------------------------------------------------|
//! | [`registry`] | `NodeRegistry` trait                           |
//! | [`motion`]   | `Motion` (fixed point / circular orbit)        |
//! | [`table`]    | `NodeTable`, `NodeSpec`                        |
//! | [`builder`]  | `NodeTableBuilder`                             |

pub mod builder;
pub mod error;
pub mod motion;
pub mod registry;
pub mod table;

#[cfg(test)]
mod tests;

pub use builder::NodeTableBuilder;
pub use error::{NodeError, NodeResult};
pub use motion::Motion;
pub use registry::NodeRegistry;
pub use table::{NodeSpec, NodeTable};
