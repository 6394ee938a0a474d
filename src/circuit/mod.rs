//! Circuit graph representation and invariant checking.
//!
//! This module provides the node arena and the mutation protocol. The
//! [`CircuitGraph`] struct owns every placed node; all cross-node wiring
//! is expressed as [`NodeId`] handles kept bidirectionally consistent by
//! the connect/disconnect/delete operations.

mod graph;
mod types;
mod validate;

pub use graph::{CircuitGraph, Wire};
pub use types::*;
pub use validate::check_consistency;
