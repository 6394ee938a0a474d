//! Graph invariant checking.

use crate::error::{Result, SimError};

use super::CircuitGraph;

/// Check the structural invariants of the graph.
///
/// Verifies, for every node:
/// - the driver vector holds exactly the kind's slot count
/// - every occupied slot references a node present in the arena, and that
///   node's dependents record the edge
/// - every dependents entry is unique and backed by at least one
///   referencing slot on the dependent
pub fn check_consistency(graph: &CircuitGraph) -> Result<()> {
    for node in graph.nodes() {
        if node.drivers.len() != node.kind.slot_count() {
            return Err(SimError::inconsistent(format!(
                "{} has {} driver slots, expected {}",
                node.id,
                node.drivers.len(),
                node.kind.slot_count()
            )));
        }

        for driver in node.drivers.iter().flatten() {
            let Some(d) = graph.node(*driver) else {
                return Err(SimError::inconsistent(format!(
                    "{} references missing node {}",
                    node.id, driver
                )));
            };
            if !d.dependents.contains(&node.id) {
                return Err(SimError::inconsistent(format!(
                    "{} drives {} without a dependents entry",
                    driver, node.id
                )));
            }
        }

        for (i, dep) in node.dependents.iter().enumerate() {
            if node.dependents[..i].contains(dep) {
                return Err(SimError::inconsistent(format!(
                    "duplicate dependents entry {} on {}",
                    dep, node.id
                )));
            }
            let Some(d) = graph.node(*dep) else {
                return Err(SimError::inconsistent(format!(
                    "{} lists missing node {} as dependent",
                    node.id, dep
                )));
            };
            if !d.references(node.id) {
                return Err(SimError::inconsistent(format!(
                    "{} lists {} as dependent but no slot references it",
                    node.id, dep
                )));
            }
        }
    }
    Ok(())
}
