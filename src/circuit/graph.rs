//! The circuit graph: node arena and mutation protocol.

use std::collections::BTreeMap;

use crate::components::geometry::point_near_segment;
use crate::components::{Node, NodeKind};

use super::types::{NodeId, Point};

/// A wire currently present in the graph: `driver`'s output feeding
/// `target`'s input `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wire {
    pub driver: NodeId,
    pub target: NodeId,
    pub slot: usize,
}

/// The node arena and sole mediator of structural mutation.
///
/// All cross-node references are [`NodeId`] handles into this collection.
/// The connect/disconnect/delete protocol keeps driver slots and dependent
/// sets bidirectionally consistent after every operation, including failed
/// ones: an invalid mutation is a silent no-op, never a partial write.
#[derive(Debug, Default)]
pub struct CircuitGraph {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
}

impl CircuitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a new node and return its id.
    pub fn place(&mut self, kind: NodeKind, x: f64, y: f64) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, kind, x, y));
        id
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterate nodes in placement order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Connect `source`'s output to an input slot of `target`.
    ///
    /// `source` must be the node whose output terminal the gesture started
    /// or ended on; direction is enforced by the caller's click-order
    /// protocol. Gates resolve to their first empty slot and the operation
    /// is a silent no-op when every slot is occupied; a sink pin resolves
    /// to its single slot, severing any previous driver first. Fan-out is
    /// unbounded and the dependents entry is deduplicated.
    ///
    /// Returns `true` if an edge was installed.
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> bool {
        if !self.nodes.contains_key(&source) {
            return false;
        }
        let (kind, free) = match self.nodes.get(&target) {
            Some(t) => (t.kind, t.first_free_slot()),
            None => return false,
        };
        if kind.slot_count() == 0 {
            return false;
        }
        let slot = if kind.is_gate() {
            match free {
                Some(slot) => slot,
                None => return false,
            }
        } else {
            0
        };

        // Sever the old edge if the resolved slot is occupied.
        self.clear_slot(target, slot);

        if let Some(t) = self.nodes.get_mut(&target) {
            t.drivers[slot] = Some(source);
        }
        if let Some(s) = self.nodes.get_mut(&source) {
            if !s.dependents.contains(&target) {
                s.dependents.push(target);
            }
        }
        true
    }

    /// Disconnect the wire feeding `target`'s input `slot`. No-op if the
    /// slot is already empty or the id is stale.
    pub fn disconnect(&mut self, target: NodeId, slot: usize) {
        self.clear_slot(target, slot);
    }

    /// Clear one driver slot, retiring the dependents back-reference if
    /// that was the last slot of `target` referencing the driver.
    fn clear_slot(&mut self, target: NodeId, slot: usize) {
        let old = match self.nodes.get_mut(&target) {
            Some(t) if slot < t.drivers.len() => t.drivers[slot].take(),
            _ => None,
        };
        let Some(old) = old else { return };
        let still_referenced = self
            .nodes
            .get(&target)
            .map_or(false, |t| t.references(old));
        if !still_referenced {
            if let Some(d) = self.nodes.get_mut(&old) {
                d.dependents.retain(|&n| n != target);
            }
        }
    }

    /// Delete a node, retiring every edge referencing it in both
    /// directions before removal. Slots that referenced it are cleared in
    /// place, never shifted; no dangling reference survives.
    pub fn delete(&mut self, id: NodeId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        // Downstream: every dependent holds at least one slot pointing here.
        for dep in node.dependents {
            if let Some(d) = self.nodes.get_mut(&dep) {
                for slot in d.drivers.iter_mut() {
                    if *slot == Some(id) {
                        *slot = None;
                    }
                }
            }
        }
        // Upstream: every driver carries a back-reference to this node.
        for driver in node.drivers.into_iter().flatten() {
            if let Some(d) = self.nodes.get_mut(&driver) {
                d.dependents.retain(|&n| n != id);
            }
        }
    }

    /// Toggle a source pin's latched state. No-op for any other kind.
    pub fn toggle(&mut self, id: NodeId) {
        if let Some(n) = self.nodes.get_mut(&id) {
            if n.kind == NodeKind::Source {
                n.latched = !n.latched;
            }
        }
    }

    /// Move a node's body to a new canvas position.
    pub fn move_to(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.x = x;
            n.y = y;
        }
    }

    /// Evaluate a node's current boolean value.
    ///
    /// A pure recursive walk over the current driver references with no
    /// memoization; cost is proportional to graph depth times fan-in and
    /// is paid in full on every call. The walk tracks the nodes currently
    /// on its stack: a back edge into one of them reads as false at the
    /// cut point, so evaluation terminates on cyclic graphs, bounded by
    /// graph size.
    pub fn evaluate(&self, id: NodeId) -> bool {
        let mut visiting = Vec::new();
        self.evaluate_inner(id, &mut visiting)
    }

    fn evaluate_inner(&self, id: NodeId, visiting: &mut Vec<NodeId>) -> bool {
        let Some(node) = self.nodes.get(&id) else {
            return false;
        };
        if visiting.contains(&id) {
            return false;
        }
        if node.kind == NodeKind::Source {
            return node.latched;
        }
        visiting.push(id);
        let inputs: Vec<Option<bool>> = node
            .drivers
            .iter()
            .map(|slot| slot.map(|driver| self.evaluate_inner(driver, visiting)))
            .collect();
        visiting.pop();
        node.kind.apply(&inputs)
    }

    /// Recompute and latch every sink pin's displayed value. This is the
    /// only place sink state is written; gate and source values are never
    /// cached.
    pub fn refresh(&mut self) {
        let sinks: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|n| n.kind == NodeKind::Sink)
            .map(|n| n.id)
            .collect();
        for id in sinks {
            let value = self.evaluate(id);
            if let Some(n) = self.nodes.get_mut(&id) {
                n.latched = value;
            }
        }
    }

    /// First node in placement order whose body contains the point.
    pub fn node_at(&self, x: f64, y: f64) -> Option<&Node> {
        self.nodes.values().find(|n| n.contains_point(x, y))
    }

    /// Every wire currently present, ordered by target placement.
    pub fn wires(&self) -> Vec<Wire> {
        let mut wires = Vec::new();
        for node in self.nodes.values() {
            for (slot, driver) in node.drivers.iter().enumerate() {
                if let Some(driver) = *driver {
                    wires.push(Wire {
                        driver,
                        target: node.id,
                        slot,
                    });
                }
            }
        }
        wires
    }

    /// The wire whose rendered segment passes within the wire hit
    /// distance of the point, if any.
    pub fn wire_at(&self, x: f64, y: f64) -> Option<Wire> {
        let p = Point::new(x, y);
        self.wires().into_iter().find(|wire| {
            match (self.nodes.get(&wire.driver), self.nodes.get(&wire.target)) {
                (Some(driver), Some(target)) => point_near_segment(
                    p,
                    driver.output_terminal(),
                    target.input_terminal(wire.slot),
                ),
                _ => false,
            }
        })
    }
}
