//! Circuit node components.
//!
//! A node is one placed circuit element:
//! - Source pin: a user-toggled boolean input
//! - Sink pin: displays the value of whatever drives it
//! - Gates: AND, OR, NOT, NAND, NOR, XOR
//!
//! Truth rules live on [`NodeKind`]; terminal layout and hit testing live
//! in [`geometry`].

pub mod geometry;

use crate::circuit::NodeId;

/// The kind of a circuit node. Fixed at creation, never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// User-toggled boolean source pin.
    Source,
    /// Display pin; latches its driver's value on refresh.
    Sink,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
}

impl NodeKind {
    /// Every kind, in palette order.
    pub const ALL: [NodeKind; 8] = [
        NodeKind::Source,
        NodeKind::Sink,
        NodeKind::And,
        NodeKind::Or,
        NodeKind::Not,
        NodeKind::Nand,
        NodeKind::Nor,
        NodeKind::Xor,
    ];

    /// Number of driver slots this kind carries: none for a source, one
    /// for a sink or NOT, two for the binary gates.
    pub fn slot_count(&self) -> usize {
        match self {
            NodeKind::Source => 0,
            NodeKind::Sink | NodeKind::Not => 1,
            NodeKind::And
            | NodeKind::Or
            | NodeKind::Nand
            | NodeKind::Nor
            | NodeKind::Xor => 2,
        }
    }

    /// Whether this kind is a logic gate (rectangular body, left-edge
    /// input terminals) as opposed to an I/O pin (circular body, single
    /// terminal).
    pub fn is_gate(&self) -> bool {
        !matches!(self, NodeKind::Source | NodeKind::Sink)
    }

    /// Display label, as rendered on the node body.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Source => "SOURCE",
            NodeKind::Sink => "SINK",
            NodeKind::And => "AND",
            NodeKind::Or => "OR",
            NodeKind::Not => "NOT",
            NodeKind::Nand => "NAND",
            NodeKind::Nor => "NOR",
            NodeKind::Xor => "XOR",
        }
    }

    /// Parse a kind from its palette name.
    pub fn from_str(name: &str) -> Option<NodeKind> {
        match name.to_ascii_lowercase().as_str() {
            "source" | "input" => Some(NodeKind::Source),
            "sink" | "output" => Some(NodeKind::Sink),
            "and" => Some(NodeKind::And),
            "or" => Some(NodeKind::Or),
            "not" => Some(NodeKind::Not),
            "nand" => Some(NodeKind::Nand),
            "nor" => Some(NodeKind::Nor),
            "xor" => Some(NodeKind::Xor),
            _ => None,
        }
    }

    /// The truth rule for this kind, applied to the per-slot driver
    /// values. `None` marks an empty slot.
    ///
    /// Missing drivers are absent contributions, not false inputs: a
    /// half-wired AND is false, a half-wired NAND is true, an unwired NOT
    /// is false. This permissive policy is deliberate; partially wired
    /// gates never error.
    pub fn apply(&self, inputs: &[Option<bool>]) -> bool {
        match self {
            // Source pins read their latched state, never this rule.
            NodeKind::Source => false,
            NodeKind::Sink => inputs.first().copied().flatten().unwrap_or(false),
            NodeKind::And => inputs.iter().all(|i| *i == Some(true)),
            NodeKind::Or => inputs.iter().any(|i| *i == Some(true)),
            NodeKind::Not => inputs
                .first()
                .copied()
                .flatten()
                .map_or(false, |v| !v),
            NodeKind::Nand => !inputs.iter().all(|i| *i == Some(true)),
            NodeKind::Nor => !inputs.iter().any(|i| *i == Some(true)),
            NodeKind::Xor => {
                inputs.iter().all(Option::is_some)
                    && inputs.iter().filter(|i| **i == Some(true)).count() % 2 == 1
            }
        }
    }
}

/// One placed circuit element.
///
/// Position is mutable (dragging) and not part of logical identity. The
/// wiring fields are maintained exclusively by
/// [`CircuitGraph`](crate::circuit::CircuitGraph) so that driver slots and
/// dependent sets stay bidirectionally consistent.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Canvas position of the body center.
    pub x: f64,
    pub y: f64,
    /// Upstream drivers, one per input slot. Length is fixed at
    /// `kind.slot_count()` and never changes; an empty slot is `None`.
    pub drivers: Vec<Option<NodeId>>,
    /// Downstream nodes holding at least one slot referencing this node.
    /// Duplicate-free.
    pub dependents: Vec<NodeId>,
    /// Latched boolean state: the user-set value for source pins, the
    /// last refreshed value for sink pins. Ignored for gates.
    pub latched: bool,
}

impl Node {
    /// Create a node of the given kind at a canvas position.
    pub fn new(id: NodeId, kind: NodeKind, x: f64, y: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            drivers: vec![None; kind.slot_count()],
            dependents: Vec::new(),
            latched: false,
        }
    }

    /// First empty driver slot, if any.
    pub fn first_free_slot(&self) -> Option<usize> {
        self.drivers.iter().position(Option::is_none)
    }

    /// Number of occupied driver slots.
    pub fn occupied_slots(&self) -> usize {
        self.drivers.iter().filter(|d| d.is_some()).count()
    }

    /// Whether any driver slot references `other`.
    pub fn references(&self, other: NodeId) -> bool {
        self.drivers.iter().any(|d| *d == Some(other))
    }
}
